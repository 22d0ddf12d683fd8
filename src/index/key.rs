use crate::coord::Coordinate;
use crate::core::constants::KEY_SCALE;
use crate::error::CoverageError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use geo_types::Point;

/// Key format version byte.
pub const KEY_VERSION: u8 = 1;

const ENCODED_LEN: usize = 18;

/// Quantized identity of a sample point.
///
/// Two points whose coordinates agree to six decimal places (~11 cm) share a
/// key, and the sampler keeps only the first of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleKey {
    lng_e6: i64,
    lat_e6: i64,
}

impl SampleKey {
    pub fn from_coord(coord: &impl Coordinate) -> Self {
        Self {
            lng_e6: (coord.lng() * KEY_SCALE).round() as i64,
            lat_e6: (coord.lat() * KEY_SCALE).round() as i64,
        }
    }

    /// The quantized position as a point.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng_e6 as f64 / KEY_SCALE, self.lat_e6 as f64 / KEY_SCALE)
    }

    /// Encodes the key as a URL-safe Base64 identifier.
    ///
    /// # Binary Format
    ///
    /// | Offset | Size | Field     | Description                                 |
    /// |--------|------|-----------|---------------------------------------------|
    /// | 0      | 1    | Version   | Key format version (currently 1)            |
    /// | 1      | 8    | Longitude | degrees × 10⁶ as big-endian `i64`           |
    /// | 9      | 8    | Latitude  | degrees × 10⁶ as big-endian `i64`           |
    /// | 17     | 1    | Checksum  | Wrapping sum of bytes 0-16                  |
    ///
    /// # Example
    /// ```
    /// use coverage_cost::SampleKey;
    ///
    /// let key = SampleKey::from_coord(&(9.19, 45.464));
    /// let id = key.encode();
    /// assert_eq!(SampleKey::decode(&id).unwrap(), key);
    /// ```
    pub fn encode(&self) -> String {
        let mut binary_data = Vec::with_capacity(ENCODED_LEN);
        binary_data.push(KEY_VERSION);
        binary_data.extend_from_slice(&self.lng_e6.to_be_bytes());
        binary_data.extend_from_slice(&self.lat_e6.to_be_bytes());

        let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        binary_data.push(checksum);

        URL_SAFE_NO_PAD.encode(&binary_data)
    }

    /// Decodes an identifier produced by [`SampleKey::encode`].
    ///
    /// # Errors
    ///
    /// [`CoverageError::InvalidKey`] for bad Base64, wrong length, checksum
    /// mismatch or an unknown version byte.
    pub fn decode(identifier: &str) -> Result<Self, CoverageError> {
        let binary_data = URL_SAFE_NO_PAD
            .decode(identifier)
            .map_err(|e| CoverageError::InvalidKey(e.to_string()))?;

        if binary_data.len() != ENCODED_LEN {
            return Err(CoverageError::InvalidKey(format!(
                "expected {} bytes, got {}",
                ENCODED_LEN,
                binary_data.len()
            )));
        }

        let (data, checksum_bytes) = binary_data.split_at(ENCODED_LEN - 1);
        let calculated: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        if calculated != checksum_bytes[0] {
            return Err(CoverageError::InvalidKey("checksum mismatch".to_string()));
        }

        if data[0] != KEY_VERSION {
            return Err(CoverageError::InvalidKey(format!(
                "unsupported version {}",
                data[0]
            )));
        }

        let lng_bytes: [u8; 8] = data[1..9]
            .try_into()
            .map_err(|_| CoverageError::InvalidKey("truncated longitude".to_string()))?;
        let lat_bytes: [u8; 8] = data[9..17]
            .try_into()
            .map_err(|_| CoverageError::InvalidKey("truncated latitude".to_string()))?;

        Ok(Self {
            lng_e6: i64::from_be_bytes(lng_bytes),
            lat_e6: i64::from_be_bytes(lat_bytes),
        })
    }
}
