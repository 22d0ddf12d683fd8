mod key;

pub use key::{KEY_VERSION, SampleKey};
