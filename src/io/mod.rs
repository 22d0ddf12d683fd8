pub mod csv;
pub mod submission;

pub use self::csv::{GeometryFormat, write_matrix, write_points, write_scenarios};
pub use submission::{GridCenter, GridSubmission, PropertyType, SubmissionAck};
