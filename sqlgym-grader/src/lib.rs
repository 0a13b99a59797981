pub mod compare;
pub mod errors;
pub mod feedback;
pub mod grade;
pub mod sandbox;

pub use compare::results_match;
pub use errors::{FeedbackError, GraderError, Result};
pub use feedback::{Feedback, FeedbackContext, FeedbackGenerator};
pub use grade::{grade, GradeOutcome};
pub use sandbox::{ResultSet, Sandbox, SqlValue};
