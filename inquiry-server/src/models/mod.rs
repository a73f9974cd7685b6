mod requests;
mod submission;

pub use requests::*;
pub use submission::SubmissionRecord;
