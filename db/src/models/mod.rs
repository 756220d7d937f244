pub mod lecturer;
pub mod result;
pub mod student_key;
pub mod submission;

pub use lecturer::Entity as Lecturer;
pub use result::Entity as StudentResult;
pub use student_key::StudentKey;
pub use submission::Entity as Submission;
