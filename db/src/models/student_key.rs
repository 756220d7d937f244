use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one eventual semester result: `(register_number, semester, branch)`.
///
/// All submissions sharing a key feed the same result record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentKey {
    pub register_number: String,
    pub semester: String,
    pub branch: String,
}

impl StudentKey {
    pub fn new(
        register_number: impl AsRef<str>,
        semester: impl AsRef<str>,
        branch: impl AsRef<str>,
    ) -> Self {
        Self {
            register_number: register_number.as_ref().trim().to_owned(),
            semester: semester.as_ref().trim().to_owned(),
            branch: branch.as_ref().trim().to_owned(),
        }
    }
}

impl fmt::Display for StudentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.register_number, self.semester, self.branch)
    }
}
