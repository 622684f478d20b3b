use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Formatted taxpayer number, e.g. `123.456.789-01`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct NationalId(String);

impl NationalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
