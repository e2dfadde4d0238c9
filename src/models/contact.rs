//! Contact models: staff assigned to a center and the shared emergency contact.

use serde::{Deserialize, Serialize};

/// A staff member assigned to a voting center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub mobile: String,
}

impl Person {
    /// Create an empty person with a fresh identifier.
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            designation: String::new(),
            mobile: String::new(),
        }
    }
}

/// Editable text fields of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Name,
    Designation,
    Mobile,
}

/// The single emergency contact shown on every screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub mobile: String,
}

impl Default for EmergencyContact {
    fn default() -> Self {
        Self {
            name: "ক্যাম্প কমান্ডার".to_string(),
            mobile: "01712345678".to_string(),
        }
    }
}
