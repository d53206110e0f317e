//! Dialing area entity.

use serde::{Deserialize, Serialize};

/// A dialing area inside a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Store assigned identifier
    pub id: i64,

    /// Code of the owning country
    pub country_code: String,

    /// Area call number (e.g. "30")
    pub call_number: String,

    /// Descriptive name (e.g. "T-mobile")
    pub name: Option<String>,

    /// Required subscriber number length, in characters
    pub subscriber_number_length: i32,

    /// Inactive areas are hidden from lookups and listings
    pub active: bool,
}

/// Values needed to insert a new area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArea {
    pub country_code: String,
    pub call_number: String,
    pub name: Option<String>,
    pub subscriber_number_length: i32,
}

impl Area {
    /// Whether a subscriber number fits this area.
    ///
    /// Counts characters, not bytes.
    pub fn accepts_subscriber_number(&self, subscriber_number: &str) -> bool {
        subscriber_number.chars().count() == self.subscriber_number_length as usize
    }
}
