//! Country entity for the dialing directory.

use serde::{Deserialize, Serialize};

/// Maximum length of a country code (ISO 3166-1 alpha-2)
pub const COUNTRY_CODE_MAX_LENGTH: usize = 2;

/// A country with its dialing prefixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, unique key
    pub code: String,

    /// International direct dialing prefix (e.g. "00")
    pub idd_prefix: String,

    /// National direct dialing prefix (e.g. "06"), may be empty
    pub ndd_prefix: String,

    /// Country calling code (e.g. "36")
    pub country_call_code: String,

    /// Inactive countries are hidden from listings
    pub active: bool,
}

impl Country {
    /// Creates a new active country
    pub fn new(
        code: impl Into<String>,
        idd_prefix: impl Into<String>,
        ndd_prefix: impl Into<String>,
        country_call_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            idd_prefix: idd_prefix.into(),
            ndd_prefix: ndd_prefix.into(),
            country_call_code: country_call_code.into(),
            active: true,
        }
    }
}
