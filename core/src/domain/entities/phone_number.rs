//! Subscriber phone numbers and their dialable form.

use serde::{Deserialize, Serialize};
use std::fmt;

use pn_shared::phone::dialable_destination;

use super::{Area, Country};

/// A subscriber number registered under an area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Store assigned identifier
    pub id: i64,

    /// Owning area
    pub area_id: i64,

    /// Subscriber number, length fixed by the area
    pub subscriber_number: String,

    /// Optional extension
    pub extension: Option<String>,
}

/// Fully composed phone number, ready to be dialed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallablePhoneNumber {
    pub idd_prefix: String,
    pub ndd_prefix: String,
    pub country_call_code: String,
    pub area_call_number: String,
    pub subscriber_number: String,
    pub extension: Option<String>,
}

impl CallablePhoneNumber {
    /// Compose from the phone number and its area and country
    pub fn compose(country: &Country, area: &Area, phone: &PhoneNumber) -> Self {
        Self {
            idd_prefix: country.idd_prefix.clone(),
            ndd_prefix: country.ndd_prefix.clone(),
            country_call_code: country.country_call_code.clone(),
            area_call_number: area.call_number.clone(),
            subscriber_number: phone.subscriber_number.clone(),
            extension: phone.extension.clone(),
        }
    }

    /// International destination, e.g. `+36301234567`.
    ///
    /// The extension is not part of the destination.
    pub fn international_destination(&self) -> String {
        dialable_destination(
            &self.country_call_code,
            &self.area_call_number,
            &self.subscriber_number,
        )
    }
}

impl fmt::Display for CallablePhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.idd_prefix,
            self.ndd_prefix,
            self.country_call_code,
            self.area_call_number,
            self.subscriber_number
        )?;
        if let Some(extension) = &self.extension {
            write!(f, "/{}", extension)?;
        }
        Ok(())
    }
}
