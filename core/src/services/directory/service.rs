//! Directory service for countries, areas and phone numbers

use std::sync::Arc;

use pn_shared::PageWindow;

use crate::domain::entities::{Area, CallablePhoneNumber, Country, NewArea, PhoneNumber};
use crate::errors::{DirectoryError, DomainResult, ValidationError};
use crate::repositories::{
    AreaRepository, CountryRepository, PhoneNumberRepository, VerificationRepository,
};

/// Directory service over the country, area and phone number stores
///
/// Arguments coming from callers are `Option`s so a missing value can be
/// reported as an invalid argument instead of being defaulted.
pub struct DirectoryService<C, A, P, V>
where
    C: CountryRepository,
    A: AreaRepository,
    P: PhoneNumberRepository,
    V: VerificationRepository,
{
    country_repository: Arc<C>,
    area_repository: Arc<A>,
    phone_number_repository: Arc<P>,
    verification_repository: Arc<V>,
}

impl<C, A, P, V> DirectoryService<C, A, P, V>
where
    C: CountryRepository,
    A: AreaRepository,
    P: PhoneNumberRepository,
    V: VerificationRepository,
{
    /// Create a new directory service
    pub fn new(
        country_repository: Arc<C>,
        area_repository: Arc<A>,
        phone_number_repository: Arc<P>,
        verification_repository: Arc<V>,
    ) -> Self {
        Self {
            country_repository,
            area_repository,
            phone_number_repository,
            verification_repository,
        }
    }

    // ----- countries -----

    /// Look up a country by code. An empty or unknown code yields `None`.
    pub async fn get_country(&self, code: &str) -> DomainResult<Option<Country>> {
        if code.is_empty() {
            return Ok(None);
        }
        self.country_repository.find_by_code(code).await
    }

    /// Register a new, active country
    ///
    /// # Errors
    ///
    /// * `ValidationError::RequiredField` - any argument is missing
    /// * `DirectoryError::DuplicateCountry` - the code is already taken
    /// * `DomainError::Database` - the store rejected the row (e.g. code too long)
    pub async fn save_country(
        &self,
        code: Option<&str>,
        idd_prefix: Option<&str>,
        ndd_prefix: Option<&str>,
        country_call_code: Option<&str>,
    ) -> DomainResult<Country> {
        let code = required("code", code)?;
        let idd_prefix = required("idd_prefix", idd_prefix)?;
        let ndd_prefix = required("ndd_prefix", ndd_prefix)?;
        let country_call_code = required("country_call_code", country_call_code)?;

        if self.country_repository.find_by_code(code).await?.is_some() {
            return Err(DirectoryError::DuplicateCountry {
                code: code.to_string(),
            }
            .into());
        }

        let country = self
            .country_repository
            .create(Country::new(code, idd_prefix, ndd_prefix, country_call_code))
            .await?;

        tracing::info!(
            country_code = %country.code,
            event = "country_saved",
            "Country saved"
        );
        Ok(country)
    }

    /// Active countries in insertion order
    ///
    /// A negative offset or limit gives an empty list.
    pub async fn list_active_countries(
        &self,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> DomainResult<Vec<Country>> {
        match PageWindow::from_bounds(offset, limit) {
            Some(window) => self.country_repository.list_active(window).await,
            None => Ok(Vec::new()),
        }
    }

    /// Deactivate a country and every area under it
    pub async fn deactivate_country(&self, code: &str) -> DomainResult<()> {
        if !self.country_repository.deactivate(code).await? {
            return Err(DirectoryError::NoSuchCountry {
                code: code.to_string(),
            }
            .into());
        }
        tracing::info!(country_code = code, event = "country_deactivated", "Country deactivated");
        Ok(())
    }

    // ----- areas -----

    pub async fn get_area_by_id(&self, area_id: i64) -> DomainResult<Option<Area>> {
        self.area_repository.find_active_by_id(area_id).await
    }

    pub async fn get_active_area_by_country_and_call_number(
        &self,
        country_code: Option<&str>,
        call_number: Option<&str>,
    ) -> DomainResult<Option<Area>> {
        let country_code = required("country_code", country_code)?;
        let call_number = required("call_number", call_number)?;
        self.area_repository
            .find_active_by_country_and_call_number(country_code, call_number)
            .await
    }

    /// Register a new active area and return its id
    ///
    /// Checks run in this order: missing arguments, subscriber number
    /// length, duplicate active (country, call number) pair.
    pub async fn save_area(
        &self,
        country_code: Option<&str>,
        call_number: Option<&str>,
        name: Option<&str>,
        subscriber_number_length: i32,
    ) -> DomainResult<i64> {
        let country_code = required("country_code", country_code)?;
        let call_number = required("call_number", call_number)?;

        if subscriber_number_length < 1 {
            return Err(DirectoryError::NonPositiveSubscriberNumberLength {
                length: subscriber_number_length,
            }
            .into());
        }

        if self
            .area_repository
            .find_active_by_country_and_call_number(country_code, call_number)
            .await?
            .is_some()
        {
            return Err(DirectoryError::DuplicateSelectableArea {
                country_code: country_code.to_string(),
                call_number: call_number.to_string(),
            }
            .into());
        }

        let area_id = self
            .area_repository
            .create(NewArea {
                country_code: country_code.to_string(),
                call_number: call_number.to_string(),
                name: name.map(str::to_string),
                subscriber_number_length,
            })
            .await?;

        tracing::info!(
            area_id = area_id,
            country_code = country_code,
            call_number = call_number,
            event = "area_saved",
            "Area saved"
        );
        Ok(area_id)
    }

    pub async fn list_active_areas_by_country(
        &self,
        country_code: Option<&str>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> DomainResult<Vec<Area>> {
        let country_code = required("country_code", country_code)?;
        match PageWindow::from_bounds(offset, limit) {
            Some(window) => {
                self.area_repository
                    .list_active_by_country(country_code, window)
                    .await
            }
            None => Ok(Vec::new()),
        }
    }

    /// Deactivate an area. Its (country, call number) pair becomes free.
    pub async fn deactivate_area(&self, area_id: i64) -> DomainResult<()> {
        if !self.area_repository.deactivate(area_id).await? {
            return Err(DirectoryError::NoSuchArea { area_id }.into());
        }
        tracing::info!(area_id = area_id, event = "area_deactivated", "Area deactivated");
        Ok(())
    }

    // ----- phone numbers -----

    /// Register a subscriber number under an active area and return its id
    pub async fn save_phone_number(
        &self,
        area_id: i64,
        subscriber_number: Option<&str>,
        extension: Option<&str>,
    ) -> DomainResult<i64> {
        let subscriber_number = required("subscriber_number", subscriber_number)?;
        self.check_subscriber_number(area_id, subscriber_number)
            .await?;

        let id = self
            .phone_number_repository
            .create(area_id, subscriber_number, extension)
            .await?;

        tracing::info!(
            phone_number_id = id,
            area_id = area_id,
            event = "phone_number_saved",
            "Phone number saved"
        );
        Ok(id)
    }

    /// Replace the area, subscriber number and extension of a phone number
    pub async fn update_phone_number(
        &self,
        phone_number_id: i64,
        area_id: i64,
        subscriber_number: Option<&str>,
        extension: Option<&str>,
    ) -> DomainResult<()> {
        let subscriber_number = required("subscriber_number", subscriber_number)?;

        if self
            .phone_number_repository
            .find_by_id(phone_number_id)
            .await?
            .is_none()
        {
            return Err(DirectoryError::NoSuchPhoneNumber { phone_number_id }.into());
        }

        self.check_subscriber_number(area_id, subscriber_number)
            .await?;

        let updated = PhoneNumber {
            id: phone_number_id,
            area_id,
            subscriber_number: subscriber_number.to_string(),
            extension: extension.map(str::to_string),
        };
        if !self.phone_number_repository.update(&updated).await? {
            return Err(DirectoryError::NoSuchPhoneNumber { phone_number_id }.into());
        }

        tracing::info!(
            phone_number_id = phone_number_id,
            area_id = area_id,
            event = "phone_number_updated",
            "Phone number updated"
        );
        Ok(())
    }

    /// Compose the dialable form of a phone number
    ///
    /// `None` when the number is unknown or its area or country is inactive.
    pub async fn get_callable_phone_number(
        &self,
        phone_number_id: i64,
    ) -> DomainResult<Option<CallablePhoneNumber>> {
        let Some(phone) = self
            .phone_number_repository
            .find_by_id(phone_number_id)
            .await?
        else {
            return Ok(None);
        };
        let Some(area) = self.area_repository.find_active_by_id(phone.area_id).await? else {
            return Ok(None);
        };
        let Some(country) = self
            .country_repository
            .find_by_code(&area.country_code)
            .await?
            .filter(|c| c.active)
        else {
            return Ok(None);
        };

        Ok(Some(CallablePhoneNumber::compose(&country, &area, &phone)))
    }

    /// Compose the dialable form of the phone behind a verifiable phone
    pub async fn get_callable_phone_number_by_verifiable_id(
        &self,
        verifiable_phone_id: i64,
    ) -> DomainResult<Option<CallablePhoneNumber>> {
        match self
            .verification_repository
            .find_verifiable_phone_by_id(verifiable_phone_id)
            .await?
        {
            Some(verifiable_phone) => {
                self.get_callable_phone_number(verifiable_phone.phone_number_id)
                    .await
            }
            None => Ok(None),
        }
    }

    async fn check_subscriber_number(
        &self,
        area_id: i64,
        subscriber_number: &str,
    ) -> DomainResult<Area> {
        let area = self
            .area_repository
            .find_active_by_id(area_id)
            .await?
            .ok_or(DirectoryError::NoSuchArea { area_id })?;

        if !area.accepts_subscriber_number(subscriber_number) {
            return Err(DirectoryError::InvalidPhoneNumber {
                area_id,
                expected: area.subscriber_number_length,
                actual: subscriber_number.chars().count(),
            }
            .into());
        }
        Ok(area)
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    value.ok_or_else(|| ValidationError::required(field))
}
