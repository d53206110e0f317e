//! MySQL implementation of the CountryRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pn_core::domain::entities::{Country, COUNTRY_CODE_MAX_LENGTH};
use pn_core::errors::DomainError;
use pn_core::repositories::CountryRepository;
use pn_shared::PageWindow;

use super::{column_error, db_error};

const COUNTRY_COLUMNS: &str = "code, idd_prefix, ndd_prefix, country_call_code, active";

/// MySQL implementation of CountryRepository
///
/// Listing order follows the `position` auto-increment column, i.e.
/// insertion order.
pub struct MySqlCountryRepository {
    pool: MySqlPool,
}

impl MySqlCountryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_country(row: &MySqlRow) -> Result<Country, DomainError> {
        Ok(Country {
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            idd_prefix: row.try_get("idd_prefix").map_err(|e| column_error("idd_prefix", e))?,
            ndd_prefix: row.try_get("ndd_prefix").map_err(|e| column_error("ndd_prefix", e))?,
            country_call_code: row
                .try_get("country_call_code")
                .map_err(|e| column_error("country_call_code", e))?,
            active: row.try_get("active").map_err(|e| column_error("active", e))?,
        })
    }
}

#[async_trait]
impl CountryRepository for MySqlCountryRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, DomainError> {
        let query = format!("SELECT {} FROM country WHERE code = ? LIMIT 1", COUNTRY_COLUMNS);

        let row = sqlx::query(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find country", e))?;

        row.as_ref().map(Self::row_to_country).transpose()
    }

    async fn create(&self, country: Country) -> Result<Country, DomainError> {
        // Non-strict SQL modes would silently truncate
        if country.code.chars().count() > COUNTRY_CODE_MAX_LENGTH {
            return Err(DomainError::Database {
                message: format!("Data too long for column 'code': {}", country.code),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO country (code, idd_prefix, ndd_prefix, country_call_code, active)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&country.code)
        .bind(&country.idd_prefix)
        .bind(&country.ndd_prefix)
        .bind(&country.country_call_code)
        .bind(country.active)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert country", e))?;

        Ok(country)
    }

    async fn list_active(&self, window: PageWindow) -> Result<Vec<Country>, DomainError> {
        let query = format!(
            "SELECT {} FROM country WHERE active = TRUE ORDER BY position LIMIT ? OFFSET ?",
            COUNTRY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(window.sql_limit())
            .bind(window.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list countries", e))?;

        rows.iter().map(Self::row_to_country).collect()
    }

    async fn deactivate(&self, code: &str) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let exists = sqlx::query("SELECT code FROM country WHERE code = ? FOR UPDATE")
            .bind(code)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to lock country", e))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        sqlx::query("UPDATE country SET active = FALSE WHERE code = ?")
            .bind(code)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to deactivate country", e))?;

        let areas = sqlx::query("UPDATE area SET active = FALSE WHERE country_code = ?")
            .bind(code)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to deactivate areas", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit country deactivation", e))?;

        tracing::info!(
            event = "country_deactivated",
            country_code = %code,
            areas = areas.rows_affected(),
            "Country deactivated"
        );
        Ok(true)
    }
}
