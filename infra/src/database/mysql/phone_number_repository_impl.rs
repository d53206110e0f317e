//! MySQL implementation of the PhoneNumberRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pn_core::domain::entities::PhoneNumber;
use pn_core::errors::DomainError;
use pn_core::repositories::PhoneNumberRepository;

use super::{column_error, db_error};

pub struct MySqlPhoneNumberRepository {
    pool: MySqlPool,
}

impl MySqlPhoneNumberRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_phone_number(row: &MySqlRow) -> Result<PhoneNumber, DomainError> {
        Ok(PhoneNumber {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            area_id: row.try_get("area_id").map_err(|e| column_error("area_id", e))?,
            subscriber_number: row
                .try_get("subscriber_number")
                .map_err(|e| column_error("subscriber_number", e))?,
            extension: row
                .try_get("extension")
                .map_err(|e| column_error("extension", e))?,
        })
    }
}

#[async_trait]
impl PhoneNumberRepository for MySqlPhoneNumberRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<PhoneNumber>, DomainError> {
        let row = sqlx::query(
            "SELECT id, area_id, subscriber_number, extension FROM phone_number WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find phone number", e))?;

        row.as_ref().map(Self::row_to_phone_number).transpose()
    }

    async fn create(
        &self,
        area_id: i64,
        subscriber_number: &str,
        extension: Option<&str>,
    ) -> Result<i64, DomainError> {
        let result = sqlx::query(
            "INSERT INTO phone_number (area_id, subscriber_number, extension) VALUES (?, ?, ?)",
        )
        .bind(area_id)
        .bind(subscriber_number)
        .bind(extension)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert phone number", e))?;

        Ok(result.last_insert_id() as i64)
    }

    async fn update(&self, phone_number: &PhoneNumber) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE phone_number
            SET area_id = ?, subscriber_number = ?, extension = ?
            WHERE id = ?
            "#,
        )
        .bind(phone_number.area_id)
        .bind(&phone_number.subscriber_number)
        .bind(&phone_number.extension)
        .bind(phone_number.id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update phone number", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        // Zero affected rows also means "nothing changed" unless the server
        // reports found rows
        Ok(self.find_by_id(phone_number.id).await?.is_some())
    }
}
