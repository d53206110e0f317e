//! MySQL implementation of the VerificationRepository trait.
//!
//! A verification attempt writes one `verifiable_phone` row and one
//! `phone_verification_request` row in a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pn_core::domain::entities::{
    PhoneVerificationRequest, VerifiablePhone, VerificationChannel, VerificationLink,
};
use pn_core::errors::DomainError;
use pn_core::repositories::VerificationRepository;

use super::{column_error, db_error};

pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_verifiable_phone(row: &MySqlRow) -> Result<VerifiablePhone, DomainError> {
        Ok(VerifiablePhone {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            phone_number_id: row
                .try_get("phone_number_id")
                .map_err(|e| column_error("phone_number_id", e))?,
            verifiable_data_id: row
                .try_get("verifiable_data_id")
                .map_err(|e| column_error("verifiable_data_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }

    fn row_to_request(row: &MySqlRow) -> Result<PhoneVerificationRequest, DomainError> {
        let channel: String = row.try_get("channel").map_err(|e| column_error("channel", e))?;

        Ok(PhoneVerificationRequest {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            verifiable_phone_id: row
                .try_get("verifiable_phone_id")
                .map_err(|e| column_error("verifiable_phone_id", e))?,
            verification_request_id: row
                .try_get("verification_request_id")
                .map_err(|e| column_error("verification_request_id", e))?,
            channel: channel
                .parse::<VerificationChannel>()
                .map_err(|message| DomainError::Internal { message })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn create_link(
        &self,
        phone_number_id: i64,
        verifiable_data_id: i64,
        verification_request_id: i64,
        channel: VerificationChannel,
    ) -> Result<VerificationLink, DomainError> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let phone = sqlx::query(
            r#"
            INSERT INTO verifiable_phone (phone_number_id, verifiable_data_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(phone_number_id)
        .bind(verifiable_data_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert verifiable phone", e))?;
        let verifiable_phone_id = phone.last_insert_id() as i64;

        let request = sqlx::query(
            r#"
            INSERT INTO phone_verification_request
                (verifiable_phone_id, verification_request_id, channel, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(verifiable_phone_id)
        .bind(verification_request_id)
        .bind(channel.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert verification request", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit verification link", e))?;

        Ok(VerificationLink {
            verifiable_phone: VerifiablePhone {
                id: verifiable_phone_id,
                phone_number_id,
                verifiable_data_id,
                created_at: now,
            },
            request: PhoneVerificationRequest {
                id: request.last_insert_id() as i64,
                verifiable_phone_id,
                verification_request_id,
                channel,
                created_at: now,
            },
        })
    }

    async fn find_verifiable_phone_by_id(
        &self,
        id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number_id, verifiable_data_id, created_at
            FROM verifiable_phone
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find verifiable phone", e))?;

        row.as_ref().map(Self::row_to_verifiable_phone).transpose()
    }

    async fn find_by_verifiable_data_id(
        &self,
        verifiable_data_id: i64,
    ) -> Result<Option<VerifiablePhone>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, phone_number_id, verifiable_data_id, created_at
            FROM verifiable_phone
            WHERE verifiable_data_id = ?
            LIMIT 1
            "#,
        )
        .bind(verifiable_data_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find verifiable phone by data id", e))?;

        row.as_ref().map(Self::row_to_verifiable_phone).transpose()
    }

    async fn find_requests_by_verifiable_phone_id(
        &self,
        verifiable_phone_id: i64,
    ) -> Result<Vec<PhoneVerificationRequest>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, verifiable_phone_id, verification_request_id, channel, created_at
            FROM phone_verification_request
            WHERE verifiable_phone_id = ?
            ORDER BY id
            "#,
        )
        .bind(verifiable_phone_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list verification requests", e))?;

        rows.iter().map(Self::row_to_request).collect()
    }
}
