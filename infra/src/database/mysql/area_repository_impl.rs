//! MySQL implementation of the AreaRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use pn_core::domain::entities::{Area, NewArea};
use pn_core::errors::DomainError;
use pn_core::repositories::AreaRepository;
use pn_shared::PageWindow;

use super::{column_error, db_error};

const AREA_COLUMNS: &str =
    "id, country_code, call_number, name, subscriber_number_length, active";

pub struct MySqlAreaRepository {
    pool: MySqlPool,
}

impl MySqlAreaRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_area(row: &MySqlRow) -> Result<Area, DomainError> {
        Ok(Area {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            country_code: row
                .try_get("country_code")
                .map_err(|e| column_error("country_code", e))?,
            call_number: row
                .try_get("call_number")
                .map_err(|e| column_error("call_number", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            subscriber_number_length: row
                .try_get("subscriber_number_length")
                .map_err(|e| column_error("subscriber_number_length", e))?,
            active: row.try_get("active").map_err(|e| column_error("active", e))?,
        })
    }
}

#[async_trait]
impl AreaRepository for MySqlAreaRepository {
    async fn find_active_by_id(&self, id: i64) -> Result<Option<Area>, DomainError> {
        let query = format!(
            "SELECT {} FROM area WHERE id = ? AND active = TRUE LIMIT 1",
            AREA_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find area", e))?;

        row.as_ref().map(Self::row_to_area).transpose()
    }

    async fn find_active_by_country_and_call_number(
        &self,
        country_code: &str,
        call_number: &str,
    ) -> Result<Option<Area>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM area
            WHERE country_code = ? AND call_number = ? AND active = TRUE
            ORDER BY id
            LIMIT 1
            "#,
            AREA_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(country_code)
            .bind(call_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find area by call number", e))?;

        row.as_ref().map(Self::row_to_area).transpose()
    }

    async fn create(&self, area: NewArea) -> Result<i64, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO area (country_code, call_number, name, subscriber_number_length, active)
            VALUES (?, ?, ?, ?, TRUE)
            "#,
        )
        .bind(&area.country_code)
        .bind(&area.call_number)
        .bind(&area.name)
        .bind(area.subscriber_number_length)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert area", e))?;

        Ok(result.last_insert_id() as i64)
    }

    async fn list_active_by_country(
        &self,
        country_code: &str,
        window: PageWindow,
    ) -> Result<Vec<Area>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM area
            WHERE country_code = ? AND active = TRUE
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
            AREA_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(country_code)
            .bind(window.sql_limit())
            .bind(window.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list areas", e))?;

        rows.iter().map(Self::row_to_area).collect()
    }

    async fn deactivate(&self, id: i64) -> Result<bool, DomainError> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM area WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find area", e))?;
        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE area SET active = FALSE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to deactivate area", e))?;

        Ok(true)
    }
}
