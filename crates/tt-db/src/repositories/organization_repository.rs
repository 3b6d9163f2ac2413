use crate::error::Result as DbErrorResult;

use tt_core::Organization;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use uuid::Uuid;

pub struct OrganizationRepository;

impl OrganizationRepository {
    pub async fn create<'e, E>(executor: E, organization: &Organization) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO organizations (id, name, currency, billable_rate, created_at)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(organization.id.to_string())
        .bind(&organization.name)
        .bind(&organization.currency)
        .bind(organization.billable_rate)
        .bind(organization.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Organization>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, name, currency, billable_rate, created_at FROM organizations WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }
}

fn from_row(row: &SqliteRow) -> Organization {
    Organization {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        name: row.get("name"),
        currency: row.get("currency"),
        billable_rate: row.get("billable_rate"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
