use crate::error::Result as DbErrorResult;

use tt_core::Client;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use uuid::Uuid;

pub struct ClientRepository;

impl ClientRepository {
    pub async fn create<'e, E>(executor: E, client: &Client) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO clients (id, organization_id, name, created_at)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(client.id.to_string())
        .bind(client.organization_id.to_string())
        .bind(&client.name)
        .bind(client.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Client>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, organization_id, name, created_at FROM clients WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }
}

fn from_row(row: &SqliteRow) -> Client {
    Client {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        organization_id: Uuid::parse_str(&row.get::<String, _>("organization_id")).unwrap(),
        name: row.get("name"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
