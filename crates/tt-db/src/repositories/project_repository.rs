use crate::error::Result as DbErrorResult;

use tt_core::Project;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use uuid::Uuid;

pub struct ProjectRepository;

impl ProjectRepository {
    pub async fn create<'e, E>(executor: E, project: &Project) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO projects (id, organization_id, client_id, name, billable_rate, created_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(project.id.to_string())
        .bind(project.organization_id.to_string())
        .bind(project.client_id.map(|id| id.to_string()))
        .bind(&project.name)
        .bind(project.billable_rate)
        .bind(project.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Project>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, organization_id, client_id, name, billable_rate, created_at \
             FROM projects WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }
}

fn from_row(row: &SqliteRow) -> Project {
    Project {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        organization_id: Uuid::parse_str(&row.get::<String, _>("organization_id")).unwrap(),
        client_id: row
            .get::<Option<String>, _>("client_id")
            .map(|id| Uuid::parse_str(&id).unwrap()),
        name: row.get("name"),
        billable_rate: row.get("billable_rate"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
