use crate::error::Result as DbErrorResult;

use tt_core::Task;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use uuid::Uuid;

pub struct TaskRepository;

impl TaskRepository {
    pub async fn create<'e, E>(executor: E, task: &Task) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO tasks (id, organization_id, project_id, name, created_at)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(task.id.to_string())
        .bind(task.organization_id.to_string())
        .bind(task.project_id.to_string())
        .bind(&task.name)
        .bind(task.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Task>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, organization_id, project_id, name, created_at FROM tasks WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }
}

fn from_row(row: &SqliteRow) -> Task {
    Task {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        organization_id: Uuid::parse_str(&row.get::<String, _>("organization_id")).unwrap(),
        project_id: Uuid::parse_str(&row.get::<String, _>("project_id")).unwrap(),
        name: row.get("name"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
