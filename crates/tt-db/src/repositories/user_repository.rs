use crate::error::Result as DbErrorResult;

use tt_core::User;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(executor: E, user: &User) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO users (id, name, email, timezone, week_start, created_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.timezone)
        .bind(&user.week_start)
        .bind(user.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, name, email, timezone, week_start, created_at FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }
}

fn from_row(row: &SqliteRow) -> User {
    User {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        name: row.get("name"),
        email: row.get("email"),
        timezone: row.get("timezone"),
        week_start: row.get("week_start"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
