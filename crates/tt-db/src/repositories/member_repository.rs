use crate::error::Result as DbErrorResult;

use tt_core::Member;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

pub struct MemberRepository;

impl MemberRepository {
    pub async fn create<'e, E>(executor: E, member: &Member) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO members (id, organization_id, user_id, role, billable_rate, created_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(member.id.to_string())
        .bind(member.organization_id.to_string())
        .bind(member.user_id.to_string())
        .bind(&member.role)
        .bind(member.billable_rate)
        .bind(member.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Member>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, organization_id, user_id, role, billable_rate, created_at \
             FROM members WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    pub async fn find_by_user_and_organization<'e, E>(
        executor: E,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> DbErrorResult<Option<Member>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id, organization_id, user_id, role, billable_rate, created_at \
             FROM members WHERE user_id = ? AND organization_id = ?",
        )
        .bind(user_id.to_string())
        .bind(organization_id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    /// The subset of `ids` that are members of the organization. Callers
    /// look up each requested id in the result to spot cross-organization
    /// references.
    pub async fn filter_ids_in_organization<'e, E>(
        executor: E,
        ids: &[Uuid],
        organization_id: Uuid,
    ) -> DbErrorResult<Vec<Uuid>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id FROM members WHERE organization_id = ");
        query.push_bind(organization_id.to_string());
        query.push(" AND id IN (");
        let mut values = query.separated(", ");
        for id in ids {
            values.push_bind(id.to_string());
        }
        query.push(")");

        let rows = query.build().fetch_all(executor).await?;

        Ok(rows
            .iter()
            .map(|row| Uuid::parse_str(&row.get::<String, _>("id")).unwrap())
            .collect())
    }
}

fn from_row(row: &SqliteRow) -> Member {
    Member {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        organization_id: Uuid::parse_str(&row.get::<String, _>("organization_id")).unwrap(),
        user_id: Uuid::parse_str(&row.get::<String, _>("user_id")).unwrap(),
        role: row.get("role"),
        billable_rate: row.get("billable_rate"),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
    }
}
