use crate::error::Result as DbErrorResult;

use tt_core::TimeEntry;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

const ENTRY_COLUMNS: &str = "id, organization_id, member_id, project_id, task_id, client_id, \
     description, billable, billable_rate, started_at, ended_at, tags, \
     created_at, updated_at, deleted_at";

/// Storage-level listing filter. All present criteria are ANDed.
///
/// An empty id vector is an impossible criterion and matches nothing;
/// `None` leaves the dimension unconstrained. `start`/`end` bound the
/// entry's start instant, so a running entry started inside the range is
/// included.
#[derive(Debug, Clone)]
pub struct TimeEntryFilter {
    pub organization_id: Uuid,
    pub member_ids: Option<Vec<Uuid>>,
    pub project_ids: Option<Vec<Uuid>>,
    pub task_ids: Option<Vec<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,
    pub active: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl TimeEntryFilter {
    pub fn new(organization_id: Uuid) -> Self {
        Self {
            organization_id,
            member_ids: None,
            project_ids: None,
            task_ids: None,
            tag_ids: None,
            active: None,
            start: None,
            end: None,
            limit: None,
        }
    }
}

pub struct TimeEntryRepository;

impl TimeEntryRepository {
    pub async fn create<'e, E>(executor: E, entry: &TimeEntry) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO time_entries (
                  id, organization_id, member_id, project_id, task_id, client_id,
                  description, billable, billable_rate, started_at, ended_at, tags,
                  created_at, updated_at, deleted_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.organization_id.to_string())
        .bind(entry.member_id.to_string())
        .bind(entry.project_id.map(|id| id.to_string()))
        .bind(entry.task_id.map(|id| id.to_string()))
        .bind(entry.client_id.map(|id| id.to_string()))
        .bind(&entry.description)
        .bind(entry.billable)
        .bind(entry.billable_rate)
        .bind(entry.start.timestamp())
        .bind(entry.end.map(|dt| dt.timestamp()))
        .bind(serialize_tags(&entry.tags))
        .bind(entry.created_at.timestamp())
        .bind(entry.updated_at.timestamp())
        .bind(entry.deleted_at.map(|dt| dt.timestamp()))
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<TimeEntry>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    /// The member's running entry, if any. The schema caps this at one.
    pub async fn find_running<'e, E>(
        executor: E,
        member_id: Uuid,
    ) -> DbErrorResult<Option<TimeEntry>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries \
             WHERE member_id = ? AND ended_at IS NULL AND deleted_at IS NULL"
        ))
        .bind(member_id.to_string())
        .fetch_optional(executor)
        .await?;

        Ok(row.as_ref().map(from_row))
    }

    /// Filtered listing, newest start first; ties on the start instant
    /// keep persisted order.
    pub async fn list<'e, E>(executor: E, filter: &TimeEntryFilter) -> DbErrorResult<Vec<TimeEntry>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries \
             WHERE deleted_at IS NULL AND organization_id = "
        ));
        query.push_bind(filter.organization_id.to_string());

        if let Some(ids) = &filter.member_ids {
            push_id_filter(&mut query, "member_id", ids);
        }
        if let Some(ids) = &filter.project_ids {
            push_id_filter(&mut query, "project_id", ids);
        }
        if let Some(ids) = &filter.task_ids {
            push_id_filter(&mut query, "task_id", ids);
        }
        if let Some(ids) = &filter.tag_ids {
            push_tag_filter(&mut query, ids);
        }
        if let Some(active) = filter.active {
            query.push(if active {
                " AND ended_at IS NULL"
            } else {
                " AND ended_at IS NOT NULL"
            });
        }
        if let Some(start) = filter.start {
            query.push(" AND started_at >= ");
            query.push_bind(start.timestamp());
        }
        if let Some(end) = filter.end {
            query.push(" AND started_at <= ");
            query.push_bind(end.timestamp());
        }

        query.push(" ORDER BY started_at DESC, rowid ASC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let rows = query.build().fetch_all(executor).await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn update<'e, E>(executor: E, entry: &TimeEntry) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
              UPDATE time_entries
              SET member_id = ?, project_id = ?, task_id = ?, client_id = ?,
                  description = ?, billable = ?, billable_rate = ?,
                  started_at = ?, ended_at = ?, tags = ?, updated_at = ?
              WHERE id = ? AND deleted_at IS NULL
              "#,
        )
        .bind(entry.member_id.to_string())
        .bind(entry.project_id.map(|id| id.to_string()))
        .bind(entry.task_id.map(|id| id.to_string()))
        .bind(entry.client_id.map(|id| id.to_string()))
        .bind(&entry.description)
        .bind(entry.billable)
        .bind(entry.billable_rate)
        .bind(entry.start.timestamp())
        .bind(entry.end.map(|dt| dt.timestamp()))
        .bind(serialize_tags(&entry.tags))
        .bind(entry.updated_at.timestamp())
        .bind(entry.id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn soft_delete<'e, E>(
        executor: E,
        id: Uuid,
        deleted_at: DateTime<Utc>,
    ) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE time_entries SET deleted_at = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deleted_at.timestamp())
        .bind(deleted_at.timestamp())
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }
}

fn push_id_filter(query: &mut QueryBuilder<'_, Sqlite>, column: &str, ids: &[Uuid]) {
    if ids.is_empty() {
        query.push(" AND 1 = 0");
        return;
    }
    query.push(format!(" AND {column} IN ("));
    let mut values = query.separated(", ");
    for id in ids {
        values.push_bind(id.to_string());
    }
    query.push(")");
}

/// Any-of match against the JSON tag array column.
fn push_tag_filter(query: &mut QueryBuilder<'_, Sqlite>, ids: &[Uuid]) {
    if ids.is_empty() {
        query.push(" AND 1 = 0");
        return;
    }
    query
        .push(" AND EXISTS (SELECT 1 FROM json_each(time_entries.tags) WHERE json_each.value IN (");
    let mut values = query.separated(", ");
    for id in ids {
        values.push_bind(id.to_string());
    }
    query.push("))");
}

fn serialize_tags(tags: &[Uuid]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

fn from_row(row: &SqliteRow) -> TimeEntry {
    TimeEntry {
        id: Uuid::parse_str(&row.get::<String, _>("id")).unwrap(),
        organization_id: Uuid::parse_str(&row.get::<String, _>("organization_id")).unwrap(),
        member_id: Uuid::parse_str(&row.get::<String, _>("member_id")).unwrap(),
        project_id: row
            .get::<Option<String>, _>("project_id")
            .map(|id| Uuid::parse_str(&id).unwrap()),
        task_id: row
            .get::<Option<String>, _>("task_id")
            .map(|id| Uuid::parse_str(&id).unwrap()),
        client_id: row
            .get::<Option<String>, _>("client_id")
            .map(|id| Uuid::parse_str(&id).unwrap()),
        start: DateTime::from_timestamp(row.get("started_at"), 0).unwrap(),
        end: row
            .get::<Option<i64>, _>("ended_at")
            .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        description: row.get("description"),
        billable: row.get("billable"),
        billable_rate: row.get("billable_rate"),
        tags: serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default(),
        created_at: DateTime::from_timestamp(row.get("created_at"), 0).unwrap(),
        updated_at: DateTime::from_timestamp(row.get("updated_at"), 0).unwrap(),
        deleted_at: row
            .get::<Option<i64>, _>("deleted_at")
            .and_then(|ts| DateTime::from_timestamp(ts, 0)),
    }
}
