pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    actor::{Actor, resolve_actor},
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    time_entries::{
        aggregate::aggregate_time_entries,
        aggregate_response::AggregateResponse,
        aggregate_time_entries_query::AggregateTimeEntriesQuery,
        create_time_entry_request::CreateTimeEntryRequest,
        list_time_entries_query::ListTimeEntriesQuery,
        scope::{parse_uuid_list, parse_uuid_param, resolve_member_scope},
        time_entries::{
            create_time_entry, delete_time_entry, list_time_entries, update_time_entry,
        },
        time_entry_dto::TimeEntryDto,
        time_entry_list_response::TimeEntryListResponse,
        time_entry_response::TimeEntryResponse,
        update_multiple::update_multiple_time_entries,
        update_multiple_request::UpdateMultipleRequest,
        update_multiple_response::UpdateMultipleResponse,
        update_time_entry_request::UpdateTimeEntryRequest,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
