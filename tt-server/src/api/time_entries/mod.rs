pub mod aggregate;
pub mod aggregate_response;
pub mod aggregate_time_entries_query;
pub mod create_time_entry_request;
pub mod list_time_entries_query;
pub(crate) mod references;
pub mod scope;
pub mod time_entries;
pub mod time_entry_dto;
pub mod time_entry_list_response;
pub mod time_entry_response;
pub mod update_multiple;
pub mod update_multiple_request;
pub mod update_multiple_response;
pub mod update_time_entry_request;
