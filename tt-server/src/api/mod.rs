pub mod actor;
pub mod error;
pub mod extractors;
pub mod time_entries;
