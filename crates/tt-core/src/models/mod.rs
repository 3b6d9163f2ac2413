pub mod client;
pub mod member;
pub mod organization;
pub mod project;
pub mod tag;
pub mod task;
pub mod time_entry;
pub mod time_entry_changes;
pub mod user;
