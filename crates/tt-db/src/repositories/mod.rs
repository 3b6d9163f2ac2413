pub mod client_repository;
pub mod member_repository;
pub mod organization_repository;
pub mod project_repository;
pub mod tag_repository;
pub mod task_repository;
pub mod time_entry_repository;
pub mod user_repository;
