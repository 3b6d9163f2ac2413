pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::client_repository::ClientRepository;
pub use repositories::member_repository::MemberRepository;
pub use repositories::organization_repository::OrganizationRepository;
pub use repositories::project_repository::ProjectRepository;
pub use repositories::tag_repository::TagRepository;
pub use repositories::task_repository::TaskRepository;
pub use repositories::time_entry_repository::{TimeEntryFilter, TimeEntryRepository};
pub use repositories::user_repository::UserRepository;
