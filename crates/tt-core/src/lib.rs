pub mod error;
pub mod models;
pub mod report;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::{CoreError, Result};
pub use models::client::Client;
pub use models::member::{Member, Permission};
pub use models::organization::Organization;
pub use models::project::Project;
pub use models::tag::Tag;
pub use models::task::Task;
pub use models::time_entry::{TimeEntry, resolve_billable_rate};
pub use models::time_entry_changes::{TimeEntryChanges, double_option};
pub use models::user::User;
pub use report::aggregation::{AggregateParams, AggregationNode, aggregate};
pub use report::date_window::{FullDateListing, clamp_to_full_days};
pub use report::group_kind::{GroupKind, start_of_week};
