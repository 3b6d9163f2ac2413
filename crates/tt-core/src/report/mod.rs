pub mod aggregation;
pub mod date_window;
pub mod group_kind;
