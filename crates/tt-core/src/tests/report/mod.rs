mod aggregation;
mod date_window;
mod group_kind;
