mod member;
mod time_entry;
