mod models;
mod report;
