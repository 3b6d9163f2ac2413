mod error;
mod extractors;
mod scope;
