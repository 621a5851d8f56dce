pub mod analytics;
pub mod meta;
pub mod sessions;
