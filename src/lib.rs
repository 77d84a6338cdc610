pub mod api;
pub mod config;
pub mod database;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod schema;
