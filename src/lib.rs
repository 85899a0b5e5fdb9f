pub mod cli;
pub mod config;
pub mod connectors;
pub mod context;
pub mod errors;
pub mod models;
pub mod printer;
pub mod status;
pub mod store;
pub mod utils;
