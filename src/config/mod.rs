use thiserror::Error;

mod database;
mod server;

pub use database::Database;
pub use server::{Mode, Server};

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
