pub mod app;
pub mod config;
pub mod crypto;
pub mod database;
pub mod demo;
pub mod http;
pub mod schema;
pub mod services;
pub mod types;
pub mod util;

pub use app::App;
