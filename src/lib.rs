pub mod config;
pub mod cors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod requests;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use crate::config::AppConfig;
pub use crate::state::AppState;
