//! PetVerse: pet adoption catalog, lost and found board, and a multilingual
//! chat assistant served over HTTP.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
