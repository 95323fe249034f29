pub mod chat;
pub mod health;
pub mod lost_found;
pub mod pages;
pub mod pets;

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body used by the adoption and reset endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": ...}` body for failures reported without extra details.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
