use axum::{
    extract::{rejection::JsonRejection, FromRequest, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::chat::FAILURE_REPLY;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// JSON extractor whose rejection keeps the `{reply}` shape the chat widget reads.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ChatRejection))]
pub struct ChatJson<T>(pub T);

/// An unreadable chat body, answered like any other chat failure.
pub struct ChatRejection(JsonRejection);

impl From<JsonRejection> for ChatRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for ChatRejection {
    fn into_response(self) -> Response {
        tracing::warn!(
            status = %self.0.status(),
            error = %self.0.body_text(),
            "Rejected chat request body"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse {
                reply: FAILURE_REPLY.to_string(),
            }),
        )
            .into_response()
    }
}

/// `POST /api/chat`. Provider failures and unreadable bodies come back as a
/// 500 with a reply body.
pub async fn chat(
    State(state): State<AppState>,
    ChatJson(req): ChatJson<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let reply = state.chat.chat(&req.message, &req.lang).await;

    let status = if reply.is_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(ChatResponse {
            reply: reply.text().to_string(),
        }),
    )
}
