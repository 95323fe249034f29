//! Mock provider implementation for testing.

use super::{ChatCompletion, ChatMessage, ChatProvider, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// A request the mock provider received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// What the mock provider answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with a single choice.
    Reply(String),
    /// Reply with an empty choice list.
    NoChoices,
    /// Fail as if the provider were unreachable.
    Fail,
}

/// Mock chat provider that records every request it receives.
pub struct MockChatProvider {
    behavior: MockBehavior,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockChatProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider that answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(reply.into()))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                model: model.to_string(),
                messages: messages.to_vec(),
            });
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ChatCompletion {
                choices: vec![text.clone()],
            }),
            MockBehavior::NoChoices => Ok(ChatCompletion::default()),
            MockBehavior::Fail => Err(ProviderError::NetworkError(
                "mock provider unavailable".to_string(),
            )),
        }
    }
}
