//! Multilingual chat assistant backed by an external completion provider.

use crate::services::metrics::{CHAT_REQUESTS_TOTAL, PROVIDER_REQUEST_DURATION};
use crate::services::providers::{ChatMessage, ChatProvider};
use std::sync::Arc;
use std::time::Instant;

pub const EMPTY_PROMPT_REPLY: &str = "Please type a message 🐾";
pub const NO_CHOICES_REPLY: &str = "Sorry, I couldn’t get a response 🐾";
pub const FAILURE_REPLY: &str = "❌ Server error. Please try again.";

/// Languages the assistant answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Marathi,
    Kannada,
}

impl Language {
    /// Look up a language code; anything unrecognised means English.
    pub fn from_code(code: &str) -> Self {
        match code {
            "hi" => Self::Hindi,
            "mr" => Self::Marathi,
            "kn" => Self::Kannada,
            _ => Self::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Marathi => "mr",
            Self::Kannada => "kn",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::English => {
                "You are PetVerse AI, a friendly pet-care assistant. Reply in English."
            }
            Self::Hindi => "आप PetVerse AI हैं। हिंदी में जवाब दें।",
            Self::Marathi => "तू PetVerse AI आहेस. मराठीत उत्तर दे.",
            Self::Kannada => "ನೀವು PetVerse AI. ಕನ್ನಡದಲ್ಲಿ ಉತ್ತರಿಸಿ.",
        }
    }
}

/// Outcome of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The provider's first completion, trimmed.
    Answered(String),
    /// Blank input; the provider was not called.
    EmptyPrompt,
    /// The provider answered without any completion.
    NoChoices,
    /// The provider call failed. The cause has already been logged.
    Failed,
}

impl ChatReply {
    /// Text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Self::Answered(text) => text,
            Self::EmptyPrompt => EMPTY_PROMPT_REPLY,
            Self::NoChoices => NO_CHOICES_REPLY,
            Self::Failed => FAILURE_REPLY,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            Self::Answered(_) => "answered",
            Self::EmptyPrompt => "empty_prompt",
            Self::NoChoices => "no_choices",
            Self::Failed => "failed",
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ChatProvider>,
    model: String,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Answer `message` in the language named by `language_code`.
    ///
    /// Never fails: provider errors are logged and turned into
    /// [`ChatReply::Failed`].
    pub async fn chat(&self, message: &str, language_code: &str) -> ChatReply {
        let reply = self.answer(message, Language::from_code(language_code)).await;
        CHAT_REQUESTS_TOTAL
            .with_label_values(&[reply.outcome_label()])
            .inc();
        reply
    }

    async fn answer(&self, message: &str, language: Language) -> ChatReply {
        let message = message.trim();
        if message.is_empty() {
            return ChatReply::EmptyPrompt;
        }

        let messages = [
            ChatMessage::system(language.system_prompt()),
            ChatMessage::user(message),
        ];

        let start = Instant::now();
        let result = self.provider.complete(&self.model, &messages).await;
        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(completion) => {
                PROVIDER_REQUEST_DURATION
                    .with_label_values(&["ok"])
                    .observe(elapsed);
                match completion.choices.into_iter().next() {
                    Some(text) => ChatReply::Answered(text.trim().to_string()),
                    None => {
                        tracing::warn!(model = %self.model, "Chat provider returned no choices");
                        ChatReply::NoChoices
                    }
                }
            }
            Err(e) => {
                PROVIDER_REQUEST_DURATION
                    .with_label_values(&["error"])
                    .observe(elapsed);
                tracing::error!(
                    error = %e,
                    kind = e.kind(),
                    model = %self.model,
                    language = language.code(),
                    "Chat provider request failed"
                );
                ChatReply::Failed
            }
        }
    }
}
