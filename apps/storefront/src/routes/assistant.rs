//! Assistant route. The one handler that never returns an error status:
//! any backend failure becomes the fixed apology reply.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clients::FALLBACK_REPLY;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Free-form shopper question.
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The assistant's answer, or the apology.
    pub reply: String,
}

/// POST /api/assistant/ask
pub async fn ask(State(state): State<AppState>, Json(req): Json<AskRequest>) -> Json<AskResponse> {
    let reply = match state.assistant.ask(&req.question).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Assistant failed, serving fallback: {}", e);
            FALLBACK_REPLY.to_string()
        }
    };

    Json(AskResponse { reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ClientError, ClientResult, SalesAssistant};
    use async_trait::async_trait;
    use axum::extract::State;
    use std::sync::Arc;

    struct DownAssistant;

    #[async_trait]
    impl SalesAssistant for DownAssistant {
        async fn ask(&self, _question: &str) -> ClientResult<String> {
            Err(ClientError::assistant("model endpoint timed out"))
        }
    }

    #[tokio::test]
    async fn test_failed_assistant_serves_apology() {
        let mut state = AppState::in_memory();
        state.assistant = Arc::new(DownAssistant);

        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                question: "¿Tienen stock del termo?".to_string(),
            }),
        )
        .await;

        assert_eq!(response.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_working_assistant_answers() {
        let state = AppState::in_memory();

        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                question: "¿Qué combos tienen?".to_string(),
            }),
        )
        .await;

        assert_ne!(response.reply, FALLBACK_REPLY);
        assert!(response.reply.contains("Combo"));
    }
}
