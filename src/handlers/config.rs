//! Configuration handlers
//!
//! Returns public configuration settings to the frontend

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Public configuration response
#[derive(Debug, Serialize)]
pub struct PublicConfig {
    /// Whether signed-in users get the chat assistant
    #[serde(rename = "assistantEnabled")]
    pub assistant_enabled: bool,
}

/// GET /api/config
pub async fn get_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(PublicConfig {
        assistant_enabled: state.config.assistant.enabled,
    })
}

#[cfg(test)]
mod tests {
    use crate::config::{AssistantConfig, Config};
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::testing::{body_json, get};

    #[tokio::test]
    async fn test_assistant_toggle_is_public() {
        let config = Config {
            assistant: AssistantConfig { enabled: false },
            ..Config::default()
        };
        let app = create_router(AppState::new(None, config));

        let body = body_json(get(&app, "/api/config", None).await).await;
        assert_eq!(body["assistantEnabled"], false);
    }
}
