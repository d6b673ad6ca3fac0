//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::secrets::{Secrets, ServiceAccount};
use crate::infrastructure::config::settings::Config;

/// Project id used by test secrets and signed test tokens.
pub const PROJECT_ID: &str = "studybot-test";

/// Default configuration bound to an ephemeral local port.
pub fn local() -> Config {
    let mut config = Config::default();
    config.server.bind = "127.0.0.1:0".into();
    config
}

/// Secrets for [`PROJECT_ID`] with a dummy API key.
pub fn secrets() -> Secrets {
    Secrets {
        service_account: ServiceAccount {
            project_id: PROJECT_ID.into(),
        },
        openai_api_key: "sk-test".into(),
    }
}

/// A service-account JSON document for [`PROJECT_ID`].
pub fn service_account_json() -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": PROJECT_ID,
        "private_key_id": "test",
        "client_email": format!("firebase-adminsdk@{PROJECT_ID}.iam.gserviceaccount.com"),
    })
    .to_string()
}
