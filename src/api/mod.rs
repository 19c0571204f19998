pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct AskQuery {
    pub question: Option<String>,
    pub speech: Option<String>,
}

/// Body of the retired server-side speech endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeprecatedNotice {
    pub message: String,
    pub deprecated: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
