use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: String,
}

impl HealthResponse {
    pub fn ok(model: impl Into<String>) -> Self {
        Self {
            status: "ok",
            service: "reviewer-api",
            version: env!("CARGO_PKG_VERSION"),
            model: model.into(),
        }
    }
}
