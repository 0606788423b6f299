use serde::Deserialize;

/// Review request body
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub code: Option<String>,
}

impl ReviewRequest {
    /// The code to review, if present and not blank
    pub fn prompt(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.trim().is_empty())
    }
}
