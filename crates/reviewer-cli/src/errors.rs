use console::style;
use reviewer_core::config::API_KEY_ENV;
use reviewer_core::error::ReviewerError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a missing API key
pub fn api_key_missing() -> CliError {
    CliError::new("Gemini API key not set")
        .with_context(format!(
            "The reviewer needs a Gemini API key in the {} environment variable.",
            API_KEY_ENV
        ))
        .with_suggestion(format!("Set the key: export {}=\"your-key\"", API_KEY_ENV))
        .with_suggestion("Create a key at https://aistudio.google.com/app/apikey")
        .with_help("Run: reviewer config")
}

/// Create error for an input file that cannot be read
pub fn input_not_readable(path: &Path, error: &std::io::Error) -> CliError {
    CliError::new("Cannot read input file")
        .with_context(format!("Path: {}\n\nError: {}", path.display(), error))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Or pipe the code on stdin: cat file.rs | reviewer review")
        .with_help("Run: reviewer review --help")
}

/// Create error for empty input
pub fn empty_input() -> CliError {
    CliError::new("Nothing to review")
        .with_context("The input was empty or contained only whitespace.")
        .with_suggestion("Pass a file: reviewer review src/main.rs")
        .with_help("Run: reviewer review --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check the --config file for syntax errors")
        .with_suggestion("Check REVIEWER_MODEL, REVIEWER_BASE_URL and REVIEWER_TIMEOUT_SECS")
        .with_help("Run: reviewer config")
}

/// Map a reviewer failure to a user-facing error
pub fn from_reviewer(error: &ReviewerError) -> CliError {
    match error {
        ReviewerError::ConfigMissing { key } if key == API_KEY_ENV => api_key_missing(),
        ReviewerError::ConfigMissing { key } => invalid_config(key, "value is missing"),
        ReviewerError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        ReviewerError::Transport { .. } => CliError::new("Cannot reach the generative API")
            .with_context(format!("Error: {}", error))
            .with_suggestion("Check your network connection")
            .with_suggestion("Or raise the timeout: --timeout-secs 120"),
        ReviewerError::RemoteRejection { status, message } => {
            let suggestion = match status {
                401 | 403 => format!("Check that {} holds a valid key", API_KEY_ENV),
                429 => "Quota exceeded; wait and try again".to_string(),
                404 => "Check the model name: --model gemini-2.5-flash".to_string(),
                _ => "Check the request and try again".to_string(),
            };
            CliError::new(format!("Generative API rejected the request ({})", status))
                .with_context(message.clone())
                .with_suggestion(suggestion)
        }
        ReviewerError::Blocked { reason } => CliError::new("Review was blocked")
            .with_context(format!("Reason: {}", reason))
            .with_suggestion("Remove sensitive content from the input and try again"),
        ReviewerError::MalformedResponse { .. } | ReviewerError::Io(_) => {
            CliError::new(error.to_string())
        }
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(reviewer_error) = error.downcast_ref::<ReviewerError>() {
        return from_reviewer(reviewer_error);
    }

    let message = error.to_string();
    if message.contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
