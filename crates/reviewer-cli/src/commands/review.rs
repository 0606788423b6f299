use crate::cli::ReviewArgs;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use reviewer_core::config::LayeredConfig;
use reviewer_llm::PromptForwarder;
use std::io::Read;
use std::path::Path;

pub async fn execute(args: ReviewArgs, settings: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let code = read_input(args.file.as_deref())?;
    if code.trim().is_empty() {
        return Err(errors::empty_input().into());
    }

    let config = settings.forwarder_config().map_err(|e| errors::from_reviewer(&e))?;
    let forwarder = PromptForwarder::gemini(config).map_err(|e| errors::from_reviewer(&e))?;

    tracing::debug!(model = %forwarder.model(), code_chars = code.chars().count(), "Requesting review");

    let review = forwarder.generate_content(&code).await?;

    if output.is_json() {
        output.result(serde_json::json!({
            "model": forwarder.model(),
            "review": review,
        }))?;
    } else {
        output.text(review);
    }

    Ok(())
}

/// Read the file, or stdin when no path (or "-") is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|e| errors::input_not_readable(path, &e).into())
        }
        _ => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}
