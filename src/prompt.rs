// =============================================================================
// LLM Prompt Rendering
// =============================================================================
//
// Serialises a batch of trend reports into the user prompt handed to an
// external language model.  The model itself is not invoked here.
// =============================================================================

use anyhow::{Context, Result};

use crate::batch::TrendsResponse;

/// Placeholder replaced with the pretty-printed results.
pub const JSON_DATA_PLACEHOLDER: &str = "{JSON_DATA}";

pub const DEFAULT_USER_PROMPT: &str = "\
Below are technical indicators computed from recent daily candles for a set of \
exchange-listed shares. For each ticker, summarise the current trend, momentum \
(RSI), volume activity and the nearest support and resistance levels, then give \
a short overall outlook. Fields marked \"N/A\" had too little history to compute.

{JSON_DATA}
";

/// Substitute the JSON rendering of `response` into `template`.
pub fn render_user_prompt(template: &str, response: &TrendsResponse) -> Result<String> {
    if !template.contains(JSON_DATA_PLACEHOLDER) {
        anyhow::bail!("prompt template is missing the {JSON_DATA_PLACEHOLDER} placeholder");
    }

    let json = serde_json::to_string_pretty(&response.results)
        .context("failed to serialise trend results for the prompt")?;

    Ok(template.replace(JSON_DATA_PLACEHOLDER, &json))
}
