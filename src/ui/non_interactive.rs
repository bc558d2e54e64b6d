//! Non-interactive UI for CI/headless environments.

use indicatif::ProgressBar;
use std::collections::HashMap;

use crate::error::{BmtError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, Ticker, UserInterface};

/// Prefix of environment variables that answer prompts.
const PROMPT_ENV_PREFIX: &str = "BMT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `BMT_PROMPT_<KEY>` environment variables, then
/// from the prompt's default. Tickers count silently; their label is printed
/// once when they start.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn answer(prompt: &Prompt, value: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(super::prompts::parse_bool(value)),
            _ => PromptResult::String(value.to_string()),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("ℹ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(Self::answer(prompt, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        Err(BmtError::ConfigValidationError {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (set {} or pass it as a flag)",
                prompt.key, env_key
            ),
        })
    }

    fn start_ticker(&mut self, label: &str) -> Ticker {
        if self.mode.shows_tickers() {
            println!("  {}", label);
        }
        Ticker::start(label, ProgressBar::hidden())
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("BMT_PROMPT_CATEGORY", "tech")]),
        );
        let prompt = Prompt::select("category", "Category", &["life".into(), "tech".into()]);
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "tech");
    }

    #[test]
    fn confirm_override_is_parsed_as_bool() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("BMT_PROMPT_PUBLISH", "no")]),
        );
        let prompt = Prompt::confirm("publish", "Publish?", true);
        assert!(matches!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false)));
    }

    #[test]
    fn prompt_falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("publish", "Publish?", true);
        assert!(ui.prompt(&prompt).unwrap().as_bool());
    }

    #[test]
    fn prompt_without_default_fails() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("tags", "Tags");
        let err = ui.prompt(&prompt).unwrap_err();
        assert!(err.to_string().contains("BMT_PROMPT_TAGS"));
    }

    #[test]
    fn not_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert!(!ui.is_interactive());
    }

    #[test]
    fn ticker_counts_without_display() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let mut ticker = ui.start_ticker("Building");
        assert_eq!(ticker.stop(), 0);
    }
}
