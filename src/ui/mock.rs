//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use bmt::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("category", "tech");
//!
//! ui.message("Building");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Building"));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use indicatif::ProgressBar;
use std::collections::HashMap;

use crate::error::Result;

use super::prompts::parse_bool;
use super::{OutputMode, Prompt, PromptResult, PromptType, Ticker, UserInterface, DEFAULT_TIPS};

/// Mock UI implementation for testing.
///
/// Tickers handed out by the mock are manual: they never advance on their
/// own, so elapsed-time reports are always `0s` in tests.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    tickers: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured info messages.
    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Labels of every ticker that was started, in order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific info message was shown.
    pub fn has_info(&self, msg: &str) -> bool {
        self.infos.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let is_confirm = matches!(prompt.prompt_type, PromptType::Confirm);
        let response = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref());

        Ok(match (response, is_confirm) {
            (Some(value), true) => PromptResult::Bool(parse_bool(value)),
            (Some(value), false) => PromptResult::String(value.clone()),
            // Type-appropriate empty answer as a last resort.
            (None, true) => PromptResult::Bool(false),
            (None, false) => PromptResult::String(String::new()),
        })
    }

    fn start_ticker(&mut self, label: &str) -> Ticker {
        self.tickers.push(label.to_string());
        Ticker::manual(label, DEFAULT_TIPS, ProgressBar::hidden())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("plain");
        ui.success("ok");
        ui.info("fyi");
        ui.warning("careful");
        ui.error("broken");

        assert!(ui.has_message("plain"));
        assert!(ui.has_success("ok"));
        assert!(ui.has_info("fyi"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
    }

    #[test]
    fn prompt_prefers_configured_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("publish", "no");
        let result = ui
            .prompt(&Prompt::confirm("publish", "Publish?", true))
            .unwrap();
        assert!(!result.as_bool());
        assert_eq!(ui.prompts_shown(), &["publish".to_string()]);
    }

    #[test]
    fn prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui
            .prompt(&Prompt::confirm("publish", "Publish?", true))
            .unwrap();
        assert!(result.as_bool());
    }

    #[test]
    fn prompt_without_answer_is_empty() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&Prompt::input("tags", "Tags")).unwrap();
        assert_eq!(result.as_string(), "");
    }

    #[test]
    fn tickers_are_recorded_and_manual() {
        let mut ui = MockUI::new();
        let mut ticker = ui.start_ticker("Building");
        assert_eq!(ui.tickers(), &["Building".to_string()]);
        assert_eq!(ticker.stop(), 0);
    }

    #[test]
    fn interactive_flag() {
        let mut ui = MockUI::new();
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }
}
