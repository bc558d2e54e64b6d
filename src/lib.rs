//! bmt - Blog maintenance tool.
//!
//! bmt scaffolds posts for a Gatsby-style blog, builds it, previews it on a
//! local develop server and force-pushes the generated site to a remote
//! repository.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Persisted settings
//! - [`error`] - Error types and result aliases
//! - [`post`] - New post scaffolding
//! - [`probe`] - Port liveness checks and the readiness wait
//! - [`shell`] - External command execution
//! - [`site`] - Build, clean, publish and preview operations
//! - [`ui`] - Interactive prompts, tickers, and terminal output
//!
//! # Example
//!
//! ```
//! use bmt::shell::split_command;
//!
//! let parts = split_command(r#"git commit -m "first post""#);
//! assert_eq!(parts, ["git", "commit", "-m", "first post"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod post;
pub mod probe;
pub mod shell;
pub mod site;
pub mod ui;

pub use error::{BmtError, Result};
