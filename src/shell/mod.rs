//! External process execution.

pub mod command;
pub mod platform;
pub mod tokenize;

pub use command::{
    exec, exec_line, spawn, CommandInvocation, CommandOptions, ExecOutput, RunningProcess,
    StdioMode,
};
pub use platform::{is_ci, open_invocation, open_path};
pub use tokenize::{join_command, split_command};
