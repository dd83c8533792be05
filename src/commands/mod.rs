//! Scriptable commands
//!
//! A command is either a native callback or a template run under an
//! [`ExecutionPolicy`]. Command lines have the form `name arg1 arg2 ...`.

mod command;
mod defaults;
pub mod process;
mod registry;

pub use command::{tokenize, Command, ExecutionPolicy, NativeFn};
pub use defaults::register_defaults;
pub use registry::CommandRegistry;
