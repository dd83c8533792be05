//! External process execution for Silent and Modal commands

use std::io::{self, Write};
use std::process::{Command as ProcessCommand, ExitStatus, Stdio};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command line")]
    Empty,
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("failed to open `{target}`: {source}")]
    Open {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Run `argv` directly, without a shell. Succeeds only on exit code 0.
pub fn run_silent(argv: &[String]) -> Result<(), ProcessError> {
    let (program, args) = argv.split_first().ok_or(ProcessError::Empty)?;

    let status = ProcessCommand::new(program)
        .args(args)
        .status()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Failed {
            program: program.clone(),
            status,
        })
    }
}

/// Run `line` through `sh -c` and return stdout followed by stderr.
///
/// Never fails: spawn errors become the returned text.
pub fn run_shell_capture(line: &str) -> String {
    match ProcessCommand::new("sh")
        .arg("-c")
        .arg(line)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            text
        }
        Err(e) => {
            tracing::warn!("Failed to run shell command: {}", e);
            format!("[Failed to run command: {}]", e)
        }
    }
}

/// Hand `target` (URL or path) to the platform opener without waiting
pub fn open_detached(target: &str) -> Result<(), ProcessError> {
    open::that_detached(target).map_err(|source| ProcessError::Open {
        target: target.to_string(),
        source,
    })
}

/// Give the terminal back to a child process for the duration of `f`.
///
/// When `active` is false the terminal is not touched.
pub fn with_terminal_released<T>(active: bool, f: impl FnOnce() -> T) -> T {
    if !active {
        return f();
    }

    let mut stderr = io::stderr();
    if let Err(e) = disable_raw_mode().and_then(|_| execute!(stderr, LeaveAlternateScreen)) {
        tracing::warn!("Failed to release terminal: {}", e);
    }

    let result = f();

    if let Err(e) = enable_raw_mode().and_then(|_| execute!(stderr, EnterAlternateScreen)) {
        tracing::warn!("Failed to reclaim terminal: {}", e);
    }
    let _ = stderr.flush();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_run_silent_empty() {
        assert!(matches!(run_silent(&[]), Err(ProcessError::Empty)));
    }

    #[test]
    fn test_run_silent_missing_program() {
        let result = run_silent(&argv(&["rowscope-definitely-not-a-program"]));
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_silent_exit_codes() {
        assert!(run_silent(&argv(&["true"])).is_ok());
        assert!(matches!(
            run_silent(&argv(&["false"])),
            Err(ProcessError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_capture_combines_streams() {
        let out = run_shell_capture("echo out; echo err 1>&2");
        assert_eq!(out, "out\nerr\n");
    }

    #[test]
    fn test_with_terminal_released_inactive_passthrough() {
        assert_eq!(with_terminal_released(false, || 7), 7);
    }
}
