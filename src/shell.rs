//! External command invocation.
//!
//! Everything this tool knows about the system arrives as the standard
//! output of some OS utility (`lsof`, `ps`, `netstat`, ...). `CommandRunner`
//! is the seam between the probes and those utilities so tests can substitute
//! canned output for live commands.

use std::process::Command;

/// Runs an external command and captures its standard output.
pub trait CommandRunner {
    /// Runs `program` with `args` and returns captured stdout.
    ///
    /// Returns `None` when the command cannot be spawned, exits with a
    /// failure status, or produces output that is not valid UTF-8. Callers
    /// treat `None` the same as empty output; no invocation is retried.
    fn run(&self, program: &str, args: &[&str]) -> Option<String>;
}

/// `CommandRunner` backed by the real system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl CommandRunner for SystemShell {
    fn run(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = match Command::new(program).args(args).output() {
            Ok(output) => output,
            Err(err) => {
                log::debug!("failed to spawn {program}: {err}");
                return None;
            }
        };
        if !output.status.success() {
            log::debug!("{program} exited with {}", output.status);
            return None;
        }
        match String::from_utf8(output.stdout) {
            Ok(text) => Some(text),
            Err(_) => {
                log::debug!("{program} produced non-UTF-8 output");
                None
            }
        }
    }
}
