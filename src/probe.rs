//! Shared probe types and platform selection.
//!
//! The scan pipeline is identical on every platform; only the enumeration
//! commands, parsing patterns, and a few report strings differ. Those
//! differences live behind `PlatformProbe`, chosen once at startup.

use crate::shell::SystemShell;
use crate::unix::UnixProbe;
use crate::windows::WindowsProbe;

/// A process observed with at least one listening TCP socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerEntry {
    /// Process id as printed by the enumeration utility.
    pub pid: String,
    /// Listening ports in first-seen order, duplicates suppressed.
    pub ports: Vec<String>,
}

/// Command line and working directory of a single process.
///
/// Either field may be empty when the underlying lookup came back with
/// nothing; inspection degrades field by field instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ProcessInfo {
    pub command: String,
    pub cwd: String,
}

/// OS-specific half of the scan pipeline.
pub trait PlatformProbe {
    /// Lists processes with listening TCP sockets.
    ///
    /// An unavailable or failing enumeration command yields an empty list,
    /// not an error.
    fn list_listeners(&self) -> Vec<ListenerEntry>;

    /// Fetches the command line and working directory for one process.
    ///
    /// `None` means the process failed the platform's own pre-filter and is
    /// not counted as a candidate.
    fn inspect_process(&self, pid: &str) -> Option<ProcessInfo>;

    /// Message printed when enumeration found nothing at all.
    fn empty_message(&self) -> &'static str;

    /// Count line printed before the per-process blocks.
    fn scanned_line(&self, count: usize) -> String;

    /// Display form of a command line (some platforms truncate).
    fn display_command(&self, command: &str) -> String {
        command.to_string()
    }

    /// Trailing summary when no process made it into the report.
    fn no_match_summary(&self, candidates: usize) -> &'static str;
}

/// Picks the probe for the current operating system.
///
/// macOS and Linux share the Unix probe; everything that is not Windows is
/// treated as Unix-like.
pub fn probe_for_os(os: &str) -> Box<dyn PlatformProbe> {
    if os == "windows" {
        Box::new(WindowsProbe::new(SystemShell))
    } else {
        Box::new(UnixProbe::new(SystemShell))
    }
}

/// Appends `port` to the entry for `pid`, creating the entry on first sight.
///
/// Duplicate ports for the same pid are suppressed; entry and port order
/// follow discovery order.
pub fn record_port(entries: &mut Vec<ListenerEntry>, pid: &str, port: &str) {
    match entries.iter_mut().find(|entry| entry.pid == pid) {
        Some(entry) => {
            if !entry.ports.iter().any(|p| p == port) {
                entry.ports.push(port.to_string());
            }
        }
        None => entries.push(ListenerEntry {
            pid: pid.to_string(),
            ports: vec![port.to_string()],
        }),
    }
}
