//! Listener enumeration and process inspection for Unix-like systems.
//!
//! macOS and Linux share this probe. `lsof` lists listening TCP sockets and,
//! per process, open file descriptors (the `cwd` descriptor carries the
//! working directory); `ps` supplies the full command line.

use regex::Regex;

use crate::probe::{record_port, ListenerEntry, PlatformProbe, ProcessInfo};
use crate::shell::CommandRunner;

pub struct UnixProbe<R> {
    runner: R,
    listen_port: Regex,
}

impl<R: CommandRunner> UnixProbe<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            // lsof renders a listening socket as e.g. `*:3000 (LISTEN)`.
            listen_port: Regex::new(r":(\d+)\s+\(LISTEN\)").expect("valid listen pattern"),
        }
    }

    /// Extracts (pid, port) pairs from raw `lsof` output.
    ///
    /// Only lines mentioning `node` are considered; the pid is the second
    /// whitespace-separated field. Lines that do not carry a listening
    /// address are skipped without affecting the rest of the output.
    fn parse_listeners(&self, raw: &str) -> Vec<ListenerEntry> {
        let mut entries = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || !line.contains("node") {
                continue;
            }
            let Some(pid) = line.split_whitespace().nth(1) else {
                continue;
            };
            let Some(caps) = self.listen_port.captures(line) else {
                continue;
            };
            record_port(&mut entries, pid, &caps[1]);
        }
        entries
    }

    fn command_line(&self, pid: &str) -> String {
        self.runner
            .run("ps", &["-p", pid, "-o", "command="])
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }

    /// Reads the working directory from the process's `cwd` descriptor.
    fn working_directory(&self, pid: &str) -> String {
        let Some(out) = self.runner.run("lsof", &["-p", pid]) else {
            return String::new();
        };
        for line in out.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // lsof columns: COMMAND PID USER FD TYPE ... NAME
            if fields.get(3) == Some(&"cwd") {
                if let Some(path) = fields.last() {
                    return path.to_string();
                }
            }
        }
        String::new()
    }
}

impl<R: CommandRunner> PlatformProbe for UnixProbe<R> {
    fn list_listeners(&self) -> Vec<ListenerEntry> {
        match self.runner.run("lsof", &["-iTCP", "-sTCP:LISTEN", "-n", "-P"]) {
            Some(raw) => self.parse_listeners(&raw),
            None => Vec::new(),
        }
    }

    fn inspect_process(&self, pid: &str) -> Option<ProcessInfo> {
        Some(ProcessInfo {
            command: self.command_line(pid),
            cwd: self.working_directory(pid),
        })
    }

    fn empty_message(&self) -> &'static str {
        "No running Node.js services found"
    }

    fn scanned_line(&self, count: usize) -> String {
        format!("Found {count} Node.js service(s) listening on ports:")
    }

    fn no_match_summary(&self, _candidates: usize) -> &'static str {
        "No frontend dev services found (Webpack/Vite)"
    }
}
