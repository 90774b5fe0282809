//! Listener enumeration and process inspection for Windows.
//!
//! `netstat -ano` lists listening sockets system-wide, `tasklist` narrows the
//! field to node.exe images, and a WMI query supplies the command line.
//! Windows exposes no working directory for a foreign process, so one is
//! derived from a drive-letter path prefix found in the command line.

use regex::Regex;

use crate::probe::{record_port, ListenerEntry, PlatformProbe, ProcessInfo};
use crate::shell::CommandRunner;

/// Command lines longer than this are truncated for display.
const COMMAND_DISPLAY_LIMIT: usize = 200;

pub struct WindowsProbe<R> {
    runner: R,
    trailing_port: Regex,
    cwd_prefix: Regex,
}

impl<R: CommandRunner> WindowsProbe<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            trailing_port: Regex::new(r":(\d+)$").expect("valid port pattern"),
            // Drive-letter prefix of the command line, cut before a
            // node_modules or package.json segment. Heuristic: command lines
            // with unusual argument ordering can yield a wrong path, which is
            // only ever validated by the manifest lookup downstream.
            cwd_prefix: Regex::new(r#"(?i)([A-Z]:\\[^"]+?)(?:\\node_modules|\\package\.json|$)"#)
                .expect("valid cwd pattern"),
        }
    }

    /// Extracts (pid, port) pairs from raw `netstat -ano` output.
    ///
    /// Only `LISTENING` rows count; the local address is the second field and
    /// the pid the fifth. Rows without a trailing `:port` on the local
    /// address are skipped.
    fn parse_listeners(&self, raw: &str) -> Vec<ListenerEntry> {
        let mut entries = Vec::new();
        for line in raw.lines() {
            if !line.contains("LISTENING") {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 5 {
                continue;
            }
            let Some(caps) = self.trailing_port.captures(parts[1]) else {
                continue;
            };
            record_port(&mut entries, parts[4], &caps[1]);
        }
        entries
    }

    /// Image name of the process per `tasklist`, lowercased.
    fn image_name(&self, pid: &str) -> Option<String> {
        let filter = format!("PID eq {pid}");
        let out = self
            .runner
            .run("tasklist", &["/FI", &filter, "/FO", "CSV", "/NH"])?;
        if out.trim().is_empty() {
            return None;
        }
        Some(out.split(',').next().unwrap_or("").replace('"', "").to_lowercase())
    }

    fn command_line(&self, pid: &str) -> String {
        self.query_wmic(pid, "commandline", "CommandLine")
            .unwrap_or_default()
    }

    fn executable_path(&self, pid: &str) -> String {
        self.query_wmic(pid, "executablepath", "ExecutablePath")
            .unwrap_or_default()
    }

    /// Runs `wmic process where processid=<pid> get <property> /format:list`
    /// and pulls the `Key=value` line out of the response.
    fn query_wmic(&self, pid: &str, property: &str, key: &str) -> Option<String> {
        let clause = format!("processid={pid}");
        let out = self
            .runner
            .run("wmic", &["process", "where", &clause, "get", property, "/format:list"])?;
        let prefix = format!("{key}=");
        out.lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .map(|value| value.trim().to_string())
    }

    /// Best-effort working directory, derived from the command line.
    ///
    /// Only attempted when WMI reports an executable path for the process;
    /// no drive-letter prefix in the command line leaves it empty.
    fn working_directory(&self, pid: &str, command: &str) -> String {
        if self.executable_path(pid).is_empty() {
            return String::new();
        }
        self.cwd_prefix
            .captures(command)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }
}

impl<R: CommandRunner> PlatformProbe for WindowsProbe<R> {
    fn list_listeners(&self) -> Vec<ListenerEntry> {
        match self.runner.run("netstat", &["-ano"]) {
            Some(raw) => self.parse_listeners(&raw),
            None => Vec::new(),
        }
    }

    fn inspect_process(&self, pid: &str) -> Option<ProcessInfo> {
        let image = self.image_name(pid)?;
        if !image.contains("node") {
            return None;
        }
        let command = self.command_line(pid);
        let cwd = self.working_directory(pid, &command);
        Some(ProcessInfo { command, cwd })
    }

    fn empty_message(&self) -> &'static str {
        "No running services found"
    }

    fn scanned_line(&self, count: usize) -> String {
        format!("Scanned {count} process(es) listening on ports")
    }

    fn display_command(&self, command: &str) -> String {
        if command.chars().count() > COMMAND_DISPLAY_LIMIT {
            let truncated: String = command.chars().take(COMMAND_DISPLAY_LIMIT).collect();
            format!("{truncated}...")
        } else {
            command.to_string()
        }
    }

    fn no_match_summary(&self, candidates: usize) -> &'static str {
        if candidates == 0 {
            "No running Node.js services found"
        } else {
            "No frontend dev services found (Webpack/Vite)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeRunner {
        responses: Vec<(&'static str, Vec<&'static str>, Option<&'static str>)>,
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Option<String> {
            self.responses
                .iter()
                .find(|(p, a, _)| *p == program && a.as_slice() == args)
                .and_then(|(_, _, out)| out.map(str::to_string))
        }
    }

    fn probe(responses: Vec<(&'static str, Vec<&'static str>, Option<&'static str>)>) -> WindowsProbe<FakeRunner> {
        WindowsProbe::new(FakeRunner { responses })
    }

    const NETSTAT: &str = "\
Active Connections\r
\r
  Proto  Local Address          Foreign Address        State           PID\r
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       5120\r
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       5120\r
  TCP    127.0.0.1:8080         0.0.0.0:0              LISTENING       6204\r
  TCP    192.168.1.20:54231     142.250.74.78:443      ESTABLISHED     7777\r
  UDP    0.0.0.0:5353           *:*                                    1024\r
";

    #[test]
    fn parses_listening_rows_and_dedups_ports() {
        let probe = probe(Vec::new());
        let entries = probe.parse_listeners(NETSTAT);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pid, "5120");
        assert_eq!(entries[0].ports, vec!["3000"]);
        assert_eq!(entries[1].pid, "6204");
        assert_eq!(entries[1].ports, vec!["8080"]);
    }

    #[test]
    fn short_or_malformed_rows_are_skipped() {
        let probe = probe(Vec::new());
        let entries = probe.parse_listeners("LISTENING\n  TCP  noport  x  LISTENING  99\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn non_node_image_is_not_a_candidate() {
        let probe = probe(vec![(
            "tasklist",
            vec!["/FI", "PID eq 6204", "/FO", "CSV", "/NH"],
            Some("\"httpd.exe\",\"6204\",\"Console\",\"1\",\"12,204 K\"\r\n"),
        )]);
        assert!(probe.inspect_process("6204").is_none());
    }

    #[test]
    fn node_image_yields_command_and_derived_cwd() {
        let probe = probe(vec![
            (
                "tasklist",
                vec!["/FI", "PID eq 5120", "/FO", "CSV", "/NH"],
                Some("\"node.exe\",\"5120\",\"Console\",\"1\",\"88,104 K\"\r\n"),
            ),
            (
                "wmic",
                vec!["process", "where", "processid=5120", "get", "commandline", "/format:list"],
                Some("\r\nCommandLine=node C:\\work\\shop\\node_modules\\.bin\\webpack serve\r\n\r\n"),
            ),
            (
                "wmic",
                vec!["process", "where", "processid=5120", "get", "executablepath", "/format:list"],
                Some("\r\nExecutablePath=C:\\Program Files\\nodejs\\node.exe\r\n\r\n"),
            ),
        ]);
        let info = probe.inspect_process("5120").unwrap();
        assert_eq!(info.command, "node C:\\work\\shop\\node_modules\\.bin\\webpack serve");
        assert_eq!(info.cwd, "C:\\work\\shop");
    }

    #[test]
    fn missing_executable_path_leaves_cwd_empty() {
        let probe = probe(vec![
            (
                "tasklist",
                vec!["/FI", "PID eq 5120", "/FO", "CSV", "/NH"],
                Some("\"node.exe\",\"5120\",\"Console\",\"1\",\"88,104 K\"\r\n"),
            ),
            (
                "wmic",
                vec!["process", "where", "processid=5120", "get", "commandline", "/format:list"],
                Some("CommandLine=node C:\\work\\shop\\node_modules\\.bin\\webpack serve\r\n"),
            ),
        ]);
        let info = probe.inspect_process("5120").unwrap();
        assert_eq!(info.cwd, "");
    }

    #[test]
    fn cwd_heuristic_requires_a_drive_letter_path() {
        let probe = probe(Vec::new());
        assert!(probe.cwd_prefix.captures("node server.js").is_none());
    }

    #[test]
    fn display_truncates_long_commands() {
        let probe = probe(Vec::new());
        let long = "x".repeat(230);
        let shown = probe.display_command(&long);
        assert_eq!(shown.len(), COMMAND_DISPLAY_LIMIT + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(probe.display_command("node server.js"), "node server.js");
    }

    #[test]
    fn empty_tasklist_output_is_not_a_candidate() {
        let probe = probe(vec![(
            "tasklist",
            vec!["/FI", "PID eq 42", "/FO", "CSV", "/NH"],
            Some("\r\n"),
        )]);
        assert!(probe.inspect_process("42").is_none());
    }
}
