//! Report formatting.
//!
//! One block per matched process, written to any `Write` sink so tests can
//! capture the exact output.

use std::io::{self, Write};

use crate::classify::ServiceType;
use crate::manifest::Manifest;

const SEPARATOR: &str = "------------------------------------------";

/// Everything the report shows about one matched process.
#[derive(Debug)]
pub struct ReportEntry<'a> {
    pub pid: &'a str,
    pub service: Option<ServiceType>,
    /// Display form of the command line (possibly truncated by the probe).
    pub command: String,
    pub cwd: &'a str,
    pub manifest: Option<&'a Manifest>,
    pub ports: &'a [String],
}

/// Writes one report block.
pub fn write_entry(out: &mut impl Write, entry: &ReportEntry<'_>) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "PID: {}", entry.pid)?;
    if let Some(service) = entry.service {
        writeln!(out, "Service Type: {service}")?;
    }
    writeln!(out, "Command: {}", entry.command)?;
    if !entry.cwd.is_empty() {
        writeln!(out, "Working Directory: {}", entry.cwd)?;
    }
    if let Some(manifest) = entry.manifest {
        writeln!(out, "Project Info:")?;
        if let Some(name) = &manifest.name {
            writeln!(out, "  Name: {name}")?;
        }
        if let Some(version) = &manifest.version {
            writeln!(out, "  Version: {version}")?;
        }
    }
    writeln!(out, "Listening Ports:")?;
    for port in entry.ports {
        writeln!(out, "  - http://localhost:{port}")?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(entry: &ReportEntry<'_>) -> String {
        let mut buf = Vec::new();
        write_entry(&mut buf, entry).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn full_block_with_manifest_metadata() {
        let manifest = Manifest {
            name: Some("shop-frontend".to_string()),
            version: Some("2.4.1".to_string()),
            ..Manifest::default()
        };
        let ports = vec!["3000".to_string(), "3001".to_string()];
        let text = render(&ReportEntry {
            pid: "41234",
            service: Some(ServiceType::Webpack),
            command: "node node_modules/.bin/webpack serve".to_string(),
            cwd: "/home/dev/shop",
            manifest: Some(&manifest),
            ports: &ports,
        });
        assert_eq!(
            text,
            "------------------------------------------\n\
             PID: 41234\n\
             Service Type: Webpack\n\
             Command: node node_modules/.bin/webpack serve\n\
             Working Directory: /home/dev/shop\n\
             Project Info:\n\
             \x20 Name: shop-frontend\n\
             \x20 Version: 2.4.1\n\
             Listening Ports:\n\
             \x20 - http://localhost:3000\n\
             \x20 - http://localhost:3001\n\n"
        );
    }

    #[test]
    fn omits_optional_sections_when_unknown() {
        let ports = vec!["5173".to_string()];
        let text = render(&ReportEntry {
            pid: "1234",
            service: Some(ServiceType::Vite),
            command: "node node_modules/.bin/vite".to_string(),
            cwd: "",
            manifest: None,
            ports: &ports,
        });
        assert!(!text.contains("Working Directory:"));
        assert!(!text.contains("Project Info:"));
        assert!(text.contains("  - http://localhost:5173\n"));
    }

    #[test]
    fn type_line_dropped_for_unclassified_projects() {
        let ports = vec!["4000".to_string()];
        let text = render(&ReportEntry {
            pid: "77",
            service: None,
            command: "node server.js".to_string(),
            cwd: "/srv/app",
            manifest: None,
            ports: &ports,
        });
        assert!(!text.contains("Service Type:"));
        assert!(text.contains("PID: 77\n"));
    }
}
