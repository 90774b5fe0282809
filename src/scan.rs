//! The scan pipeline.
//!
//! Drives one `PlatformProbe` through enumerate → inspect → classify →
//! report. Every stage is sequential and synchronous; a stage that comes
//! back empty degrades that process's fields instead of aborting the scan.

use std::io::Write;

use anyhow::Result;

use crate::classify;
use crate::manifest;
use crate::probe::PlatformProbe;
use crate::report::{self, ReportEntry};

const BANNER: &str = "==========================================";

/// Runs a full scan against `probe`, writing the report to `out`.
pub fn run(probe: &dyn PlatformProbe, os: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "Detecting running frontend dev services")?;
    writeln!(out, "OS: {os}")?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)?;

    scan_platform(probe, out)?;

    writeln!(out, "{BANNER}")?;
    Ok(())
}

fn scan_platform(probe: &dyn PlatformProbe, out: &mut impl Write) -> Result<()> {
    let listeners = probe.list_listeners();
    if listeners.is_empty() {
        writeln!(out, "{}", probe.empty_message())?;
        return Ok(());
    }

    writeln!(out, "{}", probe.scanned_line(listeners.len()))?;
    writeln!(out)?;

    let mut candidates = 0usize;
    let mut matched = 0usize;

    for entry in &listeners {
        let Some(info) = probe.inspect_process(&entry.pid) else {
            continue;
        };
        candidates += 1;
        if !classify::is_candidate(&info.command) {
            continue;
        }

        let manifest_probe = manifest::probe_dir(&info.cwd);
        let service = classify::classify(&info.command, manifest_probe.manifest());

        // A recognized service type or a package.json in the working
        // directory qualifies the process; everything else stays silent.
        if service.is_none() && !manifest_probe.file_exists() {
            log::debug!("pid {}: no service marker, no manifest", entry.pid);
            continue;
        }

        matched += 1;
        report::write_entry(
            out,
            &ReportEntry {
                pid: &entry.pid,
                service,
                command: probe.display_command(&info.command),
                cwd: &info.cwd,
                manifest: manifest_probe.manifest(),
                ports: &entry.ports,
            },
        )?;
    }

    if matched == 0 {
        writeln!(out, "{}", probe.no_match_summary(candidates))?;
    }
    Ok(())
}
