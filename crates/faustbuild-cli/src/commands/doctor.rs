use super::{load_settings, print_json};
use crate::ToolchainArgs;
use faustbuild_core::doctor::{DoctorReport, Severity, ToolInfo};
use faustbuild_core::Config;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

/// Run the doctor command.
///
/// When `json` is set, outputs a single JSON object to stdout.
/// Otherwise, outputs human-readable formatted text to stdout.
pub fn run(config: &Config, args: &ToolchainArgs) -> Result<()> {
    let settings = load_settings(config, args)?;
    let report = DoctorReport::collect(&config.cwd, &settings);

    if config.json_logs {
        print_json(&report)
    } else {
        print_human(&report)
    }
}

fn print_human(report: &DoctorReport) -> Result<()> {
    let mut out = io::stdout().lock();

    w(&mut out, "\x1b[1m## Runtime\x1b[0m\n")?;
    w(
        &mut out,
        &format!("  Version:        {}\n", report.runtime.version),
    )?;
    w(
        &mut out,
        &format!("  Schema:         v{}\n", report.runtime.schema_version),
    )?;
    w(
        &mut out,
        &format!(
            "  Platform:       {}/{}\n",
            report.runtime.os, report.runtime.arch
        ),
    )?;
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Tools\x1b[0m\n")?;
    w(&mut out, &tool_line("Compiler", &report.compiler))?;
    w(&mut out, &tool_line("faust2sc", &report.faust2sc))?;
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Search path\x1b[0m\n")?;
    if report.search_dirs.is_empty() {
        w(&mut out, "  (empty)\n")?;
    }
    for dir in &report.search_dirs {
        w(
            &mut out,
            &format!("  {} {}\n", check(dir.exists), dir.path.display()),
        )?;
    }
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Architecture\x1b[0m\n")?;
    match report.architecture.matches.first() {
        Some(first) => {
            w(
                &mut out,
                &format!(
                    "  {}: {} {}\n",
                    report.architecture.file,
                    first.display(),
                    check(true)
                ),
            )?;
            for shadowed in &report.architecture.matches[1..] {
                w(&mut out, &format!("    also {}\n", shadowed.display()))?;
            }
        }
        None => {
            w(
                &mut out,
                &format!("  {}: (not found) {}\n", report.architecture.file, check(false)),
            )?;
        }
    }
    w(&mut out, "\n")?;

    if report.warnings.is_empty() {
        w(&mut out, "\x1b[1m## Warnings\x1b[0m\n")?;
        w(&mut out, "  \x1b[32mNo warnings\x1b[0m\n")?;
    } else {
        w(
            &mut out,
            &format!(
                "\x1b[1m## Warnings\x1b[0m ({} total)\n",
                report.warnings.len()
            ),
        )?;
        for warning in &report.warnings {
            let prefix = match warning.severity {
                Severity::Info => "\x1b[34minfo\x1b[0m",
                Severity::Warn => "\x1b[33mwarn\x1b[0m",
            };
            w(
                &mut out,
                &format!("  [{prefix}] {}: {}\n", warning.code, warning.message),
            )?;
        }
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn tool_line(label: &str, tool: &ToolInfo) -> String {
    match &tool.path {
        Some(path) => format!("  {label:<15} {} {}\n", path.display(), check(true)),
        None => format!("  {label:<15} {} (not found) {}\n", tool.name, check(false)),
    }
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}

fn check(ok: bool) -> &'static str {
    if ok {
        "\x1b[32m✓\x1b[0m"
    } else {
        "\x1b[31m✗\x1b[0m"
    }
}
