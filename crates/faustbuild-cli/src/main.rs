#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use faustbuild_core::{Config, ResolvePolicy, RuleKind};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "faustbuild")]
#[command(author, version, about = "Dependency scanning and build planning for Faust .dsp sources", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(flatten)]
    toolchain: ToolchainArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags layered over the settings file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ToolchainArgs {
    /// Settings file (default: nearest faustbuild.json)
    #[arg(long, global = true, value_name = "FILE", env = "FAUSTBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search this directory before the configured ones (repeatable)
    #[arg(short = 'I', long = "search-dir", global = true, value_name = "DIR")]
    pub search_dirs: Vec<PathBuf>,

    /// Architecture template base name (e.g. "jack-gtk")
    #[arg(long, global = true, value_name = "NAME")]
    pub arch: Option<String>,

    /// Extra compiler flag (repeatable, e.g. --flag=-vec)
    #[arg(long = "flag", global = true, value_name = "FLAG", allow_hyphen_values = true)]
    pub flags: Vec<String>,

    /// How an import resolves when several search directories hold it
    #[arg(long, global = true, value_name = "POLICY", value_parser = parse_policy)]
    pub policy: Option<ResolvePolicy>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Check that the toolchain can be found
    Doctor,

    /// Show the direct imports of a source and where they resolve
    Scan {
        /// The .dsp (or .lib) file to scan
        file: PathBuf,
    },

    /// List every file a source depends on, transitively
    Deps {
        /// The .dsp file to start from
        file: PathBuf,

        /// Also write a Makefile-format depfile here
        #[arg(long, value_name = "PATH")]
        depfile: Option<PathBuf>,

        /// Target named in the depfile (default: the .cpp target)
        #[arg(long, value_name = "PATH", requires = "depfile")]
        target: Option<PathBuf>,
    },

    /// Locate the architecture file in the search path
    Arch,

    /// Plan targets for sources (files or directories, default: cwd)
    Plan {
        /// Sources or directories to search for .dsp files
        paths: Vec<PathBuf>,

        /// Rules to plan (cpp, xml, svg, sc, hs; comma separated or repeated)
        #[arg(long = "rule", value_name = "RULE", value_delimiter = ',', value_parser = parse_rule)]
        rules: Vec<RuleKind>,

        /// SuperCollider target
        #[arg(long, value_name = "PATH")]
        sc_target: Option<PathBuf>,

        /// Haskell target
        #[arg(long, value_name = "PATH")]
        hs_target: Option<PathBuf>,
    },
}

fn parse_policy(s: &str) -> Result<ResolvePolicy, String> {
    ResolvePolicy::parse(s)
        .ok_or_else(|| format!("unknown policy `{s}` (expected all-matches or first-match)"))
}

fn parse_rule(s: &str) -> Result<RuleKind, String> {
    RuleKind::parse(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_settings_path(
            cli.toolchain
                .config
                .as_deref()
                .map(|p| commands::absolutize(&cwd, p)),
        );

    logging::init(config.verbosity, config.json_logs);

    let _span = tracing::info_span!(
        "faustbuild",
        cwd = %config.cwd.display(),
    )
    .entered();

    let toolchain = &cli.toolchain;

    match cli.command {
        Some(Commands::Version) => commands::version::run(&config),
        Some(Commands::Doctor) => commands::doctor::run(&config, toolchain),
        Some(Commands::Scan { file }) => commands::scan::run(&config, toolchain, &file),
        Some(Commands::Deps {
            file,
            depfile,
            target,
        }) => commands::deps::run(&config, toolchain, &file, depfile.as_deref(), target.as_deref()),
        Some(Commands::Arch) => commands::arch::run(&config, toolchain),
        Some(Commands::Plan {
            paths,
            rules,
            sc_target,
            hs_target,
        }) => commands::plan::run(
            &config,
            toolchain,
            &commands::plan::PlanArgs {
                paths,
                rules,
                sc_target,
                hs_target,
            },
        ),
        None => {
            tracing::info!("faustbuild ready (use --help for commands)");
            Ok(())
        }
    }
}
