pub mod arch;
pub mod deps;
pub mod doctor;
pub mod plan;
pub mod scan;
pub mod version;

use crate::ToolchainArgs;
use faustbuild_core::{Config, FaustSettings};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// `path` resolved against `cwd` when relative, without `.` components.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let rest: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if rest.as_os_str().is_empty() {
        cwd.to_path_buf()
    } else {
        cwd.join(rest)
    }
}

/// Settings from the file (explicit or discovered) with flags layered on top.
pub fn load_settings(config: &Config, args: &ToolchainArgs) -> Result<FaustSettings> {
    let (settings, source) = match &config.settings_path {
        Some(path) => (FaustSettings::load(path).into_diagnostic()?, Some(path.clone())),
        None => FaustSettings::discover(&config.cwd).into_diagnostic()?,
    };
    debug!(
        settings = source.as_ref().map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
        "settings"
    );
    Ok(apply_flags(settings, &config.cwd, args))
}

fn apply_flags(mut settings: FaustSettings, cwd: &Path, args: &ToolchainArgs) -> FaustSettings {
    if !args.search_dirs.is_empty() {
        settings =
            settings.with_search_dirs_first(args.search_dirs.iter().map(|d| absolutize(cwd, d)));
    }
    if let Some(arch) = &args.arch {
        settings = settings.with_architecture(arch.clone());
    }
    if let Some(policy) = args.policy {
        settings = settings.with_resolve_policy(policy);
    }
    settings.with_flags(args.flags.iter().cloned())
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faustbuild_core::ResolvePolicy;

    #[test]
    fn test_absolutize() {
        assert_eq!(absolutize(Path::new("/p"), Path::new("a.dsp")), PathBuf::from("/p/a.dsp"));
        assert_eq!(absolutize(Path::new("/p"), Path::new("/q/a.dsp")), PathBuf::from("/q/a.dsp"));
        assert_eq!(absolutize(Path::new("/p"), Path::new("./a.dsp")), PathBuf::from("/p/a.dsp"));
        assert_eq!(absolutize(Path::new("/p"), Path::new(".")), PathBuf::from("/p"));
    }

    #[test]
    fn test_apply_flags() {
        let args = ToolchainArgs {
            config: None,
            search_dirs: vec![PathBuf::from("libs")],
            arch: Some("jack-gtk".to_string()),
            flags: vec!["-vec".to_string()],
            policy: Some(ResolvePolicy::FirstMatch),
        };
        let settings = apply_flags(FaustSettings::default(), Path::new("/p"), &args);
        assert_eq!(settings.search_path.dirs()[0], PathBuf::from("/p/libs"));
        assert_eq!(settings.search_path.len(), 4);
        assert_eq!(settings.architecture, "jack-gtk");
        assert_eq!(settings.flags, vec!["-vec"]);
        assert_eq!(settings.resolve_policy, ResolvePolicy::FirstMatch);
    }

    #[test]
    fn test_no_flags_keeps_settings() {
        let settings = apply_flags(FaustSettings::default(), Path::new("/p"), &ToolchainArgs::default());
        assert_eq!(settings, FaustSettings::default());
    }
}
