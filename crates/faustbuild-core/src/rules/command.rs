//! Command lines for each rule.

use super::{RuleError, RuleKind};
use crate::paths::null_device;
use crate::settings::FaustSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A program invocation with already-split arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Render as a single POSIX shell command string.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| shell_quote(s))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// One step of a rule's recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    /// Run a program.
    Run { command: CommandLine },
    /// Rename a file or directory the compiler wrote next to its source.
    Move { from: PathBuf, to: PathBuf },
}

impl Step {
    /// Human-readable one-liner, shell style.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Run { command } => command.display(),
            Self::Move { from, to } => format!(
                "mv {} {}",
                shell_quote(&from.to_string_lossy()),
                shell_quote(&to.to_string_lossy())
            ),
        }
    }
}

/// Recipe producing `target` from `sources` under `rule`.
///
/// Single-source rules take exactly one source; binding rules take one or more.
/// Every source must carry the rule's source suffix.
pub fn steps_for(
    rule: RuleKind,
    settings: &FaustSettings,
    sources: &[PathBuf],
    target: &Path,
) -> Result<Vec<Step>, RuleError> {
    if sources.is_empty() {
        return Err(RuleError::NoSources { rule });
    }
    if !rule.is_multi_source() && sources.len() > 1 {
        return Err(RuleError::TooManySources {
            rule,
            count: sources.len(),
        });
    }
    for source in sources {
        rule.check_source(source)?;
    }

    let target_str = path_arg(target);
    let steps = match rule {
        RuleKind::Cpp => {
            let source = &sources[0];
            vec![run(compiler(settings)
                .arg("-a")
                .arg(settings.architecture_file())
                .arg("-o")
                .arg(target_str)
                .arg(path_arg(source)))]
        }
        RuleKind::Xml => {
            let source = &sources[0];
            let written = sibling_with_suffix(source, ".xml");
            let mut steps = vec![run(compiler(settings)
                .arg("-o")
                .arg(null_device())
                .arg("-xml")
                .arg(path_arg(source)))];
            push_move(&mut steps, written, target);
            steps
        }
        RuleKind::Svg => {
            let source = &sources[0];
            let written = sibling_with_suffix(source, "-svg");
            let mut steps = vec![run(compiler(settings)
                .arg("-o")
                .arg(null_device())
                .arg("-svg")
                .arg(path_arg(source)))];
            push_move(&mut steps, written, target);
            steps
        }
        RuleKind::SuperCollider => vec![run(binding(
            settings,
            "sclang",
            &settings.faust2sc_prefix,
            &target_str,
            sources,
        ))],
        RuleKind::Haskell => vec![run(binding(
            settings,
            "haskell",
            &settings.haskell_module,
            &target_str,
            sources,
        ))],
    };

    Ok(steps)
}

fn run(command: CommandLine) -> Step {
    Step::Run { command }
}

/// The compiler with the configured flags in front.
fn compiler(settings: &FaustSettings) -> CommandLine {
    CommandLine::new(&settings.compiler).args(settings.flags.iter().cloned())
}

fn binding(
    settings: &FaustSettings,
    lang: &str,
    prefix: &str,
    target: &str,
    sources: &[PathBuf],
) -> CommandLine {
    CommandLine::new(&settings.faust2sc)
        .arg(format!("--lang={lang}"))
        .arg(format!("--prefix={prefix}"))
        .arg("-o")
        .arg(target)
        .args(sources.iter().map(|s| path_arg(s)))
}

fn push_move(steps: &mut Vec<Step>, from: PathBuf, to: &Path) {
    if from != to {
        steps.push(Step::Move {
            from,
            to: to.to_path_buf(),
        });
    }
}

/// `source` with `suffix` appended to its full file name.
fn sibling_with_suffix(source: &Path, suffix: &str) -> PathBuf {
    let mut name = source.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    source.with_file_name(name)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '=' | ':' | ',' | '+' | '@' | '%')
        });
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
