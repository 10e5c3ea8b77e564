#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod depfile;
pub mod doctor;
pub mod error;
pub mod fs;
pub mod paths;
pub mod plan;
pub mod rules;
pub mod scan;
pub mod search_path;
pub mod settings;
pub mod version;

pub use config::Config;
pub use depfile::{render_depfile, write_depfile};
pub use doctor::{faust_available, tool_path, tool_path_in, DoctorReport};
pub use error::Error;
pub use fs::{MemoryFs, RealFs, SourceFs};
pub use plan::{plan_sources, BuildNode, BuildPlan, PlanNote, PlanOptions};
pub use rules::{steps_for, CommandLine, RuleError, RuleKind, Step};
pub use scan::{
    dependency_closure, extract_imports, scan_architecture, scan_closure, scan_source,
    ImportToken, ResolvePolicy, ResolvedDependency, SourceDocument,
};
pub use search_path::SearchPath;
pub use settings::FaustSettings;
pub use version::VERSION;
