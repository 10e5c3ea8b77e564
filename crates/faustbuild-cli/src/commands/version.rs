use super::print_json;
use faustbuild_core::version::{version_string, SCHEMA_VERSION, VERSION};
use faustbuild_core::Config;
use miette::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    schema_version: u32,
}

pub fn run(config: &Config) -> Result<()> {
    if config.json_logs {
        return print_json(&VersionOutput {
            name: "faustbuild",
            version: VERSION,
            schema_version: SCHEMA_VERSION,
        });
    }
    println!("{}", version_string());
    Ok(())
}
