//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// AISP component generator
///
/// Generates component specifications and AISP blocks from an idea sheet,
/// writes them to disk and upserts them into the specification store.
#[derive(Parser, Debug)]
#[command(name = "aisp-gen")]
#[command(author = "AISP PoC Team")]
#[command(version)]
#[command(about = "Generate AISP component specifications from an idea sheet", long_about = None)]
pub struct Cli {
    /// Idea sheet (YAML) with a `features` list
    pub idea: PathBuf,

    /// Directory holding the specification templates
    #[arg(long, default_value = "templates", env = "AISP_TEMPLATES_DIR")]
    pub templates: PathBuf,

    /// Component JSON schema
    #[arg(long, default_value = aisp_gen::schema::DEFAULT_SCHEMA_PATH, env = "AISP_SCHEMA_PATH")]
    pub schema: PathBuf,

    /// Directory receiving the generated specifications
    #[arg(long, default_value = "generated_specs", env = "AISP_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
