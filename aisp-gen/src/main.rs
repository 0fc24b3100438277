//! AISP component generator CLI
//!
//! ```bash
//! aisp-gen ideas/inventory.yml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use aisp_agents::SupabaseClient;
use aisp_gen::template::CRUD_TEMPLATE;
use aisp_gen::{Generator, IdeaSheet, SpecValidator, Template};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() {
    // A local .env file, if any, fills variables not already set
    dotenvy::dotenv().ok();

    // Parse CLI arguments; wrong arity prints usage and exits non-zero
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "aisp_gen=debug,aisp_agents=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "❌".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = SupabaseClient::from_env().context("specification store is not configured")?;
    let template = Template::load(&cli.templates, CRUD_TEMPLATE)?;
    let validator = SpecValidator::load(&cli.schema)?;
    let idea = IdeaSheet::load(&cli.idea)?;

    let generator = Generator::new(&store, template, validator, &cli.out_dir)?;
    generator
        .run(&idea, |component| {
            println!("{} generated {}", "✓".green(), component.component_id.bold());
        })
        .await?;

    Ok(())
}
