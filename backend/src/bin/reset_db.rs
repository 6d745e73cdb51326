//! Drop and recreate the calculator schema.
//!
//! Reverts every applied migration and then re-applies them, leaving empty
//! `users` and `calculations` tables. Refuses to run without `--yes`.

use clap::Parser;
use color_eyre::eyre::{Result, bail, eyre};
use ortho_config::OrthoConfig;

use calculator_backend::outbound::persistence::reset_schema;
use calculator_backend::settings::AppSettings;

/// Command-line arguments for the reset tool.
#[derive(Debug, Parser)]
#[command(name = "reset-db", about = "Drop and recreate the calculator schema")]
struct Args {
    /// Database URL; defaults to CALC_DATABASE_URL or DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
    /// Confirm that all stored users and calculations may be deleted.
    #[arg(long)]
    yes: bool,
}

fn resolve_database_url(args: &Args) -> Result<String> {
    if let Some(url) = &args.database_url {
        return Ok(url.clone());
    }
    let settings = AppSettings::load_from_iter([std::ffi::OsString::from("reset-db")])
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    Ok(settings.database_url()?)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if !args.yes {
        bail!("refusing to reset the database without --yes");
    }

    let url = resolve_database_url(&args)?;
    println!("Resetting database schema...");
    reset_schema(&url)?;
    println!("Database schema recreated.");
    Ok(())
}
