use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use serde_json::json;

use flag_backend::backend::{self, BackendError};
use flag_backend::config::{load_config, FlagConfig};
use flag_backend::observability::logging;
use flag_backend::AgeSource;

#[derive(Parser)]
#[command(name = "flag-cli")]
#[command(about = "Inspect feature flags served by a configured backend", long_about = None)]
struct Cli {
    /// TOML configuration file. Without one every flag is off.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Check,
    /// Look up flags by name
    Lookup {
        /// Flag names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FlagConfig::default(),
    };
    logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::Check => {
            println!(
                "{}",
                json!({
                    "kind": config.backend.kind,
                    "flags": config.backend.flags.len(),
                    "valid": true,
                })
            );
        }
        Commands::Lookup { names } => {
            let backend = backend::from_settings(&config.backend)?;
            backend.set_error_handler(Some(Arc::new(|err: BackendError| {
                tracing::error!(error = %err, "Backend error");
            })));
            backend.set_age_callback(Some(Arc::new(|source: AgeSource, age: Duration| {
                tracing::info!(source = %source, age_ms = age.as_millis() as u64, "Flag data age");
            })));

            for name in names {
                let line = match backend.flag(&name) {
                    Ok(lookup) => json!({
                        "name": lookup.flag.name(),
                        "rate": lookup.flag.rate(),
                        "enabled": lookup.flag.is_enabled(),
                        "updated_at": lookup
                            .updated_at
                            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                            .map(|d| d.as_secs()),
                    }),
                    Err(e) => json!({ "name": name, "error": e.to_string() }),
                };
                println!("{}", line);
            }

            backend.close()?;
        }
    }

    Ok(())
}
