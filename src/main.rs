//! # Overprint CLI
//!
//! Command-line interface for invoice template calibration and printing.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP API
//! overprint serve --listen 0.0.0.0:8080 --store ./template.json
//!
//! # List placeable fields
//! overprint catalog
//!
//! # Inspect or clear the saved template
//! overprint show
//! overprint clear
//!
//! # Preview the template with sample values
//! overprint preview --out preview.html
//!
//! # Render a settlement for printing
//! overprint render --settlement invoice.json --collections daily.json --out print.html
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overprint::{
    OverprintError, PageProfile, PrintRenderer,
    catalog,
    render::{Values, html},
    resolve::{DailyCollectionEntry, SettlementRecord},
    server::{self, ServerConfig},
    template::{JsonFileStore, TemplateStore},
};

/// Overprint - invoice template calibration and print rendering
#[derive(Parser, Debug)]
#[command(name = "overprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Template record file
    #[arg(long, global = true, env = "OVERPRINT_STORE", default_value = "template.json")]
    store: PathBuf,

    /// Physical page size (a4, letter)
    #[arg(long, global = true, env = "OVERPRINT_PAGE", default_value = "a4", value_parser = PageProfile::parse)]
    page: PageProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "OVERPRINT_LISTEN", default_value = "127.0.0.1:8080")]
        listen: String,

        /// Keep the template in memory instead of the store file
        #[arg(long)]
        ephemeral: bool,
    },

    /// List the placeable fields
    Catalog,

    /// Print the saved template record
    Show,

    /// Delete the saved template record
    Clear,

    /// Render the template filled with sample values
    Preview {
        /// Write HTML to FILE instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Render a settlement onto the template for printing
    Render {
        /// Settlement record (JSON)
        #[arg(long, value_name = "FILE")]
        settlement: PathBuf,

        /// Daily collection entries (JSON array)
        #[arg(long, value_name = "FILE")]
        collections: Option<PathBuf>,

        /// Write HTML to FILE instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "overprint=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), OverprintError> {
    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.store);

    match cli.command {
        Commands::Serve { listen, ephemeral } => {
            let config = ServerConfig {
                listen_addr: listen,
                store_path: (!ephemeral).then(|| cli.store.clone()),
                page: cli.page,
            };
            server::serve(config).await?;
        }

        Commands::Catalog => {
            for field in catalog::catalog() {
                println!("{:<28} {:<32} {}", field.id, field.label, field.sample_value);
            }
        }

        Commands::Show => match store.load()? {
            Some(config) => println!("{}", config.to_json()?),
            None => println!("No template saved at {}", store.path().display()),
        },

        Commands::Clear => {
            store.clear()?;
            println!("Cleared {}", store.path().display());
        }

        Commands::Preview { out } => {
            let config = store.load()?.unwrap_or_default();
            let surface = PrintRenderer::new(cli.page).render_preview(&config, Values::Sample)?;
            write_output(out.as_deref(), &html::to_html(&surface))?;
        }

        Commands::Render {
            settlement,
            collections,
            out,
        } => {
            let config = store.load()?.unwrap_or_default();
            let settlement: SettlementRecord = read_json(&settlement)?;
            let daily: Vec<DailyCollectionEntry> = match collections {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };

            let surface = PrintRenderer::new(cli.page).render(&config, &settlement, &daily)?;
            write_output(out.as_deref(), &html::to_html(&surface))?;
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, OverprintError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a document to `path`, or stdout when none is given.
fn write_output(path: Option<&Path>, document: &str) -> Result<(), OverprintError> {
    match path {
        Some(path) => {
            std::fs::write(path, document)?;
            eprintln!("Saved to {}", path.display());
        }
        None => print!("{}", document),
    }
    Ok(())
}
