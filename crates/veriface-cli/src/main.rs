use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[zbus::proxy(
    interface = "org.freedesktop.Veriface1",
    default_service = "org.freedesktop.Veriface1",
    default_path = "/org/freedesktop/Veriface1"
)]
trait Veriface {
    async fn verify_pages(&self, pages: Vec<String>) -> zbus::Result<String>;
    async fn status(&self) -> zbus::Result<String>;
}

#[derive(Parser)]
#[command(name = "veriface", about = "Veriface document face verification CLI")]
struct Cli {
    /// Connect over the session bus instead of the system bus
    #[arg(long)]
    session: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that a document's page images show the same person
    Verify {
        /// Page image files, in page order (at least two)
        pages: Vec<PathBuf>,
    },
    /// Show daemon status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let conn = if cli.session {
        zbus::Connection::session().await
    } else {
        zbus::Connection::system().await
    }
    .context("failed to connect to the bus; is verifaced running?")?;

    let proxy = VerifaceProxy::new(&conn).await?;

    match cli.command {
        Commands::Verify { pages } => {
            // Canonicalize so the daemon resolves the same files regardless
            // of its working directory.
            let mut paths = Vec::with_capacity(pages.len());
            for page in &pages {
                let abs = page
                    .canonicalize()
                    .with_context(|| format!("cannot access {}", page.display()))?;
                paths.push(abs.to_string_lossy().into_owned());
            }

            let raw = proxy.verify_pages(paths).await?;
            print_json(&raw)?;
        }
        Commands::Status => {
            let raw = proxy.status().await?;
            print_json(&raw)?;
        }
    }

    Ok(())
}

fn print_json(raw: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(raw).context("malformed reply")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
