use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use decryptor::cli::{handle_columns, handle_export, handle_seal, handle_view, KeyArgs, SessionArgs};
use decryptor::config::{paths::DecryptorPaths, settings::Settings};
use decryptor::export::ExportFormat;

#[derive(Parser)]
#[command(
    name = "decryptor",
    version,
    about = "View and export tabular files with encrypted PII columns",
    long_about = "Loads a CSV or spreadsheet file, decrypts the columns you mark as \
                  encrypted with your key, and shows or exports the result. Cells \
                  that cannot be decrypted are shown as they are."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of a file
    View {
        #[command(flatten)]
        session: SessionArgs,

        /// Page to show (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// List the columns of a file
    Columns {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Export a file as a zipped spreadsheet or CSV
    Export {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format (xlsx or csv)
        #[arg(short, long, default_value = "xlsx")]
        format: ExportFormat,

        /// Directory the archive is written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Encrypt a single value (for producing test data)
    Seal {
        /// Plaintext to encrypt
        value: String,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DecryptorPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Some(Commands::View { session, page }) => {
            handle_view(&settings, &session, page).await?;
        }
        Some(Commands::Columns { session }) => {
            handle_columns(&settings, &session)?;
        }
        Some(Commands::Export {
            session,
            format,
            out,
        }) => {
            handle_export(&settings, &session, format, &out).await?;
        }
        Some(Commands::Seal { value, key }) => {
            handle_seal(&settings, &key, &value)?;
        }
        Some(Commands::Config) => {
            println!("Decryptor Configuration");
            println!("=======================");
            println!("Settings file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Rows per page:       {}", settings.rows_per_page);
            println!("  Export basename:     {}", settings.export_basename);
            println!("  Ciphertext encoding: {}", settings.ciphertext_encoding);
            println!("  Log filter:          {}", settings.log_filter);
        }
        None => {
            println!("decryptor - view and export tables with encrypted columns");
            println!();
            println!("Run 'decryptor --help' for usage information.");
        }
    }

    Ok(())
}
