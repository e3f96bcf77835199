use anyhow::Result;
use clap::{Parser, Subcommand};

use launchdash::cli::{self, Overrides};

#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(about = "Interactive launch records dashboard")]
struct App {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the launch dataset and serve the dashboard (default)
    Serve {
        /// Bind address, `host:port` or a bare port
        #[arg(long)]
        addr: Option<String>,
        /// CSV URL or path, overriding the configured source
        #[arg(long)]
        source: Option<String>,
        /// Open the dashboard in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Print per-site launch and success counts
    Summary {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
        /// CSV URL or path, overriding the configured source
        #[arg(long)]
        source: Option<String>,
    },
    /// Inspect or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.launchdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show config file locations
    Path,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        None => cli::run_serve(&Overrides::default()),
        Some(Commands::Serve { addr, source, open }) => cli::run_serve(&Overrides {
            source,
            addr,
            open_browser: open,
        }),
        Some(Commands::Summary { format, source }) => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_summary(
                fmt,
                &Overrides {
                    source,
                    ..Overrides::default()
                },
            )
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Path => cli::run_config_path(),
        },
    }
}
