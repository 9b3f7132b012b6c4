//! CLI command definitions using Clap.
//!
//! - `server` - Run the tiling server
//! - `client` / `stop` - Talk to a running server

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::WintileError;
use crate::tiling::Direction;
use crate::{config, schema};

mod client;
mod server;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Windows 10 style window tiling on Linux, using Extended Window Manager
/// Hints for the X Window System.
#[derive(Parser, Debug)]
#[command(name = "wintile")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr. `RUST_LOG` overrides this.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run the tiling server.
    ///
    /// Listens for commands on a local port and tiles the focused window for
    /// each one. The bound port is written to the port file.
    Server(ServerArgs),

    /// Tile the focused window as if SUPER+direction had been pressed.
    ///
    /// The effect depends on where the window is now. For example, `left`
    /// on a window tiled right maximises it.
    Client(ClientArgs),

    /// Stop a running server.
    ///
    /// Commands already queued are still applied.
    Stop(TargetArgs),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(wintile completions --shell zsh)"
    ///   wintile completions --shell fish > ~/.config/fish/completions/wintile.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// Arguments for `server`.
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Port to listen on. Must be free. Defaults to the configured port.
    #[arg(long, short, conflicts_with = "random_port")]
    pub port: Option<u16>,

    /// Listen on a free port chosen by the OS.
    #[arg(long)]
    pub random_port: bool,
}

/// Which server a client talks to.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Port the server is listening on.
    #[arg(long, short, conflicts_with = "use_hardcoded_port")]
    pub port: Option<u16>,

    /// Use the configured port instead of reading the port file.
    ///
    /// Without this flag or --port, the port is read from the port file.
    #[arg(long)]
    pub use_hardcoded_port: bool,
}

/// Arguments for `client`.
#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Direction to tile toward.
    #[arg(value_enum)]
    pub direction: Direction,

    #[command(flatten)]
    pub target: TargetArgs,
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WintileError> {
        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(WintileError::InvalidArguments(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path);
        }

        match &self.command {
            Commands::Server(args) => server::execute(args),
            Commands::Client(args) => client::execute(args),
            Commands::Stop(args) => client::stop(args),

            Commands::Schema => {
                let schema_output = schema::generate_schema_json().map_err(io::Error::from)?;
                println!("{schema_output}");
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wintile", &mut io::stdout());
    }
}
