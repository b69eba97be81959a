//! # ftheader CLI
//!
//! Inserts and refreshes the eleven-line header block at the top of
//! source files, from the shell or from an editor over LSP.
//!
//! ## Usage
//!
//! ```bash
//! # Set up your identity once
//! ftheader config set --identity ada --email ada@example.com
//!
//! # Add or refresh headers
//! ftheader insert src/
//!
//! # Fail CI when a header is missing
//! ftheader check src/
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ftheader::commands;

/// Initialize logger based on verbose flag
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ftheader")]
#[command(about = "Insert and refresh 42-style file headers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Insert a header into files that lack one, refresh it in files that have one
    Insert {
        /// Files or directories to process
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<PathBuf>,
        /// Show the changes as unified diffs without writing files
        #[arg(long)]
        dry_run: bool,
        /// Language id to use for every file (e.g. c, python, lua)
        #[arg(long, value_name = "ID")]
        language: Option<String>,
        /// Total header width (clamped to 70-160)
        #[arg(long, value_name = "N")]
        width: Option<i64>,
        /// Enable verbose output
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Report header presence and creation metadata
    Check {
        /// Files or directories to check
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Also list files that do have a header
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Count function definitions in C files
    Count {
        /// Files or directories to scan
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Start the LSP server for editor integration
    Lsp {
        /// Enable verbose logging to stderr
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Use stdio transport (default, added for compatibility with language clients)
        #[arg(long, hide = true)]
        stdio: bool,
    },
}

/// Config subcommands
#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set identity, email or header width
    Set {
        /// Login written into headers
        #[arg(long)]
        identity: Option<String>,
        /// Email written on the By line
        #[arg(long)]
        email: Option<String>,
        /// Total header width
        #[arg(long, value_name = "N")]
        width: Option<i64>,
    },
    /// Turn header insertion on file creation on or off
    ToggleAutoInsert,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = run_command(cli.command).await;
    std::process::exit(exit_code);
}

async fn run_command(command: Commands) -> i32 {
    use ftheader::exit_codes::*;

    match command {
        Commands::Insert {
            paths,
            dry_run,
            language,
            width,
            verbose,
        } => {
            init_logger(verbose);
            let args = commands::insert::InsertArgs {
                paths,
                dry_run,
                language,
                width,
                verbose,
            };
            match commands::insert::execute(args) {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Insert error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
        Commands::Check {
            paths,
            json,
            verbose,
        } => {
            init_logger(verbose);
            let args = commands::check::CheckArgs {
                paths,
                json,
                verbose,
            };
            match commands::check::execute(args) {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Check error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
        Commands::Count { paths, json } => {
            init_logger(false);
            match commands::count::execute(commands::count::CountArgs { paths, json }) {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("Count error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
        Commands::Config { command } => {
            init_logger(false);
            run_config_command(command)
        }
        Commands::Lsp { verbose, stdio: _ } => {
            init_logger(verbose);
            // stdio flag is just for compatibility with language clients, we always use stdio
            let args = commands::lsp::LspArgs { verbose };
            match commands::lsp::execute(args).await {
                Ok(exit_code) => exit_code,
                Err(e) => {
                    eprintln!("LSP error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
    }
}

fn run_config_command(command: ConfigCommands) -> i32 {
    use ftheader::exit_codes::*;

    let result = match command {
        ConfigCommands::Show => commands::config::execute_show(),
        ConfigCommands::Set {
            identity,
            email,
            width,
        } => commands::config::execute_set(commands::config::ConfigSetArgs {
            identity,
            email,
            width,
        }),
        ConfigCommands::ToggleAutoInsert => commands::config::execute_toggle_auto_insert(),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG_ERROR
        }
    }
}
