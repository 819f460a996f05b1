use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use code_change::change::{ChangeStatus, diff_summary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "code-change")]
#[command(about = "Apply and revert file changes with automatic backups")]
#[command(version)]
struct Cli {
    /// Handler settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a change request to a repository
    Apply {
        /// Repository root
        root: PathBuf,
        /// JSON object mapping relative paths to new file content
        changes: PathBuf,
        /// Print a human-readable diff summary instead of the JSON result
        #[arg(long)]
        summary: bool,
    },
    /// Restore files from their most recent backups
    Revert {
        /// Repository root
        root: PathBuf,
        /// Relative paths to restore
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// List the backups of a file, oldest first
    Backups {
        /// Repository root
        root: PathBuf,
        /// Relative path of the file
        file: String,
    },
}

fn init_logging() {
    // stdout carries results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn exit_for(status: ChangeStatus) {
    if !status.is_success() {
        process::exit(1);
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Apply {
            root,
            changes,
            summary,
        } => match code_change::commands::apply::run(&root, &changes, config) {
            Ok(result) => {
                if summary {
                    println!("{}", diff_summary(&result.patches));
                    for error in &result.errors {
                        eprintln!("{}", error);
                    }
                } else {
                    print_json(&result);
                }
                exit_for(result.status);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        },
        Commands::Revert { root, files } => {
            match code_change::commands::revert::run(&root, &files, config) {
                Ok(result) => {
                    print_json(&result);
                    exit_for(result.status);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
        Commands::Backups { root, file } => {
            match code_change::commands::backups::run(&root, &file, config) {
                Ok(backups) => {
                    for backup in backups {
                        println!("{}", backup.display());
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
    }
}
