use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trackinfo::archive::{consolidate_root, deconsolidate_root};
use trackinfo::config::{AppConfig, CliConfig, FileConfig};
use trackinfo::editor::{edit_root, InsertionPolicy};
use trackinfo::script::{parse_script, CommandList};

#[derive(Parser)]
#[command(name = "trackinfo", version, about = "Batch tooling for per-track metadata records")]
struct CliArgs {
    /// Path to an optional TOML config file; its values override the flags.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Also log per-file progress and recoverable skips.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Applies a command script to the records under each root.
    Edit {
        /// Edit each media file's .info record instead of the archive.
        #[clap(long, conflicts_with = "cinfo")]
        info: bool,

        /// Edit the consolidated <prefix>.cinfo archive. This is the default.
        #[clap(long)]
        cinfo: bool,

        /// Read the command script from a file instead of standard input.
        #[clap(long)]
        script: Option<PathBuf>,

        /// Filename stem of the archive file.
        #[clap(long, default_value = "default")]
        prefix: String,

        /// Directories to process.
        #[clap(required = true)]
        roots: Vec<PathBuf>,
    },

    /// Merges the records under each root into one archive plus an index.
    Collect {
        /// Filename stem of the archive and index files.
        #[clap(long, default_value = "default")]
        prefix: String,

        /// Do not write the .cindex file.
        #[clap(long)]
        noindex: bool,

        /// Directories to process.
        #[clap(required = true)]
        roots: Vec<PathBuf>,
    },

    /// Splits each root's archive back into individual records.
    Uncollect {
        /// Filename stem of the archive and index files.
        #[clap(long, default_value = "default")]
        prefix: String,

        /// Take section paths from the archive markers, ignoring any index.
        #[clap(long)]
        noindex: bool,

        /// Directories to process.
        #[clap(required = true)]
        roots: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let default_level = if cli_args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    match cli_args.command {
        InnerCommand::Edit {
            info: per_file,
            cinfo: _,
            script,
            prefix,
            roots,
        } => {
            let cli = CliConfig {
                prefix,
                insertion_policy: if per_file {
                    InsertionPolicy::AtBeginning
                } else {
                    InsertionPolicy::AtMarker
                },
                ..Default::default()
            };
            let config = AppConfig::resolve(&cli, file_config)?;
            let commands = read_script(script.as_deref())?;
            info!("Parsed {} command(s)", commands.len());
            for root in &roots {
                let outcome = edit_root(root, &commands, &config)
                    .with_context(|| format!("Failed to edit records under {:?}", root))?;
                info!(
                    "Rewrote {} record(s) under {}",
                    outcome.records_edited,
                    root.display()
                );
            }
        }
        InnerCommand::Collect {
            prefix,
            noindex,
            roots,
        } => {
            let cli = CliConfig {
                prefix,
                use_index: !noindex,
                ..Default::default()
            };
            let config = AppConfig::resolve(&cli, file_config)?;
            for root in &roots {
                let outcome = consolidate_root(root, &config)
                    .with_context(|| format!("Failed to collect records under {:?}", root))?;
                info!(
                    "Collected {} track(s) ({} with content) under {}",
                    outcome.tracks,
                    outcome.sections_with_content,
                    root.display()
                );
            }
        }
        InnerCommand::Uncollect {
            prefix,
            noindex,
            roots,
        } => {
            let cli = CliConfig {
                prefix,
                use_index: !noindex,
                ..Default::default()
            };
            let config = AppConfig::resolve(&cli, file_config)?;
            for root in &roots {
                let outcome = deconsolidate_root(root, &config)
                    .with_context(|| format!("Failed to uncollect the archive under {:?}", root))?;
                info!(
                    "Wrote {} record(s) ({} cleared) under {}",
                    outcome.sidecars_written,
                    outcome.cleared,
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// The command script comes from standard input unless a file was given.
fn read_script(path: Option<&Path>) -> Result<CommandList> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script file: {:?}", path))?;
            Ok(parse_script(BufReader::new(file))?)
        }
        None => Ok(parse_script(io::stdin().lock())?),
    }
}
