//! Command-line interface for tiered-config
//!
//! Every subcommand loads the configuration the same way the application
//! would, then prints part of it.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use tiered_config::config::DEFAULT_OVERLAY_VAR;
use tiered_config::{
    assets, AssetStore, EmptyAssets, Loader, LoaderOptions, MergeStrategy, RunMode, Runtime,
    Section, Settings,
};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod inspect;

/// Resolve, merge and inspect layered JSON application configuration
#[derive(Parser)]
#[command(name = "tiered-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    load: LoadArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct LoadArgs {
    /// Run mode (defaults to $APP_ENV, then prod)
    #[arg(long, global = true, value_enum)]
    env: Option<ModeArg>,

    /// Base directory for dev and external config files
    #[arg(long, global = true, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Skip the config files compiled into the binary
    #[arg(long, global = true)]
    no_embedded: bool,

    /// Replace top-level values instead of merging nested objects
    #[arg(long, global = true)]
    shallow: bool,

    /// Ignore the JSON overlay in $APP_CONFIG
    #[arg(long, global = true)]
    no_overlay: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Dev,
    Prod,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dev => RunMode::Dev,
            ModeArg::Prod => RunMode::Prod,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Logger,
    Http,
    Static,
}

impl From<SectionArg> for Section {
    fn from(section: SectionArg) -> Self {
        match section {
            SectionArg::Logger => Section::Logger,
            SectionArg::Http => Section::Http,
            SectionArg::Static => Section::Static,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged settings as JSON
    Show {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Print one value; dotted keys walk nested objects (http.port)
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print a required section, failing if it is missing or not an object
    Section {
        #[arg(value_enum)]
        section: SectionArg,
    },

    /// Show which tier was used and where each top-level key came from
    Sources {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "tiered-config", &mut std::io::stdout());
        return Ok(());
    }

    let settings = load(&cli.load)?;
    match cli.command {
        Commands::Show { compact } => inspect::show(&settings, compact),
        Commands::Get { key } => inspect::get(&settings, &key),
        Commands::Section { section } => inspect::section(&settings, section.into()),
        Commands::Sources { json } => inspect::sources(&settings, json),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load(args: &LoadArgs) -> Result<Settings> {
    let mut runtime = match args.env {
        Some(mode) => Runtime::detect_with_mode(mode.into()),
        None => Runtime::detect(),
    };
    if let Some(dir) = &args.base_dir {
        runtime.base_dir = dir.clone();
    }
    tracing::debug!("Run mode {:?}, base directory {}", runtime.mode, runtime.base_dir.display());

    let options = LoaderOptions {
        strategy: if args.shallow { MergeStrategy::Shallow } else { MergeStrategy::Deep },
        env_overlay: (!args.no_overlay).then(|| DEFAULT_OVERLAY_VAR.to_string()),
        ..LoaderOptions::default()
    };

    let assets: &dyn AssetStore = if args.no_embedded { &EmptyAssets } else { assets::bundled() };
    Ok(Loader::new(runtime, assets).with_options(options).load()?)
}
