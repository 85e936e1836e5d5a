// Staffboard CLI - headless event staffing dashboard

mod board;
mod config;
mod context;
mod exit_codes;
mod incidents;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use staffboard_engine::filter::{AccessFilter, AllergyFilter, GenderFilter};
use staffboard_engine::matcher::SUGGESTION_LIMIT;
use staffboard_engine::{NewIncident, RecordClass};

use exit_codes::{
    EXIT_CONFIG_INVALID, EXIT_ERROR, EXIT_EXPORT_FAILED, EXIT_NOT_FOUND, EXIT_SOURCE_UNAVAILABLE,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "staffboard")]
#[command(about = "Event staffing operations dashboard (headless)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file (default: <config dir>/staffboard/settings.toml)
    #[arg(long, global = true, env = "STAFFBOARD_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read <DIR>/hosts.csv, <DIR>/guests.csv, ... instead of configured sources
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override one source, e.g. guests=https://example.org/guests.csv (repeatable)
    #[arg(long = "source", global = true, value_name = "NAME=LOC")]
    pub sources: Vec<String>,

    /// Exit with an error if any source fails to load
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output JSON to stdout instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline metrics: confirmation rates, matches, open incidents
    Summary,

    /// Filtered host or guest table
    #[command(after_help = "\
Examples:
  staffboard rows --class guests --access wheelchair
  staffboard rows --gender female --search ana
  staffboard rows --class hosts --csv > hosts-view.csv")]
    Rows(RowsArgs),

    /// Ranked guest/host match suggestions
    Suggest {
        /// Show at most this many (never more than 50)
        #[arg(long, default_value_t = SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Accept a suggested pairing (nothing is written back)
    Confirm {
        /// Guest id
        #[arg(long)]
        guest: String,

        /// Host id
        #[arg(long)]
        host: String,
    },

    /// Incident log: incidents added in this run, then loaded ones
    #[command(after_help = "\
Examples:
  staffboard incidents
  staffboard incidents --add 'type=Medical;person=Ana Lima;notes=ice pack'
  staffboard incidents --add 'type=Noise;status=Closed' --export out/")]
    Incidents {
        /// Add an incident: field=value pairs separated by ';'
        /// (fields: time, type, person, status, notes). Repeatable.
        #[arg(long = "add", value_name = "SPEC")]
        add: Vec<NewIncident>,

        /// Write incidents.csv into this directory (skipped when there are none)
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Communications log
    Comms,

    /// Arrival/departure board
    Transport,

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RowsArgs {
    /// Which table (default from settings, else hosts)
    #[arg(long)]
    pub class: Option<RecordClass>,

    /// all | female | male | nonbinary
    #[arg(long)]
    pub gender: Option<GenderFilter>,

    /// all | gluten | peanuts
    #[arg(long)]
    pub allergy: Option<AllergyFilter>,

    /// all | wheelchair | elevator
    #[arg(long)]
    pub access: Option<AccessFilter>,

    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Print the rows as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  staffboard-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG directives are applied after -v and win where they overlap.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let global = &cli.global;
    let result = match cli.command {
        Commands::Summary => board::cmd_summary(global),
        Commands::Rows(args) => board::cmd_rows(global, &args),
        Commands::Suggest { limit } => board::cmd_suggest(global, limit),
        Commands::Confirm { guest, host } => board::cmd_confirm(global, &guest, &host),
        Commands::Incidents { add, export } => incidents::cmd_incidents(global, add, export),
        Commands::Comms => board::cmd_comms(global),
        Commands::Transport => board::cmd_transport(global),
        Commands::Config { command } => config::cmd_config(global, command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn config(err: staffboard_config::ConfigError) -> Self {
        use staffboard_config::ConfigError;
        match err {
            ConfigError::UnknownSource(_) => Self::args(err.to_string())
                .with_hint("sources are: hosts, guests, matches, incidents, comms"),
            ConfigError::InvalidOverride(_) => Self::args(err.to_string()),
            _ => Self::new(EXIT_CONFIG_INVALID, err.to_string())
                .with_hint("run `staffboard config validate` to check the settings file"),
        }
    }

    pub fn sources_unavailable(failed: usize) -> Self {
        Self::new(
            EXIT_SOURCE_UNAVAILABLE,
            format!("{failed} source(s) failed to load"),
        )
        .with_hint("see the warnings above, or drop --strict to show empty collections")
    }

    pub fn export(err: staffboard_io::ExportError) -> Self {
        Self::new(EXIT_EXPORT_FAILED, err.to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(EXIT_NOT_FOUND, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
