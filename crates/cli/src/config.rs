//! `staffboard config` - locate, show, validate, or create the settings file.

use clap::Subcommand;
use staffboard_config::Settings;

use crate::context::{load_settings, settings_path};
use crate::render::{print_json, print_text};
use crate::{CliError, GlobalArgs};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the settings file path
    Path,

    /// Print the effective settings (defaults filled in)
    Show,

    /// Check that the settings file parses and is valid
    Validate,

    /// Write a settings file with default values
    #[command(after_help = "\
Examples:
  staffboard config init
  staffboard config init --config ./event.toml --force")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn cmd_config(global: &GlobalArgs, cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Path => {
            println!("{}", settings_path(global).display());
            Ok(())
        }
        ConfigCommands::Show => cmd_config_show(global),
        ConfigCommands::Validate => cmd_config_validate(global),
        ConfigCommands::Init { force } => cmd_config_init(global, force),
    }
}

fn cmd_config_show(global: &GlobalArgs) -> Result<(), CliError> {
    let loaded = load_settings(global)?;
    if global.json {
        return print_json(&loaded.settings);
    }
    let text = loaded.settings.to_toml().map_err(CliError::config)?;
    print_text(&text)
}

fn cmd_config_validate(global: &GlobalArgs) -> Result<(), CliError> {
    let loaded = load_settings(global)?;
    if loaded.path.exists() {
        println!("ok: {}", loaded.path.display());
    } else {
        println!("no settings file at {}; defaults apply", loaded.path.display());
    }
    Ok(())
}

fn cmd_config_init(global: &GlobalArgs, force: bool) -> Result<(), CliError> {
    let path = settings_path(global);
    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("pass --force to overwrite it"));
    }

    Settings::default().save_to(&path).map_err(CliError::config)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
