//! Extension to manage player settings in vrtconfig
//!
//! # Example
//!
//! ```rust,ignore
//! use vrtconfig::get_config;
//! use vrtplayer::PlayerConfigExt;
//!
//! let config = get_config();
//! let command = config.get_player_command()?;
//! let log_path = config.get_play_log_path()?;
//! ```

use crate::player::{DEFAULT_PLAYER_ARGS, DEFAULT_PLAYER_COMMAND};
use anyhow::Result;
use serde_yaml::Value;
use vrtconfig::Config;

/// Default play log file name (relative to the config_dir)
const DEFAULT_PLAY_LOG_FILE: &str = "playlog.csv";

/// Extension trait for player configuration in vrtconfig
pub trait PlayerConfigExt {
    /// Gets the player command (default: mplayer)
    fn get_player_command(&self) -> Result<String>;

    /// Sets the player command
    fn set_player_command(&self, command: String) -> Result<()>;

    /// Gets the player arguments, split on whitespace
    fn get_player_args(&self) -> Result<Vec<String>>;

    /// Sets the player arguments as one whitespace-separated string
    fn set_player_args(&self, args: String) -> Result<()>;

    /// Gets the play log path, resolved against the config_dir
    fn get_play_log_path(&self) -> Result<String>;

    /// Sets the play log path (absolute or relative to the config_dir)
    fn set_play_log_path(&self, path: String) -> Result<()>;
}

impl PlayerConfigExt for Config {
    fn get_player_command(&self) -> Result<String> {
        match self.get_value(&["player", "command"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_PLAYER_COMMAND.to_string()),
        }
    }

    fn set_player_command(&self, command: String) -> Result<()> {
        self.set_value(&["player", "command"], Value::String(command))
    }

    fn get_player_args(&self) -> Result<Vec<String>> {
        match self.get_value(&["player", "args"]) {
            Ok(Value::String(s)) => Ok(s.split_whitespace().map(str::to_string).collect()),
            _ => Ok(DEFAULT_PLAYER_ARGS.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn set_player_args(&self, args: String) -> Result<()> {
        self.set_value(&["player", "args"], Value::String(args))
    }

    fn get_play_log_path(&self) -> Result<String> {
        self.get_managed_path(&["player", "log_file"], DEFAULT_PLAY_LOG_FILE)
    }

    fn set_play_log_path(&self, path: String) -> Result<()> {
        self.set_managed_path(&["player", "log_file"], path)
    }
}
