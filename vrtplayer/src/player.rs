//! External player process driver

use crate::error::Result;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Default player command
pub const DEFAULT_PLAYER_COMMAND: &str = "mplayer";

/// Default player arguments, passed before the stream URL
pub const DEFAULT_PLAYER_ARGS: [&str; 3] = ["-slave", "-quiet", "-prefer-ipv4"];

/// Playback state as seen by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No child process is running
    Idle,
    /// A player child process is active
    Playing,
}

/// Drives one external player process at a time
///
/// The driver owns at most one child process. `play` always tears down the
/// previous child before spawning the next one, so two players can never
/// run side by side.
///
/// # Example
///
/// ```no_run
/// use vrtplayer::PlaybackDriver;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut player = PlaybackDriver::new();
///     player.play("https://a.example/stream")?;
///     player.wait().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct PlaybackDriver {
    command: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackDriver {
    /// Create a driver using the default player command
    pub fn new() -> Self {
        Self::with_command(
            DEFAULT_PLAYER_COMMAND,
            DEFAULT_PLAYER_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Create a driver with a custom player command and arguments
    ///
    /// The stream URL is appended after `args` on every `play`.
    pub fn with_command(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            child: None,
        }
    }

    /// Current state, without reaping a finished child
    pub fn state(&self) -> PlayerState {
        if self.child.is_some() {
            PlayerState::Playing
        } else {
            PlayerState::Idle
        }
    }

    /// Start playing a stream URL
    ///
    /// Any previous player process is killed and reaped first, then the new
    /// child is spawned detached from our stdio.
    pub fn play(&mut self, url: &str) -> Result<()> {
        self.kill_current();

        info!(command = %self.command, url = %url, "Starting player");
        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        self.child = Some(child);
        Ok(())
    }

    /// Wait until the current player process exits
    ///
    /// No-op when idle. The driver is idle afterwards.
    pub async fn wait(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            let status = child.wait().await?;
            debug!(status = %status, "Player exited");
        }
        Ok(())
    }

    /// Non-blocking check of the player process
    ///
    /// Reaps the child if it has finished. Returns the state after the
    /// check.
    pub fn poll(&mut self) -> Result<PlayerState> {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait()? {
                Some(status) => {
                    debug!(status = %status, "Player exited");
                    self.child = None;
                    Ok(PlayerState::Idle)
                }
                None => Ok(PlayerState::Playing),
            }
        } else {
            Ok(PlayerState::Idle)
        }
    }

    /// Stop the current player process, if any
    pub fn stop(&mut self) {
        self.kill_current();
    }

    fn kill_current(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!("Stopping previous player process");
            // Exited children just get reaped here; the error from killing
            // an already-dead process is not interesting.
            let _ = child.start_kill();
            let _ = child.try_wait();
        }
    }
}
