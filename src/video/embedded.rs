use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::warn;

/// Wire envelope of the embedded player's command channel.
#[derive(Serialize)]
struct CommandEnvelope<'a> {
    event: &'a str,
    func: &'a str,
    args: Vec<serde_json::Value>,
}

fn command_line(func: &str) -> String {
    let envelope = CommandEnvelope {
        event: "command",
        func,
        args: Vec::new(),
    };
    // A struct of three plain fields cannot fail to serialize.
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// A third-party player running as a child process, controlled only by
/// JSON command envelopes written to its stdin. Commands are
/// fire-and-forget: no reply is read and a dead channel is not retried.
pub struct EmbeddedPlayer {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl EmbeddedPlayer {
    /// Spawn the player from a full command line, e.g.
    /// `--embed "myplayer --idle"`.
    pub fn spawn(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("empty embedded player command");
        };
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start embedded player '{program}'"))?;
        let stdin = child
            .stdin
            .take()
            .context("embedded player has no stdin pipe")?;
        Ok(Self {
            child,
            stdin: Some(stdin),
        })
    }

    fn send(&mut self, func: &str) {
        let Some(stdin) = self.stdin.as_mut() else {
            return;
        };
        let line = command_line(func);
        if let Err(e) = writeln!(stdin, "{line}") {
            // Channel is gone; drop it so later commands are no-ops.
            warn!(func, error = %e, "embedded player command channel closed");
            self.stdin = None;
        }
    }

    pub fn play(&mut self) {
        self.send("playVideo");
    }

    pub fn pause(&mut self) {
        self.send("pauseVideo");
    }
}

impl Drop for EmbeddedPlayer {
    fn drop(&mut self) {
        // Closing stdin tells the player to exit; then reap it.
        self.stdin = None;
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_command_envelope_matches_the_wire_format() {
        assert_eq!(
            command_line("playVideo"),
            r#"{"event":"command","func":"playVideo","args":[]}"#
        );
    }

    #[test]
    fn pause_command_envelope_matches_the_wire_format() {
        assert_eq!(
            command_line("pauseVideo"),
            r#"{"event":"command","func":"pauseVideo","args":[]}"#
        );
    }
}
