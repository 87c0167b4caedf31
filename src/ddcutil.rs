// SPDX-License-Identifier: GPL-3.0-only
//! Async wrapper around the ddcutil command-line utility.
//!
//! Every operation spawns one ddcutil process and captures its output. There
//! are no retries and no timeout; a hung ddcutil stalls that one call, never
//! the event loop. Callers own the policy of not overlapping calls for the
//! same monitor.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{PanelError, Result};
use crate::monitor::Control;

/// Handle on the configured ddcutil executable.
#[derive(Clone, Debug)]
pub struct DdcutilClient {
    path: PathBuf,
}

impl DdcutilClient {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Run ddcutil with `args` and return captured stdout.
    ///
    /// A non-zero exit with a non-empty error stream fails. A non-zero exit
    /// with an empty error stream still resolves with stdout: ddcutil exits
    /// non-zero when any probed display is invalid while printing perfectly
    /// usable data for the rest.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let program = self.path.display().to_string();
        debug!("running {program} {}", args.join(" "));

        let output = Command::new(&self.path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PanelError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            debug!("{program} exited with {} but wrote no error, keeping stdout", output.status);
            Ok(stdout)
        } else {
            Err(PanelError::CommandFailed {
                program,
                status: output.status,
                stderr,
            })
        }
    }

    /// `ddcutil detect --brief`: one text block per monitor, blocks separated
    /// by a blank line.
    pub async fn detect_brief(&self) -> Result<String> {
        self.run(&["detect", "--brief"]).await
    }

    /// Read the current value of a VCP feature on the given I2C bus.
    pub async fn get_vcp(&self, control: Control, bus: u8) -> Result<u16> {
        let code = control.feature_code_arg();
        let bus = bus.to_string();
        let out = self.run(&["getvcp", "--brief", code, "--bus", &bus]).await?;
        parse_vcp_value(&out)
    }

    /// Write a VCP feature value. Output is ignored, fire and forget.
    pub async fn set_vcp(&self, control: Control, value: u16, bus: u8) -> Result<()> {
        let code = control.feature_code_arg();
        let value = value.to_string();
        let bus = bus.to_string();
        self.run(&["setvcp", code, &value, "--bus", &bus]).await?;
        Ok(())
    }
}

/// Parse `getvcp --brief` output, e.g. `VCP 10 C 37 100`. The current value
/// is the fourth whitespace-delimited field.
pub fn parse_vcp_value(output: &str) -> Result<u16> {
    output
        .split_whitespace()
        .nth(3)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| PanelError::Parse {
            what: "getvcp",
            output: output.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stand in for ddcutil with shell one-liners.
    fn sh() -> DdcutilClient {
        DdcutilClient::new(PathBuf::from("sh"))
    }

    #[test]
    fn parses_brief_getvcp_output() {
        assert_eq!(parse_vcp_value("VCP 10 C 37 100").unwrap(), 37);
        assert_eq!(parse_vcp_value("VCP 12 C 50 100\n").unwrap(), 50);
    }

    #[test]
    fn rejects_short_output() {
        assert!(parse_vcp_value("").is_err());
        assert!(parse_vcp_value("VCP 10 C").is_err());
        assert!(parse_vcp_value("VCP 10 C x 100").is_err());
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let client = sh();
        let out = client.run(&["-c", "echo hello"]).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn nonzero_exit_with_stderr_fails() {
        let client = sh();
        let err = client
            .run(&["-c", "echo data; echo broken >&2; exit 1"])
            .await
            .unwrap_err();
        match err {
            PanelError::CommandFailed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_without_stderr_keeps_stdout() {
        let client = sh();
        let out = client
            .run(&["-c", "echo partial data; exit 1"])
            .await
            .unwrap();
        assert_eq!(out.trim(), "partial data");
    }

    #[tokio::test]
    async fn missing_executable_is_a_spawn_error() {
        let client = DdcutilClient::new(PathBuf::from("/nonexistent/ddcutil"));
        let err = client.run(&["detect"]).await.unwrap_err();
        assert!(matches!(err, PanelError::Spawn { .. }));
    }
}
