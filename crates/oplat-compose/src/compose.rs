//! docker compose CLI wrapper

use crate::error::{ComposeError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Invokes `<program> compose ...`
#[derive(Debug, Clone)]
pub struct DockerCompose {
    program: String,
}

impl Default for DockerCompose {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCompose {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that `docker compose` can be invoked
    pub async fn check_installed(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .args(["compose", "version"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                tracing::debug!(
                    version = %String::from_utf8_lossy(&output.stdout).trim(),
                    "docker compose available"
                );
                Ok(())
            }
            _ => Err(ComposeError::ComposeNotInstalled),
        }
    }

    /// `docker compose -p <project> -f <file> up -d`
    pub async fn up(&self, project: &str, file: &Path) -> Result<()> {
        let file = file.to_string_lossy();
        self.run_streaming(&["-p", project, "-f", file.as_ref(), "up", "-d"])
            .await
    }

    /// `docker compose -p <project> down`
    pub async fn down(&self, project: &str) -> Result<()> {
        self.run_streaming(&["-p", project, "down"]).await
    }

    /// `docker compose -p <project> ps [-a]`, captured
    pub async fn ps(&self, project: &str, all: bool) -> Result<String> {
        let mut args = vec!["-p", project, "ps"];
        if all {
            args.push("-a");
        }
        self.run_captured(&args).await
    }

    /// Run a compose command and return stdout
    async fn run_captured(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("compose");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} compose {}", self.program, args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ComposeError::CommandFailed {
                command: args.join(" "),
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a compose command, echoing its stdout and stderr line by line as
    /// they arrive
    async fn run_streaming(&self, args: &[&str]) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("compose");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} compose {}", self.program, args.join(" "));

        let mut child = cmd.spawn()?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let forward_stdout = async {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Some(line) = lines.next_line().await? {
                    println!("{}", line);
                }
            }
            Ok::<_, std::io::Error>(())
        };
        let forward_stderr = async {
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Some(line) = lines.next_line().await? {
                    eprintln!("{}", line);
                }
            }
            Ok::<_, std::io::Error>(())
        };

        let (out, err) = tokio::join!(forward_stdout, forward_stderr);
        out?;
        err?;

        let status = child.wait().await?;
        if !status.success() {
            return Err(ComposeError::CommandFailed {
                command: args.join(" "),
                message: match status.code() {
                    Some(code) => format!("exited with status {}", code),
                    None => "terminated by signal".to_string(),
                },
            });
        }

        Ok(())
    }
}
