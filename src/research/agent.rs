//! External research agent
//!
//! The research collaborator is an opaque prompt-to-text function. The
//! production implementation shells out to the `claude` CLI; tests swap in
//! a mock through the trait.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::RESEARCH_TIMEOUT_SECS;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("Failed to spawn research agent: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Research agent exited with {0}")]
    Failed(std::process::ExitStatus),

    #[error("Research timed out after {0:?}")]
    TimedOut(Duration),
}

/// Trait for generating a research brief from a prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Produces research text for a prompt, or fails with a timeout or
    /// invocation error
    async fn research(&self, prompt: &str) -> Result<String, ResearchError>;
}

/// Research agent backed by the `claude` CLI
pub struct ClaudeAgent {
    command: String,
    timeout: Duration,
}

impl ClaudeAgent {
    pub fn new(command: &str, timeout: Duration) -> Self {
        Self {
            command: command.to_string(),
            timeout,
        }
    }
}

impl Default for ClaudeAgent {
    fn default() -> Self {
        Self::new("claude", Duration::from_secs(RESEARCH_TIMEOUT_SECS))
    }
}

#[async_trait::async_trait]
impl ResearchAgent for ClaudeAgent {
    async fn research(&self, prompt: &str) -> Result<String, ResearchError> {
        debug!("Spawning {} for research", self.command);

        let child = tokio::process::Command::new(&self.command)
            .arg("-p")
            .arg(prompt)
            .arg("--output-format")
            .arg("text")
            .arg("--dangerously-skip-permissions")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // Dropping the wait future on timeout must not leave the child running
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => return Err(ResearchError::TimedOut(self.timeout)),
        };

        if !output.status.success() {
            return Err(ResearchError::Failed(output.status));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
