//! Engine that delegates to an external command.
//!
//! The command receives one JSON document on stdin:
//!
//! ```json
//! {"crew": {...}, "inputs": {...}, "prompts": [{"task": "...", "description": "...", "expected_output": "..."}]}
//! ```
//!
//! and writes its result to stdout, either as a `{"raw": "...", "tasks": [...]}`
//! object or as plain text.

use super::{CrewEngine, CrewOutput, KickoffInputs, TaskPrompt, render_prompts};
use crate::error::{EngineError, Result};
use crate::resolver::ResolvedCrew;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

#[derive(Serialize)]
struct KickoffRequest<'a> {
    crew: &'a ResolvedCrew,
    inputs: &'a KickoffInputs,
    prompts: Vec<TaskPrompt>,
}

/// Runs a configured program once per kickoff.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    environment: BTreeMap<String, String>,
    timeout: Duration,
}

impl CommandEngine {
    /// Parse `command` with shell-words. No shell is involved.
    pub fn new(
        command: &str,
        environment: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut words = shell_words::split(command).map_err(|e| {
            EngineError::Validation(format!(
                "failed to parse engine command '{}': {}",
                command, e
            ))
        })?;

        if words.is_empty() {
            let message = "engine command is empty".to_string();
            return Err(EngineError::Validation(message));
        }
        let program = words.remove(0);

        Ok(Self {
            program,
            args: words,
            environment,
            timeout,
        })
    }

    /// The program and its arguments, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn run(&self, stdin_payload: Vec<u8>) -> Result<std::process::Output> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.environment)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            EngineError::Internal(format!(
                "failed to start engine command '{}': {}",
                self.program, e
            ))
        })?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(&stdin_payload).await {
                    Ok(()) => {}
                    // The command closed stdin; its exit status is reported instead
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                        debug!("engine command closed stdin early");
                    }
                    Err(e) => return Err(e),
                }
                // Dropping stdin closes the pipe so the command sees EOF
            }
            Ok(())
        };

        // Writing and waiting share one deadline; on timeout the child is
        // dropped and killed
        let exchange = async { tokio::join!(feed, child.wait_with_output()) };
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok((_, Err(e))) => Err(EngineError::Internal(format!(
                "failed to wait for engine command: {}",
                e
            ))),
            Ok((Err(e), Ok(_))) => Err(EngineError::Internal(format!(
                "failed to write to engine command: {}",
                e
            ))),
            Ok((Ok(()), Ok(output))) => Ok(output),
            Err(_) => Err(EngineError::Internal(format!(
                "engine command timed out after {}s",
                self.timeout.as_secs_f64()
            ))),
        }
    }
}

#[async_trait]
impl CrewEngine for CommandEngine {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn kickoff(&self, crew: &ResolvedCrew, inputs: &KickoffInputs) -> Result<CrewOutput> {
        let request = KickoffRequest {
            crew,
            inputs,
            prompts: render_prompts(crew, inputs)?,
        };
        let payload = serde_json::to_vec(&request).map_err(|e| {
            EngineError::Internal(format!("failed to encode kickoff request: {}", e))
        })?;

        let started = Instant::now();
        let output = self.run(payload).await.inspect_err(|e| {
            error!(crew = %crew.name, command = %self.command_line(), error = %e, "engine command failed");
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(crew = %crew.name, status = %output.status, "engine command exited unsuccessfully");
            return Err(EngineError::Internal(format!(
                "engine command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        debug!(
            crew = %crew.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "engine command finished"
        );
        Ok(parse_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Accept either a structured `CrewOutput` document or plain text.
fn parse_output(stdout: &str) -> CrewOutput {
    let trimmed = stdout.trim();
    match serde_json::from_str::<CrewOutput>(trimmed) {
        Ok(output) => output,
        Err(_) => CrewOutput {
            raw: trimmed.to_string(),
            tasks: Vec::new(),
        },
    }
}
