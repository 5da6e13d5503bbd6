//! Narrative and interrogation delegated to an external program, such as a
//! script wrapping a text-generation service.
//!
//! The narrative program receives the murderer, weapon, and comma-separated
//! room names as arguments and prints the JSON story object. The interrogation
//! program reads a JSON request on stdin and prints the suspect's reply.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use mansion_core::{ChatLine, Interrogator, Narrative, NarrativeSource, Persona};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Splits a whitespace-separated command line; no shell quoting.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("external command is empty");
        };
        Ok(Self { program, args: parts.collect() })
    }

    fn run(&self, extra_args: &[&str], input: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).context("Failed to write request")?;
        }
        let output = child.wait_with_output().context("Failed to wait for command")?;
        if !output.status.success() {
            bail!("{} exited with {}", self.program, output.status);
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub struct ExternalNarrative {
    command: ExternalCommand,
}

impl ExternalNarrative {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl NarrativeSource for ExternalNarrative {
    fn compose(&self, murderer: &str, weapon: &str, room_names: &[String]) -> Narrative {
        let rooms = room_names.join(",");
        match self.command.run(&[murderer, weapon, &rooms], "") {
            Ok(reply) => Narrative::from_json(&reply),
            Err(err) => {
                log::warn!("narrative command failed, using placeholders: {err:#}");
                Narrative::default()
            }
        }
    }
}

#[derive(Serialize)]
struct InterrogationRequest<'a> {
    suspect: &'a str,
    victim: &'a str,
    is_murderer: bool,
    briefing: String,
    transcript: &'a [ChatLine],
    message: &'a str,
}

pub struct ExternalInterrogator {
    command: ExternalCommand,
}

impl ExternalInterrogator {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl Interrogator for ExternalInterrogator {
    fn respond(&self, persona: &Persona<'_>, transcript: &[ChatLine], message: &str) -> String {
        let request = InterrogationRequest {
            suspect: persona.suspect,
            victim: persona.victim,
            is_murderer: persona.is_murderer,
            briefing: persona.briefing(),
            transcript,
            message,
        };
        let reply = serde_json::to_string(&request)
            .context("Failed to encode request")
            .and_then(|json| self.command.run(&[], &json));
        match reply {
            Ok(reply) => reply.trim().to_string(),
            Err(err) => {
                log::warn!("interrogation command failed: {err:#}");
                format!("(Interrogator error: {err})")
            }
        }
    }
}
