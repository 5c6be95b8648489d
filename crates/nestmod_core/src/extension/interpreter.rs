//! Companion command contract.

use log::info;
use thiserror::Error;

/// Failure reported by the host interpreter for one command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InterpreterError(pub String);

/// Host interpreter that runs a module's companion command.
pub trait CommandInterpreter {
    fn run(&mut self, command: &str) -> Result<(), InterpreterError>;
}

/// Interpreter stand-in that records commands in execution order.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<String>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl CommandInterpreter for CommandLog {
    fn run(&mut self, command: &str) -> Result<(), InterpreterError> {
        info!("event=companion_run module=interpreter status=ok command={command}");
        self.commands.push(command.to_string());
        Ok(())
    }
}
