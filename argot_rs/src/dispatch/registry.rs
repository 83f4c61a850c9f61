//! Command registry.
//!
//! Commands are registered explicitly at start-up; there is no discovery.
//! A descriptor maps a name to a factory that builds a fresh command for
//! every run.

use std::fmt;

use crate::command::{Command, is_valid_name};
use crate::error::RegistryError;

/// Builds a new command instance.
pub type CommandFactory = Box<dyn Fn() -> Box<dyn Command>>;

/// Registry entry. Immutable once registered.
pub struct CommandDescriptor {
    name: String,
    description: String,
    factory: CommandFactory,
}

impl CommandDescriptor {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            factory: Box::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Text before the first `:`, empty for top-level commands.
    pub fn namespace(&self) -> &str {
        self.name
            .split_once(':')
            .map(|(namespace, _)| namespace)
            .unwrap_or("")
    }

    pub fn create(&self) -> Box<dyn Command> {
        (self.factory)()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Lookup interface used by the dispatcher and by nested `run_command` calls.
pub trait Registry {
    /// Every descriptor, in registration order.
    fn list(&self) -> Vec<&CommandDescriptor>;

    /// Exact name match.
    fn find(&self, name: &str) -> Option<&CommandDescriptor>;
}

/// Static, in-memory registry.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command through its factory. The factory is called once
    /// here to read the name and description.
    pub fn register<F>(&mut self, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        let probe = factory();
        let descriptor =
            CommandDescriptor::new(probe.name(), probe.description(), factory);
        self.add(descriptor)
    }

    pub fn add(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        if !is_valid_name(descriptor.name()) {
            return Err(RegistryError::InvalidName(descriptor.name));
        }
        if self.find(descriptor.name()).is_some() {
            return Err(RegistryError::DuplicateCommand(descriptor.name));
        }
        self.commands.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Registry for CommandRegistry {
    fn list(&self) -> Vec<&CommandDescriptor> {
        self.commands.iter().collect()
    }

    fn find(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }
}
