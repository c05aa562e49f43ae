//! # `veininfo` Command
//!
//! Diagnostics over the loaded vein registry.
//!
//! ```text
//! /veininfo all          -> Registered Veins:  > coal  > iron  ...
//! /veininfo <vein name>  -> Registered Veins:  > [iron: Count: 1, ...]
//! ```
//!
//! The host's command framework dispatches here with the raw argument list
//! and sends each returned line to the player.

use thiserror::Error;

use oreveins_procedural::{BlockStateParser, VeinRegistry};

/// Usage text shown on bad input.
pub const USAGE: &str =
    "/veininfo [all|<vein name>] -> lists info about registered veins. Use 'all' to see all registered veins";

/// Header printed before every listing.
pub const HEADER: &str = "Registered Veins:";

/// Wrong usage of the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Anything other than exactly one argument.
    #[error("Requires one argument: {}", USAGE)]
    WrongArity {
        /// Number of arguments given.
        given: usize,
    },

    /// The argument is neither `all` nor a registered name.
    #[error("Vein supplied does not match any valid vein names. Use /veininfo all to see valid vein names")]
    UnknownVein(String),
}

/// The `veininfo` command bound to a registry.
#[derive(Clone, Copy, Debug)]
pub struct VeinInfoCommand<'a, P: ?Sized> {
    registry: &'a VeinRegistry,
    blocks: &'a P,
}

impl<'a, P: BlockStateParser + ?Sized> VeinInfoCommand<'a, P> {
    /// Command name as registered with the host.
    pub const NAME: &'static str = "veininfo";

    /// Binds the command to a registry and the parser used to print states.
    #[must_use]
    pub const fn new(registry: &'a VeinRegistry, blocks: &'a P) -> Self {
        Self { registry, blocks }
    }

    /// Runs the command, returning the lines to send.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] on wrong arity or an unknown vein name.
    pub fn execute<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<String>, CommandError> {
        let [arg] = args else {
            return Err(CommandError::WrongArity { given: args.len() });
        };
        let arg = arg.as_ref();

        let mut lines = vec![HEADER.to_string()];
        if arg == "all" {
            lines.extend(self.registry.names().map(|name| format!("> {name}")));
        } else {
            let summary = self
                .registry
                .describe(arg, self.blocks)
                .map_err(|_| CommandError::UnknownVein(arg.to_string()))?;
            lines.push(format!("> {summary}"));
        }
        Ok(lines)
    }

    /// Completions for the argument being typed: vein names starting with
    /// it. Nothing past the first argument.
    #[must_use]
    pub fn complete<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        match args {
            [prefix] => self
                .registry
                .complete(prefix.as_ref())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}
