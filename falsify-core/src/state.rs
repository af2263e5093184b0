//! Model-based testing of stateful systems.
//!
//! A [`Command`] is one step of interaction with the system under test: a
//! precondition over the model, an update of the model and an effect on the
//! real system that is compared against the model. Sequences of commands are
//! generated against a speculative model so that every accepted command's
//! precondition holds at its position, then replayed by [`model_run`] against
//! a fresh (model, real) pair.

use crate::data::Random;
use crate::error::{panic_message, FalsifyError, Result};
use crate::gen::{Arbitrary, Gen};
use crate::shrink;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Consecutive rejected draws after which generation stops early.
pub const DEFAULT_MAX_REJECTIONS: usize = 100;

/// One operation against a (model, real) pair.
///
/// The `Display` rendering is the command's name in counterexamples, e.g.
/// `push(3)`.
pub trait Command: Clone + fmt::Display {
    type Model;
    type Real;

    /// Whether the command may run in this model state.
    fn check(&self, _model: &Self::Model) -> bool {
        true
    }

    /// Advance the model past this command.
    fn apply(&self, model: &mut Self::Model);

    /// Perform the command on the real system and compare with the model
    /// state before [`Command::apply`]. Panics count as failures.
    fn run(&self, model: &Self::Model, real: &mut Self::Real) -> std::result::Result<(), String>;
}

/// How a command sequence diverged from its model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// A precondition no longer held when the command was reached.
    #[error("precondition of `{command}` does not hold at step {index}")]
    PreconditionViolated { index: usize, command: String },

    /// The command failed or panicked.
    #[error("`{command}` failed at step {index}: {reason}")]
    CommandFailed {
        index: usize,
        command: String,
        reason: String,
    },
}

impl Divergence {
    /// Index of the command at which execution stopped.
    pub fn index(&self) -> usize {
        match self {
            Divergence::PreconditionViolated { index, .. }
            | Divergence::CommandFailed { index, .. } => *index,
        }
    }
}

/// An ordered sequence of generated commands.
#[derive(Clone, PartialEq, Eq)]
pub struct Commands<C> {
    commands: Vec<C>,
}

impl<C> Commands<C> {
    pub fn new(commands: Vec<C>) -> Self {
        Commands { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[C] {
        &self.commands
    }

    pub fn into_vec(self) -> Vec<C> {
        self.commands
    }
}

impl<'a, C> IntoIterator for &'a Commands<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl<C: fmt::Display> fmt::Display for Commands<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{command}")?;
        }
        write!(f, "]")
    }
}

impl<C: fmt::Display> fmt::Debug for Commands<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Generate command sequences of at most `max_length` commands, drawing
/// uniformly from `candidates`. Generation simulates from `Model::default()`.
pub fn commands<C>(candidates: Vec<Gen<C>>, max_length: usize) -> Result<Gen<Commands<C>>>
where
    C: Command + 'static,
    C::Model: Default + 'static,
{
    weighted_commands(
        candidates.into_iter().map(|gen| (1, gen)).collect(),
        max_length,
    )
}

/// Like [`commands`] with relative weights per candidate generator.
pub fn weighted_commands<C>(
    candidates: Vec<(u32, Gen<C>)>,
    max_length: usize,
) -> Result<Gen<Commands<C>>>
where
    C: Command + 'static,
    C::Model: Default + 'static,
{
    CommandsArbitrary::new(<C::Model as Default>::default, candidates, max_length)
        .map(Gen::from_arbitrary)
}

/// Like [`commands`] for models built by `initial_model` rather than
/// `Default`. The function must build the same model the execution setup
/// starts from.
pub fn commands_with_model<C, M>(
    initial_model: M,
    candidates: Vec<Gen<C>>,
    max_length: usize,
) -> Result<Gen<Commands<C>>>
where
    C: Command + 'static,
    M: Fn() -> C::Model + Send + Sync + 'static,
{
    CommandsArbitrary::new(
        initial_model,
        candidates.into_iter().map(|gen| (1, gen)).collect(),
        max_length,
    )
    .map(Gen::from_arbitrary)
}

/// Generator and shrinker of command sequences.
pub struct CommandsArbitrary<C: Command> {
    initial_model: Arc<dyn Fn() -> C::Model + Send + Sync>,
    candidates: Gen<C>,
    max_length: usize,
    max_rejections: usize,
}

impl<C> CommandsArbitrary<C>
where
    C: Command + 'static,
{
    pub fn new<M>(
        initial_model: M,
        candidates: Vec<(u32, Gen<C>)>,
        max_length: usize,
    ) -> Result<Self>
    where
        M: Fn() -> C::Model + Send + Sync + 'static,
    {
        if candidates.is_empty() {
            return Err(FalsifyError::invalid_generator(
                "command generation needs at least one candidate generator",
            ));
        }
        if i64::try_from(max_length).is_err() {
            return Err(FalsifyError::invalid_generator(format!(
                "maximum command sequence length {max_length} is too large"
            )));
        }
        Ok(CommandsArbitrary {
            initial_model: Arc::new(initial_model),
            candidates: Gen::frequency(candidates)?,
            max_length,
            max_rejections: DEFAULT_MAX_REJECTIONS,
        })
    }

    /// Stop generating after this many consecutive rejected draws.
    pub fn with_max_rejections(mut self, max_rejections: usize) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    /// Whether every precondition holds when replaying `commands` on the
    /// speculative model.
    fn is_feasible(&self, commands: &[C]) -> bool {
        let mut model = (self.initial_model)();
        for command in commands {
            if !command.check(&model) {
                return false;
            }
            command.apply(&mut model);
        }
        true
    }
}

impl<C> Arbitrary for CommandsArbitrary<C>
where
    C: Command + 'static,
{
    type Value = Commands<C>;

    fn generate(&self, source: &mut Random) -> Commands<C> {
        let target = source.next_in_range(0, self.max_length as i64) as usize;
        let mut model = (self.initial_model)();
        let mut accepted = Vec::new();
        let mut rejections = 0;

        while accepted.len() < target && rejections < self.max_rejections {
            let command = self.candidates.generate(source);
            if !command.check(&model) {
                rejections += 1;
                trace!(command = %command, position = accepted.len(), "rejected command");
                continue;
            }
            rejections = 0;
            command.apply(&mut model);
            accepted.push(command);
        }

        Commands::new(accepted)
    }

    fn shrink(&self, value: &Commands<C>) -> Vec<Commands<C>> {
        let commands = value.as_slice();
        let len = commands.len();
        let mut candidates = Vec::new();

        // Prefixes keep every precondition intact. The one-shorter prefix is
        // left to the removals below.
        for keep in shrink::towards(0, len as i64) {
            let keep = keep as usize;
            if keep + 1 < len {
                candidates.push(Commands::new(commands[..keep].to_vec()));
            }
        }

        for index in 0..len {
            let mut removed = commands.to_vec();
            removed.remove(index);
            if self.is_feasible(&removed) {
                candidates.push(Commands::new(removed));
            }
        }

        for shrunk in shrink::positionwise(commands, |_, command| self.candidates.shrink(command)) {
            if self.is_feasible(&shrunk) {
                candidates.push(Commands::new(shrunk));
            }
        }

        candidates
    }
}

/// Replay `commands` against a fresh (model, real) pair from `setup`.
///
/// Commands run strictly in order with no retries; execution stops at the
/// first violated precondition, failing command or panic. A caught panic
/// still goes through the process panic hook, so it is printed once per
/// replay; report divergences from [`Command::run`] as `Err` to avoid that.
pub fn model_run<C, S>(setup: S, commands: &Commands<C>) -> std::result::Result<(), Divergence>
where
    C: Command,
    S: FnOnce() -> (C::Model, C::Real),
{
    let (mut model, mut real) = setup();

    for (index, command) in commands.iter().enumerate() {
        if !command.check(&model) {
            return Err(Divergence::PreconditionViolated {
                index,
                command: command.to_string(),
            });
        }

        trace!(index, command = %command, "running command");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| command.run(&model, &mut real)));
        let failure = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(reason)) => Some(reason),
            Err(payload) => Some(panic_message(payload)),
        };
        if let Some(reason) = failure {
            return Err(Divergence::CommandFailed {
                index,
                command: command.to_string(),
                reason,
            });
        }

        command.apply(&mut model);
    }

    Ok(())
}
