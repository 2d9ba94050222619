//! Turns an invocation into exactly one permission-checked action call.

use mc_admin_world::Text;
use tracing::{debug, info};

use crate::arguments::Args;
use crate::error::CommandError;
use crate::message::{Message, MessageSink};
use crate::reader::tokenize;
use crate::registry::CommandRegistry;
use crate::source::CommandSource;

/// A single request to run a command. Consumed by dispatch.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub source: CommandSource,
    /// The command line, with or without a leading `/`.
    pub input: String,
}

impl Invocation {
    pub fn new(source: CommandSource, input: impl Into<String>) -> Self {
        Self {
            source,
            input: input.into(),
        }
    }
}

/// What an action sees besides the mutable state.
pub struct CommandContext<'a, S> {
    pub source: &'a CommandSource,
    pub args: &'a Args,
    pub registry: &'a CommandRegistry<S>,
}

pub struct Dispatcher<'r, S> {
    registry: &'r CommandRegistry<S>,
}

impl<'r, S> Dispatcher<'r, S> {
    pub fn new(registry: &'r CommandRegistry<S>) -> Self {
        Self { registry }
    }

    /// Run an invocation. On success the action's messages go to `sink` and its
    /// result code is returned; on failure nothing is sent and the error is returned.
    pub fn dispatch(
        &self,
        state: &mut S,
        sink: &mut dyn MessageSink,
        invocation: Invocation,
    ) -> Result<i32, CommandError> {
        let Invocation { source, input } = invocation;
        let line = input.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let tokens = tokenize(line);

        let Some(name) = tokens.first() else {
            return Err(unknown_command());
        };
        let Some(spec) = self.registry.get(name.text) else {
            debug!("{} tried unknown command /{}", source.name, name.text);
            return Err(unknown_command());
        };

        let (args, action) = spec.parse(line, &tokens[1..])?;

        if !source.has_permission(spec.permission()) {
            debug!(
                "{} (level {}) denied /{} (needs {})",
                source.name,
                source.permission_level,
                spec.name(),
                spec.permission()
            );
            return Err(CommandError::Unauthorized(spec.name().to_string()));
        }

        info!("{} issued server command: /{line}", source.name);
        let ctx = CommandContext {
            source: &source,
            args: &args,
            registry: self.registry,
        };
        let result = action(state, &ctx).inspect_err(|e| debug!("/{} failed: {e}", spec.name()))?;

        for message in result.messages {
            sink.send(&source, message);
        }
        Ok(result.code)
    }

    /// Like [`dispatch`](Self::dispatch), but a failure is rendered to `sink`
    /// as a failure message and yields result code 0.
    pub fn execute(&self, state: &mut S, sink: &mut dyn MessageSink, invocation: Invocation) -> i32 {
        let source = invocation.source.clone();
        match self.dispatch(state, sink, invocation) {
            Ok(code) => code,
            Err(e) => {
                sink.send(&source, Message::failure(e.to_text()));
                0
            }
        }
    }
}

fn unknown_command() -> CommandError {
    CommandError::NotFound(Text::key("command.unknown.command"))
}

// ===========================================================================
// Tests
// ===========================================================================
