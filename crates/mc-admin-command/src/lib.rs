//! Command parsing, registry and permission-gated dispatch.
//!
//! A command is described once by a [`CommandSpec`]: its name, the permission
//! level it needs, and one or more forms (a sequence of literal and typed
//! parameters bound to an action function). The [`Dispatcher`] turns a raw
//! input line into a call of exactly one action:
//!
//! 1. look the command up by name ([`ErrorKind::NotFound`] if absent),
//! 2. parse the remaining tokens against its forms ([`ErrorKind::InvalidArgument`]),
//! 3. check the source's permission level ([`ErrorKind::Unauthorized`]),
//! 4. run the action and forward its messages to a [`MessageSink`].
//!
//! The state type `S` an action mutates is chosen by the embedding server.

pub mod arguments;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod reader;
pub mod registry;
pub mod selector;
pub mod source;
pub mod spec;

pub use arguments::{AngleArg, ArgKind, ArgValue, Args, Coord, Coordinates};
pub use dispatcher::{CommandContext, Dispatcher, Invocation};
pub use error::{CommandError, ErrorKind, RegistryError};
pub use message::{ActionResult, BufferedSink, Message, MessageKind, MessageSink};
pub use registry::CommandRegistry;
pub use selector::{
    require_players, resolve_players, resolve_profiles, Profile, Selector, TargetSpec,
};
pub use source::{permission, CommandSource};
pub use spec::{argument, literal, Action, CommandSpec, Overload, Param};
