//! Action results and the sink their messages are delivered to.

use mc_admin_world::Text;

use crate::source::CommandSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Failure,
}

/// One line of command feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: Text,
    /// Also shown to observers (other operators, the console), not only the source.
    pub broadcast: bool,
}

impl Message {
    /// Success shown only to the source.
    pub fn success(text: Text) -> Self {
        Self {
            kind: MessageKind::Success,
            text,
            broadcast: false,
        }
    }

    /// Success that observers see as well.
    pub fn broadcast(text: Text) -> Self {
        Self {
            kind: MessageKind::Success,
            text,
            broadcast: true,
        }
    }

    pub fn failure(text: Text) -> Self {
        Self {
            kind: MessageKind::Failure,
            text,
            broadcast: false,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == MessageKind::Failure
    }
}

/// What an action returns: a result code and its feedback messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionResult {
    pub code: i32,
    pub messages: Vec<Message>,
}

impl ActionResult {
    pub fn new(code: i32) -> Self {
        Self {
            code,
            messages: Vec::new(),
        }
    }

    /// A result with one actor-only success message.
    pub fn success(code: i32, text: Text) -> Self {
        Self::new(code).with(Message::success(text))
    }

    /// A result with one broadcast success message.
    pub fn broadcast(code: i32, text: Text) -> Self {
        Self::new(code).with(Message::broadcast(text))
    }

    pub fn with(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Receives command feedback for delivery.
pub trait MessageSink {
    fn send(&mut self, source: &CommandSource, message: Message);
}

/// Sink that keeps every message for the caller to deliver later.
#[derive(Debug, Default)]
pub struct BufferedSink {
    messages: Vec<(CommandSource, Message)>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(CommandSource, Message)] {
        &self.messages
    }

    pub fn drain(&mut self) -> Vec<(CommandSource, Message)> {
        std::mem::take(&mut self.messages)
    }
}

impl MessageSink for BufferedSink {
    fn send(&mut self, source: &CommandSource, message: Message) {
        self.messages.push((source.clone(), message));
    }
}
