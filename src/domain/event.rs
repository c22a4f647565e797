use crate::domain::order::UserId;
use serde::Deserialize;

/// A typed inbound event delivered by the chat transport (or, in this
/// crate's binary, by the JSON-lines event script standing in for it).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Command {
        name: String,
        #[serde(default)]
        args: Vec<String>,
        user: UserId,
        #[serde(default)]
        user_name: String,
    },
    ButtonPress {
        token: String,
        user: UserId,
        #[serde(default)]
        user_name: String,
    },
    TextMessage {
        body: String,
        user: UserId,
    },
    MediaMessage {
        user: UserId,
    },
}

impl Event {
    pub fn user(&self) -> UserId {
        match self {
            Self::Command { user, .. }
            | Self::ButtonPress { user, .. }
            | Self::TextMessage { user, .. }
            | Self::MediaMessage { user } => *user,
        }
    }
}

/// One interactive control attached to an outbound message. The token is
/// what comes back as a `ButtonPress` when the user taps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Text plus an optional keyboard, addressed to a single user by the
/// dispatcher. Rows render top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialization() {
        let event: Event = serde_json::from_str(
            r#"{"type": "button_press", "token": "add_apple", "user": 42, "user_name": "Alice"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            Event::ButtonPress {
                token: "add_apple".to_string(),
                user: 42,
                user_name: "Alice".to_string(),
            }
        );
        assert_eq!(event.user(), 42);
    }

    #[test]
    fn test_command_args_default_empty() {
        let event: Event =
            serde_json::from_str(r#"{"type": "command", "name": "start", "user": 1}"#).unwrap();
        match event {
            Event::Command { name, args, .. } => {
                assert_eq!(name, "start");
                assert!(args.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
