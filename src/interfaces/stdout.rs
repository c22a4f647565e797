use crate::domain::event::OutboundMessage;
use crate::domain::order::UserId;
use crate::domain::ports::Messenger;
use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Transcript sink standing in for the chat transport: every outbound
/// message is printed as `[-> user] text`, with keyboard rows listed by
/// token underneath. This is the surface the CLI tests assert on.
pub struct StdoutMessenger {
    out: Mutex<std::io::Stdout>,
}

impl StdoutMessenger {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(std::io::stdout()),
        }
    }
}

impl Default for StdoutMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for StdoutMessenger {
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<()> {
        let mut out = self.out.lock().await;
        writeln!(out, "[-> {to}] {}", message.text.replace('\n', " | "))?;
        for row in &message.keyboard {
            let tokens: Vec<&str> = row.iter().map(|b| b.token.as_str()).collect();
            writeln!(out, "        buttons: {}", tokens.join(" "))?;
        }
        Ok(())
    }
}
