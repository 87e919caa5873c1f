use crate::traits::Interface;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

const PURPLE: &str = "\x1b[1;35m";
const RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Line-oriented stdin/stdout interface for the text menu.
pub struct TerminalInterface {
    reader: Mutex<BufReader<Stdin>>,
    color: bool,
}

impl TerminalInterface {
    pub fn new() -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
            color: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::new()
        }
    }

    fn paint(&self, color: &str, message: &str) -> String {
        if self.color {
            format!("{color}{message}{RESET}")
        } else {
            message.to_string()
        }
    }

    async fn write(&self, text: &str) {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(text.as_bytes()).await;
        let _ = stdout.flush().await;
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interface for TerminalInterface {
    async fn receive_input(&self) -> Option<String> {
        let mut reader = self.reader.lock().await;
        let mut line = String::new();

        match reader.read_line(&mut line).await {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim().to_string()),
            Err(_) => None,
        }
    }

    async fn send_output(&self, message: &str) {
        let line = format!("{}\n", self.paint(PURPLE, message));
        self.write(&line).await;
    }

    async fn prompt(&self, message: &str) {
        let text = self.paint(PURPLE, message);
        self.write(&text).await;
    }

    async fn request_approval(&self, action: &str) -> bool {
        self.prompt(&format!("{} - are you sure? (y/n): ", action))
            .await;

        if let Some(response) = self.receive_input().await {
            response.to_lowercase().starts_with('y')
        } else {
            false
        }
    }

    async fn show_status(&self, status: &str) {
        self.send_output(status).await;
    }

    async fn show_error(&self, error: &str) {
        let line = format!("{}\n", self.paint(RED, error));
        let mut stderr = tokio::io::stderr();
        let _ = stderr.write_all(line.as_bytes()).await;
        let _ = stderr.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_has_no_escape_codes() {
        let ui = TerminalInterface::plain();
        assert_eq!(ui.paint(PURPLE, "Menu:"), "Menu:");
    }

    #[tokio::test]
    async fn test_colored_wraps_message() {
        let ui = TerminalInterface::new();
        assert_eq!(ui.paint(PURPLE, "Menu:"), "\x1b[1;35mMenu:\x1b[0m");
    }
}
