use async_trait::async_trait;

/// Everything the menu needs from whatever it is drawn on.
#[async_trait]
pub trait Interface: Send + Sync {
    /// Next line of user input, trimmed. `None` on end of input.
    async fn receive_input(&self) -> Option<String>;
    async fn send_output(&self, message: &str);
    /// Writes `message` without a trailing newline.
    async fn prompt(&self, message: &str);
    async fn request_approval(&self, action: &str) -> bool;
    async fn show_status(&self, status: &str);
    async fn show_error(&self, error: &str);
}
