use crate::assistant::transcript::ChatMessage;
use async_trait::async_trait;
use snafu::Snafu;
use tokio::time::Duration;

/// Default pause before the canned assistant answers.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Snafu)]
pub enum ProviderError {
    #[snafu(display("Assistant provider unavailable: {message}"))]
    Unavailable { message: String },
}

/// Produces the assistant's answer to a user turn.
///
/// `history` is the transcript up to and including `turn`. Implementations may
/// take as long as they like; the caller owns cancellation.
#[async_trait]
pub trait AssistantProvider: Send + Sync + 'static {
    async fn reply(
        &self,
        history: Vec<ChatMessage>,
        turn: ChatMessage,
    ) -> Result<String, ProviderError>;
}

/// Answers every turn with the same acknowledgement after a fixed delay.
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    delay: Duration,
}

impl Default for CannedAssistant {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl CannedAssistant {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// The canned acknowledgement for `text` sent while `file` was open.
pub fn canned_reply(text: &str, file: Option<&str>) -> String {
    let context = file.unwrap_or("your current work");
    format!(
        "I understand you want help with \"{text}\". Let me analyze this in the context of \
         {context} and provide some suggestions..."
    )
}

#[async_trait]
impl AssistantProvider for CannedAssistant {
    async fn reply(
        &self,
        _history: Vec<ChatMessage>,
        turn: ChatMessage,
    ) -> Result<String, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(canned_reply(&turn.text, turn.file_context.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::transcript::{Author, Transcript};

    #[test]
    fn reply_mentions_text_and_file() {
        assert_eq!(
            canned_reply("fix grammar", Some("README.md")),
            "I understand you want help with \"fix grammar\". Let me analyze this in the context \
             of README.md and provide some suggestions..."
        );
    }

    #[test]
    fn reply_without_file_falls_back() {
        assert!(canned_reply("hi", None).contains("in the context of your current work"));
    }

    #[tokio::test(start_paused = true)]
    async fn canned_assistant_waits_for_delay() {
        let assistant = CannedAssistant::new(Duration::from_millis(250));
        let mut transcript = Transcript::new();
        let turn = transcript.push(Author::User, "tidy", Some("a.md".into()));

        let start = tokio::time::Instant::now();
        let reply = assistant
            .reply(transcript.messages().to_vec(), turn)
            .await
            .expect("canned assistant never fails");

        assert!(start.elapsed() >= Duration::from_millis(250));
        assert_eq!(reply, canned_reply("tidy", Some("a.md")));
    }
}
