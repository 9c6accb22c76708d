use chrono::{DateTime, Utc};
use std::fmt;

/// Monotonic message identifier, unique within a [`Transcript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::User => "you",
            Author::Assistant => "assistant",
        }
    }
}

/// One chat turn. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// File that was open when the turn was sent, if any.
    pub file_context: Option<String>,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    pub fn is_assistant(&self) -> bool {
        self.author == Author::Assistant
    }
}

const GREETING: &str = "Hello! I'm your AI assistant. I can help you with writing, editing, and \
                        improving your markdown documents. How can I assist you today?";

const README_QUESTION: &str = "Can you help me improve the structure of my README file?";

const README_SUGGESTIONS: &str = "I'd be happy to help improve your README structure! Here are \
some suggestions:

1. **Clear title and description** - Make sure your project name and purpose are immediately clear
2. **Installation instructions** - Step-by-step setup guide
3. **Usage examples** - Show how to use your project
4. **Contributing guidelines** - Help others contribute

Would you like me to analyze your current README and suggest specific improvements?";

/// Append-only, ordered list of chat turns.
///
/// Ids are handed out from a counter that only moves forward, so they are
/// unique and follow insertion order.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// A transcript holding the three introductory turns shown on startup.
    pub fn seeded() -> Self {
        let readme = Some("README.md".to_string());
        let mut transcript = Self::new();
        transcript.push(Author::Assistant, GREETING, None);
        transcript.push(Author::User, README_QUESTION, readme.clone());
        transcript.push(Author::Assistant, README_SUGGESTIONS, readme);
        transcript
    }

    /// Append a turn stamped with the next id and the current time.
    pub fn push(
        &mut self,
        author: Author,
        text: impl Into<String>,
        file_context: Option<String>,
    ) -> ChatMessage {
        let message = ChatMessage {
            id: MessageId(self.next_id),
            author,
            text: text.into(),
            created_at: Utc::now(),
            file_context,
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }
}
