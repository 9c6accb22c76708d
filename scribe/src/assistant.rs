//! Assistant chat panel.
//!
//! The panel owns a [`Transcript`] and a draft input. Sending appends the user
//! turn immediately and spawns a reply task that asks the
//! [`AssistantProvider`] for an answer and appends it when it arrives.
//!
//! # Lifecycle
//!
//! Reply tasks live in a [`JoinSet`] owned by the panel. Dropping the panel (or
//! calling [`AssistantPanel::shutdown`]) aborts every pending reply. Tasks only
//! hold a [`Weak`] handle to the transcript, so a reply that races teardown
//! finds nothing to write to.
//!
//! Replies are only scheduled when [`AssistantPanel::send_message`] runs inside
//! a tokio runtime; outside one the user turn is recorded and no reply follows.

pub mod provider;
pub mod transcript;

pub use self::{
    provider::{canned_reply, AssistantProvider, CannedAssistant, ProviderError},
    transcript::{Author, ChatMessage, MessageId, Transcript},
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::{sync::broadcast, task::JoinSet};
use tracing::{debug, info, warn};

const UPDATE_CAPACITY: usize = 64;

/// Change notifications for front ends that print the transcript as it grows.
#[derive(Debug, Clone)]
pub enum TranscriptUpdate {
    MessageAdded(ChatMessage),
}

pub struct AssistantPanel {
    transcript: Arc<Mutex<Transcript>>,
    draft: String,
    provider: Arc<dyn AssistantProvider>,
    pending: JoinSet<()>,
    update_tx: broadcast::Sender<TranscriptUpdate>,
}

impl AssistantPanel {
    pub fn new(provider: Arc<dyn AssistantProvider>, transcript: Transcript) -> Self {
        let (update_tx, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            transcript: Arc::new(Mutex::new(transcript)),
            draft: String::new(),
            provider,
            pending: JoinSet::new(),
            update_tx,
        }
    }

    /// Snapshot of the transcript in order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().messages().to_vec()
    }

    pub fn len(&self) -> usize {
        self.transcript.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.lock().is_empty()
    }

    pub fn last_message(&self) -> Option<ChatMessage> {
        self.transcript.lock().last().cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptUpdate> {
        self.update_tx.subscribe()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// The send control is disabled while the draft is blank.
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Send the current draft. See [`AssistantPanel::send_message`].
    pub fn submit(&mut self, selected_file: Option<&str>) -> Option<MessageId> {
        let text = std::mem::take(&mut self.draft);
        let sent = self.send_message(&text, selected_file);
        if sent.is_none() {
            self.draft = text;
        }
        sent
    }

    /// Append a user turn and schedule the assistant's reply.
    ///
    /// Blank text is ignored and returns `None`. Otherwise the draft is
    /// cleared, the user turn is appended with `selected_file` as context, and
    /// a reply task is spawned. The reply carries the same file context.
    /// Without a current tokio runtime the reply is skipped with a warning.
    pub fn send_message(&mut self, text: &str, selected_file: Option<&str>) -> Option<MessageId> {
        if text.trim().is_empty() {
            debug!("ignoring blank message");
            return None;
        }

        let file_context = selected_file.map(str::to_string);
        let (turn, history) = {
            let mut transcript = self.transcript.lock();
            let turn = transcript.push(Author::User, text, file_context);
            (turn, transcript.messages().to_vec())
        };
        self.draft.clear();
        let _ = self.update_tx.send(TranscriptUpdate::MessageAdded(turn.clone()));
        info!(id = %turn.id, file = ?turn.file_context, "user message sent");

        if tokio::runtime::Handle::try_current().is_err() {
            warn!(id = %turn.id, "no async runtime; reply not scheduled");
            return Some(turn.id);
        }

        self.reap_finished();
        let transcript = Arc::downgrade(&self.transcript);
        let provider = Arc::clone(&self.provider);
        let update_tx = self.update_tx.clone();
        let id = turn.id;
        self.pending
            .spawn(reply_task(provider, transcript, update_tx, history, turn));

        Some(id)
    }

    /// Number of replies still in flight.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Abort every pending reply. Called automatically on drop.
    pub fn shutdown(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "aborting pending replies");
        }
        self.pending.abort_all();
        self.pending.detach_all();
    }

    /// Copy is wired to the UI but does nothing.
    pub fn copy(&self, id: MessageId) {
        debug!(%id, "copy requested");
    }

    /// Rating is wired to the UI but does nothing.
    pub fn rate(&self, id: MessageId, helpful: bool) {
        debug!(%id, helpful, "rating requested");
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.pending.try_join_next() {
            if let Err(e) = result {
                if e.is_panic() {
                    warn!("reply task panicked: {e}");
                }
            }
        }
    }
}

impl Drop for AssistantPanel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn reply_task(
    provider: Arc<dyn AssistantProvider>,
    transcript: Weak<Mutex<Transcript>>,
    update_tx: broadcast::Sender<TranscriptUpdate>,
    history: Vec<ChatMessage>,
    turn: ChatMessage,
) {
    let file_context = turn.file_context.clone();
    let turn_id = turn.id;
    let text = match provider.reply(history, turn).await {
        Ok(text) => text,
        Err(e) => {
            warn!(%turn_id, "assistant reply failed: {e}");
            return;
        },
    };

    let Some(transcript) = transcript.upgrade() else {
        debug!(%turn_id, "panel gone before reply arrived");
        return;
    };
    let reply = transcript
        .lock()
        .push(Author::Assistant, text, file_context);
    debug!(%turn_id, id = %reply.id, "assistant reply appended");
    let _ = update_tx.send(TranscriptUpdate::MessageAdded(reply));
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{sleep, Duration};

    const DELAY: Duration = Duration::from_millis(1000);

    fn panel() -> AssistantPanel {
        AssistantPanel::new(Arc::new(CannedAssistant::new(DELAY)), Transcript::seeded())
    }

    #[tokio::test(start_paused = true)]
    async fn blank_messages_are_ignored() {
        let mut panel = panel();
        assert_eq!(panel.send_message("", None), None);
        assert_eq!(panel.send_message("   \n\t", Some("a.md")), None);
        sleep(DELAY * 2).await;
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_user_then_reply() {
        let mut panel = panel();
        panel.set_draft("fix grammar");

        let id = panel.send_message("fix grammar", Some("README.md"));
        assert!(id.is_some());
        assert_eq!(panel.draft(), "");
        assert_eq!(panel.len(), 4);
        let last = panel.last_message().expect("user turn");
        assert!(last.is_user());
        assert_eq!(last.text, "fix grammar");
        assert_eq!(last.file_context.as_deref(), Some("README.md"));

        sleep(DELAY / 2).await;
        assert_eq!(panel.len(), 4);

        sleep(DELAY).await;
        assert_eq!(panel.len(), 5);
        let reply = panel.last_message().expect("assistant turn");
        assert!(reply.is_assistant());
        assert_eq!(reply.text, canned_reply("fix grammar", Some("README.md")));
        assert_eq!(reply.file_context.as_deref(), Some("README.md"));
        assert!(reply.id > last.id);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_sends_draft() {
        let mut panel = panel();
        assert!(!panel.can_send());
        panel.set_draft("  ");
        assert!(!panel.can_send());
        assert_eq!(panel.submit(None), None);
        assert_eq!(panel.draft(), "  ");

        panel.set_draft("outline please");
        assert!(panel.can_send());
        assert!(panel.submit(None).is_some());
        assert_eq!(panel.draft(), "");
        assert_eq!(panel.last_message().map(|m| m.text), Some("outline please".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn updates_are_broadcast() {
        let mut panel = panel();
        let mut updates = panel.subscribe();
        panel.send_message("hello", None);

        let TranscriptUpdate::MessageAdded(user) = updates.recv().await.expect("user update");
        assert!(user.is_user());
        let TranscriptUpdate::MessageAdded(reply) = updates.recv().await.expect("reply update");
        assert!(reply.is_assistant());
        assert_eq!(reply.text, canned_reply("hello", None));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_replies() {
        let transcript = {
            let mut panel = panel();
            panel.send_message("never answered", Some("a.md"));
            assert_eq!(panel.pending_replies(), 1);
            Arc::clone(&panel.transcript)
        };

        sleep(DELAY * 3).await;
        assert_eq!(transcript.lock().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_replies() {
        let mut panel = panel();
        panel.send_message("one", None);
        panel.send_message("two", None);
        panel.shutdown();

        sleep(DELAY * 3).await;
        assert_eq!(panel.len(), 5);
        assert!(panel.messages().iter().skip(3).all(ChatMessage::is_user));
    }

    #[test]
    fn send_outside_runtime_records_turn_without_reply() {
        let mut panel = panel();
        let id = panel.send_message("offline edit", Some("a.md"));
        assert_eq!(id, Some(MessageId(4)));
        assert_eq!(panel.len(), 4);
        assert_eq!(panel.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_after_transcript_dropped_is_discarded() {
        let transcript = Arc::new(Mutex::new(Transcript::seeded()));
        let turn = transcript.lock().push(Author::User, "late", None);
        let history = transcript.lock().messages().to_vec();
        let weak = Arc::downgrade(&transcript);
        let (update_tx, mut updates) = broadcast::channel(4);
        drop(transcript);

        reply_task(
            Arc::new(CannedAssistant::new(DELAY)),
            weak.clone(),
            update_tx,
            history,
            turn,
        )
        .await;

        assert!(weak.upgrade().is_none());
        assert!(updates.try_recv().is_err());
    }

    struct Failing(AtomicUsize);

    #[async_trait]
    impl AssistantProvider for Failing {
        async fn reply(
            &self,
            _history: Vec<ChatMessage>,
            _turn: ChatMessage,
        ) -> Result<String, ProviderError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Unavailable {
                message: "offline".into(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn provider_failure_appends_nothing() {
        let provider = Arc::new(Failing(AtomicUsize::new(0)));
        let mut panel = AssistantPanel::new(provider.clone(), Transcript::new());
        panel.send_message("anyone?", None);
        sleep(DELAY).await;
        assert_eq!(provider.0.load(Ordering::SeqCst), 1);
        assert_eq!(panel.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn history_includes_the_new_turn() {
        struct Echo;

        #[async_trait]
        impl AssistantProvider for Echo {
            async fn reply(
                &self,
                history: Vec<ChatMessage>,
                turn: ChatMessage,
            ) -> Result<String, ProviderError> {
                assert_eq!(history.last(), Some(&turn));
                Ok(format!("{} turns", history.len()))
            }
        }

        let mut panel = AssistantPanel::new(Arc::new(Echo), Transcript::seeded());
        panel.send_message("count", None);
        sleep(Duration::from_millis(1)).await;
        assert_eq!(panel.last_message().map(|m| m.text), Some("4 turns".into()));
    }
}
