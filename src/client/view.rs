// src/client/view.rs
use super::relay::{ClientError, RelayApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was blank; nothing was sent.
    Skipped,
    Replied,
    Failed,
}

/// Conversation as seen by one client. Lives only as long as the view.
#[derive(Debug, Default, Clone)]
pub struct ChatView {
    turns: Vec<ChatTurn>,
    busy: bool,
    input: String,
    last_error: Option<String>,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn append_turn(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Records the user turn and marks the view busy.
    /// Returns the prompt to send, or `None` when the draft is blank.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        let prompt = self.input.clone();
        self.append_turn(ChatTurn::user(prompt.clone()));
        self.set_busy(true);
        self.last_error = None;
        Some(prompt)
    }

    /// Settles an in-flight submission. Failures never add a turn.
    pub fn finish_submit(&mut self, result: Result<String, ClientError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(message) => {
                self.append_turn(ChatTurn::assistant(message));
                SubmitOutcome::Replied
            }
            Err(e) => {
                tracing::error!("Error with chat request: {}", e);
                self.last_error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        };
        self.set_busy(false);
        self.input.clear();
        outcome
    }

    pub async fn submit<R>(&mut self, relay: &R) -> SubmitOutcome
    where
        R: RelayApi + ?Sized,
    {
        self.submit_with(relay, |_| {}).await
    }

    /// Like `submit`, but calls `on_pending` once the user turn is recorded
    /// and before the relay is contacted.
    pub async fn submit_with<R, F>(&mut self, relay: &R, on_pending: F) -> SubmitOutcome
    where
        R: RelayApi + ?Sized,
        F: FnOnce(&ChatView),
    {
        let Some(prompt) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        on_pending(self);
        let result = relay.send(&prompt).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_is_not_submitted() {
        let mut view = ChatView::new();
        view.set_input(" \n\t ");
        assert_eq!(view.begin_submit(), None);
        assert!(view.turns().is_empty());
        assert!(!view.is_busy());
        // The draft is left alone on a no-op.
        assert_eq!(view.input(), " \n\t ");
    }

    #[test]
    fn begin_submit_keeps_raw_text() {
        let mut view = ChatView::new();
        view.set_input("  hi  ");
        assert_eq!(view.begin_submit().as_deref(), Some("  hi  "));
        assert_eq!(view.turns(), &[ChatTurn::user("  hi  ")]);
        assert!(view.is_busy());
    }

    #[test]
    fn finish_submit_clears_busy_and_input_on_failure() {
        let mut view = ChatView::new();
        view.set_input("hello");
        view.begin_submit();
        let outcome = view.finish_submit(Err(ClientError::Decode("bad".into())));
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(view.turns().len(), 1);
        assert!(!view.is_busy());
        assert_eq!(view.input(), "");
        assert!(view.last_error().is_some());
    }
}
