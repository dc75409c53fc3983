use crate::upload::{Severity, StatusMessage, UploadEvent};
use std::sync::mpsc::{Receiver, Sender};

/// A server-requested confirmation waiting for the user's decision.
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub prompt: String,
    pub filename: String,
    pub file_hash: String,
}

pub struct UploaderState {
    pub server_url: String,
    pub messages: Vec<StatusMessage>,
    pub pending_confirms: Vec<PendingConfirm>,
    pub event_sender: Sender<UploadEvent>,
    pub event_receiver: Receiver<UploadEvent>,
}

impl UploaderState {
    pub fn new(server_url: String) -> Self {
        let (event_sender, event_receiver) = std::sync::mpsc::channel();
        Self {
            server_url,
            messages: Vec::new(),
            pending_confirms: Vec::new(),
            event_sender,
            event_receiver,
        }
    }

    /// Clears the previous batch's status lines. Confirmations still
    /// waiting for an answer belong to in-flight attempts and survive.
    pub fn begin_batch(&mut self) {
        self.messages.clear();
    }

    pub fn push_message(&mut self, message: StatusMessage) {
        self.messages.push(message);
    }

    /// Applies the user's answer to the oldest pending confirmation.
    /// Returns the confirmation to re-post when accepted; a decline only
    /// leaves an informational note.
    pub fn resolve_confirm(&mut self, accepted: bool) -> Option<PendingConfirm> {
        if self.pending_confirms.is_empty() {
            return None;
        }
        let pending = self.pending_confirms.remove(0);

        if accepted {
            Some(pending)
        } else {
            self.messages
                .push(StatusMessage::new("upload was cancelled", Severity::Info));
            None
        }
    }

    /// Drains worker events that arrived since the last frame.
    pub fn drain_events(&mut self) -> bool {
        let mut had_updates = false;
        while let Ok(event) = self.event_receiver.try_recv() {
            had_updates = true;
            match event {
                UploadEvent::Message(message) => self.messages.push(message),
                UploadEvent::ConfirmNeeded {
                    prompt,
                    filename,
                    file_hash,
                } => self.pending_confirms.push(PendingConfirm {
                    prompt,
                    filename,
                    file_hash,
                }),
            }
        }
        had_updates
    }
}
