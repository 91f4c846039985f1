//! Import push-channel listener.
//!
//! A long-running server-side import job reports progress over a push
//! channel scoped to that job. The listener consumes the channel's four
//! observable transitions and forwards message payloads uninterpreted;
//! what a payload means is the collaborator's business.

use futures::{Stream, StreamExt};

/// Observable transitions of the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    Message(String),
    Error,
    Closed,
}

/// Connection status of the import channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStatus {
    /// Channel not yet opened.
    #[default]
    Connecting,
    Open,
    Errored,
    Closed,
}

/// Current import progress as exposed to the view.
#[derive(Debug, Default)]
pub struct ImportProgress {
    status: ImportStatus,
    last_message: Option<String>,
}

impl ImportProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ImportStatus {
        self.status
    }

    /// Most recent payload received, verbatim.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Apply one channel transition.
    pub fn apply(&mut self, event: &ChannelEvent) {
        match event {
            ChannelEvent::Opened => {
                tracing::debug!("import channel open");
                self.status = ImportStatus::Open;
            }
            ChannelEvent::Message(payload) => {
                tracing::debug!(payload = %payload, "import progress message");
                self.last_message = Some(payload.clone());
            }
            ChannelEvent::Error => {
                tracing::warn!("import channel error");
                self.status = ImportStatus::Errored;
            }
            ChannelEvent::Closed => {
                tracing::debug!("import channel closed");
                self.status = ImportStatus::Closed;
            }
        }
    }
}

/// Drive a channel event stream to completion.
///
/// Each message payload is handed to `forward` without interpretation.
/// Returns the final status once the stream ends.
pub async fn listen<S, F>(mut events: S, mut forward: F) -> ImportStatus
where
    S: Stream<Item = ChannelEvent> + Unpin,
    F: FnMut(&str),
{
    let mut progress = ImportProgress::new();
    while let Some(event) = events.next().await {
        progress.apply(&event);
        if let ChannelEvent::Message(payload) = &event {
            forward(payload);
        }
    }
    progress.status()
}
