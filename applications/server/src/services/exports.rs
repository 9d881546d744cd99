//! Playlist export requests
//!
//! Only the owner may export. The service never renders the export itself; it
//! checks the request and hands a JSON message to an [`ExportProducer`], which
//! delivers it to whatever builds and mails the file.

use crate::services::AccessController;
use chorus_core::{
    error::{ChorusError, Result},
    types::{PlaylistId, UserId},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Queue that export messages are published on
pub const EXPORT_QUEUE: &str = "export:playlists";

/// Message body published for each accepted export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMessage {
    pub playlist_id: PlaylistId,
    pub target_email: String,
}

/// Publishes export messages to a named queue
#[axum::async_trait]
pub trait ExportProducer: Send + Sync {
    async fn send(&self, queue: &str, message: String) -> Result<()>;
}

/// A message as it left the producer
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub queue: String,
    pub message: String,
}

/// In-process producer backed by a bounded channel
///
/// `send` waits while the channel is full and fails once the receiving side
/// has been dropped.
#[derive(Clone)]
pub struct ChannelExportProducer {
    sender: mpsc::Sender<ExportJob>,
}

impl ChannelExportProducer {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ExportJob>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

#[axum::async_trait]
impl ExportProducer for ChannelExportProducer {
    async fn send(&self, queue: &str, message: String) -> Result<()> {
        let job = ExportJob {
            queue: queue.to_string(),
            message,
        };
        self.sender
            .send(job)
            .await
            .map_err(|_| ChorusError::storage("Export queue is closed"))
    }
}

/// Accepts owner-verified export requests
#[derive(Clone)]
pub struct ExportService {
    access: Arc<AccessController>,
    producer: Arc<dyn ExportProducer>,
}

impl ExportService {
    pub fn new(access: Arc<AccessController>, producer: Arc<dyn ExportProducer>) -> Self {
        Self { access, producer }
    }

    /// Queue an export of `playlist_id` to `target_email`
    ///
    /// `InvalidInput` for a malformed address, then the usual `NotFound` or
    /// `Unauthorized` from the ownership check.
    pub async fn export_playlist(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
        target_email: &str,
    ) -> Result<()> {
        let target_email = target_email.trim();
        if !is_valid_email(target_email) {
            return Err(ChorusError::InvalidInput(
                "\"targetEmail\" must be a valid email".to_string(),
            ));
        }

        self.access.verify_owner(playlist_id, user_id).await?;

        let message = serde_json::to_string(&ExportMessage {
            playlist_id: playlist_id.clone(),
            target_email: target_email.to_string(),
        })?;
        self.producer.send(EXPORT_QUEUE, message).await?;

        tracing::info!(playlist_id = %playlist_id, user_id = %user_id, "Playlist export queued");
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace and a dotted domain
fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !address.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}
