//! User-triggered mutations.
//!
//! Presentation components call these directly; each mutation hits the API
//! and then re-fetches the affected resources so the store reflects server
//! state. The client never computes derived status transitions itself --
//! the only local write is the provisional echo of a just-sent message.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use stshub_client::retry::RetryPolicy;
use stshub_client::{ApiError, TransferApi};
use stshub_core::document::Document;
use stshub_core::message::Message;
use stshub_core::types::Id;

use crate::fetchers;
use crate::store::RoomStore;

/// Why a user-triggered mutation could not run.
#[derive(Debug, thiserror::Error)]
pub enum ActionFailure {
    /// The mutation needs a selected room and none is.
    #[error("No room selected")]
    NoRoomSelected,

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Mutation entry points shared with the presentation layer.
#[derive(Clone)]
pub struct Actions {
    api: Arc<dyn TransferApi>,
    store: Arc<RoomStore>,
    policy: RetryPolicy,
}

impl Actions {
    pub fn new(api: Arc<dyn TransferApi>, store: Arc<RoomStore>) -> Self {
        Self::with_policy(api, store, RetryPolicy::default())
    }

    pub fn with_policy(
        api: Arc<dyn TransferApi>,
        store: Arc<RoomStore>,
        policy: RetryPolicy,
    ) -> Self {
        Self { api, store, policy }
    }

    /// Re-fetch the resources a document mutation invalidates.
    ///
    /// Failures here follow the normal fetcher contract (stale data stays,
    /// error slot records the failure), so they are not propagated to the
    /// mutation's caller.
    async fn refresh_documents(&self) {
        let api = self.api.as_ref();
        let store = self.store.as_ref();
        let (summary, missing) = tokio::join!(
            fetchers::fetch_summary(api, store, &self.policy),
            fetchers::fetch_missing_documents(api, store, &self.policy),
        );
        for result in [summary, missing] {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Post-mutation refresh failed");
            }
        }
    }

    pub async fn approve_document(&self, document_id: Id) -> Result<Document, ActionFailure> {
        let document = self.api.approve_document(document_id).await?;
        tracing::info!(document_id, "Document approved");
        self.refresh_documents().await;
        Ok(document)
    }

    pub async fn reject_document(
        &self,
        document_id: Id,
        reason: &str,
    ) -> Result<Document, ActionFailure> {
        let document = self.api.reject_document(document_id, reason).await?;
        tracing::info!(document_id, "Document rejected");
        self.refresh_documents().await;
        Ok(document)
    }

    pub async fn update_document(&self, document_id: Id, name: &str) -> Result<Document, ActionFailure> {
        let document = self.api.update_document(document_id, name).await?;
        self.refresh_documents().await;
        Ok(document)
    }

    /// Upload a document into the current room and close the upload modal.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ActionFailure> {
        let Some(room_id) = self.store.current_room() else {
            return Err(ActionFailure::NoRoomSelected);
        };

        let document = self.api.upload_document(room_id, file_name, bytes).await?;
        tracing::info!(room_id, file_name, "Document uploaded");
        self.store.set_upload_modal_open(false);
        self.refresh_documents().await;
        Ok(document)
    }

    pub async fn download_document(&self, document_id: Id) -> Result<Vec<u8>, ActionFailure> {
        Ok(self.api.download_document(document_id).await?)
    }

    /// Send a message with an explicit two-phase update.
    ///
    /// Phase one appends a locally-tagged provisional record so the thread
    /// shows the message immediately; phase two is the authoritative
    /// refetch, which replaces the whole collection. Between the phases the
    /// provisional record may briefly coexist with its server-confirmed
    /// copy or appear out of order -- accepted, and deliberate.
    ///
    /// If the send itself fails, the provisional record is removed and the
    /// error is returned to the caller.
    pub async fn send_message(&self, body: &str) -> Result<Message, ActionFailure> {
        let Some(room_id) = self.store.current_room() else {
            return Err(ActionFailure::NoRoomSelected);
        };

        let author = self
            .store
            .user()
            .map(|u| u.email)
            .unwrap_or_else(|| "me".to_string());

        let tag = Uuid::new_v4();
        self.store.push_provisional_message(Message {
            id: None,
            room_id,
            author,
            body: body.to_string(),
            created_at: Utc::now(),
            local_tag: Some(tag),
        });

        match self.api.send_message(room_id, body).await {
            Ok(message) => {
                if let Err(e) =
                    fetchers::fetch_messages(self.api.as_ref(), &self.store, &self.policy).await
                {
                    // The provisional record stays visible until the next
                    // successful refetch replaces the collection.
                    tracing::warn!(error = %e, "Post-send message refetch failed");
                }
                Ok(message)
            }
            Err(e) => {
                self.store.remove_provisional_message(tag);
                Err(e.into())
            }
        }
    }
}
