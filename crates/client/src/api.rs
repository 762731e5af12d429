//! REST API client for the clearance backend.
//!
//! [`TransferApi`] is the orchestration layer's only boundary: the session
//! crate depends on the trait, never on reqwest, so tests can substitute a
//! mock backend. [`HttpTransferApi`] is the production implementation over
//! the backend's `/api/v1` surface.
//!
//! Timeouts and retries are NOT applied here -- callers wrap these calls
//! with the policies in [`crate::retry`], so each attempt gets its own
//! timeout window.

use async_trait::async_trait;
use serde::Deserialize;

use stshub_core::activity::Activity;
use stshub_core::document::{Document, MissingDocument};
use stshub_core::message::Message;
use stshub_core::room::Room;
use stshub_core::summary::RoomSummary;
use stshub_core::types::Id;
use stshub_core::vessel::Vessel;
use stshub_core::wizard::{
    FinalizedOperation, OperationDraft, ParticipantDraft, ParticipantKind, VesselDraft,
};

use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Boundary trait
// ---------------------------------------------------------------------------

/// Remote operations the orchestration layer depends on.
///
/// Resource shapes are owned by the backend; this trait only fixes the
/// operation set and the deserialized forms the client consumes.
#[async_trait]
pub trait TransferApi: Send + Sync {
    // -- room listing (room selector) --

    async fn get_rooms(&self) -> Result<Vec<Room>, ApiError>;

    // -- room-scoped reads --

    async fn get_room_summary(&self, room_id: Id) -> Result<RoomSummary, ApiError>;
    async fn get_vessels(&self, room_id: Id) -> Result<Vec<Vessel>, ApiError>;
    async fn get_activities(&self, room_id: Id) -> Result<Vec<Activity>, ApiError>;
    async fn get_messages(&self, room_id: Id) -> Result<Vec<Message>, ApiError>;
    async fn get_missing_documents(&self, room_ids: &[Id]) -> Result<Vec<MissingDocument>, ApiError>;

    // -- operation-creation writes (wizard finalize sequence) --

    /// Create the operation record and return its identifier.
    async fn create_operation(&self, draft: &OperationDraft) -> Result<Id, ApiError>;

    async fn add_participant(
        &self,
        operation_id: Id,
        kind: ParticipantKind,
        participant: &ParticipantDraft,
    ) -> Result<(), ApiError>;

    async fn add_vessel(&self, operation_id: Id, vessel: &VesselDraft) -> Result<(), ApiError>;

    /// Finalize the operation. The backend sends participant notification
    /// emails as a side effect outside this system's control.
    async fn finalize_operation(&self, operation_id: Id) -> Result<FinalizedOperation, ApiError>;

    // -- document / message mutations --

    async fn update_document(&self, document_id: Id, name: &str) -> Result<Document, ApiError>;
    async fn approve_document(&self, document_id: Id) -> Result<Document, ApiError>;
    async fn reject_document(&self, document_id: Id, reason: &str) -> Result<Document, ApiError>;
    async fn send_message(&self, room_id: Id, body: &str) -> Result<Message, ApiError>;
    async fn download_document(&self, document_id: Id) -> Result<Vec<u8>, ApiError>;
    async fn upload_document(
        &self,
        room_id: Id,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ApiError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Wire shape of a freshly created operation.
#[derive(Debug, Deserialize)]
struct CreatedOperation {
    id: Id,
}

/// HTTP client for the clearance backend.
pub struct HttpTransferApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransferApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Backend base URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`ApiError::Status`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Pull the payload out of the backend's `{"data": ...}` envelope.
    fn extract_data(envelope: serde_json::Value) -> Result<serde_json::Value, ApiError> {
        match envelope {
            serde_json::Value::Object(mut obj) => obj
                .remove("data")
                .ok_or_else(|| ApiError::Decode("missing 'data' envelope".to_string())),
            other => Err(ApiError::Decode(format!(
                "expected a JSON object envelope, got {other}"
            ))),
        }
    }

    /// Check status, unwrap the envelope, and deserialize the payload.
    async fn parse_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let envelope: serde_json::Value = response.json().await?;
        let data = Self::extract_data(envelope)?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Check status and discard the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl TransferApi for HttpTransferApi {
    async fn get_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response = self.client.get(self.url("/rooms")).send().await?;
        Self::parse_data(response).await
    }

    async fn get_room_summary(&self, room_id: Id) -> Result<RoomSummary, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/rooms/{room_id}/summary")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_vessels(&self, room_id: Id) -> Result<Vec<Vessel>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/rooms/{room_id}/vessels")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_activities(&self, room_id: Id) -> Result<Vec<Activity>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/rooms/{room_id}/activities")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_messages(&self, room_id: Id) -> Result<Vec<Message>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/rooms/{room_id}/messages")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_missing_documents(
        &self,
        room_ids: &[Id],
    ) -> Result<Vec<MissingDocument>, ApiError> {
        let ids = room_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let response = self
            .client
            .get(self.url("/documents/missing"))
            .query(&[("room_ids", ids)])
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn create_operation(&self, draft: &OperationDraft) -> Result<Id, ApiError> {
        let body = serde_json::json!({
            "title": draft.title,
            "location": draft.location,
            "start_date": draft.start_date,
            "end_date": draft.end_date,
        });

        let response = self
            .client
            .post(self.url("/operations"))
            .json(&body)
            .send()
            .await?;

        let created: CreatedOperation = Self::parse_data(response).await?;
        Ok(created.id)
    }

    async fn add_participant(
        &self,
        operation_id: Id,
        kind: ParticipantKind,
        participant: &ParticipantDraft,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "name": participant.name,
            "email": participant.email,
            "organization": participant.organization,
            "position": participant.position,
            "participant_type": kind.as_str(),
        });

        let response = self
            .client
            .post(self.url(&format!("/operations/{operation_id}/participants")))
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn add_vessel(&self, operation_id: Id, vessel: &VesselDraft) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "name": vessel.name,
            "imo": vessel.imo,
            "mmsi": vessel.mmsi,
            "vessel_type": vessel.vessel_type,
            "flag": vessel.flag,
            "role": vessel.role.map(|r| r.as_str()),
        });

        let response = self
            .client
            .post(self.url(&format!("/operations/{operation_id}/vessels")))
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn finalize_operation(&self, operation_id: Id) -> Result<FinalizedOperation, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/operations/{operation_id}/finalize")))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn update_document(&self, document_id: Id, name: &str) -> Result<Document, ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("/documents/{document_id}")))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn approve_document(&self, document_id: Id) -> Result<Document, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/documents/{document_id}/approve")))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn reject_document(&self, document_id: Id, reason: &str) -> Result<Document, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/documents/{document_id}/reject")))
            .json(&serde_json::json!({ "reason": reason }))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn send_message(&self, room_id: Id, body: &str) -> Result<Message, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/rooms/{room_id}/messages")))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn download_document(&self, document_id: Id) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/documents/{document_id}/download")))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn upload_document(
        &self,
        room_id: Id,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("/rooms/{room_id}/documents")))
            .multipart(form)
            .send()
            .await?;

        Self::parse_data(response).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn url_joins_base_and_path() {
        let api = HttpTransferApi::new("http://localhost:3000".into());
        assert_eq!(
            api.url("/rooms/7/summary"),
            "http://localhost:3000/api/v1/rooms/7/summary"
        );
    }

    #[test]
    fn extract_data_unwraps_envelope() {
        let data = HttpTransferApi::extract_data(serde_json::json!({
            "data": { "id": 12 }
        }))
        .unwrap();
        assert_eq!(data["id"], 12);
    }

    #[test]
    fn extract_data_rejects_missing_envelope() {
        let err = HttpTransferApi::extract_data(serde_json::json!({ "id": 12 })).unwrap_err();
        assert_matches!(err, ApiError::Decode(_));
    }

    #[test]
    fn extract_data_rejects_non_object() {
        let err = HttpTransferApi::extract_data(serde_json::json!([1, 2, 3])).unwrap_err();
        assert_matches!(err, ApiError::Decode(_));
    }
}
