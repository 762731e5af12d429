//! Shared room store.
//!
//! [`RoomStore`] holds the per-resource state slices for the currently
//! selected room plus the single orchestration error slot. It is created at
//! app start, shared as `Arc<RoomStore>` with the orchestrator, fetchers,
//! actions, and presentation layer, and reset at logout.
//!
//! Each slice is written by exactly one logical owner (its fetcher, or the
//! store reset); readers clone snapshots out. Locks are held only for the
//! duration of a copy, never across an await point.

use std::sync::RwLock;

use chrono::Utc;
use serde::Serialize;

use stshub_core::activity::Activity;
use stshub_core::document::MissingDocument;
use stshub_core::message::Message;
use stshub_core::session::SessionUser;
use stshub_core::summary::RoomSummary;
use stshub_core::types::{Id, Timestamp};
use stshub_core::vessel::Vessel;

// ---------------------------------------------------------------------------
// ActionError
// ---------------------------------------------------------------------------

/// The single "last orchestration error" record.
///
/// Overwritten by the most recent failing fetch and cleared per-action on
/// the next success, so exactly one error is visible at a time, attributed
/// to the action that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionError {
    pub action: &'static str,
    pub message: String,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// RoomStore
// ---------------------------------------------------------------------------

/// Shared client state for the selected room.
#[derive(Default)]
pub struct RoomStore {
    user: RwLock<Option<SessionUser>>,
    current_room: RwLock<Option<Id>>,
    summary: RwLock<Option<RoomSummary>>,
    vessels: RwLock<Vec<Vessel>>,
    activities: RwLock<Vec<Activity>>,
    messages: RwLock<Vec<Message>>,
    missing_documents: RwLock<Vec<MissingDocument>>,
    upload_modal_open: RwLock<bool>,
    last_error: RwLock<Option<ActionError>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- session user --

    pub fn user(&self) -> Option<SessionUser> {
        self.user.read().unwrap().clone()
    }

    pub fn set_user(&self, user: SessionUser) {
        *self.user.write().unwrap() = Some(user);
    }

    // -- current room --

    pub fn current_room(&self) -> Option<Id> {
        *self.current_room.read().unwrap()
    }

    pub fn set_current_room(&self, room_id: Option<Id>) {
        *self.current_room.write().unwrap() = room_id;
    }

    // -- resource slices (replaced wholesale by their fetchers) --

    pub fn summary(&self) -> Option<RoomSummary> {
        self.summary.read().unwrap().clone()
    }

    pub fn set_summary(&self, summary: RoomSummary) {
        *self.summary.write().unwrap() = Some(summary);
    }

    pub fn vessels(&self) -> Vec<Vessel> {
        self.vessels.read().unwrap().clone()
    }

    pub fn set_vessels(&self, vessels: Vec<Vessel>) {
        *self.vessels.write().unwrap() = vessels;
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.activities.read().unwrap().clone()
    }

    pub fn set_activities(&self, activities: Vec<Activity>) {
        *self.activities.write().unwrap() = activities;
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().unwrap().clone()
    }

    pub fn set_messages(&self, messages: Vec<Message>) {
        *self.messages.write().unwrap() = messages;
    }

    /// Append a provisional local-echo message.
    ///
    /// The record stays until the next authoritative
    /// [`set_messages`](Self::set_messages) replaces the collection; it may
    /// briefly coexist with its server-confirmed copy.
    pub fn push_provisional_message(&self, message: Message) {
        self.messages.write().unwrap().push(message);
    }

    /// Drop a provisional message by its local tag (send failed).
    pub fn remove_provisional_message(&self, tag: uuid::Uuid) {
        self.messages
            .write()
            .unwrap()
            .retain(|m| m.local_tag != Some(tag));
    }

    pub fn missing_documents(&self) -> Vec<MissingDocument> {
        self.missing_documents.read().unwrap().clone()
    }

    pub fn set_missing_documents(&self, docs: Vec<MissingDocument>) {
        *self.missing_documents.write().unwrap() = docs;
    }

    // -- upload modal --

    pub fn upload_modal_open(&self) -> bool {
        *self.upload_modal_open.read().unwrap()
    }

    pub fn set_upload_modal_open(&self, open: bool) {
        *self.upload_modal_open.write().unwrap() = open;
    }

    // -- error slot --

    pub fn last_error(&self) -> Option<ActionError> {
        self.last_error.read().unwrap().clone()
    }

    /// Record a failing action, overwriting whatever error was visible.
    pub fn record_error(&self, action: &'static str, message: impl Into<String>) {
        *self.last_error.write().unwrap() = Some(ActionError {
            action,
            message: message.into(),
            timestamp: Utc::now(),
        });
    }

    /// Clear the error slot, but only if it is attributed to `action`.
    ///
    /// A success must not hide another resource's still-standing failure.
    pub fn clear_error_for(&self, action: &'static str) {
        let mut slot = self.last_error.write().unwrap();
        if slot.as_ref().is_some_and(|e| e.action == action) {
            *slot = None;
        }
    }

    /// Dismiss the error banner regardless of attribution.
    pub fn dismiss_error(&self) {
        *self.last_error.write().unwrap() = None;
    }

    // -- logout --

    /// Reset every slice to its initial value.
    ///
    /// Runs unconditionally and does not wait for in-flight fetches; a
    /// superseded fetch that lands afterwards simply overwrites empty state
    /// (last-write-wins).
    pub fn reset(&self) {
        *self.user.write().unwrap() = None;
        *self.current_room.write().unwrap() = None;
        *self.summary.write().unwrap() = None;
        self.vessels.write().unwrap().clear();
        self.activities.write().unwrap().clear();
        self.messages.write().unwrap().clear();
        self.missing_documents.write().unwrap().clear();
        *self.upload_modal_open.write().unwrap() = false;
        *self.last_error.write().unwrap() = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
