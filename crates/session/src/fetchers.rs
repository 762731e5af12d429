//! Room-scoped resource fetchers.
//!
//! Each fetcher reads the current room from the store, runs its remote call
//! under the retry/timeout policy, and owns exactly one state slice plus
//! its attribution in the shared error slot:
//!
//! - no room selected -> immediate no-op;
//! - success -> replace the slice wholesale, clear the error slot if it was
//!   attributed to this fetcher;
//! - exhausted failure -> leave the stale slice untouched, record the error
//!   slot, and return the failure for the orchestrator's log.
//!
//! A fetcher never panics and never lets a failure escape as anything but
//! its `Result`, so the orchestrator can run all five concurrently without
//! one rejection aborting the others.

use stshub_client::retry::{fetch_with_policy, RetryPolicy};
use stshub_client::{ApiError, TransferApi};

use crate::store::RoomStore;

/// Action names used for error-slot attribution and logging.
pub const ACTION_SUMMARY: &str = "fetch_summary";
pub const ACTION_VESSELS: &str = "fetch_vessels";
pub const ACTION_ACTIVITIES: &str = "fetch_activities";
pub const ACTION_MESSAGES: &str = "fetch_messages";
pub const ACTION_MISSING_DOCUMENTS: &str = "fetch_missing_documents";

pub async fn fetch_summary(
    api: &dyn TransferApi,
    store: &RoomStore,
    policy: &RetryPolicy,
) -> Result<(), ApiError> {
    let Some(room_id) = store.current_room() else {
        return Ok(());
    };

    match fetch_with_policy(policy, ACTION_SUMMARY, || api.get_room_summary(room_id)).await {
        Ok(summary) => {
            store.set_summary(summary);
            store.clear_error_for(ACTION_SUMMARY);
            Ok(())
        }
        Err(e) => {
            store.record_error(ACTION_SUMMARY, e.to_string());
            Err(e)
        }
    }
}

pub async fn fetch_vessels(
    api: &dyn TransferApi,
    store: &RoomStore,
    policy: &RetryPolicy,
) -> Result<(), ApiError> {
    let Some(room_id) = store.current_room() else {
        return Ok(());
    };

    match fetch_with_policy(policy, ACTION_VESSELS, || api.get_vessels(room_id)).await {
        Ok(vessels) => {
            store.set_vessels(vessels);
            store.clear_error_for(ACTION_VESSELS);
            Ok(())
        }
        Err(e) => {
            store.record_error(ACTION_VESSELS, e.to_string());
            Err(e)
        }
    }
}

pub async fn fetch_activities(
    api: &dyn TransferApi,
    store: &RoomStore,
    policy: &RetryPolicy,
) -> Result<(), ApiError> {
    let Some(room_id) = store.current_room() else {
        return Ok(());
    };

    match fetch_with_policy(policy, ACTION_ACTIVITIES, || api.get_activities(room_id)).await {
        Ok(activities) => {
            store.set_activities(activities);
            store.clear_error_for(ACTION_ACTIVITIES);
            Ok(())
        }
        Err(e) => {
            store.record_error(ACTION_ACTIVITIES, e.to_string());
            Err(e)
        }
    }
}

pub async fn fetch_messages(
    api: &dyn TransferApi,
    store: &RoomStore,
    policy: &RetryPolicy,
) -> Result<(), ApiError> {
    let Some(room_id) = store.current_room() else {
        return Ok(());
    };

    match fetch_with_policy(policy, ACTION_MESSAGES, || api.get_messages(room_id)).await {
        Ok(messages) => {
            store.set_messages(messages);
            store.clear_error_for(ACTION_MESSAGES);
            Ok(())
        }
        Err(e) => {
            store.record_error(ACTION_MESSAGES, e.to_string());
            Err(e)
        }
    }
}

pub async fn fetch_missing_documents(
    api: &dyn TransferApi,
    store: &RoomStore,
    policy: &RetryPolicy,
) -> Result<(), ApiError> {
    let Some(room_id) = store.current_room() else {
        return Ok(());
    };
    let room_ids = [room_id];

    match fetch_with_policy(policy, ACTION_MISSING_DOCUMENTS, || {
        api.get_missing_documents(&room_ids)
    })
    .await
    {
        Ok(docs) => {
            store.set_missing_documents(docs);
            store.clear_error_for(ACTION_MISSING_DOCUMENTS);
            Ok(())
        }
        Err(e) => {
            store.record_error(ACTION_MISSING_DOCUMENTS, e.to_string());
            Err(e)
        }
    }
}
