use std::sync::Arc;

use tracing::info;

use common::metrics::room_metrics;

use crate::derangement;
use crate::store::RoomStore;
use crate::{Room, RoomError, RoomSummary};

/// Clonable handle over the shared store; one instance serves every
/// request. Owns the request-level policy (name trimming, what a reveal is
/// allowed to expose) and delegates storage to [`RoomStore`].
#[derive(Debug, Clone, Default)]
pub struct RoomService {
    store: Arc<RoomStore>,
}

impl RoomService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<RoomStore>) -> Self {
        Self { store }
    }

    /// Trims every name, drops the blanks and creates the room; at least
    /// two usable names must remain.
    pub async fn create_room(&self, names: Vec<String>) -> Result<Room, RoomError> {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        self.store.create(names).await
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Room, RoomError> {
        self.store.get(room_id).await
    }

    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        self.store.list().await
    }

    /// Returns the name of the participant that `participant_id` gives to.
    /// This is the only path that exposes assignment data, one pair at a
    /// time, resolved inside a single consistent room snapshot.
    pub async fn reveal_assignee(
        &self,
        room_id: &str,
        participant_id: u32,
    ) -> Result<String, RoomError> {
        let room = self.store.get(room_id).await?;

        let assignee_id = *room
            .assignment
            .get(&participant_id)
            .ok_or(RoomError::ParticipantNotFound)?;
        let name = room
            .participant_name(assignee_id)
            .ok_or(RoomError::AssignmentMismatch)?
            .to_string();

        room_metrics().inc_reveals();
        Ok(name)
    }

    /// Draws a fresh assignment over the room's participants and swaps it
    /// in atomically; the previous assignment is discarded in full.
    pub async fn shuffle(&self, room_id: &str) -> Result<(), RoomError> {
        let room = self.store.get(room_id).await?;
        let assignment = derangement::draw(&room.participant_ids())?;
        self.store.replace_assignment(room_id, assignment).await?;

        room_metrics().inc_shuffles();
        info!(%room_id, "reshuffled assignment");
        Ok(())
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<(), RoomError> {
        self.store.delete(room_id).await
    }
}
