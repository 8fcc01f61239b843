use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use common::metrics::room_metrics;

use crate::derangement;
use crate::{Participant, Room, RoomError, RoomSummary};

/// In-memory room table. The outer lock only guards the map itself; every
/// room carries its own lock, so traffic on one room never stalls another
/// and an assignment swap is atomic with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: RwLock<HashMap<String, Arc<RwLock<Room>>>>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a room from already-trimmed participant names. Room ids are
    /// random UUIDs (holding one grants access to the room), participant
    /// ids count up from 1 in list order, and the first assignment is drawn
    /// eagerly so a room never exists without one.
    pub async fn create(&self, names: Vec<String>) -> Result<Room, RoomError> {
        if names.len() < 2 {
            return Err(RoomError::NotEnoughParticipants);
        }

        let room_id = Uuid::new_v4().to_string();
        let participants: Vec<Participant> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Participant {
                id: i as u32 + 1,
                name,
                room_id: room_id.clone(),
            })
            .collect();

        let ids: Vec<u32> = participants.iter().map(|p| p.id).collect();
        let assignment = derangement::draw(&ids)?;

        let room = Room {
            id: room_id.clone(),
            participants,
            assignment,
            created_at: Utc::now(),
        };

        let mut rooms = self.rooms.write().await;
        rooms.insert(room_id.clone(), Arc::new(RwLock::new(room.clone())));

        room_metrics().inc_rooms_created();
        room_metrics().set_active_rooms(rooms.len() as i64);
        info!(%room_id, participants = room.participants.len(), "created room");

        Ok(room)
    }

    /// Full snapshot of the room, cloned under its read lock — a reader
    /// always sees one assignment in its entirety.
    pub async fn get(&self, room_id: &str) -> Result<Room, RoomError> {
        let entry = self.entry(room_id).await?;
        let room = entry.read().await;
        Ok(room.clone())
    }

    pub async fn list(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;
        let mut summaries = Vec::with_capacity(rooms.len());
        for entry in rooms.values() {
            let room = entry.read().await;
            summaries.push(RoomSummary {
                id: room.id.clone(),
                participant_count: room.participants.len(),
            });
        }
        summaries
    }

    /// Removes the room and everything it owns. Fails with `RoomNotFound`
    /// for ids that were never created or already deleted.
    pub async fn delete(&self, room_id: &str) -> Result<(), RoomError> {
        let mut rooms = self.rooms.write().await;
        if rooms.remove(room_id).is_none() {
            return Err(RoomError::RoomNotFound);
        }

        room_metrics().set_active_rooms(rooms.len() as i64);
        info!(%room_id, "deleted room");
        Ok(())
    }

    /// Swaps the room's assignment wholesale under its write lock. The
    /// replacement must be a fixed-point-free bijection over the room's
    /// current participant set; otherwise the stored assignment is left
    /// untouched and the caller may simply retry.
    pub async fn replace_assignment(
        &self,
        room_id: &str,
        assignment: HashMap<u32, u32>,
    ) -> Result<(), RoomError> {
        let entry = self.entry(room_id).await?;
        let mut room = entry.write().await;
        validate_assignment(&room, &assignment)?;
        room.assignment = assignment;
        Ok(())
    }

    async fn entry(&self, room_id: &str) -> Result<Arc<RwLock<Room>>, RoomError> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned().ok_or(RoomError::RoomNotFound)
    }
}

fn validate_assignment(room: &Room, assignment: &HashMap<u32, u32>) -> Result<(), RoomError> {
    let ids: HashSet<u32> = room.participants.iter().map(|p| p.id).collect();
    if assignment.len() != ids.len() {
        return Err(RoomError::AssignmentMismatch);
    }

    let mut receivers = HashSet::with_capacity(ids.len());
    for (&giver, &receiver) in assignment {
        if giver == receiver
            || !ids.contains(&giver)
            || !ids.contains(&receiver)
            || !receivers.insert(receiver)
        {
            return Err(RoomError::AssignmentMismatch);
        }
    }

    Ok(())
}
