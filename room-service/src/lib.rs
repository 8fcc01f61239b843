// Core of the secret santa backend: room records, the assignment draw and
// the store/service pair every request goes through. HTTP lives in the
// gateway crate; nothing here knows about the wire.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod derangement;
pub mod service;
pub mod store;

pub use service::RoomService;
pub use store::RoomStore;

pub type BoxError = common::metrics::BoxError;

/// One entrant of a room. Created together with the room and immutable
/// afterwards; ids are small integers unique within the room, assigned in
/// list order starting at 1.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub room_id: String,
}

/// A room and its current gift assignment. The assignment maps each
/// participant id to the id of the participant they give to; it always
/// covers every participant exactly once and never maps anyone to
/// themselves.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub participants: Vec<Participant>,
    pub assignment: HashMap<u32, u32>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn participant_ids(&self) -> Vec<u32> {
        self.participants.iter().map(|p| p.id).collect()
    }

    pub fn participant_name(&self, id: u32) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }
}

/// Listing view: ids and sizes only, never names or assignments.
#[derive(Debug, Clone)]
pub struct RoomSummary {
    pub id: String,
    pub participant_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("at least 2 participants are required")]
    NotEnoughParticipants,
    #[error("room not found")]
    RoomNotFound,
    #[error("participant not found")]
    ParticipantNotFound,
    #[error("assignment does not cover the current participants")]
    AssignmentMismatch,
}
