use serde::{Deserialize, Serialize};

use room_service::{Room, RoomSummary};

/// Body cho POST /api/secret-santa/room.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub participants: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub id: u32,
    pub name: String,
}

/// Room as the client sees it: names only, never the assignment.
#[derive(Debug, Serialize)]
pub struct RoomView {
    pub id: String,
    pub participants: Vec<ParticipantView>,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            participants: room
                .participants
                .into_iter()
                .map(|p| ParticipantView {
                    id: p.id,
                    name: p.name,
                })
                .collect(),
        }
    }
}

/// Entry of the rooms listing; the client expects camelCase here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryView {
    pub id: String,
    pub participant_count: usize,
}

impl From<RoomSummary> for RoomSummaryView {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.id,
            participant_count: summary.participant_count,
        }
    }
}

/// Uniform error body; the client reads `detail` on failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
