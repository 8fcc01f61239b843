use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use room_service::{RoomError, RoomService};

use crate::types::{CreateRoomRequest, ErrorBody, RoomSummaryView, RoomView};

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn router(service: RoomService) -> Router {
    Router::new()
        .route("/room", post(create_room).get(list_rooms))
        .route("/rooms", get(list_rooms))
        .route("/room/:room_id", get(get_room).delete(delete_room))
        .route(
            "/room/:room_id/participant/:participant_id",
            get(reveal_assignee),
        )
        .route("/room/:room_id/shuffle", post(shuffle))
        .with_state(service)
}

fn error_response(err: RoomError) -> ApiError {
    let status = match err {
        RoomError::NotEnoughParticipants => StatusCode::BAD_REQUEST,
        RoomError::RoomNotFound | RoomError::ParticipantNotFound => StatusCode::NOT_FOUND,
        RoomError::AssignmentMismatch => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorBody {
            detail: err.to_string(),
        }),
    )
}

/// Answers with the new room's URL as plain text; the client only keeps
/// the trailing path segment.
async fn create_room(
    State(service): State<RoomService>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<(StatusCode, String), ApiError> {
    crate::count_request("/api/secret-santa/room");
    let room = service
        .create_room(body.participants)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        format!("{}/room/{}", crate::API_PREFIX, room.id),
    ))
}

async fn list_rooms(State(service): State<RoomService>) -> Json<Vec<RoomSummaryView>> {
    crate::count_request("/api/secret-santa/rooms");
    let summaries = service.list_rooms().await;
    Json(summaries.into_iter().map(RoomSummaryView::from).collect())
}

async fn get_room(
    State(service): State<RoomService>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomView>, ApiError> {
    crate::count_request("/api/secret-santa/room/{room_id}");
    let room = service.get_room(&room_id).await.map_err(error_response)?;
    Ok(Json(RoomView::from(room)))
}

async fn reveal_assignee(
    State(service): State<RoomService>,
    Path((room_id, participant_id)): Path<(String, u32)>,
) -> Result<String, ApiError> {
    crate::count_request("/api/secret-santa/room/{room_id}/participant/{participant_id}");
    service
        .reveal_assignee(&room_id, participant_id)
        .await
        .map_err(error_response)
}

async fn shuffle(
    State(service): State<RoomService>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    crate::count_request("/api/secret-santa/room/{room_id}/shuffle");
    service.shuffle(&room_id).await.map_err(error_response)?;
    Ok(StatusCode::OK)
}

async fn delete_room(
    State(service): State<RoomService>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    crate::count_request("/api/secret-santa/room/{room_id}");
    service.delete_room(&room_id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
