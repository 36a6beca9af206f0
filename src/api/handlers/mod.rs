use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::models::*;
use crate::session::Session;

// ============================================================
// Response Types
// ============================================================

/// The cursor as shown to a client: the snapshot plus what gets read aloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorView {
    #[serde(flatten)]
    pub snapshot: CursorSnapshot,
    pub spoken_text: String,
}

impl From<CursorSnapshot> for CursorView {
    fn from(snapshot: CursorSnapshot) -> Self {
        let spoken_text = snapshot.spoken_text();
        Self {
            snapshot,
            spoken_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorMoveResponse {
    /// `false` when the move hit the start or end of the list.
    pub moved: bool,
    #[serde(flatten)]
    pub cursor: CursorView,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(State(session): State<Session>) -> Json<Vec<PaceNote>> {
    Json(session.cursor().notes())
}

/// Replace the active list with notes parsed from the request body.
///
/// Malformed lines are reported in the response rather than failing the
/// request.
pub async fn load_notes(State(session): State<Session>, body: String) -> Json<LoadReport> {
    Json(session.load_text(&body, "http"))
}

// ============================================================
// Cursor
// ============================================================

pub async fn get_cursor(State(session): State<Session>) -> Json<CursorView> {
    Json(session.cursor().snapshot().into())
}

pub async fn next_note(State(session): State<Session>) -> Json<CursorMoveResponse> {
    let (moved, snapshot) = session.cursor().advance_with_snapshot();
    Json(CursorMoveResponse {
        moved,
        cursor: snapshot.into(),
    })
}

pub async fn previous_note(State(session): State<Session>) -> Json<CursorMoveResponse> {
    let (moved, snapshot) = session.cursor().retreat_with_snapshot();
    Json(CursorMoveResponse {
        moved,
        cursor: snapshot.into(),
    })
}

/// Server-sent `note` events, starting with the current note.
pub async fn stream_cursor(
    State(session): State<Session>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let updates = session
        .cursor()
        .subscribe()
        .into_stream()
        .map(|snapshot| Event::default().event("note").json_data(CursorView::from(snapshot)));

    Sse::new(updates).keep_alive(KeepAlive::default())
}
