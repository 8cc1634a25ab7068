/// Playback command API routes
use crate::{
    error::{CommandError, Result, ServerError},
    middleware::Credential,
    services::Origin,
    state::AppState,
};
use airwave_playback::{Track, TrackLabel, TrackRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PlayBody {
    #[serde(flatten)]
    pub request: TrackRequest,
    #[serde(default)]
    pub credential: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub status: &'static str,
    /// "play" when started immediately, "queued" otherwise
    pub action: &'static str,
    pub track: Track,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct EndedBody {
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct EndedResponse {
    pub advanced: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub now_playing: Option<TrackLabel>,
    pub queue: Vec<TrackLabel>,
    pub lines: Vec<String>,
}

/// POST /api/play - Start a track, or queue it behind the current one
///
/// The body is parsed after the header and query credential are known, so a
/// caller without access gets 403 whether or not the body is usable.
pub async fn play(
    State(app_state): State<AppState>,
    credential: Credential,
    body: std::result::Result<Json<PlayBody>, JsonRejection>,
) -> Result<Json<PlayResponse>> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            if !app_state.station.access().permits(credential.as_deref()) {
                tracing::warn!("Rejected unauthorized play command");
                return Err(CommandError::Unauthorized.into());
            }
            return Err(ServerError::BadRequest(rejection.body_text()));
        }
    };
    let credential = credential.or(body.credential);

    let outcome = app_state
        .station
        .play(&body.request, credential.as_deref(), Origin::Request)
        .await?;

    Ok(Json(PlayResponse {
        status: "accepted",
        action: outcome.name(),
        track: outcome.into_track(),
    }))
}

/// POST /api/stop - Clear the current track and the queue
pub async fn stop(
    State(app_state): State<AppState>,
    credential: Credential,
) -> Result<Json<CommandResponse>> {
    app_state.station.stop(credential.as_deref()).await?;
    Ok(Json(CommandResponse { status: "ok" }))
}

/// POST /api/skip - Move on to the next queued track
pub async fn skip(
    State(app_state): State<AppState>,
    credential: Credential,
) -> Result<Json<CommandResponse>> {
    app_state.station.skip(credential.as_deref()).await?;
    Ok(Json(CommandResponse { status: "ok" }))
}

/// POST /api/ended - Report that a track finished playing
pub async fn ended(
    State(app_state): State<AppState>,
    Json(body): Json<EndedBody>,
) -> Json<EndedResponse> {
    let advanced = app_state.station.track_ended(&body.location).await.is_some();
    Json(EndedResponse { advanced })
}

/// GET /api/queue - Current track and queue (read-only)
pub async fn queue(State(app_state): State<AppState>) -> Json<QueueResponse> {
    let playback = app_state.station.snapshot().await;
    Json(QueueResponse {
        now_playing: playback.now_playing_label(),
        queue: playback.queue_labels(),
        lines: playback.queue_lines(),
    })
}

/// GET /api/status - Plain-text listener count
pub async fn status(State(app_state): State<AppState>) -> String {
    let listeners = app_state.station.listener_count().await;
    format!("{} listeners connected", listeners)
}
