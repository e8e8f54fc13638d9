//! Habit entries API endpoints

use api_types::entry::{EntryNew, EntryUpdate, EntryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn entry_view(entry: engine::HabitEntry) -> EntryView {
    EntryView {
        id: entry.id,
        habit_id: entry.habit_id,
        entry_date: entry.entry_date,
        text_content: entry.text_content,
        picture_url: entry.picture_url,
        voice_memo_url: entry.voice_memo_url,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = state
        .engine
        .create_entry(engine::CreateEntryCmd {
            habit_id,
            user_id: user.id,
            fields: engine::EntryFields {
                entry_date: payload.entry_date,
                text_content: payload.text_content,
                picture_url: payload.picture_url,
                voice_memo_url: payload.voice_memo_url,
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry_view(entry))))
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let entries = state.engine.entries(habit_id, user.id).await?;

    Ok(Json(entries.into_iter().map(entry_view).collect()))
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((habit_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EntryView>, ServerError> {
    let entry = state.engine.entry(habit_id, entry_id, user.id).await?;

    Ok(Json(entry_view(entry)))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((habit_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<EntryUpdate>,
) -> Result<Json<EntryView>, ServerError> {
    let entry = state
        .engine
        .update_entry(engine::UpdateEntryCmd {
            habit_id,
            entry_id,
            user_id: user.id,
            fields: engine::EntryFields {
                entry_date: payload.entry_date,
                text_content: payload.text_content,
                picture_url: payload.picture_url,
                voice_memo_url: payload.voice_memo_url,
            },
        })
        .await?;

    Ok(Json(entry_view(entry)))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path((habit_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_entry(habit_id, entry_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
