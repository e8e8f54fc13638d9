//! Diary API endpoints

use api_types::diary::{DiaryEntryNew, DiaryEntryUpdate, DiaryEntryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn diary_view(entry: engine::DiaryEntry) -> DiaryEntryView {
    DiaryEntryView {
        id: entry.id,
        entry_date: entry.entry_date,
        content: entry.content,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<DiaryEntryNew>,
) -> Result<(StatusCode, Json<DiaryEntryView>), ServerError> {
    let entry = state
        .engine
        .create_diary_entry(engine::CreateDiaryEntryCmd {
            user_id: user.id,
            fields: engine::DiaryFields {
                entry_date: payload.entry_date,
                content: Some(payload.content),
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(diary_view(entry))))
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<DiaryEntryView>>, ServerError> {
    let entries = state.engine.diary_entries(user.id).await?;

    Ok(Json(entries.into_iter().map(diary_view).collect()))
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DiaryEntryView>, ServerError> {
    let entry = state.engine.diary_entry(id, user.id).await?;

    Ok(Json(diary_view(entry)))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DiaryEntryUpdate>,
) -> Result<Json<DiaryEntryView>, ServerError> {
    let entry = state
        .engine
        .update_diary_entry(engine::UpdateDiaryEntryCmd {
            entry_id: id,
            user_id: user.id,
            fields: engine::DiaryFields {
                entry_date: payload.entry_date,
                content: payload.content,
            },
        })
        .await?;

    Ok(Json(diary_view(entry)))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_diary_entry(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
