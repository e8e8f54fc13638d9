//! Habits API endpoints

use api_types::habit::{HabitNew, HabitUpdate, HabitView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn habit_view(habit: engine::Habit) -> HabitView {
    HabitView {
        id: habit.id,
        name: habit.name,
        recurrence: habit.recurrence.as_str().to_string(),
        custom_interval_days: habit.custom_interval_days,
        allow_text: habit.allow_text,
        require_text: habit.require_text,
        allow_picture: habit.allow_picture,
        require_picture: habit.require_picture,
        allow_voice_memo: habit.allow_voice_memo,
        require_voice_memo: habit.require_voice_memo,
        created_at: habit.created_at,
        updated_at: habit.updated_at,
    }
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<HabitNew>,
) -> Result<(StatusCode, Json<HabitView>), ServerError> {
    let habit = state
        .engine
        .create_habit(engine::CreateHabitCmd {
            user_id: user.id,
            fields: engine::HabitFields {
                name: Some(payload.name),
                recurrence: Some(payload.recurrence),
                custom_interval_days: payload.custom_interval_days,
                allow_text: payload.allow_text,
                require_text: payload.require_text,
                allow_picture: payload.allow_picture,
                require_picture: payload.require_picture,
                allow_voice_memo: payload.allow_voice_memo,
                require_voice_memo: payload.require_voice_memo,
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(habit_view(habit))))
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<HabitView>>, ServerError> {
    let habits = state.engine.habits(user.id).await?;

    Ok(Json(habits.into_iter().map(habit_view).collect()))
}

pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitView>, ServerError> {
    let habit = state.engine.habit(id, user.id).await?;

    Ok(Json(habit_view(habit)))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<HabitUpdate>,
) -> Result<Json<HabitView>, ServerError> {
    let habit = state
        .engine
        .update_habit(engine::UpdateHabitCmd {
            habit_id: id,
            user_id: user.id,
            fields: engine::HabitFields {
                name: payload.name,
                recurrence: payload.recurrence,
                custom_interval_days: payload.custom_interval_days,
                allow_text: payload.allow_text,
                require_text: payload.require_text,
                allow_picture: payload.allow_picture,
                require_picture: payload.require_picture,
                allow_voice_memo: payload.allow_voice_memo,
                require_voice_memo: payload.require_voice_memo,
            },
        })
        .await?;

    Ok(Json(habit_view(habit)))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_habit(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
