use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener};

mod auth;
mod diary;
mod entries;
mod habits;
mod server;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{LoginRequest, LoginResponse, RegisterNew, UserView};
        pub use engine::User;
    }

    pub mod habit {
        pub use api_types::habit::{HabitNew, HabitUpdate, HabitView};
    }

    pub mod entry {
        pub use api_types::entry::{EntryNew, EntryUpdate, EntryView};
    }

    pub mod diary {
        pub use api_types::diary::{DiaryEntryNew, DiaryEntryUpdate, DiaryEntryView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::DuplicateEntryDate | EngineError::EmailTaken => StatusCode::CONFLICT,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidField { .. }
        | EngineError::MissingField(_)
        | EngineError::ContentNotAllowed(_)
        | EngineError::ContentRequired(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
