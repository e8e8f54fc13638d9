use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegisterNew {
        pub email: String,
        pub display_name: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
        pub display_name: String,
        pub created_at: DateTime<Utc>,
    }

    /// Response body for register and login.
    ///
    /// The token is an opaque bearer credential; clients send it back in the
    /// `Authorization` header on every protected request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: UserView,
    }
}

pub mod habit {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HabitNew {
        pub name: String,
        /// One of `daily`, `weekly`, `monthly`, `custom` (case-insensitive).
        pub recurrence: String,
        /// Required when `recurrence` is `custom`, rejected otherwise.
        pub custom_interval_days: Option<i32>,
        pub allow_text: Option<bool>,
        pub require_text: Option<bool>,
        pub allow_picture: Option<bool>,
        pub require_picture: Option<bool>,
        pub allow_voice_memo: Option<bool>,
        pub require_voice_memo: Option<bool>,
    }

    /// Partial update; absent fields keep their stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HabitUpdate {
        pub name: Option<String>,
        pub recurrence: Option<String>,
        pub custom_interval_days: Option<i32>,
        pub allow_text: Option<bool>,
        pub require_text: Option<bool>,
        pub allow_picture: Option<bool>,
        pub require_picture: Option<bool>,
        pub allow_voice_memo: Option<bool>,
        pub require_voice_memo: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HabitView {
        pub id: Uuid,
        pub name: String,
        pub recurrence: String,
        pub custom_interval_days: Option<i32>,
        pub allow_text: bool,
        pub require_text: bool,
        pub allow_picture: bool,
        pub require_picture: bool,
        pub allow_voice_memo: bool,
        pub require_voice_memo: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod entry {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EntryNew {
        /// Calendar date as `YYYY-MM-DD`; RFC3339 timestamps are also accepted
        /// and reduced to their UTC day. Defaults to today.
        pub entry_date: Option<String>,
        pub text_content: Option<String>,
        pub picture_url: Option<String>,
        pub voice_memo_url: Option<String>,
    }

    /// Partial update; absent content fields keep their stored value, while a
    /// blank string clears one.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EntryUpdate {
        pub entry_date: Option<String>,
        pub text_content: Option<String>,
        pub picture_url: Option<String>,
        pub voice_memo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EntryView {
        pub id: Uuid,
        pub habit_id: Uuid,
        pub entry_date: NaiveDate,
        pub text_content: Option<String>,
        pub picture_url: Option<String>,
        pub voice_memo_url: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod diary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiaryEntryNew {
        /// Calendar date as `YYYY-MM-DD`; defaults to today.
        pub entry_date: Option<String>,
        pub content: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiaryEntryUpdate {
        pub entry_date: Option<String>,
        pub content: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiaryEntryView {
        pub id: Uuid,
        pub entry_date: NaiveDate,
        pub content: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}
