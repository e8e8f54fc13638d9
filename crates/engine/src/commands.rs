//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. The `*Fields` structs carry the
//! optional inputs shared by create and update; absent fields mean "keep the
//! stored value" on update and "use the default" on create.

use uuid::Uuid;

/// Optional habit definition fields.
#[derive(Clone, Debug, Default)]
pub struct HabitFields {
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

impl HabitFields {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn recurrence(mut self, recurrence: impl Into<String>) -> Self {
        self.recurrence = Some(recurrence.into());
        self
    }

    #[must_use]
    pub fn custom_interval_days(mut self, days: i32) -> Self {
        self.custom_interval_days = Some(days);
        self
    }

    #[must_use]
    pub fn allow_text(mut self, allow: bool) -> Self {
        self.allow_text = Some(allow);
        self
    }

    #[must_use]
    pub fn require_text(mut self, require: bool) -> Self {
        self.require_text = Some(require);
        self
    }

    #[must_use]
    pub fn allow_picture(mut self, allow: bool) -> Self {
        self.allow_picture = Some(allow);
        self
    }

    #[must_use]
    pub fn require_picture(mut self, require: bool) -> Self {
        self.require_picture = Some(require);
        self
    }

    #[must_use]
    pub fn allow_voice_memo(mut self, allow: bool) -> Self {
        self.allow_voice_memo = Some(allow);
        self
    }

    #[must_use]
    pub fn require_voice_memo(mut self, require: bool) -> Self {
        self.require_voice_memo = Some(require);
        self
    }
}

/// Optional habit entry fields.
#[derive(Clone, Debug, Default)]
pub struct EntryFields {
    pub entry_date: Option<String>,
    pub text_content: Option<String>,
    pub picture_url: Option<String>,
    pub voice_memo_url: Option<String>,
}

impl EntryFields {
    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.entry_date = Some(entry_date.into());
        self
    }

    #[must_use]
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    #[must_use]
    pub fn picture_url(mut self, url: impl Into<String>) -> Self {
        self.picture_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn voice_memo_url(mut self, url: impl Into<String>) -> Self {
        self.voice_memo_url = Some(url.into());
        self
    }
}

/// Optional diary entry fields.
#[derive(Clone, Debug, Default)]
pub struct DiaryFields {
    pub entry_date: Option<String>,
    pub content: Option<String>,
}

impl DiaryFields {
    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.entry_date = Some(entry_date.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Create a habit.
#[derive(Clone, Debug)]
pub struct CreateHabitCmd {
    pub user_id: Uuid,
    pub fields: HabitFields,
}

impl CreateHabitCmd {
    #[must_use]
    pub fn new(user_id: Uuid, name: impl Into<String>, recurrence: impl Into<String>) -> Self {
        Self {
            user_id,
            fields: HabitFields::default().name(name).recurrence(recurrence),
        }
    }

    /// Preset for minimal clients that only capture a daily text habit.
    #[must_use]
    pub fn simple_daily_text(user_id: Uuid, name: impl Into<String>) -> Self {
        Self::new(user_id, name, "daily")
            .allow_text(true)
            .require_text(true)
    }

    #[must_use]
    pub fn fields(mut self, fields: HabitFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn custom_interval_days(mut self, days: i32) -> Self {
        self.fields.custom_interval_days = Some(days);
        self
    }

    #[must_use]
    pub fn allow_text(mut self, allow: bool) -> Self {
        self.fields.allow_text = Some(allow);
        self
    }

    #[must_use]
    pub fn require_text(mut self, require: bool) -> Self {
        self.fields.require_text = Some(require);
        self
    }

    #[must_use]
    pub fn allow_picture(mut self, allow: bool) -> Self {
        self.fields.allow_picture = Some(allow);
        self
    }

    #[must_use]
    pub fn require_picture(mut self, require: bool) -> Self {
        self.fields.require_picture = Some(require);
        self
    }

    #[must_use]
    pub fn allow_voice_memo(mut self, allow: bool) -> Self {
        self.fields.allow_voice_memo = Some(allow);
        self
    }

    #[must_use]
    pub fn require_voice_memo(mut self, require: bool) -> Self {
        self.fields.require_voice_memo = Some(require);
        self
    }
}

/// Update an existing habit.
#[derive(Clone, Debug)]
pub struct UpdateHabitCmd {
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub fields: HabitFields,
}

impl UpdateHabitCmd {
    #[must_use]
    pub fn new(habit_id: Uuid, user_id: Uuid) -> Self {
        Self {
            habit_id,
            user_id,
            fields: HabitFields::default(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: HabitFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.fields.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn recurrence(mut self, recurrence: impl Into<String>) -> Self {
        self.fields.recurrence = Some(recurrence.into());
        self
    }

    #[must_use]
    pub fn custom_interval_days(mut self, days: i32) -> Self {
        self.fields.custom_interval_days = Some(days);
        self
    }
}

/// Record a completion entry for a habit.
#[derive(Clone, Debug)]
pub struct CreateEntryCmd {
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub fields: EntryFields,
}

impl CreateEntryCmd {
    #[must_use]
    pub fn new(habit_id: Uuid, user_id: Uuid) -> Self {
        Self {
            habit_id,
            user_id,
            fields: EntryFields::default(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: EntryFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.fields.entry_date = Some(entry_date.into());
        self
    }

    #[must_use]
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.fields.text_content = Some(text.into());
        self
    }

    #[must_use]
    pub fn picture_url(mut self, url: impl Into<String>) -> Self {
        self.fields.picture_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn voice_memo_url(mut self, url: impl Into<String>) -> Self {
        self.fields.voice_memo_url = Some(url.into());
        self
    }
}

/// Update an existing habit entry.
#[derive(Clone, Debug)]
pub struct UpdateEntryCmd {
    pub habit_id: Uuid,
    pub entry_id: Uuid,
    pub user_id: Uuid,
    pub fields: EntryFields,
}

impl UpdateEntryCmd {
    #[must_use]
    pub fn new(habit_id: Uuid, entry_id: Uuid, user_id: Uuid) -> Self {
        Self {
            habit_id,
            entry_id,
            user_id,
            fields: EntryFields::default(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: EntryFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.fields.entry_date = Some(entry_date.into());
        self
    }

    #[must_use]
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.fields.text_content = Some(text.into());
        self
    }
}

/// Write a diary entry.
#[derive(Clone, Debug)]
pub struct CreateDiaryEntryCmd {
    pub user_id: Uuid,
    pub fields: DiaryFields,
}

impl CreateDiaryEntryCmd {
    #[must_use]
    pub fn new(user_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            user_id,
            fields: DiaryFields::default().content(content),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: DiaryFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.fields.entry_date = Some(entry_date.into());
        self
    }
}

/// Update an existing diary entry.
#[derive(Clone, Debug)]
pub struct UpdateDiaryEntryCmd {
    pub entry_id: Uuid,
    pub user_id: Uuid,
    pub fields: DiaryFields,
}

impl UpdateDiaryEntryCmd {
    #[must_use]
    pub fn new(entry_id: Uuid, user_id: Uuid) -> Self {
        Self {
            entry_id,
            user_id,
            fields: DiaryFields::default(),
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: DiaryFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn entry_date(mut self, entry_date: impl Into<String>) -> Self {
        self.fields.entry_date = Some(entry_date.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.fields.content = Some(content.into());
        self
    }
}

/// Register a new account.
#[derive(Clone, Debug)]
pub struct RegisterCmd {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

impl RegisterCmd {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            password: password.into(),
        }
    }
}
