//! Habit definitions and the rules that validate them.
//!
//! A `Habit` describes a recurring practice and which content channels its
//! entries may or must carry. Creation and update share one rule set: update
//! merges the supplied fields onto the stored definition and re-validates the
//! whole.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, HabitFields, ResultEngine, util};

const NAME_MAX_CHARS: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl TryFrom<&str> for Recurrence {
    type Error = EngineError;

    // Recurrence labels are matched case-insensitively.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            other => Err(EngineError::InvalidField {
                field: "recurrence",
                reason: format!("unknown recurrence: {other}"),
            }),
        }
    }
}

/// A content channel an entry can carry: free text, a picture URL or a voice
/// memo URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Text,
    Picture,
    VoiceMemo,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Picture => "picture",
            Self::VoiceMemo => "voice memo",
        }
    }

    pub(crate) fn allow_field(self) -> &'static str {
        match self {
            Self::Text => "allowText",
            Self::Picture => "allowPicture",
            Self::VoiceMemo => "allowVoiceMemo",
        }
    }

    pub(crate) fn require_field(self) -> &'static str {
        match self {
            Self::Text => "requireText",
            Self::Picture => "requirePicture",
            Self::VoiceMemo => "requireVoiceMemo",
        }
    }

    pub(crate) fn content_field(self) -> &'static str {
        match self {
            Self::Text => "textContent",
            Self::Picture => "pictureUrl",
            Self::VoiceMemo => "voiceMemoUrl",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub recurrence: Recurrence,
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

impl Habit {
    /// Validate `fields` against creation defaults and mint a new habit.
    pub fn new(user_id: Uuid, fields: &HabitFields) -> ResultEngine<Self> {
        let now = Utc::now();
        Self::build(None, fields, Uuid::new_v4(), user_id, now, now)
    }

    /// Merge `fields` onto this habit and re-validate the whole definition.
    /// Unsupplied fields keep their stored value.
    pub fn merged(&self, fields: &HabitFields) -> ResultEngine<Self> {
        Self::build(
            Some(self),
            fields,
            self.id,
            self.user_id,
            self.created_at,
            Utc::now(),
        )
    }

    pub fn allows(&self, channel: Channel) -> bool {
        match channel {
            Channel::Text => self.allow_text,
            Channel::Picture => self.allow_picture,
            Channel::VoiceMemo => self.allow_voice_memo,
        }
    }

    pub fn requires(&self, channel: Channel) -> bool {
        match channel {
            Channel::Text => self.require_text,
            Channel::Picture => self.require_picture,
            Channel::VoiceMemo => self.require_voice_memo,
        }
    }

    // One rule set for create and update. `existing` carries the stored
    // definition during updates; creation starts from blank defaults.
    fn build(
        existing: Option<&Habit>,
        fields: &HabitFields,
        id: Uuid,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let name = match (fields.name.as_deref(), existing) {
            (Some(raw), _) => util::normalize_required_text(raw, "name", NAME_MAX_CHARS)?,
            (None, Some(habit)) => habit.name.clone(),
            (None, None) => return Err(EngineError::MissingField("name")),
        };

        let recurrence = match (fields.recurrence.as_deref(), existing) {
            (Some(raw), _) => Recurrence::try_from(raw)?,
            (None, Some(habit)) => habit.recurrence,
            (None, None) => return Err(EngineError::MissingField("recurrence")),
        };

        // The interval lives and dies with the custom recurrence: required
        // there, rejected elsewhere. Moving away from custom without touching
        // it silently clears the stored value.
        let custom_interval_days = if recurrence == Recurrence::Custom {
            let days = fields
                .custom_interval_days
                .or_else(|| existing.and_then(|habit| habit.custom_interval_days));
            match days {
                Some(days) if days >= 1 => Some(days),
                _ => return Err(EngineError::MissingField("customIntervalDays")),
            }
        } else {
            if fields.custom_interval_days.is_some() {
                return Err(EngineError::InvalidField {
                    field: "customIntervalDays",
                    reason: "only allowed for custom recurrence".to_string(),
                });
            }
            None
        };

        let allow_text = fields
            .allow_text
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.allow_text));
        let require_text = fields
            .require_text
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.require_text));
        let allow_picture = fields
            .allow_picture
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.allow_picture));
        let require_picture = fields
            .require_picture
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.require_picture));
        let allow_voice_memo = fields
            .allow_voice_memo
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.allow_voice_memo));
        let require_voice_memo = fields
            .require_voice_memo
            .unwrap_or_else(|| existing.is_some_and(|habit| habit.require_voice_memo));

        for (channel, allow, require) in [
            (Channel::Text, allow_text, require_text),
            (Channel::Picture, allow_picture, require_picture),
            (Channel::VoiceMemo, allow_voice_memo, require_voice_memo),
        ] {
            if require && !allow {
                return Err(EngineError::InvalidField {
                    field: channel.require_field(),
                    reason: format!(
                        "{} must be true when {} is true",
                        channel.allow_field(),
                        channel.require_field()
                    ),
                });
            }
        }

        Ok(Self {
            id,
            user_id,
            name,
            recurrence,
            custom_interval_days,
            allow_text,
            require_text,
            allow_picture,
            require_picture,
            allow_voice_memo,
            require_voice_memo,
            created_at,
            updated_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "habits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub recurrence: String,
    pub custom_interval_days: Option<i32>,
    pub allow_text: bool,
    pub require_text: bool,
    pub allow_picture: bool,
    pub require_picture: bool,
    pub allow_voice_memo: bool,
    pub require_voice_memo: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::habit_entries::Entity")]
    Entries,
}

impl Related<super::habit_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Habit> for ActiveModel {
    fn from(habit: &Habit) -> Self {
        Self {
            id: ActiveValue::Set(habit.id.to_string()),
            user_id: ActiveValue::Set(habit.user_id.to_string()),
            name: ActiveValue::Set(habit.name.clone()),
            recurrence: ActiveValue::Set(habit.recurrence.as_str().to_string()),
            custom_interval_days: ActiveValue::Set(habit.custom_interval_days),
            allow_text: ActiveValue::Set(habit.allow_text),
            require_text: ActiveValue::Set(habit.require_text),
            allow_picture: ActiveValue::Set(habit.allow_picture),
            require_picture: ActiveValue::Set(habit.require_picture),
            allow_voice_memo: ActiveValue::Set(habit.allow_voice_memo),
            require_voice_memo: ActiveValue::Set(habit.require_voice_memo),
            created_at: ActiveValue::Set(habit.created_at),
            updated_at: ActiveValue::Set(habit.updated_at),
        }
    }
}

impl TryFrom<Model> for Habit {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "habit")?,
            user_id: util::parse_uuid(&model.user_id, "user")?,
            name: model.name,
            recurrence: Recurrence::try_from(model.recurrence.as_str())?,
            custom_interval_days: model.custom_interval_days,
            allow_text: model.allow_text,
            require_text: model.require_text,
            allow_picture: model.allow_picture,
            require_picture: model.require_picture,
            allow_voice_memo: model.allow_voice_memo,
            require_voice_memo: model.require_voice_memo,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
