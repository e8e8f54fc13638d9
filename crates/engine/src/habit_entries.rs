//! Habit entries and their content rules.
//!
//! An entry records one dated completion of a habit. The habit's channel
//! toggles decide which content the entry may or must carry; the rules run on
//! the merged state so updates cannot sneak past them.

use chrono::{DateTime, Local, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Channel, EngineError, EntryFields, Habit, ResultEngine, util};

const TEXT_MAX_CHARS: usize = 5000;
const URL_MAX_CHARS: usize = 2000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub text_content: Option<String>,
    pub picture_url: Option<String>,
    pub voice_memo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HabitEntry {
    /// Validate `fields` against `habit`'s channel rules and mint a new
    /// entry. The entry date defaults to today when not supplied.
    pub fn new(habit: &Habit, fields: &EntryFields) -> ResultEngine<Self> {
        let now = Utc::now();
        Self::build(habit, None, fields, Uuid::new_v4(), now, now)
    }

    /// Merge `fields` onto this entry and re-validate against `habit`'s
    /// channel rules. Unsupplied fields keep their stored value.
    pub fn merged(&self, habit: &Habit, fields: &EntryFields) -> ResultEngine<Self> {
        Self::build(habit, Some(self), fields, self.id, self.created_at, Utc::now())
    }

    // One rule set for create and update, evaluated on the merged state.
    fn build(
        habit: &Habit,
        existing: Option<&HabitEntry>,
        fields: &EntryFields,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let entry_date = match fields.entry_date.as_deref() {
            Some(raw) => util::parse_entry_date(raw)?,
            None => match existing {
                Some(entry) => entry.entry_date,
                None => Local::now().date_naive(),
            },
        };

        let text_content = merge_content(
            fields.text_content.as_deref(),
            existing.and_then(|entry| entry.text_content.as_deref()),
            Channel::Text,
            TEXT_MAX_CHARS,
        )?;
        let picture_url = merge_content(
            fields.picture_url.as_deref(),
            existing.and_then(|entry| entry.picture_url.as_deref()),
            Channel::Picture,
            URL_MAX_CHARS,
        )?;
        let voice_memo_url = merge_content(
            fields.voice_memo_url.as_deref(),
            existing.and_then(|entry| entry.voice_memo_url.as_deref()),
            Channel::VoiceMemo,
            URL_MAX_CHARS,
        )?;

        // Channels are checked in a fixed order and the first violation wins.
        for (channel, value) in [
            (Channel::Text, text_content.as_deref()),
            (Channel::Picture, picture_url.as_deref()),
            (Channel::VoiceMemo, voice_memo_url.as_deref()),
        ] {
            if value.is_some() && !habit.allows(channel) {
                return Err(EngineError::ContentNotAllowed(channel));
            }
            if value.is_none() && habit.requires(channel) {
                return Err(EngineError::ContentRequired(channel));
            }
        }

        Ok(Self {
            id,
            habit_id: habit.id,
            user_id: habit.user_id,
            entry_date,
            text_content,
            picture_url,
            voice_memo_url,
            created_at,
            updated_at,
        })
    }
}

// Supplied content replaces the stored value after trimming; whitespace-only
// input clears it. Absent fields keep what is stored.
fn merge_content(
    input: Option<&str>,
    stored: Option<&str>,
    channel: Channel,
    max_chars: usize,
) -> ResultEngine<Option<String>> {
    match input {
        Some(raw) => util::normalize_bounded_text(raw, channel.content_field(), max_chars),
        None => Ok(stored.map(ToString::to_string)),
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "habit_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    pub entry_date: Date,
    pub text_content: Option<String>,
    pub picture_url: Option<String>,
    pub voice_memo_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::habits::Entity",
        from = "Column::HabitId",
        to = "super::habits::Column::Id"
    )]
    Habit,
}

impl Related<super::habits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&HabitEntry> for ActiveModel {
    fn from(entry: &HabitEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            habit_id: ActiveValue::Set(entry.habit_id.to_string()),
            user_id: ActiveValue::Set(entry.user_id.to_string()),
            entry_date: ActiveValue::Set(entry.entry_date),
            text_content: ActiveValue::Set(entry.text_content.clone()),
            picture_url: ActiveValue::Set(entry.picture_url.clone()),
            voice_memo_url: ActiveValue::Set(entry.voice_memo_url.clone()),
            created_at: ActiveValue::Set(entry.created_at),
            updated_at: ActiveValue::Set(entry.updated_at),
        }
    }
}

impl TryFrom<Model> for HabitEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "habit entry")?,
            habit_id: util::parse_uuid(&model.habit_id, "habit")?,
            user_id: util::parse_uuid(&model.user_id, "user")?,
            entry_date: model.entry_date,
            text_content: model.text_content,
            picture_url: model.picture_url,
            voice_memo_url: model.voice_memo_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HabitFields;

    fn text_habit() -> Habit {
        Habit::new(
            Uuid::new_v4(),
            &HabitFields::default()
                .name("Journal")
                .recurrence("daily")
                .allow_text(true)
                .require_text(true),
        )
        .unwrap()
    }

    fn open_habit() -> Habit {
        Habit::new(
            Uuid::new_v4(),
            &HabitFields::default()
                .name("Walk")
                .recurrence("daily")
                .allow_text(true)
                .allow_picture(true)
                .allow_voice_memo(true),
        )
        .unwrap()
    }

    #[test]
    fn new_trims_content_and_parses_date() {
        let habit = text_habit();
        let fields = EntryFields::default()
            .entry_date("2026-03-04")
            .text_content("  Wrote three pages.  ");
        let entry = HabitEntry::new(&habit, &fields).unwrap();

        assert_eq!(entry.habit_id, habit.id);
        assert_eq!(entry.user_id, habit.user_id);
        assert_eq!(
            entry.entry_date,
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
        );
        assert_eq!(entry.text_content.as_deref(), Some("Wrote three pages."));
        assert_eq!(entry.picture_url, None);
    }

    #[test]
    fn entry_date_defaults_to_today() {
        let habit = open_habit();
        let before = Local::now().date_naive();
        let entry = HabitEntry::new(&habit, &EntryFields::default().text_content("ok")).unwrap();
        let after = Local::now().date_naive();

        assert!(entry.entry_date == before || entry.entry_date == after);
    }

    #[test]
    fn unparseable_entry_date_is_rejected() {
        let habit = open_habit();
        let fields = EntryFields::default().entry_date("next tuesday");
        let err = HabitEntry::new(&habit, &fields).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidField {
                field: "entryDate",
                ..
            }
        ));
    }

    #[test]
    fn rfc3339_entry_date_reduces_to_utc_day() {
        let habit = open_habit();
        let fields = EntryFields::default()
            .entry_date("2026-03-04T23:30:00-05:00")
            .text_content("late night");
        let entry = HabitEntry::new(&habit, &fields).unwrap();

        assert_eq!(
            entry.entry_date,
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
        );
    }

    #[test]
    fn content_on_disallowed_channel_is_rejected() {
        let habit = text_habit();
        let fields = EntryFields::default()
            .text_content("done")
            .picture_url("https://example.com/a.jpg");
        let err = HabitEntry::new(&habit, &fields).unwrap_err();

        assert_eq!(err, EngineError::ContentNotAllowed(Channel::Picture));
    }

    #[test]
    fn missing_required_content_is_rejected() {
        let habit = text_habit();
        let err = HabitEntry::new(&habit, &EntryFields::default()).unwrap_err();

        assert_eq!(err, EngineError::ContentRequired(Channel::Text));
    }

    #[test]
    fn whitespace_only_required_content_counts_as_absent() {
        let habit = text_habit();
        let fields = EntryFields::default().text_content("   ");
        let err = HabitEntry::new(&habit, &fields).unwrap_err();

        assert_eq!(err, EngineError::ContentRequired(Channel::Text));
    }

    #[test]
    fn text_violation_wins_over_later_channels() {
        let habit = Habit::new(
            Uuid::new_v4(),
            &HabitFields::default()
                .name("Sketch")
                .recurrence("daily")
                .allow_text(true)
                .require_text(true)
                .allow_picture(true)
                .require_picture(true),
        )
        .unwrap();

        let err = HabitEntry::new(&habit, &EntryFields::default()).unwrap_err();

        assert_eq!(err, EngineError::ContentRequired(Channel::Text));
    }

    #[test]
    fn over_long_text_is_rejected() {
        let habit = open_habit();
        let fields = EntryFields::default().text_content("x".repeat(5001));
        let err = HabitEntry::new(&habit, &fields).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidField {
                field: "textContent",
                ..
            }
        ));
    }

    #[test]
    fn over_long_url_is_rejected() {
        let habit = open_habit();
        let fields = EntryFields::default().picture_url("x".repeat(2001));
        let err = HabitEntry::new(&habit, &fields).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidField {
                field: "pictureUrl",
                ..
            }
        ));
    }

    #[test]
    fn merged_keeps_unsupplied_content() {
        let habit = open_habit();
        let entry = HabitEntry::new(
            &habit,
            &EntryFields::default()
                .entry_date("2026-03-04")
                .text_content("walked the long way")
                .picture_url("https://example.com/p.jpg"),
        )
        .unwrap();

        let updated = entry
            .merged(&habit, &EntryFields::default().text_content("short walk"))
            .unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.entry_date, entry.entry_date);
        assert_eq!(updated.text_content.as_deref(), Some("short walk"));
        assert_eq!(
            updated.picture_url.as_deref(),
            Some("https://example.com/p.jpg")
        );
        assert_eq!(updated.created_at, entry.created_at);
    }

    #[test]
    fn merged_cannot_clear_required_content() {
        let habit = text_habit();
        let entry = HabitEntry::new(&habit, &EntryFields::default().text_content("done")).unwrap();

        let err = entry
            .merged(&habit, &EntryFields::default().text_content(""))
            .unwrap_err();

        assert_eq!(err, EngineError::ContentRequired(Channel::Text));
    }

    #[test]
    fn merged_can_clear_optional_content() {
        let habit = open_habit();
        let entry = HabitEntry::new(
            &habit,
            &EntryFields::default()
                .text_content("note")
                .picture_url("https://example.com/p.jpg"),
        )
        .unwrap();

        let updated = entry
            .merged(&habit, &EntryFields::default().picture_url(""))
            .unwrap();

        assert_eq!(updated.text_content.as_deref(), Some("note"));
        assert_eq!(updated.picture_url, None);
    }
}
