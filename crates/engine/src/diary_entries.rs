//! Free-form diary entries, one per calendar day and user.

use chrono::{DateTime, Local, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DiaryFields, EngineError, ResultEngine, util};

const CONTENT_MAX_CHARS: usize = 5000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Validate `fields` and mint a new diary entry. The entry date defaults
    /// to today when not supplied.
    pub fn new(user_id: Uuid, fields: &DiaryFields) -> ResultEngine<Self> {
        let now = Utc::now();
        Self::build(None, fields, Uuid::new_v4(), user_id, now, now)
    }

    /// Merge `fields` onto this entry and re-validate. Unsupplied fields keep
    /// their stored value.
    pub fn merged(&self, fields: &DiaryFields) -> ResultEngine<Self> {
        Self::build(
            Some(self),
            fields,
            self.id,
            self.user_id,
            self.created_at,
            Utc::now(),
        )
    }

    fn build(
        existing: Option<&DiaryEntry>,
        fields: &DiaryFields,
        id: Uuid,
        user_id: Uuid,
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

        let content = match (fields.content.as_deref(), existing) {
            (Some(raw), _) => util::normalize_required_text(raw, "content", CONTENT_MAX_CHARS)?,
            (None, Some(entry)) => entry.content.clone(),
            (None, None) => return Err(EngineError::MissingField("content")),
        };

        Ok(Self {
            id,
            user_id,
            entry_date,
            content,
            created_at,
            updated_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "diary_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub entry_date: Date,
    pub content: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&DiaryEntry> for ActiveModel {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            user_id: ActiveValue::Set(entry.user_id.to_string()),
            entry_date: ActiveValue::Set(entry.entry_date),
            content: ActiveValue::Set(entry.content.clone()),
            created_at: ActiveValue::Set(entry.created_at),
            updated_at: ActiveValue::Set(entry.updated_at),
        }
    }
}

impl TryFrom<Model> for DiaryEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "diary entry")?,
            user_id: util::parse_uuid(&model.user_id, "user")?,
            entry_date: model.entry_date,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_content_and_parses_date() {
        let fields = DiaryFields::default()
            .entry_date("2026-01-15")
            .content("  A quiet day.  ");
        let entry = DiaryEntry::new(Uuid::new_v4(), &fields).unwrap();

        assert_eq!(
            entry.entry_date,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        assert_eq!(entry.content, "A quiet day.");
    }

    #[test]
    fn new_requires_content() {
        let err = DiaryEntry::new(Uuid::new_v4(), &DiaryFields::default()).unwrap_err();
        assert_eq!(err, EngineError::MissingField("content"));

        let err =
            DiaryEntry::new(Uuid::new_v4(), &DiaryFields::default().content("   ")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidField {
                field: "content",
                ..
            }
        ));
    }

    #[test]
    fn new_rejects_over_long_content() {
        let fields = DiaryFields::default().content("x".repeat(5001));
        let err = DiaryEntry::new(Uuid::new_v4(), &fields).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidField {
                field: "content",
                ..
            }
        ));
    }

    #[test]
    fn entry_date_defaults_to_today() {
        let before = Local::now().date_naive();
        let entry = DiaryEntry::new(Uuid::new_v4(), &DiaryFields::default().content("hi")).unwrap();
        let after = Local::now().date_naive();

        assert!(entry.entry_date == before || entry.entry_date == after);
    }

    #[test]
    fn merged_keeps_unsupplied_fields() {
        let entry = DiaryEntry::new(
            Uuid::new_v4(),
            &DiaryFields::default()
                .entry_date("2026-01-15")
                .content("first draft"),
        )
        .unwrap();

        let updated = entry
            .merged(&DiaryFields::default().content("second draft"))
            .unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.entry_date, entry.entry_date);
        assert_eq!(updated.content, "second draft");
        assert_eq!(updated.created_at, entry.created_at);

        let moved = entry
            .merged(&DiaryFields::default().entry_date("2026-01-16"))
            .unwrap();

        assert_eq!(
            moved.entry_date,
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
        assert_eq!(moved.content, "first draft");
    }
}
