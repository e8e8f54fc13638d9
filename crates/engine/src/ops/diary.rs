use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CreateDiaryEntryCmd, DiaryEntry, EngineError, ResultEngine, UpdateDiaryEntryCmd, diary_entries,
};

use super::{Engine, on_unique_violation, with_tx};

impl Engine {
    /// Write a diary entry, enforcing the one-entry-per-date limit.
    pub async fn create_diary_entry(&self, cmd: CreateDiaryEntryCmd) -> ResultEngine<DiaryEntry> {
        with_tx!(self, |db_tx| {
            let entry = DiaryEntry::new(cmd.user_id, &cmd.fields)?;
            diary_entries::ActiveModel::from(&entry)
                .insert(&db_tx)
                .await
                .map_err(|err| on_unique_violation(err, EngineError::DuplicateEntryDate))?;
            Ok(entry)
        })
    }

    /// List the user's diary, newest date first.
    pub async fn diary_entries(&self, user_id: Uuid) -> ResultEngine<Vec<DiaryEntry>> {
        with_tx!(self, |db_tx| {
            let models = diary_entries::Entity::find()
                .filter(diary_entries::Column::UserId.eq(user_id.to_string()))
                .order_by_desc(diary_entries::Column::EntryDate)
                .order_by_desc(diary_entries::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            models.into_iter().map(DiaryEntry::try_from).collect()
        })
    }

    /// Fetch one diary entry.
    pub async fn diary_entry(&self, entry_id: Uuid, user_id: Uuid) -> ResultEngine<DiaryEntry> {
        with_tx!(self, |db_tx| {
            let model = self.require_diary_entry(&db_tx, entry_id, user_id).await?;
            DiaryEntry::try_from(model)
        })
    }

    /// Merge the supplied fields onto the stored entry and re-validate before
    /// persisting it.
    pub async fn update_diary_entry(&self, cmd: UpdateDiaryEntryCmd) -> ResultEngine<DiaryEntry> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_diary_entry(&db_tx, cmd.entry_id, cmd.user_id)
                .await?;
            let entry = DiaryEntry::try_from(model)?;
            let merged = entry.merged(&cmd.fields)?;
            diary_entries::ActiveModel::from(&merged)
                .update(&db_tx)
                .await
                .map_err(|err| on_unique_violation(err, EngineError::DuplicateEntryDate))?;
            Ok(merged)
        })
    }

    /// Delete one diary entry.
    pub async fn delete_diary_entry(&self, entry_id: Uuid, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_diary_entry(&db_tx, entry_id, user_id).await?;
            diary_entries::Entity::delete_by_id(entry_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
