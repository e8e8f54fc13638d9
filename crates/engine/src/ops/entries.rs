use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CreateEntryCmd, EngineError, Habit, HabitEntry, ResultEngine, UpdateEntryCmd, habit_entries,
};

use super::{Engine, on_unique_violation, with_tx};

impl Engine {
    /// Record a completion entry, enforcing the habit's channel rules and the
    /// one-entry-per-date limit.
    pub async fn create_entry(&self, cmd: CreateEntryCmd) -> ResultEngine<HabitEntry> {
        with_tx!(self, |db_tx| {
            let model = self.require_habit(&db_tx, cmd.habit_id, cmd.user_id).await?;
            let habit = Habit::try_from(model)?;
            let entry = HabitEntry::new(&habit, &cmd.fields)?;
            habit_entries::ActiveModel::from(&entry)
                .insert(&db_tx)
                .await
                .map_err(|err| on_unique_violation(err, EngineError::DuplicateEntryDate))?;
            Ok(entry)
        })
    }

    /// List a habit's entries, newest date first.
    pub async fn entries(&self, habit_id: Uuid, user_id: Uuid) -> ResultEngine<Vec<HabitEntry>> {
        with_tx!(self, |db_tx| {
            self.require_habit(&db_tx, habit_id, user_id).await?;
            let models = habit_entries::Entity::find()
                .filter(habit_entries::Column::HabitId.eq(habit_id.to_string()))
                .order_by_desc(habit_entries::Column::EntryDate)
                .order_by_desc(habit_entries::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            models.into_iter().map(HabitEntry::try_from).collect()
        })
    }

    /// Fetch one entry.
    pub async fn entry(
        &self,
        habit_id: Uuid,
        entry_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<HabitEntry> {
        with_tx!(self, |db_tx| {
            self.require_habit(&db_tx, habit_id, user_id).await?;
            let model = self
                .require_entry(&db_tx, habit_id, entry_id, user_id)
                .await?;
            HabitEntry::try_from(model)
        })
    }

    /// Merge the supplied fields onto the stored entry and re-validate the
    /// result against the habit's channel rules before persisting it.
    pub async fn update_entry(&self, cmd: UpdateEntryCmd) -> ResultEngine<HabitEntry> {
        with_tx!(self, |db_tx| {
            let model = self.require_habit(&db_tx, cmd.habit_id, cmd.user_id).await?;
            let habit = Habit::try_from(model)?;
            let model = self
                .require_entry(&db_tx, cmd.habit_id, cmd.entry_id, cmd.user_id)
                .await?;
            let entry = HabitEntry::try_from(model)?;
            let merged = entry.merged(&habit, &cmd.fields)?;
            habit_entries::ActiveModel::from(&merged)
                .update(&db_tx)
                .await
                .map_err(|err| on_unique_violation(err, EngineError::DuplicateEntryDate))?;
            Ok(merged)
        })
    }

    /// Delete one entry.
    pub async fn delete_entry(
        &self,
        habit_id: Uuid,
        entry_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_habit(&db_tx, habit_id, user_id).await?;
            self.require_entry(&db_tx, habit_id, entry_id, user_id)
                .await?;
            habit_entries::Entity::delete_by_id(entry_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
