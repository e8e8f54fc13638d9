use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{CreateHabitCmd, Habit, ResultEngine, UpdateHabitCmd, habit_entries, habits};

use super::{Engine, with_tx};

impl Engine {
    /// Create a habit owned by the requesting user.
    pub async fn create_habit(&self, cmd: CreateHabitCmd) -> ResultEngine<Habit> {
        with_tx!(self, |db_tx| {
            let habit = Habit::new(cmd.user_id, &cmd.fields)?;
            habits::ActiveModel::from(&habit).insert(&db_tx).await?;
            Ok(habit)
        })
    }

    /// List the user's habits, newest first.
    pub async fn habits(&self, user_id: Uuid) -> ResultEngine<Vec<Habit>> {
        with_tx!(self, |db_tx| {
            let models = habits::Entity::find()
                .filter(habits::Column::UserId.eq(user_id.to_string()))
                .order_by_desc(habits::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Habit::try_from).collect()
        })
    }

    /// Fetch one habit.
    pub async fn habit(&self, habit_id: Uuid, user_id: Uuid) -> ResultEngine<Habit> {
        with_tx!(self, |db_tx| {
            let model = self.require_habit(&db_tx, habit_id, user_id).await?;
            Habit::try_from(model)
        })
    }

    /// Merge the supplied fields onto the stored habit and re-validate the
    /// whole definition before persisting it.
    pub async fn update_habit(&self, cmd: UpdateHabitCmd) -> ResultEngine<Habit> {
        with_tx!(self, |db_tx| {
            let model = self.require_habit(&db_tx, cmd.habit_id, cmd.user_id).await?;
            let habit = Habit::try_from(model)?;
            let merged = habit.merged(&cmd.fields)?;
            habits::ActiveModel::from(&merged).update(&db_tx).await?;
            Ok(merged)
        })
    }

    /// Delete a habit together with all of its entries.
    pub async fn delete_habit(&self, habit_id: Uuid, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_habit(&db_tx, habit_id, user_id).await?;
            habit_entries::Entity::delete_many()
                .filter(habit_entries::Column::HabitId.eq(habit_id.to_string()))
                .exec(&db_tx)
                .await?;
            habits::Entity::delete_by_id(habit_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
