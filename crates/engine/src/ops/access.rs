use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, diary_entries, habit_entries, habits};

use super::Engine;

// Every resolver scopes its lookup to the requesting user, so a foreign id is
// indistinguishable from a missing one.
impl Engine {
    pub(super) async fn require_habit(
        &self,
        db: &DatabaseTransaction,
        habit_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<habits::Model> {
        habits::Entity::find_by_id(habit_id.to_string())
            .filter(habits::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or(EngineError::NotFound("habit"))
    }

    pub(super) async fn require_entry(
        &self,
        db: &DatabaseTransaction,
        habit_id: Uuid,
        entry_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<habit_entries::Model> {
        habit_entries::Entity::find_by_id(entry_id.to_string())
            .filter(habit_entries::Column::HabitId.eq(habit_id.to_string()))
            .filter(habit_entries::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or(EngineError::NotFound("habit entry"))
    }

    pub(super) async fn require_diary_entry(
        &self,
        db: &DatabaseTransaction,
        entry_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<diary_entries::Model> {
        diary_entries::Entity::find_by_id(entry_id.to_string())
            .filter(diary_entries::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or(EngineError::NotFound("diary entry"))
    }
}
