pub use commands::{
    CreateDiaryEntryCmd, CreateEntryCmd, CreateHabitCmd, DiaryFields, EntryFields, HabitFields,
    RegisterCmd, UpdateDiaryEntryCmd, UpdateEntryCmd, UpdateHabitCmd,
};
pub use diary_entries::DiaryEntry;
pub use error::EngineError;
pub use habit_entries::HabitEntry;
pub use habits::{Channel, Habit, Recurrence};
pub use ops::{Engine, EngineBuilder};
pub use users::User;

mod commands;
mod diary_entries;
mod error;
mod habit_entries;
mod habits;
mod ops;
mod sessions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
