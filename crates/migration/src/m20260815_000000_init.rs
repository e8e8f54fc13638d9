//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Costanza:
//!
//! - `users`: accounts with local credentials
//! - `sessions`: opaque bearer tokens
//! - `habits`: recurring practices and their channel toggles
//! - `habit_entries`: dated completions, one per habit and day
//! - `diary_entries`: free-form daily notes, one per user and day

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    DisplayName,
    PasswordSalt,
    PasswordDigest,
    CreatedAt,
}

#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    Token,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Habits {
    Table,
    Id,
    UserId,
    Name,
    Recurrence,
    CustomIntervalDays,
    AllowText,
    RequireText,
    AllowPicture,
    RequirePicture,
    AllowVoiceMemo,
    RequireVoiceMemo,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum HabitEntries {
    Table,
    Id,
    HabitId,
    UserId,
    EntryDate,
    TextContent,
    PictureUrl,
    VoiceMemoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DiaryEntries {
    Table,
    Id,
    UserId,
    EntryDate,
    Content,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().not_null())
                    .col(ColumnDef::new(Users::PasswordSalt).string().not_null())
                    .col(
                        ColumnDef::new(Users::PasswordDigest)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Sessions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::Token).string().not_null())
                    .col(ColumnDef::new(Sessions::UserId).string().not_null())
                    .col(ColumnDef::new(Sessions::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-user_id")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sessions-token-unique")
                    .table(Sessions::Table)
                    .col(Sessions::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sessions-user_id")
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Habits
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Habits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Habits::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Habits::UserId).string().not_null())
                    .col(ColumnDef::new(Habits::Name).string().not_null())
                    .col(ColumnDef::new(Habits::Recurrence).string().not_null())
                    .col(ColumnDef::new(Habits::CustomIntervalDays).integer())
                    .col(ColumnDef::new(Habits::AllowText).boolean().not_null())
                    .col(ColumnDef::new(Habits::RequireText).boolean().not_null())
                    .col(ColumnDef::new(Habits::AllowPicture).boolean().not_null())
                    .col(ColumnDef::new(Habits::RequirePicture).boolean().not_null())
                    .col(
                        ColumnDef::new(Habits::AllowVoiceMemo)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Habits::RequireVoiceMemo)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Habits::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Habits::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-habits-user_id")
                            .from(Habits::Table, Habits::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-habits-user_id")
                    .table(Habits::Table)
                    .col(Habits::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Habit Entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(HabitEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HabitEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HabitEntries::HabitId).string().not_null())
                    .col(ColumnDef::new(HabitEntries::UserId).string().not_null())
                    .col(ColumnDef::new(HabitEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(HabitEntries::TextContent).text())
                    .col(ColumnDef::new(HabitEntries::PictureUrl).text())
                    .col(ColumnDef::new(HabitEntries::VoiceMemoUrl).text())
                    .col(
                        ColumnDef::new(HabitEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HabitEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-habit_entries-habit_id")
                            .from(HabitEntries::Table, HabitEntries::HabitId)
                            .to(Habits::Table, Habits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-habit_entries-user_id")
                            .from(HabitEntries::Table, HabitEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-habit_entries-habit_id-entry_date-unique")
                    .table(HabitEntries::Table)
                    .col(HabitEntries::HabitId)
                    .col(HabitEntries::EntryDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-habit_entries-user_id")
                    .table(HabitEntries::Table)
                    .col(HabitEntries::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Diary Entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DiaryEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiaryEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiaryEntries::UserId).string().not_null())
                    .col(ColumnDef::new(DiaryEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(DiaryEntries::Content).text().not_null())
                    .col(
                        ColumnDef::new(DiaryEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiaryEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-diary_entries-user_id")
                            .from(DiaryEntries::Table, DiaryEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-diary_entries-user_id-entry_date-unique")
                    .table(DiaryEntries::Table)
                    .col(DiaryEntries::UserId)
                    .col(DiaryEntries::EntryDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(DiaryEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HabitEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Habits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
