use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `chat_clears` table and its columns.
///
/// One row per (user, contract): the instant before which that user's chat
/// history is hidden. Replaces per-session "cleared messages" tracking.
#[derive(DeriveIden)]
enum ChatClears {
    Table,
    UserId,
    ContractId,
    ClearedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatClears::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatClears::UserId).uuid().not_null())
                    .col(ColumnDef::new(ChatClears::ContractId).uuid().not_null())
                    .col(
                        ColumnDef::new(ChatClears::ClearedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChatClears::UserId)
                            .col(ChatClears::ContractId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_clears_user_id")
                            .from(ChatClears::Table, ChatClears::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_clears_contract_id")
                            .from(ChatClears::Table, ChatClears::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatClears::Table).to_owned())
            .await
    }
}
