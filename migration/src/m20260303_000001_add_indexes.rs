use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    ClientId,
}

#[derive(DeriveIden)]
enum Proposals {
    Table,
    ProjectId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    ClientId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    ContractId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    ProjectId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on projects.client_id for the client dashboard listing
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on proposals.project_id for sibling scans on accept
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_project_id")
                    .table(Proposals::Table)
                    .col(Proposals::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on proposals.freelancer_id for the freelancer's own listing
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_freelancer_id")
                    .table(Proposals::Table)
                    .col(Proposals::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Indexes on contracts party columns for fetching contracts by party
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_client_id")
                    .table(Contracts::Table)
                    .col(Contracts::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_freelancer_id")
                    .table(Contracts::Table)
                    .col(Contracts::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Index on notifications.user_id for the unread feed
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on messages.contract_id for chat history
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_contract_id")
                    .table(Messages::Table)
                    .col(Messages::ContractId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.project_id for the project review listing
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_project_id")
                    .table(Reviews::Table)
                    .col(Reviews::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_proposals_project_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_proposals_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notifications_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_messages_contract_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_project_id").to_owned())
            .await?;

        Ok(())
    }
}
