pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users_table;
mod m20260301_000002_create_profiles_table;
mod m20260301_000003_create_projects_table;
mod m20260301_000004_create_proposals_table;
mod m20260301_000005_create_contracts_table;
mod m20260301_000006_create_notifications_table;
mod m20260302_000001_create_messages_table;
mod m20260302_000002_create_reviews_table;
mod m20260302_000003_create_chat_clears_table;
mod m20260303_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_table::Migration),
            Box::new(m20260301_000002_create_profiles_table::Migration),
            Box::new(m20260301_000003_create_projects_table::Migration),
            Box::new(m20260301_000004_create_proposals_table::Migration),
            Box::new(m20260301_000005_create_contracts_table::Migration),
            Box::new(m20260301_000006_create_notifications_table::Migration),
            Box::new(m20260302_000001_create_messages_table::Migration),
            Box::new(m20260302_000002_create_reviews_table::Migration),
            Box::new(m20260302_000003_create_chat_clears_table::Migration),
            Box::new(m20260303_000001_add_indexes::Migration),
        ]
    }
}
