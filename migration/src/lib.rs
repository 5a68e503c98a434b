pub use sea_orm_migration::prelude::*;

pub mod chain;
pub mod columns;
pub mod generate;
pub mod naming;
pub mod revisions;
pub mod schema_change;

use chain::Revision;

pub struct Migrator;

/// Adapts a registered [`Revision`] to sea-orm's migration runner.
pub struct RevisionMigration(pub Revision);

impl MigrationName for RevisionMigration {
    fn name(&self) -> &str {
        self.0.name
    }
}

#[async_trait::async_trait]
impl MigrationTrait for RevisionMigration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        tracing::debug!(revision = self.0.name, "Applying upgrade");
        schema_change::apply_all(manager, (self.0.upgrade)()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        tracing::debug!(revision = self.0.name, "Applying downgrade");
        schema_change::apply_all(manager, (self.0.downgrade)()).await
    }
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        // The registry is static; a broken history is a programming error
        // caught by the revision tests.
        let chain = revisions::chain()
            .unwrap_or_else(|err| panic!("invalid revision history: {err}"));
        chain
            .revisions()
            .iter()
            .map(|revision| Box::new(RevisionMigration(*revision)) as Box<dyn MigrationTrait>)
            .collect()
    }
}
