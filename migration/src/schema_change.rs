//! Typed schema mutation directives and their applier.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// Foreign key added to an existing table.
#[derive(Debug, Clone)]
pub struct ForeignKeySpec {
    pub name: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub on_delete: ForeignKeyAction,
}

/// One step of a revision's `upgrade` or `downgrade`.
#[derive(Debug, Clone)]
pub enum SchemaChange {
    CreateTable(TableCreateStatement),
    DropTable {
        table: String,
    },
    AddColumn {
        table: String,
        column: ColumnDef,
    },
    DropColumn {
        table: String,
        column: String,
    },
    RenameColumn {
        table: String,
        from: String,
        to: String,
    },
    CreateIndex {
        name: String,
        table: String,
        columns: Vec<String>,
    },
    DropIndex {
        name: String,
        table: String,
    },
    /// Realised as a named unique index; undo with [`SchemaChange::DropIndex`].
    AddUniqueConstraint {
        name: String,
        table: String,
        columns: Vec<String>,
    },
    AddForeignKey(ForeignKeySpec),
    /// Drops a named foreign-key constraint.
    DropConstraint {
        name: String,
        table: String,
    },
}

fn ident(iden: &dyn Iden) -> String {
    Iden::to_string(iden)
}

impl SchemaChange {
    pub fn create_table(stmt: &mut TableCreateStatement) -> Self {
        Self::CreateTable(stmt.to_owned())
    }

    pub fn drop_table(table: impl Iden) -> Self {
        Self::DropTable {
            table: ident(&table),
        }
    }

    pub fn add_column(table: impl Iden, column: ColumnDef) -> Self {
        Self::AddColumn {
            table: ident(&table),
            column,
        }
    }

    pub fn drop_column(table: impl Iden, column: impl Iden) -> Self {
        Self::DropColumn {
            table: ident(&table),
            column: ident(&column),
        }
    }

    pub fn rename_column(table: impl Iden, from: impl Iden, to: impl Iden) -> Self {
        Self::RenameColumn {
            table: ident(&table),
            from: ident(&from),
            to: ident(&to),
        }
    }

    pub fn create_index<C: Iden>(name: &str, table: impl Iden, columns: Vec<C>) -> Self {
        Self::CreateIndex {
            name: name.to_owned(),
            table: ident(&table),
            columns: columns.iter().map(|c| ident(c)).collect(),
        }
    }

    pub fn drop_index(name: &str, table: impl Iden) -> Self {
        Self::DropIndex {
            name: name.to_owned(),
            table: ident(&table),
        }
    }

    pub fn add_unique_constraint<C: Iden>(name: &str, table: impl Iden, columns: Vec<C>) -> Self {
        Self::AddUniqueConstraint {
            name: name.to_owned(),
            table: ident(&table),
            columns: columns.iter().map(|c| ident(c)).collect(),
        }
    }

    pub fn drop_constraint(name: &str, table: impl Iden) -> Self {
        Self::DropConstraint {
            name: name.to_owned(),
            table: ident(&table),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "create_table",
            Self::DropTable { .. } => "drop_table",
            Self::AddColumn { .. } => "add_column",
            Self::DropColumn { .. } => "drop_column",
            Self::RenameColumn { .. } => "rename_column",
            Self::CreateIndex { .. } => "create_index",
            Self::DropIndex { .. } => "drop_index",
            Self::AddUniqueConstraint { .. } => "add_unique_constraint",
            Self::AddForeignKey(_) => "add_foreign_key",
            Self::DropConstraint { .. } => "drop_constraint",
        }
    }
}

// SQLite cannot alter the constraints of an existing table, and sea-query
// panics when asked to render such a statement.
fn ensure_constraints_alterable(backend: DatabaseBackend, kind: &str) -> Result<(), DbErr> {
    if backend == DatabaseBackend::Sqlite {
        return Err(DbErr::Migration(format!(
            "{kind} is not supported on SQLite; declare the constraint in the table definition"
        )));
    }
    Ok(())
}

fn index_statement(name: &str, table: &str, columns: &[String]) -> IndexCreateStatement {
    let mut stmt = Index::create();
    stmt.name(name).table(Alias::new(table));
    for column in columns {
        stmt.col(Alias::new(column));
    }
    stmt
}

/// Applies a single directive.
pub async fn apply(manager: &SchemaManager<'_>, change: SchemaChange) -> Result<(), DbErr> {
    let backend = manager.get_database_backend();
    tracing::debug!(kind = change.kind(), "Applying schema change");

    match change {
        SchemaChange::CreateTable(stmt) => manager.create_table(stmt).await,
        SchemaChange::DropTable { table } => {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await
        }
        SchemaChange::AddColumn { table, column } => {
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(table))
                        .add_column(column)
                        .to_owned(),
                )
                .await
        }
        SchemaChange::DropColumn { table, column } => {
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(table))
                        .drop_column(Alias::new(column))
                        .to_owned(),
                )
                .await
        }
        SchemaChange::RenameColumn { table, from, to } => {
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(table))
                        .rename_column(Alias::new(from), Alias::new(to))
                        .to_owned(),
                )
                .await
        }
        SchemaChange::CreateIndex {
            name,
            table,
            columns,
        } => {
            manager
                .create_index(index_statement(&name, &table, &columns))
                .await
        }
        SchemaChange::DropIndex { name, table } => {
            manager
                .drop_index(Index::drop().name(&name).table(Alias::new(table)).to_owned())
                .await
        }
        SchemaChange::AddUniqueConstraint {
            name,
            table,
            columns,
        } => {
            manager
                .create_index(index_statement(&name, &table, &columns).unique().to_owned())
                .await
        }
        SchemaChange::AddForeignKey(fk) => {
            ensure_constraints_alterable(backend, "add_foreign_key")?;
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name(&fk.name)
                        .from(Alias::new(fk.from_table), Alias::new(fk.from_column))
                        .to(Alias::new(fk.to_table), Alias::new(fk.to_column))
                        .on_delete(fk.on_delete)
                        .to_owned(),
                )
                .await
        }
        SchemaChange::DropConstraint { name, table } => {
            ensure_constraints_alterable(backend, "drop_constraint")?;
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(&name)
                        .table(Alias::new(table))
                        .to_owned(),
                )
                .await
        }
    }
}

/// Applies directives in program order, stopping at the first failure.
pub async fn apply_all(manager: &SchemaManager<'_>, changes: Vec<SchemaChange>) -> Result<(), DbErr> {
    for change in changes {
        apply(manager, change).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

    #[derive(DeriveIden)]
    enum Widgets {
        Table,
        Id,
        Label,
        Title,
        Weight,
    }

    async fn memory_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        Database::connect(options).await.unwrap()
    }

    async fn execute(manager: &SchemaManager<'_>, sql: &str) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(sql).await.map(|_| ())
    }

    fn widgets_table() -> SchemaChange {
        SchemaChange::create_table(
            Table::create()
                .table(Widgets::Table)
                .col(ColumnDef::new(Widgets::Id).integer().not_null().primary_key())
                .col(ColumnDef::new(Widgets::Label).string().not_null()),
        )
    }

    #[tokio::test]
    async fn test_create_and_drop_table() {
        let db = memory_db().await;
        let manager = SchemaManager::new(&db);

        apply(&manager, widgets_table()).await.unwrap();
        assert!(manager.has_table("widgets").await.unwrap());

        apply(&manager, SchemaChange::drop_table(Widgets::Table)).await.unwrap();
        assert!(!manager.has_table("widgets").await.unwrap());
    }

    #[tokio::test]
    async fn test_column_changes() {
        let db = memory_db().await;
        let manager = SchemaManager::new(&db);
        apply(&manager, widgets_table()).await.unwrap();

        apply_all(
            &manager,
            vec![
                SchemaChange::add_column(
                    Widgets::Table,
                    ColumnDef::new(Widgets::Weight).integer().null().to_owned(),
                ),
                SchemaChange::rename_column(Widgets::Table, Widgets::Label, Widgets::Title),
            ],
        )
        .await
        .unwrap();
        assert!(manager.has_column("widgets", "weight").await.unwrap());
        assert!(manager.has_column("widgets", "title").await.unwrap());
        assert!(!manager.has_column("widgets", "label").await.unwrap());

        apply(&manager, SchemaChange::drop_column(Widgets::Table, Widgets::Weight))
            .await
            .unwrap();
        assert!(!manager.has_column("widgets", "weight").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_constraint_is_enforced_and_droppable() {
        let db = memory_db().await;
        let manager = SchemaManager::new(&db);
        apply(&manager, widgets_table()).await.unwrap();
        apply(
            &manager,
            SchemaChange::add_unique_constraint("uq_widgets_label", Widgets::Table, vec![Widgets::Label]),
        )
        .await
        .unwrap();
        assert!(manager.has_index("widgets", "uq_widgets_label").await.unwrap());

        execute(&manager, "INSERT INTO widgets (id, label) VALUES (1, 'a')")
            .await
            .unwrap();
        assert!(execute(&manager, "INSERT INTO widgets (id, label) VALUES (2, 'a')")
            .await
            .is_err());

        apply(&manager, SchemaChange::drop_index("uq_widgets_label", Widgets::Table))
            .await
            .unwrap();
        execute(&manager, "INSERT INTO widgets (id, label) VALUES (2, 'a')")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_plain_index_round_trip() {
        let db = memory_db().await;
        let manager = SchemaManager::new(&db);
        apply(&manager, widgets_table()).await.unwrap();

        apply(
            &manager,
            SchemaChange::create_index("idx_widgets_label", Widgets::Table, vec![Widgets::Label]),
        )
        .await
        .unwrap();
        assert!(manager.has_index("widgets", "idx_widgets_label").await.unwrap());

        apply(&manager, SchemaChange::drop_index("idx_widgets_label", Widgets::Table))
            .await
            .unwrap();
        assert!(!manager.has_index("widgets", "idx_widgets_label").await.unwrap());
    }

    #[tokio::test]
    async fn test_constraint_changes_rejected_on_sqlite() {
        let db = memory_db().await;
        let manager = SchemaManager::new(&db);
        apply(&manager, widgets_table()).await.unwrap();

        let add = SchemaChange::AddForeignKey(ForeignKeySpec {
            name: "fk_widgets_parent".to_owned(),
            from_table: "widgets".to_owned(),
            from_column: "id".to_owned(),
            to_table: "widgets".to_owned(),
            to_column: "id".to_owned(),
            on_delete: ForeignKeyAction::Cascade,
        });
        let err = apply(&manager, add).await.unwrap_err();
        assert!(matches!(err, DbErr::Migration(msg) if msg.contains("add_foreign_key")));

        let drop = SchemaChange::drop_constraint("fk_widgets_parent", Widgets::Table);
        let err = apply(&manager, drop).await.unwrap_err();
        assert!(matches!(err, DbErr::Migration(msg) if msg.contains("drop_constraint")));
    }

    #[test]
    fn test_constructors_capture_identifier_names() {
        let change = SchemaChange::drop_column(Widgets::Table, Widgets::Weight);
        match change {
            SchemaChange::DropColumn { table, column } => {
                assert_eq!(table, "widgets");
                assert_eq!(column, "weight");
            }
            other => panic!("unexpected change {other:?}"),
        }
    }
}
