//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::Expense;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default `SQLite` location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://expenses.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, if set.
#[must_use]
pub fn database_url_from_env() -> Option<String> {
    std::env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `expenses` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut expense_table = schema.create_table_from_entity(Expense);
    expense_table.if_not_exists();

    db.execute(builder.build(&expense_table)).await?;

    Ok(())
}

/// Connects to `database_url` and makes sure the schema is in place.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ExpenseModel;
    use sea_orm::{EntityTrait, QuerySelect, Statement};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_expense_date_column_is_named_date() -> Result<()> {
        let db = init_db("sqlite::memory:").await?;
        crate::test_utils::create_test_expense(
            &db,
            rust_decimal::Decimal::ONE,
            "Food",
            crate::test_utils::date(2024, 3, 1),
        )
        .await?;

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM expenses WHERE date = '2024-03-01'",
            ))
            .await?;
        let count: i64 = row.map_or(Ok(0), |r| r.try_get("", "n"))?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_init_db() -> Result<()> {
        let db = init_db("sqlite::memory:").await?;
        let expenses: Vec<ExpenseModel> = Expense::find().all(&db).await?;
        assert!(expenses.is_empty());
        Ok(())
    }
}
