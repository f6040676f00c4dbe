use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A completed intake, as stored in the `users` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
    pub created_at: String,
}

/// Profile fields collected by the dialogue, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub age: u32,
    pub city: String,
}

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL CHECK (age >= 0),
        city TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
"#;

/// Creates the `users` table when it is missing. Safe to call repeatedly.
pub async fn ensure_schema(pool: &sqlx::SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    Ok(())
}

impl Profile {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        profile: &NewProfile,
    ) -> Result<i64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, age, city, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&profile.name)
        .bind(i64::from(profile.age))
        .bind(&profile.city)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, name, age, city, created_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Most recently completed intake, if any.
    pub async fn latest(pool: &sqlx::SqlitePool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, name, age, city, created_at FROM users ORDER BY id DESC LIMIT 1"
        )
        .fetch_optional(pool)
        .await
    }
}

/// Column name and declared type of the `users` table, in table order.
/// Empty when the table does not exist.
pub async fn users_columns(pool: &sqlx::SqlitePool) -> Result<Vec<(String, String)>, sqlx::Error> {
    sqlx::query_as("SELECT name, type FROM pragma_table_info('users') ORDER BY cid")
        .fetch_all(pool)
        .await
}
