use sqlx::FromRow;

use crate::database::{error::ErrorExt, Connection, Result};

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    /// Stored trimmed and lowercased; a unique index on this column is
    /// what actually enforces one account per address.
    pub email: String,
    pub password_hash: String,
}

impl User {
    #[tracing::instrument(skip(conn, email), fields(email = "<hidden>"))]
    pub async fn by_email(conn: &mut Connection, email: &str) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
            .bind(email)
            .fetch_optional(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn))]
    pub async fn all(conn: &mut Connection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" ORDER BY id"#)
            .fetch_all(conn)
            .await
            .into_db_error()
    }

    /// Inserts a new user. A duplicate email surfaces as
    /// [`Error::UniqueViolation`](crate::database::Error::UniqueViolation)
    /// from the unique index rather than from a pre-insert lookup, so
    /// two concurrent registrations can never both succeed.
    #[tracing::instrument(skip_all)]
    pub async fn insert(
        conn: &mut Connection,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO "users" (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *"#,
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(conn)
        .await
        .into_db_error()
    }
}
