use sqlx::FromRow;

/// Declared alongside [`User`](super::User) but not reachable from any
/// route yet; the `todos` table exists in the migrations so the schema
/// is ready when todo endpoints land.
#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
}
