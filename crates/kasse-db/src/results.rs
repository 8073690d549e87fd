use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}

/// Does the error stem from a violated UNIQUE constraint?
/// SQLite reports these as database errors with a well known
/// message prefix.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(e) => {
            e.message().contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}
