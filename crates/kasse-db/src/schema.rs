use anyhow::Result;
use sqlx::Executor;

use crate::Connection;

/// Install the database schema. The DDL only creates what is
/// missing, so this can run on every open.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    (*conn).execute(schema_data).await?;
    Ok(())
}
