use sqlx::PgConnection;

/// Execute one externally-defined maintenance or aggregation statement.
/// The statement text comes from `ProcedureConfig`; this code never writes
/// the aggregate tables directly.
pub async fn run(conn: &mut PgConnection, statement: &str) -> Result<(), sqlx::Error> {
    sqlx::query(statement).execute(conn).await?;
    Ok(())
}
