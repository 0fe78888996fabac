use std::path::Path;

use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteRow,
};
use sqlx::query::Query;
use sqlx::{Connection, Row, Sqlite, TypeInfo, ValueRef};
use tokio::runtime::Runtime;

use super::Db;
use crate::{Result, Value, sql};

/// Async sqlx driver. Each instance owns one `SqliteConnection` and a
/// current-thread runtime to drive it, so readers in the concurrent
/// scenario never share a runtime.
pub struct SqlxDb {
    conn: SqliteConnection,
    runtime: Runtime,
}

impl Db for SqlxDb {
    const NAME: &'static str = "sqlx";

    fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        Self::connect(&options, sql::PRAGMAS)
    }

    fn open_read_only(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        Self::connect(&options, sql::READ_PRAGMAS)
    }

    fn exec(&mut self, sql: &str) -> Result<()> {
        let Self { runtime, conn } = self;
        runtime.block_on(sqlx::raw_sql(sql).execute(conn))?;
        Ok(())
    }

    fn insert_rows(&mut self, sql: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        let Self { runtime, conn } = self;
        runtime.block_on(async {
            let mut tx = conn.begin().await?;
            for row in rows {
                bind_all(sqlx::query(sql), row).execute(&mut *tx).await?;
            }
            tx.commit().await
        })?;
        Ok(())
    }

    fn query_rows(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<Vec<Value>>> {
        let Self { runtime, conn } = self;
        let rows = runtime.block_on(bind_all(sqlx::query(sql), params).fetch_all(conn))?;
        Ok(rows.iter().map(decode_row).collect::<sqlx::Result<_>>()?)
    }

    fn close(self) -> Result<()> {
        let Self { runtime, conn } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}

impl SqlxDb {
    fn connect(options: &SqliteConnectOptions, pragmas: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let conn = runtime.block_on(async {
            let mut conn = SqliteConnection::connect_with(options).await?;
            sqlx::raw_sql(pragmas).execute(&mut conn).await?;
            Ok::<_, sqlx::Error>(conn)
        })?;
        Ok(Self { conn, runtime })
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<Value>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(v),
            Value::Real(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
            Value::Blob(v) => query.bind(v),
        };
    }
    query
}

/// Reads every column by the storage class of its value.
fn decode_row(row: &SqliteRow) -> sqlx::Result<Vec<Value>> {
    let mut values = Vec::with_capacity(row.len());
    for i in 0..row.len() {
        let raw = row.try_get_raw(i)?;
        if raw.is_null() {
            values.push(Value::Null);
            continue;
        }
        let value = match raw.type_info().name() {
            "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get(i)?),
            "REAL" => Value::Real(row.try_get(i)?),
            "BLOB" => Value::Blob(row.try_get(i)?),
            _ => Value::Text(row.try_get(i)?),
        };
        values.push(value);
    }
    Ok(values)
}
