use std::path::Path;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql, params_from_iter};

use super::Db;
use crate::{Result, Value, sql};

/// Synchronous driver on top of a single `rusqlite::Connection`.
pub struct RusqliteDb {
    conn: Connection,
}

impl Db for RusqliteDb {
    const NAME: &'static str = "rusqlite";

    fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(sql::PRAGMAS)?;
        Ok(Self { conn })
    }

    fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, read_only_flags())?;
        conn.execute_batch(sql::READ_PRAGMAS)?;
        Ok(Self { conn })
    }

    fn exec(&mut self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn insert_rows(&mut self, sql: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        insert_rows(&mut self.conn, sql, &rows)?;
        Ok(())
    }

    fn query_rows(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<Vec<Value>>> {
        Ok(query_rows(&self.conn, sql, &params)?)
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

pub(super) fn read_only_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI
}

// The helpers below stay on `rusqlite::Result` so the tokio-rusqlite driver
// can run them inside its connection thread.

pub(super) fn insert_rows(
    conn: &mut Connection,
    sql: &str,
    rows: &[Vec<Value>],
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(sql)?;
        for row in rows {
            stmt.execute(params_from_iter(row.iter()))?;
        }
    }
    tx.commit()
}

pub(super) fn query_rows(
    conn: &Connection,
    sql: &str,
    params: &[Value],
) -> rusqlite::Result<Vec<Vec<Value>>> {
    let mut stmt = conn.prepare(sql)?;
    let width = stmt.column_count();
    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(Value::from(row.get_ref(i)?));
        }
        out.push(values);
    }
    Ok(out)
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(v) => ValueRef::Integer(*v),
            Value::Real(v) => ValueRef::Real(*v),
            Value::Text(v) => ValueRef::Text(v.as_bytes()),
            Value::Blob(v) => ValueRef::Blob(v),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
            ValueRef::Blob(v) => Value::Blob(v.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a INTEGER, b REAL, c TEXT, d BLOB)")
            .unwrap();
        let row = vec![
            Value::Integer(7),
            Value::Real(0.91),
            Value::Text("User_7".into()),
            Value::Blob(vec![1, 2, 3]),
        ];
        insert_rows(&mut conn, "INSERT INTO t VALUES (?, ?, ?, ?)", &[row.clone()]).unwrap();
        let rows = query_rows(&conn, "SELECT a, b, c, d FROM t", &[]).unwrap();
        assert_eq!(rows, vec![row]);
    }

    #[test]
    fn test_null_binding() {
        let conn = Connection::open_in_memory().unwrap();
        let rows = query_rows(&conn, "SELECT ?", &[Value::Null]).unwrap();
        assert_eq!(rows, vec![vec![Value::Null]]);
    }
}
