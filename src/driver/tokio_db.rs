use std::path::Path;

use tokio::runtime::Runtime;
use tokio_rusqlite::Connection;

use super::{Db, rusqlite_db};
use crate::{Result, Value, sql};

/// tokio-rusqlite driver: a rusqlite connection owned by a background
/// thread, fed closures over a channel and awaited on a private runtime.
pub struct TokioRusqliteDb {
    conn: Connection,
    runtime: Runtime,
}

impl Db for TokioRusqliteDb {
    const NAME: &'static str = "tokio-rusqlite";

    fn open(path: &Path) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let conn = runtime.block_on(async {
            let conn = Connection::open(path).await?;
            conn.call(|c| Ok(c.execute_batch(sql::PRAGMAS)?)).await?;
            Ok::<_, tokio_rusqlite::Error>(conn)
        })?;
        Ok(Self { runtime, conn })
    }

    fn open_read_only(path: &Path) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let conn = runtime.block_on(async {
            let conn = Connection::open_with_flags(path, rusqlite_db::read_only_flags()).await?;
            conn.call(|c| Ok(c.execute_batch(sql::READ_PRAGMAS)?)).await?;
            Ok::<_, tokio_rusqlite::Error>(conn)
        })?;
        Ok(Self { runtime, conn })
    }

    fn exec(&mut self, sql: &str) -> Result<()> {
        let sql = sql.to_owned();
        self.runtime
            .block_on(self.conn.call(move |c| Ok(c.execute_batch(&sql)?)))?;
        Ok(())
    }

    fn insert_rows(&mut self, sql: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        let sql = sql.to_owned();
        self.runtime.block_on(
            self.conn
                .call(move |c| Ok(rusqlite_db::insert_rows(c, &sql, &rows)?)),
        )?;
        Ok(())
    }

    fn query_rows(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<Vec<Value>>> {
        let sql = sql.to_owned();
        let rows = self.runtime.block_on(
            self.conn
                .call(move |c| Ok(rusqlite_db::query_rows(c, &sql, &params)?)),
        )?;
        Ok(rows)
    }

    fn close(self) -> Result<()> {
        let Self { runtime, conn } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = TokioRusqliteDb::open(&dir.path().join("tokio.db")).unwrap();
        db.exec("CREATE TABLE t (a INTEGER, c TEXT)").unwrap();
        let rows: Vec<Vec<Value>> = (1..=4)
            .map(|i| vec![Value::Integer(i), Value::Text(format!("row {i}"))])
            .collect();
        db.insert_rows("INSERT INTO t VALUES (?, ?)", rows.clone())
            .unwrap();
        let back = db.query_rows("SELECT a, c FROM t ORDER BY a", Vec::new())
            .unwrap();
        assert_eq!(back, rows);
        db.close().unwrap();
    }
}
