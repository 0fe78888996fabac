//! The capability every benchmarked SQLite binding provides.
//!
//! A driver only has to open a file, execute statements, bind rows inside a
//! transaction and materialize a scan as [`Value`]s. Typed inserts, typed
//! scans and join deduplication are built on top of that in the provided
//! methods, so they behave identically for every binding.

use std::collections::HashSet;
use std::path::Path;

use crate::{Record, Result, Value};

mod rusqlite_db;
mod sqlx_db;
mod tokio_db;

pub use rusqlite_db::RusqliteDb;
pub use sqlx_db::SqlxDb;
pub use tokio_db::TokioRusqliteDb;

/// One connection to a database file through a specific binding.
pub trait Db: Sized {
    /// Name shown in logs and reports.
    const NAME: &'static str;

    /// Opens (creating if needed) the file and applies [`crate::sql::PRAGMAS`].
    fn open(path: &Path) -> Result<Self>;

    /// Opens an existing file without write access and applies
    /// [`crate::sql::READ_PRAGMAS`]. Fails if the file does not exist.
    fn open_read_only(path: &Path) -> Result<Self>;

    /// Executes one or more statements that return no rows.
    fn exec(&mut self, sql: &str) -> Result<()>;

    /// Binds and steps `sql` once per row inside a single transaction.
    fn insert_rows(&mut self, sql: &str, rows: Vec<Vec<Value>>) -> Result<()>;

    /// Runs `sql` with `params` and returns every result row.
    fn query_rows(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<Vec<Value>>>;

    /// Closes the connection, surfacing any error the binding reports.
    fn close(self) -> Result<()>;

    /// Executes each statement in turn.
    fn exec_all(&mut self, sqls: &[&str]) -> Result<()> {
        for sql in sqls {
            self.exec(sql)?;
        }
        Ok(())
    }

    /// Inserts `records` through [`Db::insert_rows`].
    fn insert<R: Record>(&mut self, sql: &str, records: &[R]) -> Result<()> {
        let rows = records.iter().map(Record::to_values).collect();
        self.insert_rows(sql, rows)
    }

    /// Scans `sql` and decodes every row as an `R`.
    fn query<R: Record>(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<R>> {
        self.query_rows(sql, params)?
            .iter()
            .map(|row| R::from_values(row))
            .collect()
    }

    /// Scans a three-way join whose rows hold `A`, `B` and `C` side by side
    /// and collapses repeated parents, keeping first-seen order.
    fn query_joined<A: Record, B: Record, C: Record>(
        &mut self,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<(Vec<A>, Vec<B>, Vec<C>)> {
        let mut a = Dedup::new();
        let mut b = Dedup::new();
        let mut c = Dedup::new();
        for row in self.query_rows(sql, params)? {
            let rest = row.get(A::WIDTH..).unwrap_or_default();
            let tail = rest.get(B::WIDTH..).unwrap_or_default();
            a.push(A::from_values(&row)?);
            b.push(B::from_values(rest)?);
            c.push(C::from_values(tail)?);
        }
        Ok((a.into_inner(), b.into_inner(), c.into_inner()))
    }
}

/// Keeps the first record seen for each key.
struct Dedup<R: Record> {
    seen: HashSet<R::Key>,
    records: Vec<R>,
}

impl<R: Record> Dedup<R> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    fn push(&mut self, record: R) {
        if self.seen.insert(record.key()) {
            self.records.push(record);
        }
    }

    fn into_inner(self) -> Vec<R> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Article, Comment, User};
    use crate::{BenchError, datagen};

    /// Serves canned rows for exercising the provided methods.
    struct CannedDb {
        rows: Vec<Vec<Value>>,
    }

    impl Db for CannedDb {
        const NAME: &'static str = "canned";

        fn open(_path: &Path) -> Result<Self> {
            Ok(Self { rows: Vec::new() })
        }

        fn open_read_only(path: &Path) -> Result<Self> {
            Self::open(path)
        }

        fn exec(&mut self, _sql: &str) -> Result<()> {
            Ok(())
        }

        fn insert_rows(&mut self, _sql: &str, rows: Vec<Vec<Value>>) -> Result<()> {
            self.rows.extend(rows);
            Ok(())
        }

        fn query_rows(&mut self, _sql: &str, _params: Vec<Value>) -> Result<Vec<Vec<Value>>> {
            Ok(self.rows.clone())
        }

        fn close(self) -> Result<()> {
            Ok(())
        }
    }

    fn joined_rows(users: &[User], articles: &[Article], comments: &[Comment]) -> Vec<Vec<Value>> {
        let mut rows = Vec::new();
        for c in comments {
            let a = articles.iter().find(|a| a.id == c.article_id).unwrap();
            let u = users.iter().find(|u| u.id == a.user_id).unwrap();
            let mut row = u.to_values();
            row.extend(a.to_values());
            row.extend(c.to_values());
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_query_joined_dedups_parents() {
        let users = datagen::users(3);
        let articles = datagen::articles(3, 2);
        let comments = datagen::comments(3, 2, 4);
        let mut db = CannedDb {
            rows: joined_rows(&users, &articles, &comments),
        };

        let (u, a, c) = db
            .query_joined::<User, Article, Comment>("", Vec::new())
            .unwrap();
        assert_eq!(u, users);
        assert_eq!(a, articles);
        assert_eq!(c, comments);
    }

    #[test]
    fn test_query_joined_dedups_interleaved_rows() {
        let users = datagen::users(2);
        let articles = datagen::articles(2, 1);
        let comments = datagen::comments(2, 1, 2);
        let mut rows = joined_rows(&users, &articles, &comments);
        // user 1, user 2, user 1, user 2
        rows.swap(1, 2);
        let mut db = CannedDb { rows };

        let (u, a, c) = db
            .query_joined::<User, Article, Comment>("", Vec::new())
            .unwrap();
        assert_eq!(u.len(), 2);
        assert_eq!(a.len(), 2);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_typed_insert_then_query() {
        let mut db = CannedDb::open(Path::new("unused")).unwrap();
        let books = datagen::books(5);
        db.insert("", &books).unwrap();
        let back: Vec<crate::model::Book> = db.query("", Vec::new()).unwrap();
        assert_eq!(back, books);
    }

    #[test]
    fn test_query_joined_short_row() {
        let mut db = CannedDb {
            rows: vec![vec![Value::Integer(1)]],
        };
        let result = db.query_joined::<User, Article, Comment>("", Vec::new());
        assert!(matches!(result, Err(BenchError::Decode(_))));
    }
}
