//! Synthetic records stored by the benchmark scenarios.

use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::{BenchError, Result, Value};

/// Unix seconds of 2024-01-01T00:00:00Z, the earliest `created` timestamp.
pub const BASE_EPOCH_SECS: i64 = 1_704_067_200;

/// The earliest `created` timestamp any generated record carries.
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_EPOCH_SECS, 0).unwrap_or_default()
}

/// A row type that can be bound to a statement and read back from a scan.
pub trait Record: Sized {
    /// Name used in verification errors.
    const WHAT: &'static str;
    /// Number of columns the record occupies in a result row.
    const WIDTH: usize;

    /// Identity used to collapse repeated rows produced by a join.
    type Key: Eq + Hash;

    /// The record's primary key.
    fn key(&self) -> Self::Key;

    /// Bind values in the column order of the record's INSERT statement.
    fn to_values(&self) -> Vec<Value>;

    /// Decodes the first [`Record::WIDTH`] values of a row.
    fn from_values(values: &[Value]) -> Result<Self>;

    /// Minimal check that the row survived the storage round trip.
    fn is_sane(&self) -> bool;
}

fn columns<'a, const N: usize>(values: &'a [Value], what: &str) -> Result<&'a [Value; N]> {
    values
        .get(..N)
        .and_then(|v| v.try_into().ok())
        .ok_or_else(|| BenchError::Decode(format!("{what}: expected {} columns, got {}", N, values.len())))
}

/// Row of the flat `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Primary key, starting at 1.
    pub id: i64,
    /// `User_{id}`.
    pub name: String,
    /// `33 + id`.
    pub age: i64,
    /// `0.13 * id`.
    pub rating: f64,
}

impl Record for Person {
    const WHAT: &'static str = "users";
    const WIDTH: usize = 4;
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.age.into(),
            self.rating.into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, name, age, rating] = columns::<4>(values, Self::WHAT)?;
        Ok(Person {
            id: id.as_i64()?,
            name: name.to_text()?,
            age: age.as_i64()?,
            rating: rating.as_f64()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id >= 1 && self.name.len() >= 5 && self.age >= 33 && self.rating >= 0.13
    }
}

/// Top level of the complex scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// `profile_{p}`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// 0 or 1.
    pub active: i64,
}

impl Record for Profile {
    const WHAT: &'static str = "profiles";
    const WIDTH: usize = 3;
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.as_str().into(),
            self.name.as_str().into(),
            self.active.into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, name, active] = columns::<3>(values, Self::WHAT)?;
        Ok(Profile {
            id: id.to_text()?,
            name: name.to_text()?,
            active: active.as_i64()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id.len() >= 5 && self.name.len() >= 5 && self.active >= 0
    }
}

/// A device belonging to a [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// `device_{p}_{d}`.
    pub id: String,
    /// Owning profile.
    pub profile_id: String,
    /// Display name.
    pub name: String,
    /// 0 or 1.
    pub active: i64,
}

impl Record for Device {
    const WHAT: &'static str = "devices";
    const WIDTH: usize = 4;
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.as_str().into(),
            self.profile_id.as_str().into(),
            self.name.as_str().into(),
            self.active.into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, profile_id, name, active] = columns::<4>(values, Self::WHAT)?;
        Ok(Device {
            id: id.to_text()?,
            profile_id: profile_id.to_text()?,
            name: name.to_text()?,
            active: active.as_i64()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id.len() >= 5 && self.profile_id.len() >= 5 && self.name.len() >= 5 && self.active >= 0
    }
}

/// A location reported by a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// `location_{p}_{d}_{l}`.
    pub id: String,
    /// Owning device.
    pub device_id: String,
    /// Display name.
    pub name: String,
    /// 0 or 1.
    pub active: i64,
}

impl Record for Location {
    const WHAT: &'static str = "locations";
    const WIDTH: usize = 4;
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.as_str().into(),
            self.device_id.as_str().into(),
            self.name.as_str().into(),
            self.active.into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, device_id, name, active] = columns::<4>(values, Self::WHAT)?;
        Ok(Location {
            id: id.to_text()?,
            device_id: device_id.to_text()?,
            name: name.to_text()?,
            active: active.as_i64()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id.len() >= 5 && self.device_id.len() >= 5 && self.name.len() >= 5 && self.active >= 0
    }
}

/// Top level of the relational scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Primary key, starting at 1.
    pub id: i64,
    /// Stored as unix milliseconds.
    pub created: DateTime<Utc>,
    /// `user{id}@example.com`.
    pub email: String,
    /// Stored as 0 or 1.
    pub active: bool,
}

impl Record for User {
    const WHAT: &'static str = "users";
    const WIDTH: usize = 4;
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.created.into(),
            self.email.as_str().into(),
            self.active.into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, created, email, active] = columns::<4>(values, Self::WHAT)?;
        Ok(User {
            id: id.as_i64()?,
            created: created.as_time()?,
            email: email.to_text()?,
            active: active.as_bool()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id >= 1 && self.email.len() >= 5 && self.created >= base_time()
    }
}

/// An article written by a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Primary key, starting at 1.
    pub id: i64,
    /// Stored as unix milliseconds.
    pub created: DateTime<Utc>,
    /// Author.
    pub user_id: i64,
    /// Body text.
    pub text: String,
}

impl Record for Article {
    const WHAT: &'static str = "articles";
    const WIDTH: usize = 4;
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.created.into(),
            self.user_id.into(),
            self.text.as_str().into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, created, user_id, text] = columns::<4>(values, Self::WHAT)?;
        Ok(Article {
            id: id.as_i64()?,
            created: created.as_time()?,
            user_id: user_id.as_i64()?,
            text: text.to_text()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id >= 1 && self.user_id >= 1 && self.text.len() >= 5 && self.created >= base_time()
    }
}

/// A comment on an [`Article`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Primary key, starting at 1.
    pub id: i64,
    /// Stored as unix milliseconds.
    pub created: DateTime<Utc>,
    /// Commented article.
    pub article_id: i64,
    /// Body text.
    pub text: String,
}

impl Record for Comment {
    const WHAT: &'static str = "comments";
    const WIDTH: usize = 4;
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.created.into(),
            self.article_id.into(),
            self.text.as_str().into(),
        ]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, created, article_id, text] = columns::<4>(values, Self::WHAT)?;
        Ok(Comment {
            id: id.as_i64()?,
            created: created.as_time()?,
            article_id: article_id.as_i64()?,
            text: text.to_text()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id >= 1 && self.article_id >= 1 && self.text.len() >= 5 && self.created >= base_time()
    }
}

/// Row of the `books` table read by the concurrent scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Primary key, starting at 1.
    pub id: i64,
    /// `Book {id}`.
    pub name: String,
}

impl Record for Book {
    const WHAT: &'static str = "books";
    const WIDTH: usize = 2;
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![self.id.into(), self.name.as_str().into()]
    }

    fn from_values(values: &[Value]) -> Result<Self> {
        let [id, name] = columns::<2>(values, Self::WHAT)?;
        Ok(Book {
            id: id.as_i64()?,
            name: name.to_text()?,
        })
    }

    fn is_sane(&self) -> bool {
        self.id >= 1 && self.name.len() >= 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_reads_prefix() {
        let row = vec![
            Value::Integer(1),
            Value::Text("Book 1".into()),
            Value::Integer(99),
        ];
        let book = Book::from_values(&row).unwrap();
        assert_eq!(book.name, "Book 1");
    }

    #[test]
    fn test_from_values_short_row() {
        let row = vec![Value::Integer(1)];
        assert!(matches!(Book::from_values(&row), Err(BenchError::Decode(_))));
    }

    #[test]
    fn test_person_sanity_floor() {
        let mut person = Person {
            id: 1,
            name: "User_1".into(),
            age: 34,
            rating: 0.13,
        };
        assert!(person.is_sane());
        person.age = 32;
        assert!(!person.is_sane());
    }

    #[test]
    fn test_user_before_base_time_is_rejected() {
        let user = User {
            id: 1,
            created: DateTime::from_timestamp(BASE_EPOCH_SECS - 1, 0).unwrap(),
            email: "user1@example.com".into(),
            active: false,
        };
        assert!(!user.is_sane());
    }
}
