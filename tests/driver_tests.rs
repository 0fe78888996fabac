use std::path::PathBuf;

use sqlite_bench::driver::{RusqliteDb, SqlxDb, TokioRusqliteDb};
use sqlite_bench::model::{Article, Book, Comment, Device, Location, Person, Profile, User};
use sqlite_bench::{Db, Value, datagen, sql};
use tempfile::TempDir;

fn create_dbfile() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.db");
    (dir, path)
}

fn persons_round_trip<D: Db>(n: usize) {
    let (_dir, path) = create_dbfile();
    let mut db = D::open(&path).unwrap();
    db.exec(sql::CREATE_USERS).unwrap();
    let persons = datagen::persons(n);
    db.insert(sql::INSERT_USERS, &persons).unwrap();

    let scanned: Vec<Person> = db.query(sql::SELECT_USERS, Vec::new()).unwrap();
    assert_eq!(scanned.len(), n);
    assert_eq!(scanned, persons);
    db.close().unwrap();
}

fn seventh_person_survives<D: Db>() {
    let (_dir, path) = create_dbfile();
    let mut db = D::open(&path).unwrap();
    db.exec(sql::CREATE_USERS).unwrap();
    db.insert(sql::INSERT_USERS, &datagen::persons(1000)).unwrap();

    let scanned: Vec<Person> = db
        .query(
            "SELECT id, name, age, rating FROM users WHERE name = ?",
            vec![Value::from("User_7")],
        )
        .unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].age, 40);
    assert!((scanned[0].rating - 0.91).abs() < 1e-9);
    db.close().unwrap();
}

fn complex_filtered_counts<D: Db>() {
    let (_dir, path) = create_dbfile();
    let mut db = D::open(&path).unwrap();
    db.exec_all(&sql::CREATE_COMPLEX).unwrap();
    db.insert(sql::INSERT_PROFILES, &datagen::profiles(4)).unwrap();
    db.insert(sql::INSERT_DEVICES, &datagen::devices(4, 3)).unwrap();
    db.insert(sql::INSERT_LOCATIONS, &datagen::locations(4, 3, 5))
        .unwrap();

    let (l, d, p) = db
        .query_joined::<Location, Device, Profile>(
            sql::SELECT_COMPLEX,
            vec![Value::Integer(0), Value::Integer(1)],
        )
        .unwrap();
    assert_eq!((l.len(), d.len(), p.len()), (60, 12, 4));

    let (l, d, p) = db
        .query_joined::<Location, Device, Profile>(
            sql::SELECT_COMPLEX_BY_PROFILE,
            vec![Value::from("profile_2")],
        )
        .unwrap();
    assert_eq!((l.len(), d.len(), p.len()), (15, 3, 1));
    assert!(l.iter().all(|l| l.device_id.starts_with("device_2_")));
    assert_eq!(p[0].name, "Profile 2");
    db.close().unwrap();
}

fn relational_join_matches_generated<D: Db>() {
    let (_dir, path) = create_dbfile();
    let mut db = D::open(&path).unwrap();
    db.exec_all(&sql::CREATE_RELATIONAL).unwrap();
    let users = datagen::users(5);
    let articles = datagen::articles(5, 4);
    let comments = datagen::comments(5, 4, 3);
    db.insert(sql::INSERT_REL_USERS, &users).unwrap();
    db.insert(sql::INSERT_ARTICLES, &articles).unwrap();
    db.insert(sql::INSERT_COMMENTS, &comments).unwrap();

    let (u, a, c) = db
        .query_joined::<User, Article, Comment>(sql::SELECT_USERS_ARTICLES_COMMENTS, Vec::new())
        .unwrap();
    assert_eq!(u, users);
    assert_eq!(a, articles);
    assert_eq!(c, comments);

    let scanned: Vec<Article> = db.query(sql::SELECT_ARTICLES, Vec::new()).unwrap();
    assert_eq!(scanned, articles);
    db.close().unwrap();
}

fn reopen_sees_committed_rows<D: Db>() {
    let (_dir, path) = create_dbfile();
    {
        let mut db = D::open(&path).unwrap();
        db.exec(sql::CREATE_BOOKS).unwrap();
        db.insert(sql::INSERT_BOOKS, &datagen::books(250)).unwrap();
        db.close().unwrap();
    }
    let mut db = D::open(&path).unwrap();
    let books: Vec<Book> = db.query(sql::SELECT_BOOKS, Vec::new()).unwrap();
    assert_eq!(books, datagen::books(250));
    db.close().unwrap();
}

fn read_only_connection<D: Db>() {
    let (_dir, path) = create_dbfile();
    assert!(D::open_read_only(&path).is_err());
    assert!(!path.exists());

    let mut db = D::open(&path).unwrap();
    db.exec(sql::CREATE_BOOKS).unwrap();
    db.insert(sql::INSERT_BOOKS, &datagen::books(20)).unwrap();
    db.close().unwrap();

    let mut db = D::open_read_only(&path).unwrap();
    let books: Vec<Book> = db.query(sql::SELECT_BOOKS, Vec::new()).unwrap();
    assert_eq!(books, datagen::books(20));
    assert!(db.insert(sql::INSERT_BOOKS, &[Book { id: 21, name: "Book 21".into() }]).is_err());
    assert!(db.exec("DROP TABLE books").is_err());
    db.close().unwrap();
}

fn bad_sql_is_an_error<D: Db>() {
    let (_dir, path) = create_dbfile();
    let mut db = D::open(&path).unwrap();
    assert!(db.exec("CREATE TABLE").is_err());
    assert!(db.query_rows("SELECT * FROM missing", Vec::new()).is_err());
    assert!(
        db.insert_rows("INSERT INTO missing VALUES (?)", vec![vec![Value::Integer(1)]])
            .is_err()
    );
}

#[test]
fn test_rusqlite_round_trip() {
    persons_round_trip::<RusqliteDb>(0);
    persons_round_trip::<RusqliteDb>(1);
    persons_round_trip::<RusqliteDb>(500);
    seventh_person_survives::<RusqliteDb>();
}

#[test]
fn test_sqlx_round_trip() {
    persons_round_trip::<SqlxDb>(0);
    persons_round_trip::<SqlxDb>(1);
    persons_round_trip::<SqlxDb>(500);
    seventh_person_survives::<SqlxDb>();
}

#[test]
fn test_tokio_rusqlite_round_trip() {
    persons_round_trip::<TokioRusqliteDb>(0);
    persons_round_trip::<TokioRusqliteDb>(1);
    persons_round_trip::<TokioRusqliteDb>(500);
    seventh_person_survives::<TokioRusqliteDb>();
}

#[test]
fn test_complex_join_counts() {
    complex_filtered_counts::<RusqliteDb>();
    complex_filtered_counts::<SqlxDb>();
    complex_filtered_counts::<TokioRusqliteDb>();
}

#[test]
fn test_relational_join_dedup() {
    relational_join_matches_generated::<RusqliteDb>();
    relational_join_matches_generated::<SqlxDb>();
    relational_join_matches_generated::<TokioRusqliteDb>();
}

#[test]
fn test_reopen() {
    reopen_sees_committed_rows::<RusqliteDb>();
    reopen_sees_committed_rows::<SqlxDb>();
    reopen_sees_committed_rows::<TokioRusqliteDb>();
}

#[test]
fn test_errors_propagate() {
    bad_sql_is_an_error::<RusqliteDb>();
    bad_sql_is_an_error::<SqlxDb>();
    bad_sql_is_an_error::<TokioRusqliteDb>();
}

#[test]
fn test_read_only_open() {
    read_only_connection::<RusqliteDb>();
    read_only_connection::<SqlxDb>();
    read_only_connection::<TokioRusqliteDb>();
}
