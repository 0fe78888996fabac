//! Benchmark scenarios.
//!
//! Every scenario walks the same linear sequence: reset the database file,
//! create the schema, insert (timed), query and verify (timed), report. Any
//! error ends the scenario immediately and is returned to the caller.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::driver::{RusqliteDb, SqlxDb, TokioRusqliteDb};
use crate::model::{Article, Book, Comment, Device, Location, Person, Profile, User};
use crate::report::{format_duration, format_size};
use crate::{
    BenchError, BenchResult, Config, Db, DriverKind, Result, Scenario, Value, datagen, sql, verify,
};

const SIDECAR_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

impl DriverKind {
    /// Runs every configured scenario against this driver.
    pub fn run(self, config: &Config) -> Result<Vec<BenchResult>> {
        match self {
            DriverKind::Rusqlite => run::<RusqliteDb>(config),
            DriverKind::Sqlx => run::<SqlxDb>(config),
            DriverKind::TokioRusqlite => run::<TokioRusqliteDb>(config),
        }
    }
}

/// Runs the configured scenarios against driver `D`, in order.
pub fn run<D: Db + 'static>(config: &Config) -> Result<Vec<BenchResult>> {
    log::info!("{}", D::NAME);
    let dbfile = config.dbfile.as_path();
    let mut results = Vec::new();
    for scenario in &config.scenarios {
        match scenario {
            Scenario::Simple => results.push(bench_simple::<D>(dbfile, config.users)?),
            Scenario::Complex => results.push(bench_complex::<D>(
                dbfile,
                config.profiles,
                config.devices,
                config.locations,
            )?),
            Scenario::Relational => results.push(bench_relational::<D>(
                dbfile,
                config.rel_users,
                config.articles,
                config.comments,
            )?),
            Scenario::Concurrent => {
                for &nworkers in &config.workers {
                    results.push(bench_concurrent::<D>(dbfile, config.books, nworkers)?);
                }
            }
        }
    }
    Ok(results)
}

/// Removes the database file and any journal left next to it.
pub fn reset_file(dbfile: &Path) -> Result<()> {
    remove_if_exists(dbfile)?;
    for suffix in SIDECAR_SUFFIXES {
        remove_if_exists(&sidecar(dbfile, suffix))?;
    }
    Ok(())
}

fn sidecar(dbfile: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(dbfile.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

fn finish<D: Db>(
    scenario: String,
    dbfile: &Path,
    insert: Duration,
    query: Duration,
) -> Result<BenchResult> {
    let file_size = fs::metadata(dbfile)?.len();
    log::info!("  fsize {}", format_size(file_size));
    Ok(BenchResult {
        driver: D::NAME,
        scenario,
        insert,
        query,
        file_size,
    })
}

/// Flat table: `nusers` rows inserted, then scanned once.
pub fn bench_simple<D: Db>(dbfile: &Path, nusers: usize) -> Result<BenchResult> {
    log::info!("{} simple dbfile={}, nusers={nusers}", D::NAME, dbfile.display());
    reset_file(dbfile)?;
    let mut db = D::open(dbfile)?;
    db.exec(sql::CREATE_USERS)?;

    let persons = datagen::persons(nusers);
    let start = Instant::now();
    db.insert(sql::INSERT_USERS, &persons)?;
    let insert = start.elapsed();
    log::info!("  insert took {}", format_duration(insert));

    let start = Instant::now();
    let scanned: Vec<Person> = db.query(sql::SELECT_USERS, Vec::new())?;
    verify::check_scan(&scanned, nusers)?;
    let query = start.elapsed();
    log::info!("  query took {}", format_duration(query));

    db.close()?;
    finish::<D>(Scenario::Simple.to_string(), dbfile, insert, query)
}

/// Profiles, devices per profile and locations per device, scanned as one
/// join and again filtered to the first profile.
pub fn bench_complex<D: Db>(
    dbfile: &Path,
    nprofiles: usize,
    ndevices: usize,
    nlocations: usize,
) -> Result<BenchResult> {
    log::info!(
        "{} complex dbfile={}, nprofiles, ndevices, nlocations = {nprofiles}, {ndevices}, {nlocations}",
        D::NAME,
        dbfile.display()
    );
    reset_file(dbfile)?;
    let mut db = D::open(dbfile)?;
    db.exec_all(&sql::CREATE_COMPLEX)?;

    let profiles = datagen::profiles(nprofiles);
    let devices = datagen::devices(nprofiles, ndevices);
    let locations = datagen::locations(nprofiles, ndevices, nlocations);
    let start = Instant::now();
    db.insert(sql::INSERT_PROFILES, &profiles)?;
    db.insert(sql::INSERT_DEVICES, &devices)?;
    db.insert(sql::INSERT_LOCATIONS, &locations)?;
    let insert = start.elapsed();
    log::info!("  insert took {}", format_duration(insert));

    let start = Instant::now();
    let (l, d, p) = db.query_joined::<Location, Device, Profile>(
        sql::SELECT_COMPLEX,
        vec![Value::Integer(0), Value::Integer(1)],
    )?;
    let per_profile = ndevices * nlocations;
    verify::check_scan(&l, nprofiles * per_profile)?;
    verify::check_scan(&d, if nlocations > 0 { nprofiles * ndevices } else { 0 })?;
    verify::check_scan(&p, if per_profile > 0 { nprofiles } else { 0 })?;

    if nprofiles > 0 {
        let (l, d, p) = db.query_joined::<Location, Device, Profile>(
            sql::SELECT_COMPLEX_BY_PROFILE,
            vec![Value::from("profile_0")],
        )?;
        verify::check_scan(&l, per_profile)?;
        verify::check_scan(&d, if nlocations > 0 { ndevices } else { 0 })?;
        verify::check_scan(&p, usize::from(per_profile > 0))?;
    }
    let query = start.elapsed();
    log::info!("  query took {}", format_duration(query));

    db.close()?;
    finish::<D>(Scenario::Complex.to_string(), dbfile, insert, query)
}

/// Users, articles per user and comments per article, scanned as one join
/// and as a plain article scan.
pub fn bench_relational<D: Db>(
    dbfile: &Path,
    nusers: usize,
    narticles: usize,
    ncomments: usize,
) -> Result<BenchResult> {
    log::info!(
        "{} relational dbfile={}, nusers, narticles, ncomments = {nusers}, {narticles}, {ncomments}",
        D::NAME,
        dbfile.display()
    );
    reset_file(dbfile)?;
    let mut db = D::open(dbfile)?;
    db.exec_all(&sql::CREATE_RELATIONAL)?;

    let users = datagen::users(nusers);
    let articles = datagen::articles(nusers, narticles);
    let comments = datagen::comments(nusers, narticles, ncomments);
    let start = Instant::now();
    db.insert(sql::INSERT_REL_USERS, &users)?;
    db.insert(sql::INSERT_ARTICLES, &articles)?;
    db.insert(sql::INSERT_COMMENTS, &comments)?;
    let insert = start.elapsed();
    log::info!("  insert took {}", format_duration(insert));

    let start = Instant::now();
    let (u, a, c) = db.query_joined::<User, Article, Comment>(
        sql::SELECT_USERS_ARTICLES_COMMENTS,
        Vec::new(),
    )?;
    let joined = narticles * ncomments > 0;
    verify::check_scan(&u, if joined { nusers } else { 0 })?;
    verify::check_scan(&a, if joined { nusers * narticles } else { 0 })?;
    verify::check_scan(&c, nusers * narticles * ncomments)?;

    let scanned: Vec<Article> = db.query(sql::SELECT_ARTICLES, Vec::new())?;
    verify::check_scan(&scanned, nusers * narticles)?;
    let query = start.elapsed();
    log::info!("  query took {}", format_duration(query));

    db.close()?;
    finish::<D>(Scenario::Relational.to_string(), dbfile, insert, query)
}

/// Inserts `nbooks` books, then lets `nworkers` readers scan them in
/// parallel, each through its own read-only connection. The query time spans
/// from the first spawn to the last reader finishing.
pub fn bench_concurrent<D: Db + 'static>(
    dbfile: &Path,
    nbooks: usize,
    nworkers: usize,
) -> Result<BenchResult> {
    log::info!(
        "{} concurrent dbfile={}, nbooks={nbooks}, nworkers={nworkers}",
        D::NAME,
        dbfile.display()
    );
    reset_file(dbfile)?;
    let mut db = D::open(dbfile)?;
    db.exec(sql::CREATE_BOOKS)?;

    let books = datagen::books(nbooks);
    let start = Instant::now();
    db.insert(sql::INSERT_BOOKS, &books)?;
    let insert = start.elapsed();
    log::info!("  insert took {}", format_duration(insert));
    // Readers only start once the writer has committed and let go of the file.
    db.close()?;

    let start = Instant::now();
    let (tx, rx) = mpsc::channel();
    for worker in 0..nworkers {
        let tx = tx.clone();
        let path = dbfile.to_path_buf();
        thread::Builder::new()
            .name(format!("reader-{worker}"))
            .spawn(move || {
                let outcome = read_books::<D>(&path, nbooks);
                // A closed channel means another reader already failed the run.
                let _ = tx.send((worker, outcome));
            })?;
    }
    drop(tx);

    let mut finished = 0;
    for (worker, outcome) in rx {
        if let Err(err) = outcome {
            return Err(BenchError::Worker {
                worker,
                source: Box::new(err),
            });
        }
        log::debug!("  worker {worker} done");
        finished += 1;
    }
    if finished != nworkers {
        return Err(io::Error::other("reader thread exited without a result").into());
    }
    let query = start.elapsed();
    log::info!("  queries took {}", format_duration(query));

    finish::<D>(format!("{}/{nworkers}", Scenario::Concurrent), dbfile, insert, query)
}

fn read_books<D: Db>(path: &Path, expected: usize) -> Result<()> {
    let mut db = D::open_read_only(path)?;
    let books: Vec<Book> = db.query(sql::SELECT_BOOKS, Vec::new())?;
    verify::check_scan(&books, expected)?;
    db.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_names() {
        let path = Path::new("/tmp/bench.db");
        assert_eq!(sidecar(path, "-wal"), PathBuf::from("/tmp/bench.db-wal"));
    }

    #[test]
    fn test_reset_file_removes_db_and_journal() {
        let dir = tempfile::tempdir().unwrap();
        let dbfile = dir.path().join("bench.db");
        fs::write(&dbfile, b"stale").unwrap();
        fs::write(sidecar(&dbfile, "-journal"), b"stale").unwrap();

        reset_file(&dbfile).unwrap();
        assert!(!dbfile.exists());
        assert!(!sidecar(&dbfile, "-journal").exists());

        // nothing left to remove
        reset_file(&dbfile).unwrap();
    }
}
