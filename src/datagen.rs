//! Deterministic synthetic rows.
//!
//! Every field is derived from positional indices only, so the same counts
//! always yield the same rows in the same order.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{Article, Book, Comment, Device, Location, Person, Profile, User, base_time};

fn created(id: i64) -> DateTime<Utc> {
    base_time() + TimeDelta::seconds(id)
}

fn id_of(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX - 1) + 1
}

/// Rows for the flat `users` table: `User_{id}`, age `33 + id`, rating `0.13 * id`.
pub fn persons(n: usize) -> Vec<Person> {
    (0..n)
        .map(|i| {
            let id = id_of(i);
            #[allow(clippy::cast_precision_loss)]
            let rating = 0.13 * id as f64;
            Person {
                id,
                name: format!("User_{id}"),
                age: 33 + id,
                rating,
            }
        })
        .collect()
}

/// `profile_{p}` rows; `active` alternates 0, 1.
pub fn profiles(nprofiles: usize) -> Vec<Profile> {
    (0..nprofiles)
        .map(|p| Profile {
            id: format!("profile_{p}"),
            name: format!("Profile {p}"),
            active: i64::from(p % 2 == 1),
        })
        .collect()
}

/// `ndevices` devices for each of `nprofiles` profiles, grouped by profile.
pub fn devices(nprofiles: usize, ndevices: usize) -> Vec<Device> {
    let mut out = Vec::with_capacity(nprofiles * ndevices);
    for p in 0..nprofiles {
        for d in 0..ndevices {
            out.push(Device {
                id: format!("device_{p}_{d}"),
                profile_id: format!("profile_{p}"),
                name: format!("Device {p} {d}"),
                active: i64::from(d % 2 == 1),
            });
        }
    }
    out
}

/// `nlocations` locations for each device of [`devices`], grouped by device.
pub fn locations(nprofiles: usize, ndevices: usize, nlocations: usize) -> Vec<Location> {
    let mut out = Vec::with_capacity(nprofiles * ndevices * nlocations);
    for p in 0..nprofiles {
        for d in 0..ndevices {
            for l in 0..nlocations {
                out.push(Location {
                    id: format!("location_{p}_{d}_{l}"),
                    device_id: format!("device_{p}_{d}"),
                    name: format!("Location {p} {d} {l}"),
                    active: i64::from(l % 2 == 1),
                });
            }
        }
    }
    out
}

/// Relational users with `created` one second apart from [`base_time`].
pub fn users(nusers: usize) -> Vec<User> {
    (0..nusers)
        .map(|i| {
            let id = id_of(i);
            User {
                id,
                created: created(id),
                email: format!("user{id}@example.com"),
                active: id % 2 == 0,
            }
        })
        .collect()
}

/// `narticles` per user; article ids continue across users.
pub fn articles(nusers: usize, narticles: usize) -> Vec<Article> {
    let mut out = Vec::with_capacity(nusers * narticles);
    for u in 0..nusers {
        for _ in 0..narticles {
            let id = id_of(out.len());
            out.push(Article {
                id,
                created: created(id),
                user_id: id_of(u),
                text: format!("Article {id} lorem ipsum dolor sit amet"),
            });
        }
    }
    out
}

/// `ncomments` per article; article ids follow the numbering of [`articles`].
pub fn comments(nusers: usize, narticles: usize, ncomments: usize) -> Vec<Comment> {
    let mut out = Vec::with_capacity(nusers * narticles * ncomments);
    for a in 0..nusers * narticles {
        for _ in 0..ncomments {
            let id = id_of(out.len());
            out.push(Comment {
                id,
                created: created(id),
                article_id: id_of(a),
                text: format!("Comment {id} consectetur adipiscing elit"),
            });
        }
    }
    out
}

/// `Book {id}` rows for the concurrent scenario.
pub fn books(nbooks: usize) -> Vec<Book> {
    (0..nbooks)
        .map(|b| {
            let id = id_of(b);
            Book {
                id,
                name: format!("Book {id}"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn test_persons_positional_fields() {
        let persons = persons(1000);
        assert_eq!(persons.len(), 1000);
        let p = &persons[6];
        assert_eq!(p.id, 7);
        assert_eq!(p.name, "User_7");
        assert_eq!(p.age, 40);
        assert!((p.rating - 0.91).abs() < 1e-9);
        assert!(persons.iter().all(Record::is_sane));
    }

    #[test]
    fn test_generators_are_deterministic() {
        assert_eq!(persons(50), persons(50));
        assert_eq!(locations(3, 2, 4), locations(3, 2, 4));
        assert_eq!(comments(2, 3, 4), comments(2, 3, 4));
    }

    #[test]
    fn test_zero_counts() {
        assert!(persons(0).is_empty());
        assert!(devices(5, 0).is_empty());
        assert!(locations(0, 5, 5).is_empty());
        assert!(comments(3, 0, 7).is_empty());
    }

    #[test]
    fn test_complex_counts_and_parents() {
        let profiles = profiles(3);
        let devices = devices(3, 4);
        let locations = locations(3, 4, 5);
        assert_eq!(devices.len(), 12);
        assert_eq!(locations.len(), 60);
        assert_eq!(locations[59].id, "location_2_3_4");
        assert!(
            devices
                .iter()
                .all(|d| profiles.iter().any(|p| p.id == d.profile_id))
        );
        assert!(
            locations
                .iter()
                .all(|l| devices.iter().any(|d| d.id == l.device_id))
        );
    }

    #[test]
    fn test_relational_ids_are_sequential() {
        let users = users(4);
        let articles = articles(4, 3);
        let comments = comments(4, 3, 2);
        assert_eq!(articles.len(), 12);
        assert_eq!(comments.len(), 24);
        for (i, a) in articles.iter().enumerate() {
            assert_eq!(a.id, i as i64 + 1);
            assert!(users.iter().any(|u| u.id == a.user_id));
        }
        assert_eq!(articles[3].user_id, 2);
        assert_eq!(comments[23].article_id, 12);
        assert!(comments.iter().all(Record::is_sane));
        assert!(users.iter().all(Record::is_sane));
    }

    #[test]
    fn test_created_is_whole_seconds_after_base() {
        let users = users(2);
        assert_eq!(users[1].created.timestamp(), crate::model::BASE_EPOCH_SECS + 2);
        assert_eq!(users[1].created.timestamp_subsec_millis(), 0);
    }
}
