//! Fixed schemas and statements shared by every driver.

/// Applied by every driver right after opening a connection.
pub const PRAGMAS: &str = r#"
    PRAGMA journal_mode = DELETE;
    PRAGMA synchronous  = FULL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
"#;

/// Applied to read-only connections, which cannot change the journal mode.
pub const READ_PRAGMAS: &str = r#"
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
"#;

// simple

/// Flat table of the simple scenario.
pub const CREATE_USERS: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    rating REAL NOT NULL
)";

/// Binds a [`crate::model::Person`].
pub const INSERT_USERS: &str = "INSERT INTO users (id, name, age, rating) VALUES (?, ?, ?, ?)";

/// Full scan of the flat table.
pub const SELECT_USERS: &str = "SELECT id, name, age, rating FROM users ORDER BY id";

// complex

/// Profiles, devices and locations with their foreign-key indexes.
pub const CREATE_COMPLEX: [&str; 5] = [
    "CREATE TABLE profiles (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        active INTEGER NOT NULL
    )",
    "CREATE TABLE devices (
        id TEXT PRIMARY KEY NOT NULL,
        profileId TEXT NOT NULL REFERENCES profiles(id),
        name TEXT NOT NULL,
        active INTEGER NOT NULL
    )",
    "CREATE INDEX devices_profileId ON devices(profileId)",
    "CREATE TABLE locations (
        id TEXT PRIMARY KEY NOT NULL,
        deviceId TEXT NOT NULL REFERENCES devices(id),
        name TEXT NOT NULL,
        active INTEGER NOT NULL
    )",
    "CREATE INDEX locations_deviceId ON locations(deviceId)",
];

/// Binds a [`crate::model::Profile`].
pub const INSERT_PROFILES: &str = "INSERT INTO profiles (id, name, active) VALUES (?, ?, ?)";

/// Binds a [`crate::model::Device`].
pub const INSERT_DEVICES: &str =
    "INSERT INTO devices (id, profileId, name, active) VALUES (?, ?, ?, ?)";

/// Binds a [`crate::model::Location`].
pub const INSERT_LOCATIONS: &str =
    "INSERT INTO locations (id, deviceId, name, active) VALUES (?, ?, ?, ?)";

/// Every location joined with its device and profile. Column order is
/// location, device, profile.
pub const SELECT_COMPLEX: &str = "SELECT
        locations.id, locations.deviceId, locations.name, locations.active,
        devices.id, devices.profileId, devices.name, devices.active,
        profiles.id, profiles.name, profiles.active
    FROM locations
    JOIN devices ON devices.id = locations.deviceId
    JOIN profiles ON profiles.id = devices.profileId
    WHERE locations.active >= ? AND locations.active <= ?
    ORDER BY profiles.id, devices.id, locations.id";

/// Same join as [`SELECT_COMPLEX`], restricted to a single profile.
pub const SELECT_COMPLEX_BY_PROFILE: &str = "SELECT
        locations.id, locations.deviceId, locations.name, locations.active,
        devices.id, devices.profileId, devices.name, devices.active,
        profiles.id, profiles.name, profiles.active
    FROM locations
    JOIN devices ON devices.id = locations.deviceId
    JOIN profiles ON profiles.id = devices.profileId
    WHERE profiles.id = ?
    ORDER BY devices.id, locations.id";

// relational

/// Users, articles and comments with their foreign-key indexes.
pub const CREATE_RELATIONAL: [&str; 5] = [
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY NOT NULL,
        created INTEGER NOT NULL,
        email TEXT NOT NULL,
        active INTEGER NOT NULL
    )",
    "CREATE TABLE articles (
        id INTEGER PRIMARY KEY NOT NULL,
        created INTEGER NOT NULL,
        userId INTEGER NOT NULL REFERENCES users(id),
        text TEXT NOT NULL
    )",
    "CREATE INDEX articles_userId ON articles(userId)",
    "CREATE TABLE comments (
        id INTEGER PRIMARY KEY NOT NULL,
        created INTEGER NOT NULL,
        articleId INTEGER NOT NULL REFERENCES articles(id),
        text TEXT NOT NULL
    )",
    "CREATE INDEX comments_articleId ON comments(articleId)",
];

/// Binds a [`crate::model::User`].
pub const INSERT_REL_USERS: &str =
    "INSERT INTO users (id, created, email, active) VALUES (?, ?, ?, ?)";

/// Binds a [`crate::model::Article`].
pub const INSERT_ARTICLES: &str =
    "INSERT INTO articles (id, created, userId, text) VALUES (?, ?, ?, ?)";

/// Binds a [`crate::model::Comment`].
pub const INSERT_COMMENTS: &str =
    "INSERT INTO comments (id, created, articleId, text) VALUES (?, ?, ?, ?)";

/// Full scan of `articles`.
pub const SELECT_ARTICLES: &str = "SELECT id, created, userId, text FROM articles ORDER BY id";

/// Users, articles and comments in one wide row. The ORDER BY keeps each
/// parent's rows adjacent.
pub const SELECT_USERS_ARTICLES_COMMENTS: &str = "SELECT
        users.id, users.created, users.email, users.active,
        articles.id, articles.created, articles.userId, articles.text,
        comments.id, comments.created, comments.articleId, comments.text
    FROM users
    JOIN articles ON articles.userId = users.id
    JOIN comments ON comments.articleId = articles.id
    ORDER BY users.id, articles.id, comments.id";

// concurrent

/// Table read by the concurrent workers.
pub const CREATE_BOOKS: &str = "CREATE TABLE books (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
)";

/// Binds a [`crate::model::Book`].
pub const INSERT_BOOKS: &str = "INSERT INTO books (id, name) VALUES (?, ?)";

/// Full scan of `books`.
pub const SELECT_BOOKS: &str = "SELECT id, name FROM books ORDER BY id";
