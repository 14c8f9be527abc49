//! SQL DDL for the spacecraft store (SQLite).

/// - `users.password` holds the hex digest from `service::password`
/// - `armaments` rows belong to one spacecraft and go with it on delete
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS spacecraft (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    class TEXT NOT NULL,
    crew INTEGER NOT NULL,
    image TEXT NOT NULL,
    value REAL NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS armaments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    id_spacecraft INTEGER NOT NULL REFERENCES spacecraft(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    qty INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_armaments_id_spacecraft ON armaments(id_spacecraft);
"#;
