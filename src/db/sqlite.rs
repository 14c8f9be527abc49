use crate::config::DatabaseConfig;
use crate::db::models::{
    Armament, NewSpacecraft, Spacecraft, SpacecraftPatch, SpacecraftSummary, WriteOutcome,
};
use crate::db::schema::SQLITE_INIT;
use crate::db::update::SpacecraftUpdate;
use crate::error::SpacedockError;
use crate::service::basic_auth::Credentials;
use crate::service::password::hash_password;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const AUTH_MISMATCH: &str = "email and/or password mismatch";

#[derive(Clone)]
pub struct SpacecraftStorage {
    pool: SqlitePool,
}

impl SpacecraftStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a bounded pool for the configured database.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, SpacedockError> {
        let connect_opts = SqliteConnectOptions::from_str(&cfg.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .idle_timeout(cfg.idle_timeout())
            .max_lifetime(cfg.max_lifetime())
            .connect_with(connect_opts)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SpacedockError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Store (or replace) the digest for `email`.
    pub async fn upsert_user(&self, email: &str, password: &str) -> Result<i64, SpacedockError> {
        let rec: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (email, password) VALUES (?, ?)
            ON CONFLICT(email) DO UPDATE SET password = excluded.password
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(hash_password(password))
        .fetch_one(&self.pool)
        .await?;
        Ok(rec.0)
    }

    /// Single lookup by email and hashed password. Plain SQL equality: no
    /// lockout, no constant-time comparison.
    pub async fn verify_credentials(&self, creds: &Credentials) -> Result<(), SpacedockError> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = ? AND password = ? LIMIT 1")
                .bind(&creds.email)
                .bind(hash_password(&creds.password))
                .fetch_optional(&self.pool)
                .await?;
        match found {
            Some(_) => Ok(()),
            None => Err(SpacedockError::Authentication(AUTH_MISMATCH.to_string())),
        }
    }

    /// Insert one spacecraft. Returns the row id.
    pub async fn insert(&self, sc: &NewSpacecraft) -> Result<i64, SpacedockError> {
        let res = sqlx::query(
            r#"INSERT INTO spacecraft (name, class, crew, image, value, status)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&sc.name)
        .bind(&sc.class)
        .bind(sc.crew)
        .bind(&sc.image)
        .bind(sc.value)
        .bind(&sc.status)
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn delete(&self, id: i64) -> Result<WriteOutcome, SpacedockError> {
        let res = sqlx::query("DELETE FROM spacecraft WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(WriteOutcome::from_rows_affected(res.rows_affected()))
    }

    /// Apply a partial update. Fails before touching the database when the
    /// patch carries no field.
    pub async fn update(&self, patch: &SpacecraftPatch) -> Result<WriteOutcome, SpacedockError> {
        let update = SpacecraftUpdate::from_patch(patch)?;
        let res = update.query_builder().build().execute(&self.pool).await?;
        Ok(WriteOutcome::from_rows_affected(res.rows_affected()))
    }

    /// Armaments first, then the spacecraft row. An unknown id yields a
    /// zero-valued record rather than an error.
    pub async fn get_detailed(&self, id: i64) -> Result<Spacecraft, SpacedockError> {
        let armaments: Vec<Armament> = sqlx::query_as(
            "SELECT title, qty FROM armaments WHERE id_spacecraft = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let row: Option<Spacecraft> = sqlx::query_as(
            r#"SELECT id, name, class, crew, image, value, status
               FROM spacecraft WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let mut spacecraft = row.unwrap_or_else(|| {
            debug!(id, "spacecraft not found; returning empty record");
            Spacecraft::default()
        });
        spacecraft.armaments = armaments;
        Ok(spacecraft)
    }

    /// Case-insensitive "contains" on name, class and status, all three at once.
    pub async fn filter(
        &self,
        name: &str,
        class: &str,
        status: &str,
    ) -> Result<Vec<SpacecraftSummary>, SpacedockError> {
        let rows = sqlx::query_as(
            r#"SELECT id, name, status FROM spacecraft
               WHERE LOWER(name) LIKE ? ESCAPE '\'
                 AND LOWER(class) LIKE ? ESCAPE '\'
                 AND LOWER(status) LIKE ? ESCAPE '\'
               ORDER BY id"#,
        )
        .bind(contains_pattern(name))
        .bind(contains_pattern(class))
        .bind(contains_pattern(status))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// `%needle%` with LIKE wildcards escaped. Lowercased the way SQLite's
/// `LOWER` does it (ASCII only).
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c.to_ascii_lowercase());
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("OR"), "%or%");
        assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn pattern_keeps_whitespace_and_non_ascii() {
        assert_eq!(contains_pattern(" Star "), "% star %");
        assert_eq!(contains_pattern("Éclair"), "%Éclair%");
    }
}
