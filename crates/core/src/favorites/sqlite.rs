//! SQLite-backed favorites store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::debug;

use super::{Favorite, FavoritesError, FavoritesStore};
use crate::external_catalog::SearchResult;
use crate::metrics::FAVORITES_OPERATIONS;

/// SQLite-backed favorites store.
pub struct SqliteFavoritesStore {
    conn: Mutex<Connection>,
}

impl SqliteFavoritesStore {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn new(path: &Path) -> Result<Self, FavoritesError> {
        let conn = Connection::open(path).map_err(db_error)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, FavoritesError> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), FavoritesError> {
        conn.execute_batch(
            r#"
            -- One row per (user, catalog entry); the entry itself is stored as JSON
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL,
                movie_id INTEGER NOT NULL,
                movie_data TEXT NOT NULL,
                added_at TEXT NOT NULL,
                PRIMARY KEY (user_id, movie_id)
            );

            CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);
            "#,
        )
        .map_err(db_error)?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, FavoritesError> {
        self.conn
            .lock()
            .map_err(|_| FavoritesError::Database("connection lock poisoned".to_string()))
    }

    /// Columns: movie_data, user_id, added_at.
    fn row_to_favorite(row: &rusqlite::Row) -> rusqlite::Result<(String, String, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn decode(
        (movie_data, added_by, added_at): (String, String, String),
    ) -> Result<Favorite, FavoritesError> {
        let movie: SearchResult = serde_json::from_str(&movie_data)
            .map_err(|e| FavoritesError::Database(format!("corrupt movie_data: {}", e)))?;

        let added_at = DateTime::parse_from_rfc3339(&added_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| FavoritesError::Database(format!("corrupt added_at: {}", e)))?;

        Ok(Favorite {
            movie,
            added_by,
            added_at,
        })
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    fn list(&self, user: &str) -> Result<Vec<Favorite>, FavoritesError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT movie_data, user_id, added_at FROM favorites
                 WHERE user_id = ? ORDER BY rowid",
            )
            .map_err(db_error)?;

        let rows = stmt
            .query_map(params![user], Self::row_to_favorite)
            .map_err(db_error)?;

        let mut favorites = Vec::new();
        for row in rows {
            favorites.push(Self::decode(row.map_err(db_error)?)?);
        }
        Ok(favorites)
    }

    fn get(&self, user: &str, movie_id: u32) -> Result<Favorite, FavoritesError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT movie_data, user_id, added_at FROM favorites
                 WHERE user_id = ? AND movie_id = ?",
                params![user, movie_id],
                Self::row_to_favorite,
            )
            .optional()
            .map_err(db_error)?;

        match row {
            Some(row) => Self::decode(row),
            None => Err(FavoritesError::NotFound(movie_id)),
        }
    }

    fn add(&self, user: &str, movie: &SearchResult) -> Result<Favorite, FavoritesError> {
        let movie_data = serde_json::to_string(movie)
            .map_err(|e| FavoritesError::Database(format!("failed to encode movie: {}", e)))?;
        let added_at = Utc::now();

        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO favorites (user_id, movie_id, movie_data, added_at) VALUES (?, ?, ?, ?)",
            params![user, movie.id, movie_data, added_at.to_rfc3339()],
        );

        match result {
            Ok(_) => {
                FAVORITES_OPERATIONS.with_label_values(&["add", "ok"]).inc();
                debug!(user, movie_id = movie.id, "Favorite added");
                Ok(Favorite {
                    movie: movie.clone(),
                    added_by: user.to_string(),
                    added_at,
                })
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                FAVORITES_OPERATIONS
                    .with_label_values(&["add", "conflict"])
                    .inc();
                Err(FavoritesError::AlreadyExists(movie.id))
            }
            Err(e) => {
                FAVORITES_OPERATIONS
                    .with_label_values(&["add", "error"])
                    .inc();
                Err(db_error(e))
            }
        }
    }

    fn remove(&self, user: &str, movie_id: u32) -> Result<(), FavoritesError> {
        let conn = self.conn()?;
        let deleted = conn
            .execute(
                "DELETE FROM favorites WHERE user_id = ? AND movie_id = ?",
                params![user, movie_id],
            )
            .map_err(db_error)?;

        if deleted == 0 {
            FAVORITES_OPERATIONS
                .with_label_values(&["remove", "not_found"])
                .inc();
            return Err(FavoritesError::NotFound(movie_id));
        }

        FAVORITES_OPERATIONS
            .with_label_values(&["remove", "ok"])
            .inc();
        debug!(user, movie_id, "Favorite removed");
        Ok(())
    }
}

fn db_error(e: rusqlite::Error) -> FavoritesError {
    FavoritesError::Database(e.to_string())
}
