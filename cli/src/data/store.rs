//! Local SQLite storage for stride.
//!
//! Holds the step baseline preference, daily step snapshots, logged meals
//! and activities, the supplement list and GPS location history.

use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use chrono::{Days, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use stride_energy::{Activity, EnergyBalanceTracker, EnergyError, Meal};
use stride_steps::BaselineStore;
use tracing::debug;

use crate::config::data_dir;
use crate::data::records::{
    DailySteps, Location, LoggedActivity, LoggedMeal, Supplement, Unit, DATE_FORMAT,
};

const CURRENT_SCHEMA_VERSION: i32 = 2;
const DATABASE_NAME: &str = "stride.db";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored record is invalid: {0}")]
    InvalidRecord(#[from] EnergyError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open or create the database in the data directory
    pub fn open() -> Result<Self> {
        let dir = data_dir();
        std::fs::create_dir_all(&dir)?;
        Self::open_at(dir.join(DATABASE_NAME))
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        let mut store = Self { conn, path };
        store.initialize_schema()?;
        debug!(path = %store.path.display(), "Opened store");

        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self {
            conn,
            path: PathBuf::from(":memory:"),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> Result<u64> {
        if self.path.to_string_lossy() == ":memory:" {
            return Ok(0);
        }
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn initialize_schema(&mut self) -> Result<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            self.create_initial_schema()?;
        } else if version < CURRENT_SCHEMA_VERSION {
            self.run_migrations(version)?;
        } else if version > CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                version,
                supported = CURRENT_SCHEMA_VERSION,
                "Database was created by a newer stride"
            );
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )?;

        if !exists {
            return Ok(0);
        }

        let version: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        Ok(version)
    }

    fn create_initial_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            r#"
            CREATE TABLE schema_version (
                version INTEGER NOT NULL
            );

            -- Float preferences (step baseline)
            CREATE TABLE preferences (
                key TEXT PRIMARY KEY,
                value REAL NOT NULL
            );

            CREATE TABLE daily_steps (
                date TEXT PRIMARY KEY,
                steps INTEGER NOT NULL,
                recorded_at INTEGER NOT NULL
            );

            CREATE TABLE meals (
                id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                weight_grams REAL NOT NULL,
                kcal_per_100g REAL NOT NULL
            );
            CREATE INDEX idx_meals_date ON meals(date);

            CREATE TABLE activities (
                id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                met REAL NOT NULL,
                duration_minutes REAL NOT NULL,
                weight_kg REAL NOT NULL
            );
            CREATE INDEX idx_activities_date ON activities(date);

            CREATE TABLE supplements (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                capacity INTEGER NOT NULL,
                unit TEXT NOT NULL,
                picture TEXT,
                expires_on TEXT NOT NULL
            );
            CREATE INDEX idx_supplements_name ON supplements(name);
            "#,
        )?;
        tx.execute_batch(LOCATIONS_TABLE)?;

        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [CURRENT_SCHEMA_VERSION],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn run_migrations(&mut self, from_version: i32) -> Result<()> {
        let tx = self.conn.transaction()?;

        if from_version < 2 {
            tx.execute_batch(LOCATIONS_TABLE)?;
        }

        tx.execute(
            "UPDATE schema_version SET version = ?",
            [CURRENT_SCHEMA_VERSION],
        )?;

        tx.commit()?;
        debug!(from_version, to = CURRENT_SCHEMA_VERSION, "Migrated store");
        Ok(())
    }

    // ---- Daily steps ----

    /// Stores the step count for a day, replacing any earlier snapshot
    pub fn upsert_daily_steps(&self, entry: &DailySteps) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_steps (date, steps, recorded_at) VALUES (?, ?, ?)
             ON CONFLICT(date) DO UPDATE SET
                steps = excluded.steps,
                recorded_at = excluded.recorded_at",
            params![
                entry.date.format(DATE_FORMAT).to_string(),
                entry.steps,
                entry.recorded_at
            ],
        )?;
        Ok(())
    }

    pub fn get_daily_steps(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailySteps>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, steps, recorded_at FROM daily_steps
             WHERE date >= ? AND date <= ?
             ORDER BY date ASC",
        )?;

        let rows = stmt
            .query_map(
                params![
                    from.format(DATE_FORMAT).to_string(),
                    to.format(DATE_FORMAT).to_string()
                ],
                |row| {
                    Ok(DailySteps {
                        date: date_column(row, 0)?,
                        steps: row.get(1)?,
                        recorded_at: row.get(2)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn get_daily_steps_for(&self, date: NaiveDate) -> Result<Option<DailySteps>> {
        Ok(self.get_daily_steps(date, date)?.into_iter().next())
    }

    // ---- Meals and activities ----

    pub fn insert_meal(&self, date: NaiveDate, meal: &Meal) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO meals (date, name, weight_grams, kcal_per_100g) VALUES (?, ?, ?, ?)",
            params![
                date.format(DATE_FORMAT).to_string(),
                meal.name(),
                meal.weight_grams(),
                meal.kcal_per_100g()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_meals(&self, date: NaiveDate) -> Result<Vec<LoggedMeal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, weight_grams, kcal_per_100g FROM meals
             WHERE date = ? ORDER BY id ASC",
        )?;

        let rows = stmt
            .query_map([date.format(DATE_FORMAT).to_string()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f32>(2)?,
                    row.get::<_, f32>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, weight_grams, kcal_per_100g)| {
                Ok(LoggedMeal {
                    id,
                    date,
                    meal: Meal::new(name, weight_grams, kcal_per_100g)?,
                })
            })
            .collect()
    }

    pub fn insert_activity(&self, date: NaiveDate, activity: &Activity) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO activities (date, name, met, duration_minutes, weight_kg)
             VALUES (?, ?, ?, ?, ?)",
            params![
                date.format(DATE_FORMAT).to_string(),
                activity.name(),
                activity.met(),
                activity.duration_minutes(),
                activity.weight_kg()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_activities(&self, date: NaiveDate) -> Result<Vec<LoggedActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, met, duration_minutes, weight_kg FROM activities
             WHERE date = ? ORDER BY id ASC",
        )?;

        let rows = stmt
            .query_map([date.format(DATE_FORMAT).to_string()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f32>(2)?,
                    row.get::<_, f32>(3)?,
                    row.get::<_, f32>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, met, duration_minutes, weight_kg)| {
                Ok(LoggedActivity {
                    id,
                    date,
                    activity: Activity::new(name, met, duration_minutes, weight_kg)?,
                })
            })
            .collect()
    }

    /// Builds a tracker holding everything logged on `date`, in logging order.
    pub fn tracker_for_date(&self, date: NaiveDate) -> Result<EnergyBalanceTracker> {
        let meals = self.get_meals(date)?.into_iter().map(|m| m.meal);
        let activities = self.get_activities(date)?.into_iter().map(|a| a.activity);
        Ok(EnergyBalanceTracker::from_records(meals, activities))
    }

    // ---- Supplements ----

    pub fn insert_supplement(&self, supplement: &Supplement) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO supplements (name, capacity, unit, picture, expires_on)
             VALUES (?, ?, ?, ?, ?)",
            params![
                supplement.name,
                supplement.capacity,
                supplement.unit.as_str(),
                supplement.picture,
                supplement.expires_on.format(DATE_FORMAT).to_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All supplements, soonest expiry first
    pub fn get_supplements(&self) -> Result<Vec<Supplement>> {
        self.query_supplements(
            "SELECT id, name, capacity, unit, picture, expires_on FROM supplements
             ORDER BY expires_on ASC, id ASC",
            params![],
        )
    }

    pub fn get_supplements_by_name(&self, name: &str) -> Result<Vec<Supplement>> {
        self.query_supplements(
            "SELECT id, name, capacity, unit, picture, expires_on FROM supplements
             WHERE name = ? COLLATE NOCASE
             ORDER BY expires_on ASC, id ASC",
            [name],
        )
    }

    pub fn get_supplement(&self, id: i64) -> Result<Option<Supplement>> {
        Ok(self
            .query_supplements(
                "SELECT id, name, capacity, unit, picture, expires_on FROM supplements
                 WHERE id = ?",
                [id],
            )?
            .into_iter()
            .next())
    }

    /// Returns false if no supplement had that id
    pub fn delete_supplement(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM supplements WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }

    fn query_supplements<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<Supplement>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                let unit: String = row.get(3)?;
                let unit = unit.parse::<Unit>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                })?;

                Ok(Supplement {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    capacity: row.get(2)?,
                    unit,
                    picture: row.get(4)?,
                    expires_on: date_column(row, 5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ---- Location history ----

    pub fn insert_location(&self, location: &Location) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO locations (latitude, longitude, timestamp, accuracy) VALUES (?, ?, ?, ?)",
            params![
                location.latitude,
                location.longitude,
                location.timestamp,
                location.accuracy
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Recorded fixes, newest first. `limit` of `None` returns all of them.
    pub fn get_locations(&self, limit: Option<u32>) -> Result<Vec<Location>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, latitude, longitude, timestamp, accuracy FROM locations
             ORDER BY timestamp DESC, id DESC
             LIMIT ?",
        )?;

        // SQLite treats a negative LIMIT as no limit
        let limit = limit.map_or(-1, i64::from);
        let rows = stmt
            .query_map([limit], |row| {
                Ok(Location {
                    id: Some(row.get(0)?),
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                    timestamp: row.get(3)?,
                    accuracy: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    // ---- Maintenance ----

    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let count = |table: &str| -> Result<i64> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?)
        };

        Ok(DatabaseStats {
            daily_steps_count: count("daily_steps")?,
            meal_count: count("meals")?,
            activity_count: count("activities")?,
            supplement_count: count("supplements")?,
            location_count: count("locations")?,
            size_bytes: self.size_bytes()?,
        })
    }
}

impl BaselineStore for Store {
    type Error = StoreError;

    fn get_float(&self, key: &str) -> Result<Option<f32>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?",
                [key],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;
        Ok(value.map(|v| v as f32))
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value as f64],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?", [key])?;
        Ok(())
    }
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

const LOCATIONS_TABLE: &str = r#"
    CREATE TABLE locations (
        id INTEGER PRIMARY KEY,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        timestamp INTEGER NOT NULL,
        accuracy REAL
    );
    CREATE INDEX idx_locations_timestamp ON locations(timestamp);
"#;

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub daily_steps_count: i64,
    pub meal_count: i64,
    pub activity_count: i64,
    pub supplement_count: i64,
    pub location_count: i64,
    pub size_bytes: u64,
}

impl DatabaseStats {
    pub fn size_formatted(&self) -> String {
        ByteSize::b(self.size_bytes).to_string()
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The date `days` before today, or `None` if that is before the earliest
/// representable date.
pub fn days_ago(days: u32) -> Option<NaiveDate> {
    today().checked_sub_days(Days::new(u64::from(days)))
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn now_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
