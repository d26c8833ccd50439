use dotenv::dotenv;
use rocket::tokio::sync::Mutex;
use rusqlite::{Connection, ErrorCode};
use std::env;
use std::error::Error;
use std::fmt::{self, Display};

/// Outcome of a single store operation.
#[derive(Debug)]
pub enum StoreError {
    NotFound,
    Conflict,
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "no matching row"),
            StoreError::Conflict => write!(f, "unique constraint violated"),
            StoreError::Sqlite(err) => write!(f, "{}", err),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> StoreError {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            _ => match err.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => StoreError::Conflict,
                _ => StoreError::Sqlite(err),
            },
        }
    }
}

pub fn database_url() -> String {
    dotenv().ok();
    env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Process-wide store handle, shared across requests through managed state.
/// The connection sits behind a mutex; every statement runs to completion
/// before the next one starts.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &str) -> Result<Database, StoreError> {
        Ok(Database {
            conn: Mutex::new(Connection::open(path)?),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Database, StoreError> {
        Ok(Database {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    pub async fn create_tables(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users
            (
                id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                password TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS users_username
                on users (username);
            ",
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(sql)?;
        Ok(())
    }
}
