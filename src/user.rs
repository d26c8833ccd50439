use rocket::serde::{Deserialize, Serialize};
use rusqlite::Row;

use crate::database::{Database, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Row including the stored bcrypt hash, only pulled out for login checks.
#[derive(Debug)]
pub struct UserPass {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromForm, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, UriDisplayQuery))]
#[serde(crate = "rocket::serde")]
pub struct FormAddUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, FromForm, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, UriDisplayQuery))]
#[serde(crate = "rocket::serde")]
pub struct FormUpdateUser {
    pub username: String,
    pub password: Option<String>,
}

impl Database {
    /// Inserts a user row. The password must already be hashed.
    pub async fn add_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            (username, password_hash),
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            username: username.to_string(),
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, username FROM users")?;
        let rows = stmt.query_map([], map_user)?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }

        Ok(users)
    }

    pub async fn user_select_id(&self, user_id: i64) -> Result<User, StoreError> {
        let conn = self.conn.lock().await;
        let user = conn.query_row(
            "SELECT id, username FROM users WHERE id = ?1",
            [user_id],
            map_user,
        )?;

        Ok(user)
    }

    pub async fn user_select_username(&self, username: &str) -> Result<UserPass, StoreError> {
        let conn = self.conn.lock().await;
        let user = conn.query_row(
            "SELECT id, username, password FROM users WHERE username = ?1",
            [username],
            map_user_pass,
        )?;

        Ok(user)
    }

    /// Rewrites the username, and the password only when a new hash is
    /// supplied. Touching zero rows is not an error.
    pub async fn update_user(
        &self,
        user_id: i64,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;
        let updated = match password_hash {
            Some(hash) => conn.execute(
                "UPDATE users SET username = ?1, password = ?2 WHERE id = ?3",
                (username, hash, user_id),
            )?,
            None => conn.execute(
                "UPDATE users SET username = ?1 WHERE id = ?2",
                (username, user_id),
            )?,
        };

        Ok(updated)
    }

    /// Touching zero rows is not an error.
    pub async fn delete_user(&self, user_id: i64) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;

        Ok(deleted)
    }
}

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
    })
}

fn map_user_pass(row: &Row) -> rusqlite::Result<UserPass> {
    Ok(UserPass {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
    })
}
