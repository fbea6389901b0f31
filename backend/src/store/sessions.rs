use super::{Store, StoreError};
use chrono::{Duration, Utc};
use common::model::user::User;
use rusqlite::{params, OptionalExtension};

impl Store {
    /// Opens a session for `user_id` and returns its opaque token.
    pub fn create_session(&self, user_id: &str, hours: i64) -> Result<String, StoreError> {
        let token = uuid::Uuid::new_v4().to_string();
        let expires_at = (Utc::now() + Duration::hours(hours.max(1))).timestamp();
        self.conn()?.execute(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, expires_at],
        )?;
        Ok(token)
    }

    /// The account behind a live session token. Expired rows are swept first.
    pub fn session_user(&self, token: &str) -> Result<Option<User>, StoreError> {
        let user_id: Option<String> = {
            let conn = self.conn()?;
            conn.execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                params![Utc::now().timestamp()],
            )?;
            conn.query_row(
                "SELECT user_id FROM sessions WHERE token = ?1",
                params![token],
                |row| row.get(0),
            )
            .optional()?
        };

        match user_id {
            Some(id) => self.find_user_by_id(&id),
            None => Ok(None),
        }
    }

    pub fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.conn()?
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn expire_session(&self, token: &str) -> Result<(), StoreError> {
        self.conn()?.execute(
            "UPDATE sessions SET expires_at = ?1 WHERE token = ?2",
            params![Utc::now().timestamp() - 1, token],
        )?;
        Ok(())
    }
}
