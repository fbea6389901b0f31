use super::{now_rfc3339, Store, StoreError};
use common::model::user::{Provider, User};
use rusqlite::{params, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, name, email, password_hash, provider, image, request_count, \
                            last_request, is_premium, created_at";

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub provider: Provider,
    pub image: Option<&'a str>,
}

/// Result of trying to count one more analysis for an account.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Counted(User),
    LimitReached(User),
    UnknownUser,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<(User, String)> {
    let provider: String = row.get(4)?;
    Ok((
        User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            provider: Provider::default(),
            image: row.get(5)?,
            request_count: row.get(6)?,
            last_request: row.get(7)?,
            is_premium: row.get(8)?,
            created_at: row.get(9)?,
        },
        provider,
    ))
}

fn with_provider((mut user, provider): (User, String)) -> Result<User, StoreError> {
    user.provider = provider.parse().map_err(StoreError::Corrupt)?;
    Ok(user)
}

impl Store {
    pub fn create_user(&self, new_user: NewUser<'_>) -> Result<User, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_rfc3339();
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO users (id, name, email, password_hash, provider, image, request_count, \
                                last_request, is_premium, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, 0, ?7)",
            params![
                id,
                new_user.name,
                new_user.email,
                new_user.password_hash,
                new_user.provider.as_str(),
                new_user.image,
                now
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::DuplicateEmail)
            }
            Err(e) => return Err(e.into()),
        }

        Ok(User {
            id,
            name: new_user.name.to_string(),
            email: new_user.email.to_string(),
            password_hash: new_user.password_hash.map(str::to_string),
            provider: new_user.provider,
            image: new_user.image.map(str::to_string),
            request_count: 0,
            last_request: now.clone(),
            is_premium: false,
            created_at: now,
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            params![email],
            user_from_row,
        )
        .optional()?
        .map(with_provider)
        .transpose()
    }

    pub fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            params![id],
            user_from_row,
        )
        .optional()?
        .map(with_provider)
        .transpose()
    }

    /// First OAuth sign-in creates a password-less account; later sign-ins
    /// return the existing one untouched.
    pub fn upsert_oauth_user(
        &self,
        name: &str,
        email: &str,
        provider: Provider,
        image: Option<&str>,
    ) -> Result<User, StoreError> {
        if let Some(existing) = self.find_user_by_email(email)? {
            return Ok(existing);
        }
        match self.create_user(NewUser {
            name,
            email,
            password_hash: None,
            provider,
            image,
        }) {
            Err(StoreError::DuplicateEmail) => self
                .find_user_by_email(email)?
                .ok_or_else(|| StoreError::Corrupt(format!("user {} vanished", email))),
            other => other,
        }
    }

    /// Counts one analysis if the account is premium or still under
    /// `free_requests`. The check and the increment are the same statement,
    /// so concurrent sessions of one account cannot overshoot the limit.
    pub fn consume_request(
        &self,
        user_id: &str,
        free_requests: u32,
    ) -> Result<RequestOutcome, StoreError> {
        let changed = {
            let conn = self.conn()?;
            conn.execute(
                "UPDATE users
                 SET request_count = request_count + 1, last_request = ?1
                 WHERE id = ?2 AND (is_premium = 1 OR request_count < ?3)",
                params![now_rfc3339(), user_id, free_requests],
            )?
        };

        Ok(match self.find_user_by_id(user_id)? {
            None => RequestOutcome::UnknownUser,
            Some(user) if changed == 1 => RequestOutcome::Counted(user),
            Some(user) => RequestOutcome::LimitReached(user),
        })
    }

    /// Gives back one counted analysis, e.g. when the analysis itself failed.
    /// Never goes below zero. `None` when the account does not exist.
    pub fn release_request(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        self.conn()?.execute(
            "UPDATE users SET request_count = request_count - 1
             WHERE id = ?1 AND request_count > 0",
            params![user_id],
        )?;
        self.find_user_by_id(user_id)
    }

    #[cfg(test)]
    pub(crate) fn set_premium(&self, user_id: &str, premium: bool) -> Result<(), StoreError> {
        self.conn()?.execute(
            "UPDATE users SET is_premium = ?1 WHERE id = ?2",
            params![premium, user_id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada(store: &Store) -> User {
        store
            .create_user(NewUser {
                name: "Ada",
                email: "ada@example.com",
                password_hash: Some("$argon2id$stub"),
                provider: Provider::Credentials,
                image: None,
            })
            .unwrap()
    }

    #[test]
    fn creates_and_finds_users() {
        let store = Store::open_in_memory().unwrap();
        let created = ada(&store);
        assert_eq!(created.request_count, 0);
        assert!(!created.is_premium);

        let by_email = store.find_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(by_email, created);
        let by_id = store.find_user_by_id(&created.id).unwrap().unwrap();
        assert_eq!(by_id.provider, Provider::Credentials);
        assert!(store.find_user_by_email("bob@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        ada(&store);
        let err = store
            .create_user(NewUser {
                name: "Other Ada",
                email: "ada@example.com",
                password_hash: None,
                provider: Provider::Google,
                image: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[test]
    fn oauth_upsert_creates_once() {
        let store = Store::open_in_memory().unwrap();
        let first = store
            .upsert_oauth_user("Grace", "grace@example.com", Provider::Google, Some("http://img"))
            .unwrap();
        assert_eq!(first.password_hash, None);
        assert_eq!(first.provider, Provider::Google);

        let second = store
            .upsert_oauth_user("Grace H.", "grace@example.com", Provider::Google, None)
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Grace");
    }

    #[test]
    fn requests_are_counted_up_to_the_limit() {
        let store = Store::open_in_memory().unwrap();
        let user = ada(&store);

        for expected in 1..=2 {
            match store.consume_request(&user.id, 2).unwrap() {
                RequestOutcome::Counted(u) => assert_eq!(u.request_count, expected),
                other => panic!("unexpected {:?}", other),
            }
        }
        match store.consume_request(&user.id, 2).unwrap() {
            RequestOutcome::LimitReached(u) => assert_eq!(u.request_count, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn premium_accounts_bypass_the_limit() {
        let store = Store::open_in_memory().unwrap();
        let user = ada(&store);
        store.set_premium(&user.id, true).unwrap();

        for _ in 0..3 {
            assert!(matches!(
                store.consume_request(&user.id, 1).unwrap(),
                RequestOutcome::Counted(_)
            ));
        }
    }

    #[test]
    fn unknown_user_is_reported() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(
            store.consume_request("missing", 5).unwrap(),
            RequestOutcome::UnknownUser
        );
    }

    #[test]
    fn released_request_is_not_counted() {
        let store = Store::open_in_memory().unwrap();
        let user = ada(&store);

        assert!(matches!(
            store.consume_request(&user.id, 1).unwrap(),
            RequestOutcome::Counted(_)
        ));
        let released = store.release_request(&user.id).unwrap().unwrap();
        assert_eq!(released.request_count, 0);

        // The freed slot can be used again.
        assert!(matches!(
            store.consume_request(&user.id, 1).unwrap(),
            RequestOutcome::Counted(_)
        ));
    }

    #[test]
    fn release_never_goes_negative() {
        let store = Store::open_in_memory().unwrap();
        let user = ada(&store);
        let released = store.release_request(&user.id).unwrap().unwrap();
        assert_eq!(released.request_count, 0);
        assert!(store.release_request("missing").unwrap().is_none());
    }
}
