use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, StorageError};
use crate::notify::{Notification, Notifier};
use crate::storage::{read_json, write_json, KeyValueStore, USER_KEY};
use crate::validation::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
}

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A farmer account named after the last four digits of the phone number.
    pub fn farmer(phone_number: &str) -> Self {
        let skip = phone_number.chars().count().saturating_sub(4);
        let tail: String = phone_number.chars().skip(skip).collect();
        Self {
            id: Uuid::new_v4().to_string(),
            phone_number: phone_number.to_string(),
            name: format!("Farmer {}", tail),
            role: Role::Farmer,
            created_at: Utc::now(),
        }
    }
}

/// Persists the current user. At most one user is logged in at a time.
pub struct SessionStore<S: KeyValueStore> {
    kv: Arc<S>,
    notifier: Arc<dyn Notifier>,
    current: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Restore any saved session.
    pub fn open(kv: Arc<S>, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let current = read_json::<User, _>(&*kv, USER_KEY)?;
        if let Some(user) = &current {
            tracing::info!("Restored session for {}", user.name);
        }
        Ok(Self {
            kv,
            notifier,
            current,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Log in with a phone number whose OTP has been accepted.
    pub fn login(&mut self, phone_number: &str, otp: &str) -> Result<User, CoreError> {
        Validator::validate_phone(phone_number)?;
        Validator::validate_otp(otp)?;

        let user = User::farmer(phone_number);
        write_json(&*self.kv, USER_KEY, &user)?;
        self.current = Some(user.clone());

        self.notifier.notify(Notification::success("Login successful!"));
        Ok(user)
    }

    /// Clear the session. Returns Ok(false) if nobody was logged in.
    pub fn logout(&mut self) -> Result<bool, StorageError> {
        let removed = self.kv.remove(USER_KEY)?;
        let was_logged_in = self.current.take().is_some() || removed;
        if was_logged_in {
            self.notifier
                .notify(Notification::success("Logged out successfully"));
        }
        Ok(was_logged_in)
    }
}
