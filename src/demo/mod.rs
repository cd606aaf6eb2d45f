//! Standalone in-memory user CRUD demo.
//!
//! Entirely independent from the database-backed user service: records
//! live in a process-local [`Store`] and disappear on restart. The
//! store is an explicit value handed to the routes as shared app data,
//! not a process-wide global.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error as ThisError;

use crate::http::Error;
use crate::types;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct Store {
    users: Vec<User>,
    // Monotonic; ids are never reused, even after deletions, so a
    // stale id can never silently point at a newer record.
    next_id: u64,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn create(&mut self, name: Option<&str>, email: Option<&str>) -> Result<User, Error> {
        let (Some(name), Some(email)) = (
            name.map(str::trim).filter(|v| !v.is_empty()),
            email.map(str::trim).filter(|v| !v.is_empty()),
        ) else {
            return Err(Error::validation("Please provide name and email"));
        };

        let user = User {
            id: self.next_id,
            name: name.to_string(),
            email: email.to_string(),
        };
        self.next_id += 1;

        self.users.push(user.clone());
        Ok(user)
    }

    pub fn delete(&mut self, id: u64) -> Result<(), Error> {
        let position = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(Error::not_found)?;

        self.users.remove(position);
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, ThisError)]
#[error("demo user store mutex was poisoned")]
struct StorePoisoned;

/// Locks the shared store, turning a poisoned mutex into an internal
/// error instead of a panic in the handler.
pub fn lock(store: &Mutex<Store>) -> Result<MutexGuard<'_, Store>, Error> {
    store
        .lock()
        .map_err(|_| Error::from_context(types::Error::Internal, StorePoisoned))
}
