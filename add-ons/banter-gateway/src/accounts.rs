//! File-backed account store.
//!
//! Accounts live in a `username|password` line file, hydrated into a
//! concurrent map at startup; signup appends to the file so accounts survive
//! restarts. The engine itself never touches this store; it belongs entirely
//! to the host layer.

use dashmap::DashMap;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SignupError {
    /// Username or password empty after trimming.
    EmptyField,
    /// `|` is the line separator and cannot appear in either field.
    InvalidCharacter,
    UsernameTaken,
    Io(std::io::Error),
}

impl fmt::Display for SignupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignupError::EmptyField => write!(f, "enter username and password"),
            SignupError::InvalidCharacter => write!(f, "character '|' is not allowed"),
            SignupError::UsernameTaken => write!(f, "username already exists"),
            SignupError::Io(e) => write!(f, "account store write failed: {}", e),
        }
    }
}

impl std::error::Error for SignupError {}

pub struct AccountStore {
    users: DashMap<String, String>,
    path: PathBuf,
}

impl AccountStore {
    /// Opens the store, hydrating from the backing file. An unreadable file
    /// yields an empty store, mirroring the table-load contract.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = DashMap::new();
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                for line in source.lines() {
                    if let Some((name, password)) = line.split_once('|') {
                        users.insert(name.to_string(), password.to_string());
                    }
                }
                tracing::info!(
                    target: "banter::gateway",
                    path = %path.display(),
                    accounts = users.len(),
                    "account store loaded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: "banter::gateway",
                    path = %path.display(),
                    error = %e,
                    "account file unreadable, starting empty"
                );
            }
        }
        Self { users, path }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Checks a username/password pair against the store.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map_or(false, |stored| stored.value().as_str() == password)
    }

    /// Registers a new account and appends it to the backing file.
    pub fn signup(&self, username: &str, password: &str) -> Result<(), SignupError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(SignupError::EmptyField);
        }
        if username.contains('|') || password.contains('|') {
            return Err(SignupError::InvalidCharacter);
        }
        if self.users.contains_key(username) {
            return Err(SignupError::UsernameTaken);
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(SignupError::Io)?;
        writeln!(file, "{}|{}", username, password).map_err(SignupError::Io)?;

        self.users
            .insert(username.to_string(), password.to_string());
        tracing::info!(target: "banter::gateway", username, "account created");
        Ok(())
    }
}
