//! Account signup and login

use crate::core::error::{GradebookError, Result};
use crate::core::models::{Role, Session, UserAccount};
use crate::core::storage::TableStore;
use crate::info;

/// In-memory set of accounts keyed by unique username
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBook {
    accounts: Vec<UserAccount>,
}

impl AccountBook {
    /// Build from stored accounts
    #[must_use]
    pub const fn from_accounts(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// All accounts in signup order
    #[must_use]
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    /// Check a username/password pair.
    ///
    /// Both inputs are trimmed before comparison.
    ///
    /// # Errors
    /// `AuthFailure` if no account matches
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        let password = password.trim();
        self.accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .map(|a| Session::new(a.username.clone(), a.role))
            .ok_or(GradebookError::AuthFailure)
    }

    /// Create a new account
    ///
    /// # Errors
    /// * `Validation` if username or password is blank
    /// * `DuplicateUsername` if the username is taken
    pub fn register(&mut self, username: &str, password: &str, role: Role) -> Result<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(GradebookError::Validation { field: "username" });
        }
        if password.is_empty() {
            return Err(GradebookError::Validation { field: "password" });
        }
        if self.accounts.iter().any(|a| a.username == username) {
            return Err(GradebookError::DuplicateUsername(username.to_string()));
        }
        self.accounts.push(UserAccount::new(
            username.to_string(),
            password.to_string(),
            role,
        ));
        Ok(())
    }
}

/// Account book persisted through a [`TableStore`]
#[derive(Debug)]
pub struct Authenticator<A> {
    store: A,
}

impl<A: TableStore<UserAccount>> Authenticator<A> {
    /// Wrap an accounts table
    pub const fn new(store: A) -> Self {
        Self { store }
    }

    /// Log in, producing a session on success
    ///
    /// # Errors
    /// `AuthFailure` on bad credentials; storage errors
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let book = AccountBook::from_accounts(self.store.load_all()?);
        let session = book.authenticate(username, password)?;
        info!("User {} logged in as {}", session.username, session.role);
        Ok(session)
    }

    /// Sign up a new account and persist it
    ///
    /// # Errors
    /// See [`AccountBook::register`]; also storage errors
    pub fn register(&mut self, username: &str, password: &str, role: Role) -> Result<()> {
        let mut book = AccountBook::from_accounts(self.store.load_all()?);
        book.register(username, password, role)?;
        self.store.save_all(book.accounts())?;
        info!("Account {} created with role {role}", username.trim());
        Ok(())
    }
}
