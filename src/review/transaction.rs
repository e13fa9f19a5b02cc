//! Completed engagements that scope review filing.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ReviewError;

/// A completed engagement between a company and a set of freelancers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Freelancers in the order their reviews are collected.
    pub freelancers: Vec<String>,
    /// Skills the engagement exercised; reviews are filed under these only.
    pub skills: HashSet<String>,
}

impl Transaction {
    #[must_use]
    pub fn new<F, S>(freelancers: F, skills: S) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            freelancers: freelancers.into_iter().map(Into::into).collect(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only view of the transaction document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionStore {
    transactions: HashMap<String, Transaction>,
}

impl TransactionStore {
    /// Load all transactions from a JSON document keyed by transaction id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReviewError> {
        let content = fs::read_to_string(path).map_err(|e| ReviewError::TransactionRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ReviewError::TransactionParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look up a transaction.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::TransactionNotFound` if the id is unknown.
    pub fn get(&self, id: &str) -> Result<&Transaction, ReviewError> {
        self.transactions
            .get(id)
            .ok_or_else(|| ReviewError::TransactionNotFound(id.to_string()))
    }

    pub fn insert(&mut self, id: impl Into<String>, transaction: Transaction) {
        self.transactions.insert(id.into(), transaction);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
