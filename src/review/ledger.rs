//! Filing reviews into profile histories.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::profile::ProfileStore;

use super::error::ReviewError;
use super::notary::{NotaryDispatch, ReviewDigest};
use super::transaction::Transaction;

/// Confirmation text shown once reviews are filed.
pub const SUBMITTED_MESSAGE: &str = "Review Submitted!";

/// Summary of a successful submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitConfirmation {
    /// Freelancers that had at least one relevant skill.
    pub freelancers_reviewed: usize,
    /// Review entries appended across all skills.
    pub entries_filed: usize,
}

impl fmt::Display for SubmitConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SUBMITTED_MESSAGE)
    }
}

/// Append `reviews` to the in-memory store.
///
/// `reviews[i]` belongs to `transaction.freelancers[i]`. Each review is
/// filed under the skills shared by the freelancer and the transaction;
/// a freelancer with no shared skill gets nothing filed. Input is validated
/// before anything is mutated.
///
/// # Errors
///
/// Returns `ReviewError::ReviewCountMismatch` if the review count differs
/// from the freelancer count, or `ReviewError::UnknownFreelancer` if the
/// transaction names a profile missing from `store`.
pub fn file_reviews<S: AsRef<str>>(
    store: &mut ProfileStore,
    transaction: &Transaction,
    company: &str,
    reviews: &[S],
    notary: &NotaryDispatch,
) -> Result<SubmitConfirmation, ReviewError> {
    if reviews.len() != transaction.freelancers.len() {
        return Err(ReviewError::ReviewCountMismatch {
            expected: transaction.freelancers.len(),
            actual: reviews.len(),
        });
    }
    if let Some(missing) = transaction
        .freelancers
        .iter()
        .find(|id| !store.contains(id.as_str()))
    {
        return Err(ReviewError::UnknownFreelancer(missing.clone()));
    }

    let mut confirmation = SubmitConfirmation::default();

    for (freelancer_id, review) in transaction.freelancers.iter().zip(reviews) {
        let review = review.as_ref();
        let Some(profile) = store.get_mut(freelancer_id) else {
            continue;
        };

        let relevant: Vec<String> = profile
            .relevant_skills(&transaction.skills)
            .into_iter()
            .map(String::from)
            .collect();
        if relevant.is_empty() {
            tracing::debug!(freelancer = %freelancer_id, "No relevant skills, review not filed");
            continue;
        }

        if notary.is_enabled() {
            let skills: Vec<&str> = relevant.iter().map(String::as_str).collect();
            notary.dispatch(ReviewDigest::compute(review, &skills));
        }

        for skill in &relevant {
            profile.append_review(company, skill, review);
        }

        tracing::info!(
            freelancer = %freelancer_id,
            company = %company,
            skills = ?relevant,
            "Filed review"
        );
        confirmation.freelancers_reviewed += 1;
        confirmation.entries_filed += relevant.len();
    }

    Ok(confirmation)
}

/// Review filing backed by a profile store document.
///
/// Each submission loads the store, applies the reviews and replaces the
/// document. Submissions through one ledger are serialized.
#[derive(Debug)]
pub struct ReviewLedger {
    profiles_path: PathBuf,
    notary: NotaryDispatch,
    guard: Mutex<()>,
}

impl ReviewLedger {
    #[must_use]
    pub fn new(profiles_path: impl Into<PathBuf>, notary: NotaryDispatch) -> Self {
        Self {
            profiles_path: profiles_path.into(),
            notary,
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn profiles_path(&self) -> &Path {
        &self.profiles_path
    }

    #[must_use]
    pub fn notary(&self) -> &NotaryDispatch {
        &self.notary
    }

    /// File one review per transaction freelancer and persist the store.
    ///
    /// Nothing is written if validation fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed (see [`file_reviews`]) or
    /// if the store cannot be loaded or saved.
    pub fn submit_reviews<S: AsRef<str>>(
        &self,
        transaction: &Transaction,
        company: &str,
        reviews: &[S],
    ) -> Result<SubmitConfirmation, ReviewError> {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut store = ProfileStore::load(&self.profiles_path)?;
        let confirmation = file_reviews(&mut store, transaction, company, reviews, &self.notary)?;
        store.save(&self.profiles_path)?;

        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn store() -> ProfileStore {
        let ana = Profile::new("Ana", "Engineer")
            .with_skill("a", 3)
            .with_skill("b", 2);
        let ben = Profile::new("Ben", "Artist").with_skill("d", 4);
        [("ana".to_string(), ana), ("ben".to_string(), ben)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_files_under_shared_skills_only() {
        let mut store = store();
        let tx = Transaction::new(["ana"], ["b", "c"]);

        let confirmation =
            file_reviews(&mut store, &tx, "Acme", &["Solid"], &NotaryDispatch::disabled()).unwrap();

        let reviews = store.get("ana").unwrap().reviews_for("Acme").unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews["b"], vec!["Solid".to_string()]);
        assert_eq!(confirmation.entries_filed, 1);
        assert_eq!(confirmation.to_string(), SUBMITTED_MESSAGE);
    }

    #[test]
    fn test_appends_to_existing_history() {
        let mut store = store();
        store
            .get_mut("ana")
            .unwrap()
            .append_review("Acme", "b", "Earlier");
        let tx = Transaction::new(["ana"], ["b"]);

        file_reviews(&mut store, &tx, "Acme", &["Later"], &NotaryDispatch::disabled()).unwrap();

        assert_eq!(
            store.get("ana").unwrap().reviews["Acme"]["b"],
            vec!["Earlier".to_string(), "Later".to_string()]
        );
    }

    #[test]
    fn test_no_relevant_skill_is_silent() {
        let mut store = store();
        let tx = Transaction::new(["ana", "ben"], ["a"]);

        let confirmation = file_reviews(
            &mut store,
            &tx,
            "Acme",
            &["Good", "Not filed"],
            &NotaryDispatch::disabled(),
        )
        .unwrap();

        assert!(store.get("ben").unwrap().reviews.is_empty());
        assert_eq!(confirmation.freelancers_reviewed, 1);
    }

    #[test]
    fn test_count_mismatch_leaves_store_untouched() {
        let mut store = store();
        let before = store.clone();
        let tx = Transaction::new(["ana", "ben"], ["a", "d"]);

        let result = file_reviews(&mut store, &tx, "Acme", &["only one"], &NotaryDispatch::disabled());

        assert!(matches!(
            result,
            Err(ReviewError::ReviewCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_unknown_freelancer_leaves_store_untouched() {
        let mut store = store();
        let before = store.clone();
        let tx = Transaction::new(["ana", "ghost"], ["a"]);

        let result = file_reviews(&mut store, &tx, "Acme", &["x", "y"], &NotaryDispatch::disabled());

        assert!(matches!(result, Err(ReviewError::UnknownFreelancer(id)) if id == "ghost"));
        assert_eq!(store, before);
    }
}
