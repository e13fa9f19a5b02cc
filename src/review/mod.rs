//! Review filing against completed transactions.
//!
//! A company reviews each freelancer of a transaction. Reviews are filed
//! under the skills the freelancer actually contributed to that transaction,
//! appended to the freelancer's history, and the profile store is persisted
//! as a whole. A content hash of each filed review can optionally be sent to
//! an external notary; that step is best-effort and never blocks filing.

mod error;
mod ledger;
mod notary;
mod transaction;

pub use error::{NotaryError, ReviewError};
pub use ledger::{file_reviews, ReviewLedger, SubmitConfirmation, SUBMITTED_MESSAGE};
pub use notary::{HttpNotarizer, NotarizationPolicy, Notarizer, NotaryDispatch, NotaryReceipt, ReviewDigest};
pub use transaction::{Transaction, TransactionStore};
