//! Aggregate queries the analytics engine runs against a transaction store
//!
//! Every method takes an explicit owner; there is no ambient "current user".

use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{CategoryTotal, TransactionKind};
use crate::period::Period;

/// Read-only aggregates over an owner's transactions
pub trait TransactionStore {
    /// Sum of amounts of the given kind dated within `period` (zero when nothing matches)
    fn sum_by_kind(&self, owner: &str, period: Period, kind: TransactionKind) -> Result<Decimal>;

    /// Per-category sums of the given kind dated within `period`
    ///
    /// Ordered by total descending, then category name ascending.
    fn group_sum_by_category(
        &self,
        owner: &str,
        period: Period,
        kind: TransactionKind,
    ) -> Result<Vec<CategoryTotal>>;
}
