//! Record store contract shared by the flat-file and relational backings

pub mod csv_file;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{VisitEntry, VisitRecord},
};

pub use csv_file::CsvVisitStore;

/// Append-only collection of visit records, addressable by client name.
///
/// Every operation that reads or writes visits takes an explicit store
/// handle implementing this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// All records in insertion order
    async fn load_all(&self) -> AppResult<Vec<VisitRecord>>;

    /// Append one visit, numbering it as the client's next visit.
    ///
    /// The number is the count of stored records whose client name equals
    /// `entry.client_name` exactly, plus one, read under the same write as
    /// the append. Either the whole record becomes visible or nothing does.
    async fn append(&self, entry: VisitEntry) -> AppResult<VisitRecord>;
}

/// Sequence number following `prior` stored visits
pub(crate) fn next_sequence(prior: usize) -> u32 {
    u32::try_from(prior).map_or(u32::MAX, |n| n.saturating_add(1))
}
