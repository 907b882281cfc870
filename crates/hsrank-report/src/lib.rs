pub mod aggregate;
pub mod assemble;
pub mod augment;
pub mod error;
pub mod novelty;
pub mod snapshot;

pub use aggregate::{group_sum, AggregateRow};
pub use assemble::build_report;
pub use augment::augment_table;
pub use error::ReportError;
pub use novelty::{new_entries, NewEntry};
pub use snapshot::{parse_snapshot, SnapshotRow, AUGMENTED_HEADER};
