use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("snapshot '{title}' has {rows} rows; need a header plus at least one data row")]
    SnapshotTooShort { title: String, rows: usize },
}
