//! Results document model and aggregation.

pub mod aggregate;
pub mod document;

pub use aggregate::ResultSummary;
pub use aggregate::StatusDiagnostic;
pub use aggregate::aggregate;
pub use document::Distribution;
pub use document::ResultsDocument;
pub use document::TestRecord;
pub use document::TestStatus;
pub use document::parse_document;
