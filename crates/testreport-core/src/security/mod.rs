//! Security validation for archive entries.

pub mod permissions;
pub mod quota;
pub mod validator;

pub use permissions::sanitize_permissions;
pub use quota::QuotaTracker;
pub use validator::EntryValidator;
pub use validator::ValidatedEntry;
pub use validator::ValidatedEntryType;
