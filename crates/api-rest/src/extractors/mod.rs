//! Request extractors.

pub mod pagination;
pub mod validated_json;

pub use pagination::Pagination;
pub use validated_json::ValidatedJson;
