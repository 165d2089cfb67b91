//! Utility functions for string formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{capitalize_first, mask_token, or_not_set, truncate_string, NOT_SET};
