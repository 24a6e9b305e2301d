//! Response parser port
//!
//! Extracts keyed fields from raw oracle output. The contract is
//! deliberately forgiving: any subset of the expected keys may be
//! present in the result, and extraction never fails. Fields that
//! cannot be recovered are simply absent.

use std::collections::BTreeMap;

/// Extracts a sparse field map from free text.
pub trait ResponseParser: Send + Sync {
    /// Extract the expected keys from the raw response. Missing keys
    /// are absent from the map; the caller must tolerate any subset.
    fn extract(&self, raw: &str, keys: &[&str]) -> BTreeMap<String, String>;
}
