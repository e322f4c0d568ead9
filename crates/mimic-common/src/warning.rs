//! De-duplicated warnings for degraded host-object behavior.
//!
//! Scripts tend to touch the same node types over and over; without
//! deduplication a single fallback would be reported once per access.
//! Warnings are emitted as `tracing` events so the embedding application
//! decides where they end up.
//!
//! Each owner (a page's binding registry, typically) keeps its own
//! [`WarningLog`], so pages on different threads never reset each other.

use std::collections::HashSet;

/// Warnings one owner has already emitted.
#[derive(Debug, Default, Clone)]
pub struct WarningLog {
    seen: HashSet<String>,
}

impl WarningLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about degraded behavior (emits once per unique message)
    ///
    /// Returns `true` when this call emitted the warning, `false` when an
    /// identical warning was already reported through this log.
    ///
    /// # Example
    /// ```
    /// use mimic_common::warning::WarningLog;
    ///
    /// let mut log = WarningLog::new();
    /// assert!(log.warn_once("Host", "CDATASection is hidden for ie-8"));
    /// assert!(!log.warn_once("Host", "CDATASection is hidden for ie-8"));
    /// ```
    pub fn warn_once(&mut self, component: &str, message: &str) -> bool {
        let first = self.seen.insert(format!("[{component}] {message}"));
        if first {
            tracing::warn!(component, "{message}");
        }
        first
    }

    /// Forget every recorded warning.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// Number of distinct warnings emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing was emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
