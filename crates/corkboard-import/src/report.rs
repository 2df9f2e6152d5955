//! Import accounting types.

use serde::Serialize;

/// Accounting for one import run -- or one subtree of it.
///
/// The recursive walk builds one report per subtree and merges them upward
/// with [`absorb`](Self::absorb); there is no shared mutable counter state
/// across recursion frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Nodes successfully inserted.
    pub success_count: usize,
    /// Nodes skipped due to a structural or insertion failure. A failed node
    /// counts once, regardless of how many descendants it had.
    pub error_count: usize,
    /// Truncated per-node diagnostics, in walk order.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Report for a single successfully inserted node.
    pub fn success() -> Self {
        Self {
            success_count: 1,
            ..Self::default()
        }
    }

    /// Report for a single skipped node.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error_count: 1,
            errors: vec![message.into()],
            ..Self::default()
        }
    }

    /// Folds a child subtree's report into this one.
    pub fn absorb(&mut self, other: Self) {
        self.success_count += other.success_count;
        self.error_count += other.error_count;
        self.errors.extend(other.errors);
    }

    /// Returns `true` when every node was inserted.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

/// Overall outcome of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The document's `items` list was missing or empty; nothing was written.
    Nothing,
    /// The walk ran to completion, possibly with per-node failures.
    Completed(ImportReport),
}

impl ImportOutcome {
    /// The report, when the walk actually ran.
    pub fn report(&self) -> Option<&ImportReport> {
        match self {
            Self::Nothing => None,
            Self::Completed(report) => Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_merges_counts_and_errors() {
        let mut report = ImportReport::success();
        report.absorb(ImportReport::failure("bad node"));
        report.absorb(ImportReport::success());

        assert_eq!(report.success_count, 2);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.errors, vec!["bad node"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(ImportReport::default().is_clean());
    }

    #[test]
    fn outcome_report_access() {
        assert!(ImportOutcome::Nothing.report().is_none());
        let outcome = ImportOutcome::Completed(ImportReport::success());
        assert_eq!(outcome.report().map(|r| r.success_count), Some(1));
    }
}
