//! Per-attempt result summarization
//!
//! Pure reduction of a runner's ordered transaction results into a count
//! headline and one ordinal detail line per result. No I/O happens here;
//! callers hand the lines to a health reporter.

use crate::runner::TxResult;

/// Success/total counts for one attempt's results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub success: usize,
    pub total: usize,
}

impl Summary {
    pub fn headline(&self) -> String {
        format!("Sent {}/{} transactions", self.success, self.total)
    }
}

/// Reduce `results` to counts plus detail lines, preserving original order
pub fn summarize(results: &[TxResult]) -> (Summary, Vec<String>) {
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let summary = Summary {
        success: results.len() - failed,
        total: results.len(),
    };

    let lines = results
        .iter()
        .enumerate()
        .map(|(index, result)| format!("{}: {}", index + 1, result.message))
        .collect();

    (summary, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        let (summary, lines) = summarize(&[]);
        assert_eq!(summary, Summary { success: 0, total: 0 });
        assert_eq!(summary.headline(), "Sent 0/0 transactions");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_summarize_mixed_results() {
        let results = vec![TxResult::ok("a"), TxResult::failed("b", "x")];

        let (summary, lines) = summarize(&results);
        assert_eq!(summary, Summary { success: 1, total: 2 });
        assert_eq!(summary.headline(), "Sent 1/2 transactions");
        assert_eq!(lines, vec!["1: a".to_string(), "2: b".to_string()]);
    }

    #[test]
    fn test_summarize_all_success() {
        let results = vec![TxResult::ok("a"), TxResult::ok("b"), TxResult::ok("c")];

        let (summary, lines) = summarize(&results);
        assert_eq!(summary.success, 3);
        assert_eq!(summary.total, 3);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_summarize_preserves_order() {
        let results = vec![
            TxResult::failed("first", "x"),
            TxResult::ok("second"),
            TxResult::failed("third", "y"),
        ];

        let (summary, lines) = summarize(&results);
        assert_eq!(summary.success, 1);
        assert_eq!(
            lines,
            vec!["1: first".to_string(), "2: second".to_string(), "3: third".to_string()]
        );
    }
}
