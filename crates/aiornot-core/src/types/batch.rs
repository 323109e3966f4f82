//! Batch outcome and summary types with JSONL serialization.

use std::path::Path;

use serde::Serialize;

use crate::error::{AiornotError, Result};

/// What happened to one batch item: a parsed report, or an error tag
/// plus its human-readable message.
#[derive(Debug, Clone)]
pub enum BatchOutcome<T> {
    Success(T),
    Error { kind: String, message: String },
}

/// Result of a single item in a batch operation.
///
/// `input` is the display label for the item (file path, URL, text, or a
/// `<N bytes>` placeholder). The batch engine never rewrites it;
/// presentation layers may (the CLI swaps text content for the source
/// file path).
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
    pub input: String,
    pub outcome: BatchOutcome<T>,
    pub duration_ms: Option<u64>,
}

impl<T> BatchResult<T> {
    pub fn success(input: impl Into<String>, value: T, duration_ms: u64) -> Self {
        Self {
            input: input.into(),
            outcome: BatchOutcome::Success(value),
            duration_ms: Some(duration_ms),
        }
    }

    pub fn failure(
        input: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            input: input.into(),
            outcome: BatchOutcome::Error {
                kind: kind.into(),
                message: message.into(),
            },
            duration_ms: Some(duration_ms),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Success(_))
    }

    /// The parsed report, for success outcomes.
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            BatchOutcome::Success(value) => Some(value),
            BatchOutcome::Error { .. } => None,
        }
    }
}

impl<T: Serialize> BatchResult<T> {
    /// Serialize to a single JSONL record.
    pub fn to_jsonl(&self) -> std::result::Result<String, serde_json::Error> {
        let mut record = match &self.outcome {
            BatchOutcome::Success(value) => serde_json::json!({
                "status": "success",
                "input": self.input,
                "result": serde_json::to_value(value)?,
            }),
            BatchOutcome::Error { kind, message } => serde_json::json!({
                "status": "error",
                "input": self.input,
                "error": kind,
                "message": message,
            }),
        };
        if let Some(duration_ms) = self.duration_ms {
            record["duration_ms"] = serde_json::json!(duration_ms);
        }
        serde_json::to_string(&record)
    }
}

/// Finalized summary of a batch run.
///
/// Built once when every item has completed; the counters always satisfy
/// `succeeded + failed == total == results.len()`. Results keep input
/// order regardless of completion order.
#[derive(Debug, Clone)]
pub struct BatchSummary<T> {
    results: Vec<BatchResult<T>>,
    total: usize,
    succeeded: usize,
    failed: usize,
}

impl<T> BatchSummary<T> {
    /// Build a summary from completed outcomes, deriving the counters.
    pub fn from_results(results: Vec<BatchResult<T>>) -> Self {
        let total = results.len();
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            results,
            total,
            succeeded,
            failed: total - succeeded,
        }
    }

    pub fn results(&self) -> &[BatchResult<T>] {
        &self.results
    }

    /// Mutable access for presentation-layer relabeling of `input`
    /// fields. Outcome payloads and counters stay fixed.
    pub fn results_mut(&mut self) -> &mut [BatchResult<T>] {
        &mut self.results
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Fraction of items that succeeded; 0.0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.succeeded as f64 / self.total as f64
        } else {
            0.0
        }
    }

    /// The parsed reports of all successful items, in input order.
    pub fn successful(&self) -> Vec<&T> {
        self.results.iter().filter_map(|r| r.value()).collect()
    }

    /// The failed results, in input order.
    pub fn errors(&self) -> Vec<&BatchResult<T>> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }
}

impl<T: Serialize> BatchSummary<T> {
    /// One JSONL line per result plus a trailing summary line.
    pub fn jsonl_lines(&self) -> std::result::Result<Vec<String>, serde_json::Error> {
        let mut lines = Vec::with_capacity(self.results.len() + 1);
        for result in &self.results {
            lines.push(result.to_jsonl()?);
        }
        lines.push(serde_json::to_string(&serde_json::json!({
            "status": "summary",
            "total": self.total,
            "succeeded": self.succeeded,
            "failed": self.failed,
            "success_rate": self.success_rate(),
        }))?);
        Ok(lines)
    }

    /// Write all result lines plus the summary line to a file.
    pub fn write_jsonl(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let lines = self
            .jsonl_lines()
            .map_err(|e| AiornotError::Decode(e.to_string()))?;
        let mut contents = lines.join("\n");
        contents.push('\n');
        std::fs::write(path, contents).map_err(|e| AiornotError::File {
            path: path.to_path_buf(),
            message: format!("Failed to write {}: {e}", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct FakeReport {
        verdict: &'static str,
    }

    fn mixed_summary() -> BatchSummary<FakeReport> {
        BatchSummary::from_results(vec![
            BatchResult::success("a.jpg", FakeReport { verdict: "ai" }, 120),
            BatchResult::failure("b.jpg", "validation", "[422] bad image", 45),
        ])
    }

    #[test]
    fn test_counters_satisfy_invariant() {
        let summary = mixed_summary();
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(
            summary.succeeded() + summary.failed(),
            summary.results().len()
        );
    }

    #[test]
    fn test_success_rate_empty_batch_is_zero() {
        let summary: BatchSummary<FakeReport> = BatchSummary::from_results(vec![]);
        assert_eq!(summary.success_rate(), 0.0);
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_jsonl_has_item_lines_plus_summary() {
        let summary = mixed_summary();
        let lines = summary.jsonl_lines().unwrap();
        assert_eq!(lines.len(), 3);

        for line in &lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["status"], "success");
        assert_eq!(first["input"], "a.jpg");
        assert_eq!(first["result"]["verdict"], "ai");
        assert_eq!(first["duration_ms"], 120);

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["status"], "error");
        assert_eq!(second["error"], "validation");
        assert_eq!(second["message"], "[422] bad image");
        assert!(second.get("result").is_none());

        let last: serde_json::Value = serde_json::from_str(&lines[2]).unwrap();
        assert_eq!(last["status"], "summary");
        assert_eq!(last["total"], 2);
        assert_eq!(last["succeeded"], 1);
        assert_eq!(last["failed"], 1);
        assert_eq!(last["success_rate"], 0.5);
    }

    #[test]
    fn test_write_jsonl_round_trips(){
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        mixed_summary().write_jsonl(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["status"], "summary");
    }

    #[test]
    fn test_relabel_input_keeps_outcome() {
        let mut summary = mixed_summary();
        summary.results_mut()[0].input = "renamed.txt".to_string();
        assert_eq!(summary.results()[0].input, "renamed.txt");
        assert!(summary.results()[0].is_success());
        assert_eq!(summary.succeeded(), 1);
    }

    #[test]
    fn test_successful_and_errors_partition() {
        let summary = mixed_summary();
        assert_eq!(summary.successful().len(), 1);
        assert_eq!(summary.errors().len(), 1);
        assert_eq!(summary.errors()[0].input, "b.jpg");
    }
}
