//! Shared collector for the diagnostics of one run.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Ledger {
    entries: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

impl Ledger {
    fn record(&mut self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Note => {}
        }
        self.entries.push(diag);
    }
}

/// Collects the diagnostics of a generation run.
///
/// Shared by reference between workers. Counts survive
/// [`take_all`](Self::take_all), so a drained sink still reports whether
/// the run failed.
#[derive(Default)]
pub struct DiagnosticSink {
    ledger: Mutex<Ledger>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.ledger().record(diag);
    }

    /// Records a batch under a single lock, so the batch stays contiguous
    /// even when other threads emit concurrently.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        let mut ledger = self.ledger();
        for diag in diags {
            ledger.record(diag);
        }
    }

    /// `true` once any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.ledger().errors
    }

    /// Warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.ledger().warnings
    }

    /// Drains the recorded diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.ledger().entries)
    }

    /// Copy of the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.ledger().entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::location::Location;

    fn unsupported(object: &str) -> Diagnostic {
        Diagnostic::error(
            DiagnosticCode::new(Category::Error, 301),
            "unsupported LPM kind `ff`",
            Location::object("top", object),
        )
    }

    fn renamed() -> Diagnostic {
        Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 301),
            "renamed `in` to `VL_in`",
            Location::scope("top"),
        )
    }

    #[test]
    fn fresh_sink_is_clean() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn counts_by_severity() {
        let sink = DiagnosticSink::new();
        sink.emit(renamed());
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 1);
        sink.emit(unsupported("ff0"));
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics().len(), 2);
    }

    #[test]
    fn counts_survive_draining() {
        let sink = DiagnosticSink::new();
        sink.extend([unsupported("ff0"), renamed()]);
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        assert!(sink.has_errors());
    }

    #[test]
    fn batches_stay_contiguous_across_threads() {
        let sink = DiagnosticSink::new();
        std::thread::scope(|s| {
            for unit in 0..8 {
                let sink = &sink;
                s.spawn(move || {
                    let object = format!("u{unit}");
                    sink.extend((0..50).map(|_| unsupported(&object)));
                });
            }
        });
        let all = sink.take_all();
        assert_eq!(all.len(), 400);
        assert_eq!(sink.error_count(), 400);
        for batch in all.chunks(50) {
            assert!(batch.iter().all(|d| d.location == batch[0].location));
        }
    }
}
