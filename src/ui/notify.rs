// Thu Oct 15 2026 - Alex

use crate::symbol::{ImportNotifier, ImportSummary};
use crate::ui::{print_success, print_warning};

/// Prints the import result to the terminal.
pub struct ConsoleNotifier {
    enabled: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn silent() -> Self {
        Self { enabled: false }
    }

    pub fn message(summary: &ImportSummary) -> String {
        if summary.has_errors() {
            format!(
                "Import completed with {} labels imported and {} errors. Some labels may be missing or at the wrong address.",
                summary.label_count, summary.error_count
            )
        } else {
            format!("Import completed with {} labels imported.", summary.label_count)
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportNotifier for ConsoleNotifier {
    fn notify(&self, summary: &ImportSummary) {
        if !self.enabled {
            return;
        }
        if summary.has_errors() {
            print_warning(&Self::message(summary));
        } else {
            print_success(&Self::message(summary));
        }
    }
}
