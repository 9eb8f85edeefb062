//! Operator-facing console output.
//!
//! Human-readable progress and result lines. Not a stable or
//! machine-parseable format.

use std::io::Write;

use crate::error::PublishError;
use crate::pipeline::PublishReport;

const RULE_WIDTH: usize = 50;

/// Writes progress and results to an output sink (stdout in the binary).
///
/// Write failures are ignored: console output must never abort a run.
pub struct Console<W: Write> {
    out: W,
}

impl Console<std::io::Stdout> {
    /// Console on the process stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    pub fn rule(&mut self) {
        let _ = writeln!(self.out, "{}", "=".repeat(RULE_WIDTH));
    }

    pub fn ok(&mut self, text: &str) {
        let _ = writeln!(self.out, "✅ {text}");
    }

    pub fn warn(&mut self, text: &str) {
        let _ = writeln!(self.out, "⚠️  {text}");
    }

    pub fn info(&mut self, text: &str) {
        let _ = writeln!(self.out, "ℹ️  {text}");
    }

    /// Title banner printed at startup.
    pub fn banner(&mut self) {
        self.rule();
        self.line("ActivTrak MSI Update Automation");
        self.rule();
        self.blank();
    }

    /// Error headline followed by its remediation lines.
    pub fn failure(&mut self, err: &PublishError) {
        let _ = writeln!(self.out, "❌ ERROR: {err}");
        for line in err.guidance() {
            self.line(&line);
        }
    }

    /// Final success block.
    pub fn success(&mut self, report: &PublishReport) {
        self.blank();
        self.rule();
        self.ok("SUCCESS! MSI Updated");
        self.rule();
        self.blank();
        self.line("Download URL (never changes):");
        self.line(&report.download_url);
        self.blank();
        self.line(&format!("Original filename: {}", report.artifact.file_name));
        self.line(&format!("GitHub filename: {}", report.target_filename));
        self.line(&format!("SHA256: {}", report.sha256));
        self.blank();
        self.line("The installation script will now use this new MSI.");
        self.line("No script changes needed!");
        self.rule();
        let _ = self.out.flush();
    }
}
