//! Progress reporting for the row-by-row masking pass.
//!
//! The masking code only talks to [`ProgressSink`], so frontends decide how
//! (and whether) progress is shown.

/// Receives progress updates while an image is being masked.
///
/// Rows may be reported from several threads at once when the `parallel`
/// feature is enabled, hence the `Sync` bound.
pub trait ProgressSink: Sync {
    /// Called once before any row is processed.
    fn start(&self, _total_rows: u32) {}

    /// Called after `rows` more rows have been processed.
    fn advance(&self, _rows: u32) {}

    /// Called once after the last row.
    fn finish(&self) {}
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}
