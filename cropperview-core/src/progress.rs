//! Progress bookkeeping for a pipeline run.
//!
//! Progress is a plain step counter: one step per processed file plus one
//! extra step when a combine stage runs. The derived percentage is
//! monotonic and reaches exactly 100 only when every configured step has
//! completed.

/// Step counter driving the 0-100 progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineState {
    completed: usize,
    total: usize,
}

impl PipelineState {
    /// Creates a state for `file_count` files, with one extra step when the
    /// run starts with a combine stage.
    pub fn new(file_count: usize, combining: bool) -> Self {
        PipelineState {
            completed: 0,
            total: file_count + usize::from(combining),
        }
    }

    /// Marks one step complete. Saturates at the total; there is no rollback.
    pub fn advance(&mut self) {
        if self.completed < self.total {
            self.completed += 1;
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of steps completed, 0.0 through 100.0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
