use std::fmt;

/// Outcome of one unit of work that the summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Error,
}

/// Counts of files written and errors encountered across a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written += 1,
            Outcome::Error => self.errors += 1,
        }
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files written: {}, File errors: {}",
            self.written, self.errors
        )
    }
}
