//! Composite termination.

use super::{Termination, TerminationReason};
use crate::statistics::StatisticsCollector;

/// Terminates when any child termination fires.
///
/// The first child that fires, in insertion order, supplies the reason.
#[derive(Debug, Default)]
pub struct OrTermination {
    children: Vec<Box<dyn Termination>>,
}

impl OrTermination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child termination.
    pub fn with(mut self, termination: impl Termination + 'static) -> Self {
        self.children.push(Box::new(termination));
        self
    }

    pub fn push(&mut self, termination: Box<dyn Termination>) {
        self.children.push(termination);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Termination for OrTermination {
    fn check(&self, stats: &StatisticsCollector) -> Option<TerminationReason> {
        self.children.iter().find_map(|t| t.check(stats))
    }
}
