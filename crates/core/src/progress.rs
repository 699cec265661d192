use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Course, ModuleId};

/// Aggregated view of course progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub completed: Vec<ModuleId>,
    pub total: usize,
    pub percent: f64,
}

/// Tracks which modules of a course session have been completed.
///
/// Identifiers are not checked against the course: any id passed to
/// [`ProgressTracker::mark_complete`] is tracked. The percentage is clamped to
/// 100 so stray ids cannot push it past a full course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    total_modules: usize,
    completed: BTreeSet<ModuleId>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(total_modules: usize) -> Self {
        Self {
            total_modules,
            completed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn for_course(course: &Course) -> Self {
        Self::new(course.module_count())
    }

    /// Records a module as complete.
    ///
    /// Returns `true` if the module was newly added, `false` if it was already
    /// complete.
    pub fn mark_complete(&mut self, module_id: ModuleId) -> bool {
        self.completed.insert(module_id)
    }

    #[must_use]
    pub fn is_complete(&self, module_id: &ModuleId) -> bool {
        self.completed.contains(module_id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn total_modules(&self) -> usize {
        self.total_modules
    }

    /// Share of completed modules in `[0, 100]`; `0` for an empty course.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_complete(&self) -> f64 {
        if self.total_modules == 0 {
            return 0.0;
        }
        let percent = 100.0 * self.completed.len() as f64 / self.total_modules as f64;
        percent.min(100.0)
    }

    pub fn completed(&self) -> impl Iterator<Item = &ModuleId> {
        self.completed.iter()
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed.iter().cloned().collect(),
            total: self.total_modules,
            percent: self.percent_complete(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ModuleId {
        ModuleId::new(raw)
    }

    #[test]
    fn empty_course_is_zero_percent() {
        let mut tracker = ProgressTracker::new(0);
        assert_eq!(tracker.percent_complete(), 0.0);
        tracker.mark_complete(id("stray"));
        assert_eq!(tracker.percent_complete(), 0.0);
    }

    #[test]
    fn percent_is_share_of_modules() {
        let mut tracker = ProgressTracker::new(3);
        assert_eq!(tracker.percent_complete(), 0.0);

        tracker.mark_complete(id("1-1"));
        assert_eq!(tracker.percent_complete(), 100.0 * 1.0 / 3.0);

        tracker.mark_complete(id("1-2"));
        tracker.mark_complete(id("1-3"));
        assert_eq!(tracker.percent_complete(), 100.0);
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let mut tracker = ProgressTracker::new(4);
        assert!(tracker.mark_complete(id("1-1")));
        let before = tracker.percent_complete();

        assert!(!tracker.mark_complete(id("1-1")));
        assert!(!tracker.mark_complete(id("1-1")));

        assert_eq!(tracker.completed_count(), 1);
        assert_eq!(tracker.percent_complete(), before);
        assert_eq!(before, 25.0);
    }

    #[test]
    fn completed_set_never_exceeds_distinct_ids() {
        let mut tracker = ProgressTracker::new(10);
        let calls = ["a", "b", "a", "c", "b", "a", "c"];
        for raw in calls {
            tracker.mark_complete(id(raw));
        }
        assert_eq!(tracker.completed_count(), 3);
        assert!(tracker.is_complete(&id("b")));
        assert!(!tracker.is_complete(&id("d")));
    }

    #[test]
    fn unknown_ids_are_tracked_but_percent_is_clamped() {
        let mut tracker = ProgressTracker::new(1);
        tracker.mark_complete(id("1-1"));
        tracker.mark_complete(id("not-in-course"));
        assert_eq!(tracker.completed_count(), 2);
        assert_eq!(tracker.percent_complete(), 100.0);
    }

    #[test]
    fn snapshot_lists_completed_ids_in_order() {
        let mut tracker = ProgressTracker::new(2);
        tracker.mark_complete(id("b"));
        tracker.mark_complete(id("a"));
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.completed, vec![id("a"), id("b")]);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.percent, 100.0);
    }
}
