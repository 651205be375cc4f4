use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::UserProgress;

/// A learner's standing in one course, folded from per-section rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    /// Completed section ids, each at most once, in completion order.
    pub completed_sections: Vec<Uuid>,
    pub current_section_id: Option<Uuid>,
    /// `completed / total * 100`, 0 for a course without sections.
    pub overall_progress: f64,
    /// Seconds.
    pub time_spent: i64,
    pub last_accessed: DateTime<Utc>,
}

impl CourseProgress {
    /// Nothing completed yet.
    pub fn not_started() -> Self {
        Self {
            completed_sections: Vec::new(),
            current_section_id: None,
            overall_progress: 0.0,
            time_spent: 0,
            last_accessed: Utc::now(),
        }
    }

    /// Folds stored rows for the sections in `section_ids` (in course order).
    /// Rows for sections outside the course are ignored.
    pub fn fold(rows: &[UserProgress], section_ids: &[Uuid]) -> Self {
        let known: HashSet<Uuid> = section_ids.iter().copied().collect();
        let done: HashSet<Uuid> = rows
            .iter()
            .filter(|row| row.is_completed && known.contains(&row.section_id))
            .map(|row| row.section_id)
            .collect();

        let mut progress = Self::not_started();
        progress.completed_sections = section_ids
            .iter()
            .filter(|id| done.contains(id))
            .copied()
            .collect();
        progress.time_spent = rows
            .iter()
            .filter(|row| known.contains(&row.section_id))
            .map(|row| i64::from(row.time_spent_seconds))
            .sum();
        if let Some(latest) = rows.iter().map(|row| row.updated_at).max() {
            progress.last_accessed = latest;
        }
        progress.recompute(section_ids.len());
        progress
    }

    pub fn is_completed(&self, section_id: Uuid) -> bool {
        self.completed_sections.contains(&section_id)
    }

    /// Adds `section_id` unless already present. Returns whether anything
    /// changed.
    pub fn complete(&mut self, section_id: Uuid, total_sections: usize) -> bool {
        if self.is_completed(section_id) {
            return false;
        }
        self.completed_sections.push(section_id);
        self.recompute(total_sections);
        true
    }

    pub fn recompute(&mut self, total_sections: usize) {
        self.overall_progress = if total_sections == 0 {
            0.0
        } else {
            self.completed_sections.len() as f64 / total_sections as f64 * 100.0
        };
    }

    pub fn visit(&mut self, section_id: Uuid) {
        self.current_section_id = Some(section_id);
        self.last_accessed = Utc::now();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(section_id: Uuid, is_completed: bool, time: i32) -> UserProgress {
        UserProgress {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            section_id,
            is_completed,
            completion_percentage: if is_completed { 100 } else { 40 },
            time_spent_seconds: time,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn fold_keeps_course_order_and_ignores_strangers() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let rows = vec![
            row(ids[2], true, 30),
            row(ids[0], true, 60),
            row(ids[1], false, 10),
            row(Uuid::new_v4(), true, 999),
        ];

        let progress = CourseProgress::fold(&rows, &ids);
        assert_eq!(progress.completed_sections, vec![ids[0], ids[2]]);
        assert_eq!(progress.overall_progress, 50.0);
        assert_eq!(progress.time_spent, 100);
    }

    #[test]
    fn complete_is_idempotent() {
        let id = Uuid::new_v4();
        let mut progress = CourseProgress::not_started();
        assert!(progress.complete(id, 3));
        assert!(!progress.complete(id, 3));
        assert_eq!(progress.completed_sections.len(), 1);
        assert!((progress.overall_progress - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_course_stays_at_zero() {
        let mut progress = CourseProgress::not_started();
        progress.complete(Uuid::new_v4(), 0);
        assert_eq!(progress.overall_progress, 0.0);
    }
}
