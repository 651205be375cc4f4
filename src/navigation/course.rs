use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Video,
    Reading,
    Quiz,
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Locked,
    Available,
    InProgress,
    Completed,
}

/// What the caller knows about a module before its status is derived.
#[derive(Debug, Clone)]
pub struct ModuleSeed {
    pub id: Uuid,
    pub title: String,
    pub href: String,
    pub kind: ModuleKind,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    pub status: ModuleStatus,
    pub href: String,
}

impl CourseModule {
    /// Locked modules are shown but cannot be opened.
    pub fn is_selectable(&self) -> bool {
        self.status != ModuleStatus::Locked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseNavigation {
    pub course_title: String,
    pub modules: Vec<CourseModule>,
    pub current_module_id: Option<Uuid>,
    pub overall_progress: f64,
}

impl CourseNavigation {
    /// Status per module: completed wins, then the current module is in
    /// progress, then a module is available when it is first or follows a
    /// completed one. Everything else is locked.
    pub fn build(course_title: impl Into<String>, seeds: Vec<ModuleSeed>, current: Option<usize>) -> Self {
        let total = seeds.len();
        let completed = seeds.iter().filter(|seed| seed.completed).count();

        let mut modules = Vec::with_capacity(total);
        let mut previous_completed = true;
        for (index, seed) in seeds.into_iter().enumerate() {
            let status = if seed.completed {
                ModuleStatus::Completed
            } else if Some(index) == current {
                ModuleStatus::InProgress
            } else if previous_completed {
                ModuleStatus::Available
            } else {
                ModuleStatus::Locked
            };
            previous_completed = seed.completed;

            modules.push(CourseModule {
                id: seed.id,
                title: seed.title,
                kind: seed.kind,
                status,
                href: seed.href,
            });
        }

        let current_module_id = current.and_then(|i| modules.get(i)).map(|module| module.id);
        let overall_progress = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        Self {
            course_title: course_title.into(),
            modules,
            current_module_id,
            overall_progress,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        let id = self.current_module_id?;
        self.modules.iter().position(|module| module.id == id)
    }

    pub fn previous(&self) -> Option<&CourseModule> {
        let index = self.current_index()?;
        index.checked_sub(1).and_then(|i| self.modules.get(i))
    }

    pub fn next(&self) -> Option<&CourseModule> {
        let index = self.current_index()?;
        self.modules.get(index + 1)
    }

    /// Rounded percentage as shown in the course header.
    pub fn progress_label(&self) -> String {
        format!("{}%", self.overall_progress.round() as i64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seeds(completed: &[bool]) -> Vec<ModuleSeed> {
        completed
            .iter()
            .enumerate()
            .map(|(i, done)| ModuleSeed {
                id: Uuid::new_v4(),
                title: format!("Module {}", i + 1),
                href: format!("/courses/hazmat/learn/module-{}", i + 1),
                kind: ModuleKind::Reading,
                completed: *done,
            })
            .collect()
    }

    #[test]
    fn statuses_follow_completion() {
        let nav = CourseNavigation::build("HazMat", seeds(&[true, true, false, false, false]), Some(2));
        let statuses: Vec<_> = nav.modules.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![
                ModuleStatus::Completed,
                ModuleStatus::Completed,
                ModuleStatus::InProgress,
                ModuleStatus::Locked,
                ModuleStatus::Locked,
            ]
        );
        assert!(!nav.modules[3].is_selectable());
        assert_eq!(nav.progress_label(), "40%");
    }

    #[test]
    fn first_module_is_always_available() {
        let nav = CourseNavigation::build("HazMat", seeds(&[false, false]), None);
        assert_eq!(nav.modules[0].status, ModuleStatus::Available);
        assert_eq!(nav.modules[1].status, ModuleStatus::Locked);
        assert!(nav.current_index().is_none());
        assert!(nav.next().is_none());
    }

    #[test]
    fn previous_and_next_follow_position() {
        let nav = CourseNavigation::build("HazMat", seeds(&[true, false, false]), Some(1));
        assert_eq!(nav.previous().map(|m| m.title.as_str()), Some("Module 1"));
        assert_eq!(nav.next().map(|m| m.title.as_str()), Some("Module 3"));

        let first = CourseNavigation::build("HazMat", seeds(&[false, false]), Some(0));
        assert!(first.previous().is_none());
    }

    #[test]
    fn empty_course_has_zero_progress() {
        let nav = CourseNavigation::build("Empty", vec![], Some(0));
        assert_eq!(nav.overall_progress, 0.0);
        assert!(nav.current_module_id.is_none());
    }
}
