use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub is_published: bool,
    pub category: String,
    pub difficulty: String,
    pub language: String,
    pub duration_minutes: i32,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> ResourceType {
        ResourceType::Course
    }
}

/// Catalog filters. Every `None` matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilter {
    pub slug: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub language: Option<String>,
}

impl CourseFilter {
    pub fn by_slug<S: Into<String>>(slug: S) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        let exact = |want: &Option<String>, have: &str| match want.as_deref() {
            None | Some("") | Some("all") => true,
            Some(want) => want.eq_ignore_ascii_case(have),
        };

        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                course.title.to_lowercase().contains(&term)
                    || course.description.to_lowercase().contains(&term)
            }
        };

        let matches_slug = self.slug.as_deref().is_none_or(|slug| course.slug == slug);

        matches_slug
            && matches_search
            && exact(&self.category, &course.category)
            && exact(&self.difficulty, &course.difficulty)
            && exact(&self.language, &course.language)
    }
}

impl Course {
    /// Published courses only; text filters are applied by the caller.
    pub async fn list_published(mm: &ModelManager, slug: Option<&str>) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT * FROM courses
            WHERE is_published = TRUE
              AND ($1::text IS NULL OR slug = $1)
            ORDER BY title ASC
            "#,
        )
        .bind(slug)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    pub async fn count_published(mm: &ModelManager) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE is_published = TRUE")
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn course() -> Course {
        Course {
            id: Uuid::new_v4(),
            slug: String::from("lockout-tagout"),
            title: String::from("Lockout/Tagout Fundamentals"),
            description: String::from("Control of hazardous energy during maintenance"),
            version: String::from("1.0"),
            is_published: true,
            category: String::from("energy-control"),
            difficulty: String::from("Beginner"),
            language: String::from("English"),
            duration_minutes: 45,
        }
    }

    #[test]
    fn empty_filter_matches() {
        assert!(CourseFilter::default().matches(&course()));
    }

    #[test]
    fn search_looks_at_title_and_description() {
        let mut f = CourseFilter::default();
        f.search = Some(String::from("HAZARDOUS"));
        assert!(f.matches(&course()));
        f.search = Some(String::from("forklift"));
        assert!(!f.matches(&course()));
    }

    #[test]
    fn all_sentinel_and_exact_filters() {
        let f = CourseFilter {
            category: Some(String::from("all")),
            difficulty: Some(String::from("beginner")),
            language: Some(String::from("Spanish")),
            ..CourseFilter::default()
        };
        assert!(!f.matches(&course()));

        let f = CourseFilter {
            language: Some(String::from("english")),
            ..f
        };
        assert!(f.matches(&course()));
    }

    #[test]
    fn slug_is_exact() {
        assert!(CourseFilter::by_slug("lockout-tagout").matches(&course()));
        assert!(!CourseFilter::by_slug("lockout").matches(&course()));
    }
}
