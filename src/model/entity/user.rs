use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};
use crate::web::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    id: Uuid,
    email: String,
    full_name: String,
    #[serde(skip)]
    password_hash: String,
    role: String,
    job_title: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserEntityCreate {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub job_title: String,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> ResourceType {
        ResourceType::User
    }
}

impl UserEntity {
    pub fn new(id: Uuid, data: UserEntityCreate) -> Self {
        Self {
            id,
            email: data.email,
            full_name: data.full_name,
            password_hash: data.password_hash,
            role: data.role.to_string(),
            job_title: data.job_title,
            status: String::from("active"),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        UserRole::from(self.role.as_str())
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Case-insensitive match on name, email or job title.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.full_name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self.job_title.to_lowercase().contains(&term)
    }
}

impl UserEntity {
    pub async fn create(mm: &ModelManager, data: UserEntityCreate) -> DatabaseResult<Self> {
        let user = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, full_name, password_hash, role, job_title, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.password_hash)
        .bind(data.role.to_string())
        .bind(&data.job_title)
        .fetch_one(mm.executor())
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn find_by_email(mm: &ModelManager, email: &str) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn list(mm: &ModelManager) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM users ORDER BY full_name ASC")
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn user() -> UserEntity {
        UserEntity::new(
            Uuid::new_v4(),
            UserEntityCreate {
                email: String::from("m.chen@plant.example"),
                full_name: String::from("Michael Chen"),
                password_hash: String::from("x"),
                role: UserRole::Manager,
                job_title: String::from("Safety Manager"),
            },
        )
    }

    #[test]
    fn search_covers_name_email_and_title() {
        let u = user();
        assert!(u.matches_search("chen"));
        assert!(u.matches_search("PLANT.example"));
        assert!(u.matches_search("safety"));
        assert!(!u.matches_search("forklift"));
    }

    #[test]
    fn hash_is_never_serialized() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "manager");
    }
}
