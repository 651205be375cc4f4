use reqwest::{Client, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    client::{ClientError, ClientResult},
    model::{
        Page,
        entity::{
            ContentBlock, ContentInteraction, Course, CourseFilter, CourseSection, QuizAttempt,
            QuizQuestion, UserEntity, UserProgress,
        },
    },
    navigation::MenuEntry,
    web::{
        Envelope,
        dto::{
            account::{SigninBody, SignupBody},
            dashboard::DashboardSummary,
            interaction::ContentInteractionBody,
            progress::{UserProgressBody, UserProgressQuery},
            public::SectionHtml,
            quiz::{QuizAttemptBody, QuizAttemptQuery},
            users::UsersQuery,
        },
        middlewares::auth::AUTH_TOKEN,
    },
};

/// Client for one server. The session token, once obtained through
/// [`LmsClient::signin`] or [`LmsClient::signup`], is sent as the `SID`
/// cookie on every request.
#[derive(Debug, Clone)]
pub struct LmsClient {
    http: Client,
    base_url: String,
    session: Option<String>,
}

fn session_from(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == AUTH_TOKEN && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;

    let envelope = match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !status.is_success() || !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| String::from("Request failed")),
        });
    }

    envelope.data.ok_or(ClientError::EmptyData)
}

impl LmsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(token) => request.header(header::COOKIE, format!("{AUTH_TOKEN}={token}")),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.http.get(self.url(path)));
        decode(request.send().await?).await
    }

    async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.get(self.url(path)).query(query));
        decode(request.send().await?).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        decode(request.send().await?).await
    }

    async fn open_session(&mut self, path: &str, body: &impl Serialize) -> ClientResult<UserEntity> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let token = session_from(&response);
        let user = decode(response).await?;
        if token.is_some() {
            self.session = token;
        }
        Ok(user)
    }

    #[tracing::instrument(skip_all)]
    pub async fn signup(&mut self, body: &SignupBody) -> ClientResult<UserEntity> {
        self.open_session("/account/signup", body).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn signin(&mut self, email: &str, password: &str) -> ClientResult<UserEntity> {
        self.open_session("/account/signin", &SigninBody::new(email, password))
            .await
    }

    pub async fn signout(&mut self) -> ClientResult<()> {
        let request = self.authorize(self.http.post(self.url("/account/signout")));
        let _: bool = decode(request.send().await?).await?;
        self.session = None;
        Ok(())
    }

    pub async fn me(&self) -> ClientResult<UserEntity> {
        self.get("/account/me").await
    }

    pub async fn courses(&self, filter: &CourseFilter) -> ClientResult<Vec<Course>> {
        self.get_with("/public/courses", filter).await
    }

    pub async fn course_by_slug(&self, slug: &str) -> ClientResult<Option<Course>> {
        let courses = self.courses(&CourseFilter::by_slug(slug)).await?;
        Ok(courses.into_iter().next())
    }

    pub async fn course_sections(&self, course_id: Uuid) -> ClientResult<Vec<CourseSection>> {
        self.get_with("/public/course-sections", &[("courseId", course_id)])
            .await
    }

    pub async fn section_html(&self, section_id: Uuid) -> ClientResult<SectionHtml> {
        self.get(&format!("/public/course-sections/{section_id}/html"))
            .await
    }

    pub async fn content_blocks(&self, section_id: Uuid) -> ClientResult<Vec<ContentBlock>> {
        self.get_with("/public/content-blocks", &[("sectionId", section_id)])
            .await
    }

    pub async fn quiz_questions(&self, section_id: Uuid) -> ClientResult<Vec<QuizQuestion>> {
        self.get_with("/public/quiz-questions", &[("sectionId", section_id)])
            .await
    }

    pub async fn record_quiz_attempt(&self, body: &QuizAttemptBody) -> ClientResult<QuizAttempt> {
        self.post("/quiz-attempts", body).await
    }

    pub async fn quiz_attempts(&self, query: &QuizAttemptQuery) -> ClientResult<Vec<QuizAttempt>> {
        self.get_with("/quiz-attempts", query).await
    }

    pub async fn upsert_progress(&self, body: &UserProgressBody) -> ClientResult<UserProgress> {
        self.post("/user-progress", body).await
    }

    pub async fn progress(&self, query: &UserProgressQuery) -> ClientResult<Vec<UserProgress>> {
        self.get_with("/user-progress", query).await
    }

    pub async fn record_interaction(
        &self,
        body: &ContentInteractionBody,
    ) -> ClientResult<ContentInteraction> {
        self.post("/content-interactions", body).await
    }

    pub async fn navigation(&self) -> ClientResult<Vec<MenuEntry>> {
        self.get("/navigation").await
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        self.get("/dashboard").await
    }

    pub async fn users(&self, query: &UsersQuery) -> ClientResult<Page<UserEntity>> {
        self.get_with("/users", query).await
    }
}
