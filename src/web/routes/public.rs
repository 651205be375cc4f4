//! Unauthenticated catalog and content reads.

use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    model::{
        ResourceTyped,
        entity::{ContentBlock, Course, CourseFilter, CourseSection, QuizQuestion},
    },
    render::BlockRenderer,
    tokens::DesignTokens,
    web::{
        AppState, WebError, WebResult,
        dto::public::{CourseSectionsQuery, SectionContentQuery, SectionHtml},
        envelope::{Envelope, ErrorEnvelope},
        extract::ApiQuery,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(courses_handler))
        .route("/course-sections", get(course_sections_handler))
        .route("/course-sections/{id}/html", get(section_html_handler))
        .route("/content-blocks", get(content_blocks_handler))
        .route("/quiz-questions", get(quiz_questions_handler))
        .route("/design-tokens", get(design_tokens_handler))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/courses",
    params(CourseFilter),
    description = "Published courses, optionally filtered",
    responses(
        (status = 200, description = "Matching courses", body = Envelope<Vec<Course>>),
        (status = 400, description = "Malformed query", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "public"
)]
pub async fn courses_handler(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CourseFilter>,
) -> WebResult<impl IntoResponse> {
    let courses = state
        .store()
        .list_courses(&filter)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok(Envelope::ok(courses))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/course-sections",
    params(CourseSectionsQuery),
    description = "Published sections of a course ordered by `orderIndex`",
    responses(
        (status = 200, description = "Sections", body = Envelope<Vec<CourseSection>>),
        (status = 400, description = "Missing courseId", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "public"
)]
pub async fn course_sections_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CourseSectionsQuery>,
) -> WebResult<impl IntoResponse> {
    let course_id = query.course_id()?;
    let sections = state
        .store()
        .sections_by_course(course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(CourseSection::get_resource_type(), e))?;

    Ok(Envelope::ok(sections))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/course-sections/{id}/html",
    params(("id" = Uuid, Path, description = "Section id")),
    description = "A section's blocks rendered to one HTML fragment",
    responses(
        (status = 200, description = "Rendered section", body = Envelope<SectionHtml>),
        (status = 404, description = "Section not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "public"
)]
pub async fn section_html_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let section = state
        .store()
        .find_section(id)
        .await
        .map_err(|e| WebError::resource_fetch_error(CourseSection::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(CourseSection::get_resource_type()))?;

    let blocks = state
        .store()
        .blocks_by_section(section.id)
        .await
        .map_err(|e| WebError::resource_fetch_error(ContentBlock::get_resource_type(), e))?;

    let html = BlockRenderer::new().render_section(&blocks);
    Ok(Envelope::ok(SectionHtml {
        section_id: section.id,
        section_key: section.section_key,
        title: section.title,
        html,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/content-blocks",
    params(SectionContentQuery),
    description = "Blocks of a section ordered by `orderIndex`",
    responses(
        (status = 200, description = "Blocks", body = Envelope<Vec<ContentBlock>>),
        (status = 400, description = "Missing sectionId", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "public"
)]
pub async fn content_blocks_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SectionContentQuery>,
) -> WebResult<impl IntoResponse> {
    let section_id = query.section_id()?;
    let blocks = state
        .store()
        .blocks_by_section(section_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(ContentBlock::get_resource_type(), e))?;

    Ok(Envelope::ok(blocks))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/quiz-questions",
    params(SectionContentQuery),
    description = "Questions of a section ordered by `orderIndex`",
    responses(
        (status = 200, description = "Questions", body = Envelope<Vec<QuizQuestion>>),
        (status = 400, description = "Missing sectionId", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "public"
)]
pub async fn quiz_questions_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SectionContentQuery>,
) -> WebResult<impl IntoResponse> {
    let section_id = query.section_id()?;
    let questions = state
        .store()
        .questions_by_section(section_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(QuizQuestion::get_resource_type(), e))?;

    Ok(Envelope::ok(questions))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/design-tokens",
    description = "Colors, spacing, typography and motion constants",
    responses((status = 200, description = "Token tables")),
    tag = "public"
)]
pub async fn design_tokens_handler() -> impl IntoResponse {
    Envelope::ok(DesignTokens::snapshot())
}
