use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use tokio_util::sync::CancellationToken;

use crate::{
    learning::{CourseLearning, LearningError, Session, StoreApi},
    model::{ResourceTyped, entity::Course},
    render::BlockRenderer,
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::learning::{LearningView, SectionView},
        envelope::{Envelope, ErrorEnvelope},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/{slug}/learning", get(learning_handler))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{slug}/learning",
    params(("slug" = String, Path, description = "Course slug")),
    description = "The whole course prepared for a learner: rendered sections, quiz questions, \
                   stored progress and module navigation. Anonymous callers get a fresh view.",
    responses(
        (status = 200, description = "Learning view", body = Envelope<LearningView>),
        (status = 404, description = "Course not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "learning"
)]
#[tracing::instrument(skip_all)]
pub async fn learning_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> WebResult<impl IntoResponse> {
    let session = match ctx.maybe_user() {
        Some(user) => Session::Authenticated {
            user_id: user.user_id(),
        },
        None => Session::Anonymous,
    };

    let api = Arc::new(StoreApi::new(state.shared_store()));
    let mut learning = CourseLearning::new(api, slug, session);
    learning.load(&CancellationToken::new()).await;

    match learning.failure() {
        Some(LearningError::CourseNotFound) => {
            return Err(WebError::resource_not_found(Course::get_resource_type()));
        }
        Some(e) => return Err(WebError::server_learning_error(e.to_string())),
        None => {}
    }

    let navigation = learning
        .navigation()
        .ok_or(WebError::server_learning_error("course view is empty"))?;

    let sections: Vec<SectionView> = learning
        .data()
        .map(|data| {
            data.sections
                .iter()
                .enumerate()
                .map(|(index, s)| SectionView {
                    id: s.section.id,
                    section_key: s.section.section_key.clone(),
                    title: s.section.title.clone(),
                    order_index: s.section.order_index,
                    accessible: learning.is_section_accessible(index),
                    completed: data.progress.is_completed(s.section.id),
                    html: BlockRenderer::new().render_section(&s.blocks),
                    questions: s.questions.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let Some(data) = learning.into_data() else {
        return Err(WebError::server_learning_error("course view is empty"));
    };

    Ok(Envelope::ok(LearningView {
        course: data.course,
        sections,
        progress: data.progress,
        navigation,
    }))
}
