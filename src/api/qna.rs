//! QnA API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, validate_images, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateAnswerRequest, CreateQuestionRequest, QnaQuestion, QuestionType};
use crate::AppState;

/// Image cap on the question form.
const MAX_QNA_IMAGES: usize = 3;
/// Minimum content length for questions and answers.
const MIN_CONTENT_LENGTH: usize = 10;

/// GET /api/projects/:id/qna - List a project's question threads.
pub async fn list_questions(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Vec<QnaQuestion>> {
    let questions = state.store.list_questions(&project_id).await?;
    success(questions)
}

/// POST /api/projects/:id/qna - Open a question thread.
pub async fn create_question(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateQuestionRequest>,
) -> ApiResult<QnaQuestion> {
    if state.store.get_project(&project_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Project {} not found",
            project_id
        )));
    }
    validate_create_question(&request)?;
    let question = state.store.create_question(&project_id, &request).await?;
    tracing::info!(question_id = %question.id, %project_id, "question opened");
    success(question)
}

/// GET /api/qna/:id - One thread with its answers; unknown ids render the
/// not-found fallback.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<QnaQuestion> {
    match state.store.get_question(&id).await? {
        Some(question) => success(question),
        None => Err(AppError::NotFound(format!("QnA {} not found", id))),
    }
}

/// POST /api/qna/:id/answers - Reply to a thread. Creator replies mark the
/// thread answered.
pub async fn create_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateAnswerRequest>,
) -> ApiResult<QnaQuestion> {
    if request.content.trim().is_empty() {
        return Err(AppError::MissingField("content"));
    }
    if request.author.trim().is_empty() {
        return Err(AppError::MissingField("author"));
    }
    let question = state
        .store
        .add_answer(&id, &request.author, &request.content, request.is_creator)
        .await?;
    success(question)
}

fn validate_create_question(request: &CreateQuestionRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::MissingField("title"));
    }
    if request.author.trim().is_empty() {
        return Err(AppError::MissingField("author"));
    }
    if request.content.trim().chars().count() < MIN_CONTENT_LENGTH {
        return Err(AppError::BelowMinLength {
            field: "content",
            min: MIN_CONTENT_LENGTH,
        });
    }
    if QuestionType::from_str(&request.question_type).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown question type '{}'",
            request.question_type
        )));
    }
    validate_images(&request.images, MAX_QNA_IMAGES)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateQuestionRequest {
        CreateQuestionRequest {
            title: "배송 일정 문의".to_string(),
            content: "리워드는 언제 배송되나요? 일정이 궁금합니다.".to_string(),
            question_type: "delivery".to_string(),
            is_private: false,
            author: "후원자".to_string(),
            images: Vec::new(),
        }
    }

    #[test]
    fn accepts_a_complete_question() {
        assert!(validate_create_question(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_short_content() {
        let mut request = valid_request();
        request.content = "짧음".to_string();
        assert!(matches!(
            validate_create_question(&request),
            Err(AppError::BelowMinLength {
                field: "content",
                min: 10
            })
        ));
    }

    #[test]
    fn rejects_unknown_question_type() {
        let mut request = valid_request();
        request.question_type = "gossip".to_string();
        assert!(matches!(
            validate_create_question(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_more_than_three_images() {
        let mut request = valid_request();
        request.images = vec!["x".to_string(); 4];
        assert!(matches!(
            validate_create_question(&request),
            Err(AppError::TooManyImages { max: 3 })
        ));
    }
}
