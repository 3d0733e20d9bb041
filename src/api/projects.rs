//! Project API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, validate_images, ApiResult, CatalogQuery};
use crate::catalog;
use crate::errors::AppError;
use crate::models::{Category, CreateProjectRequest, Project};
use crate::AppState;

/// Image cap on the project registration form.
const MAX_PROJECT_IMAGES: usize = 6;

/// GET /api/projects - List projects through the catalog query pipeline.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Vec<Project>> {
    let projects = state.store.list_projects().await?;
    let projects = catalog::apply_query(
        projects,
        query.category_filter(),
        query.search(),
        query.sort_key(),
    );
    success(projects)
}

/// GET /api/projects/:id - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    match state.store.get_project(&id).await? {
        Some(project) => success(project),
        None => Err(AppError::NotFound(format!("Project {} not found", id))),
    }
}

/// POST /api/projects - Register a new project.
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<Project> {
    validate_create_project(&request)?;
    let project = state.store.create_project(&request).await?;
    tracing::info!(project_id = %project.id, "project registered");
    success(project)
}

fn validate_create_project(request: &CreateProjectRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::MissingField("title"));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::MissingField("description"));
    }
    if Category::from_str(&request.category).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown category '{}'",
            request.category
        )));
    }
    if request.funding_period.end <= request.funding_period.start {
        return Err(AppError::Validation(
            "Funding period must end after it starts".to_string(),
        ));
    }
    validate_images(&request.images, MAX_PROJECT_IMAGES)?;
    for reward in &request.rewards {
        if reward.name.trim().is_empty() {
            return Err(AppError::MissingField("rewards.name"));
        }
        if reward.amount == 0 {
            return Err(AppError::Validation(
                "Reward amount must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::models::{CreateRewardRequest, FundingPeriod, User, UserRole};

    fn valid_request() -> CreateProjectRequest {
        let now = Utc::now();
        CreateProjectRequest {
            title: "새 프로젝트".to_string(),
            description: "설명".to_string(),
            category: "app-service".to_string(),
            main_image: None,
            images: vec!["data:image/png;base64,aaaa".to_string()],
            funding_period: FundingPeriod {
                start: now,
                end: now + Duration::days(30),
            },
            rewards: vec![CreateRewardRequest {
                name: "리워드".to_string(),
                description: "설명".to_string(),
                amount: 500,
                delivery_method: "이메일".to_string(),
                delivery_date: now + Duration::days(60),
                max_quantity: Some(100),
            }],
            creator: User {
                id: "1".to_string(),
                name: "김개발".to_string(),
                email: "dev@example.com".to_string(),
                profile_image: None,
                role: UserRole::Creator,
                followers: 0,
                following: 0,
                likes: 0,
            },
        }
    }

    #[test]
    fn accepts_a_complete_request() {
        assert!(validate_create_project(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_missing_title() {
        let mut request = valid_request();
        request.title = "   ".to_string();
        assert!(matches!(
            validate_create_project(&request),
            Err(AppError::MissingField("title"))
        ));
    }

    #[test]
    fn rejects_unknown_category() {
        let mut request = valid_request();
        request.category = "not-a-category".to_string();
        assert!(matches!(
            validate_create_project(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_inverted_funding_period() {
        let mut request = valid_request();
        request.funding_period.end = request.funding_period.start;
        assert!(matches!(
            validate_create_project(&request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_too_many_images() {
        let mut request = valid_request();
        request.images = vec!["x".to_string(); 7];
        assert!(matches!(
            validate_create_project(&request),
            Err(AppError::TooManyImages { max: 6 })
        ));
    }
}
