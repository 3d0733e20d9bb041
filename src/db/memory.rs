//! In-memory catalog store.
//!
//! Implements [`CatalogStore`] over plain collections behind a mutex.
//! Backs the unit tests for the query engine and the confirmation flow;
//! the semantics mirror the SQLite repository.

use std::future::ready;
use std::sync::Mutex;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{
    Answer, Category, CreateProductRequest, CreateProjectRequest, CreateQuestionRequest,
    CreateReviewRequest, DeliveryMethod, Funding, FundingPeriod, Product, ProductStatus, Project,
    ProjectStatus, Purchase, QnaQuestion, QnaStatus, QuestionType, Review, Reward,
    TransactionStatus,
};

use super::store::{CatalogStore, StoreFuture};

#[derive(Default)]
struct Inner {
    projects: Vec<Project>,
    products: Vec<Product>,
    questions: Vec<QnaQuestion>,
    fundings: Vec<Funding>,
    purchases: Vec<Purchase>,
    reviews: Vec<Review>,
}

/// Mutex-guarded in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(
        &self,
        f: impl FnOnce(&mut Inner) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))?;
        f(&mut inner)
    }

    /// Preload a fully-formed project, as the seeder does for SQLite.
    pub fn insert_project(&self, project: Project) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.projects.push(project);
        }
    }

    /// Preload a fully-formed product.
    pub fn insert_product(&self, product: Product) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.products.push(product);
        }
    }
}

impl CatalogStore for MemoryStore {
    // ==================== PROJECTS ====================

    fn list_projects(&self) -> StoreFuture<'_, Vec<Project>> {
        Box::pin(ready(
            self.with_inner(|inner| Ok(inner.projects.clone())),
        ))
    }

    fn get_project<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Project>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner.projects.iter().find(|p| p.id == id).cloned())
        })))
    }

    fn create_project<'a>(
        &'a self,
        request: &'a CreateProjectRequest,
    ) -> StoreFuture<'a, Project> {
        Box::pin(ready(self.with_inner(|inner| {
            let now = Utc::now();
            let project = Project {
                id: uuid::Uuid::new_v4().to_string(),
                title: request.title.clone(),
                description: request.description.clone(),
                category: Category::from_str(&request.category)
                    .unwrap_or(Category::AppService),
                main_image: request
                    .main_image
                    .clone()
                    .or_else(|| request.images.first().cloned())
                    .unwrap_or_default(),
                images: request.images.clone(),
                creator: request.creator.clone(),
                current_funding: 0,
                funding_period: FundingPeriod {
                    start: request.funding_period.start,
                    end: request.funding_period.end,
                },
                rewards: request
                    .rewards
                    .iter()
                    .map(|r| Reward {
                        id: uuid::Uuid::new_v4().to_string(),
                        name: r.name.clone(),
                        description: r.description.clone(),
                        amount: r.amount,
                        delivery_method: r.delivery_method.clone(),
                        delivery_date: r.delivery_date,
                        max_quantity: r.max_quantity,
                        current_quantity: 0,
                    })
                    .collect(),
                status: ProjectStatus::Active,
                created_at: now,
                updated_at: now,
            };
            inner.projects.push(project.clone());
            Ok(project)
        })))
    }

    // ==================== PRODUCTS ====================

    fn list_products(&self) -> StoreFuture<'_, Vec<Product>> {
        Box::pin(ready(
            self.with_inner(|inner| Ok(inner.products.clone())),
        ))
    }

    fn get_product<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Product>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner.products.iter().find(|p| p.id == id).cloned())
        })))
    }

    fn create_product<'a>(
        &'a self,
        request: &'a CreateProductRequest,
    ) -> StoreFuture<'a, Product> {
        Box::pin(ready(self.with_inner(|inner| {
            let now = Utc::now();
            let product = Product {
                id: uuid::Uuid::new_v4().to_string(),
                title: request.title.clone(),
                description: request.description.clone(),
                category: Category::from_str(&request.category)
                    .unwrap_or(Category::AppService),
                price: request.price,
                original_price: request.original_price,
                main_image: request
                    .main_image
                    .clone()
                    .or_else(|| request.images.first().cloned())
                    .unwrap_or_default(),
                images: request.images.clone(),
                creator: request.creator.clone(),
                rating: 0.0,
                review_count: 0,
                sales_count: 0,
                delivery_method: DeliveryMethod::from_str(&request.delivery_method)
                    .unwrap_or(DeliveryMethod::File),
                tags: request.tags.clone(),
                status: ProductStatus::Active,
                created_at: now,
                updated_at: now,
            };
            inner.products.push(product.clone());
            Ok(product)
        })))
    }

    // ==================== QNA ====================

    fn list_questions<'a>(&'a self, project_id: &'a str) -> StoreFuture<'a, Vec<QnaQuestion>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner
                .questions
                .iter()
                .filter(|q| q.project_id == project_id)
                .cloned()
                .collect::<Vec<QnaQuestion>>())
        })))
    }

    fn get_question<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<QnaQuestion>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner.questions.iter().find(|q| q.id == id).cloned())
        })))
    }

    fn create_question<'a>(
        &'a self,
        project_id: &'a str,
        request: &'a CreateQuestionRequest,
    ) -> StoreFuture<'a, QnaQuestion> {
        Box::pin(ready(self.with_inner(|inner| {
            let question = QnaQuestion {
                id: uuid::Uuid::new_v4().to_string(),
                project_id: project_id.to_string(),
                title: request.title.clone(),
                content: request.content.clone(),
                question_type: QuestionType::from_str(&request.question_type)
                    .unwrap_or(QuestionType::Other),
                is_private: request.is_private,
                status: QnaStatus::Pending,
                author: request.author.clone(),
                images: request.images.clone(),
                answers: Vec::new(),
                created_at: Utc::now(),
            };
            inner.questions.push(question.clone());
            Ok(question)
        })))
    }

    fn add_answer<'a>(
        &'a self,
        question_id: &'a str,
        author: &'a str,
        content: &'a str,
        is_creator: bool,
    ) -> StoreFuture<'a, QnaQuestion> {
        Box::pin(ready(self.with_inner(|inner| {
            let question = inner
                .questions
                .iter_mut()
                .find(|q| q.id == question_id)
                .ok_or_else(|| AppError::NotFound(format!("QnA {} not found", question_id)))?;

            question.answers.push(Answer {
                id: uuid::Uuid::new_v4().to_string(),
                author: author.to_string(),
                content: content.to_string(),
                is_creator,
                likes: 0,
                dislikes: 0,
                created_at: Utc::now(),
            });
            if is_creator {
                question.status = QnaStatus::Answered;
            }
            Ok(question.clone())
        })))
    }

    // ==================== REVIEWS ====================

    fn list_reviews<'a>(&'a self, product_id: &'a str) -> StoreFuture<'a, Vec<Review>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner
                .reviews
                .iter()
                .filter(|r| r.product_id == product_id)
                .cloned()
                .collect::<Vec<Review>>())
        })))
    }

    fn create_review<'a>(
        &'a self,
        product_id: &'a str,
        request: &'a CreateReviewRequest,
    ) -> StoreFuture<'a, Review> {
        Box::pin(ready(self.with_inner(|inner| {
            let review = Review {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                author: request.author.clone(),
                rating: request.rating,
                content: request.content.clone(),
                images: request.images.clone(),
                created_at: Utc::now(),
            };
            inner.reviews.push(review.clone());

            if let Some(product) = inner.products.iter_mut().find(|p| p.id == product_id) {
                let count = product.review_count as f32;
                product.rating = (product.rating * count + review.rating as f32) / (count + 1.0);
                product.review_count += 1;
            }
            Ok(review)
        })))
    }

    // ==================== COMMERCE ====================

    fn create_funding<'a>(
        &'a self,
        project_id: &'a str,
        supporter_id: &'a str,
        reward_id: Option<String>,
        amount: u64,
    ) -> StoreFuture<'a, Funding> {
        Box::pin(ready(self.with_inner(move |inner| {
            let funding = Funding {
                id: uuid::Uuid::new_v4().to_string(),
                project_id: project_id.to_string(),
                supporter_id: supporter_id.to_string(),
                amount,
                reward_id,
                status: TransactionStatus::Pending,
                created_at: Utc::now(),
            };
            inner.fundings.push(funding.clone());
            Ok(funding)
        })))
    }

    fn get_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Funding>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner.fundings.iter().find(|f| f.id == id).cloned())
        })))
    }

    fn settle_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding> {
        Box::pin(ready(self.with_inner(|inner| {
            let funding = inner
                .fundings
                .iter()
                .find(|f| f.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Funding {} not found", id)))?;

            if funding.status != TransactionStatus::Pending {
                return Err(AppError::InvalidState(format!(
                    "Funding {} is already {}",
                    id,
                    funding.status.as_str()
                )));
            }

            if let Some(project) = inner
                .projects
                .iter_mut()
                .find(|p| p.id == funding.project_id)
            {
                project.current_funding += funding.amount;
                project.updated_at = Utc::now();
                if let Some(reward_id) = &funding.reward_id {
                    if let Some(reward) =
                        project.rewards.iter_mut().find(|r| &r.id == reward_id)
                    {
                        if !reward.is_sold_out() {
                            reward.current_quantity += 1;
                        }
                    }
                }
            }

            let funding = inner
                .fundings
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| AppError::Internal(format!("funding {} vanished", id)))?;
            funding.status = TransactionStatus::Completed;
            Ok(funding.clone())
        })))
    }

    fn cancel_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding> {
        Box::pin(ready(self.with_inner(|inner| {
            let funding = inner
                .fundings
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Funding {} not found", id)))?;

            if funding.status != TransactionStatus::Pending {
                return Err(AppError::InvalidState(format!(
                    "Funding {} is already {}",
                    id,
                    funding.status.as_str()
                )));
            }

            funding.status = TransactionStatus::Cancelled;
            Ok(funding.clone())
        })))
    }

    fn create_purchase<'a>(
        &'a self,
        product_id: &'a str,
        buyer_id: &'a str,
        amount: u64,
        status: TransactionStatus,
    ) -> StoreFuture<'a, Purchase> {
        Box::pin(ready(self.with_inner(move |inner| {
            let purchase = Purchase {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                buyer_id: buyer_id.to_string(),
                amount,
                status,
                created_at: Utc::now(),
            };
            inner.purchases.push(purchase.clone());

            if status == TransactionStatus::Completed {
                if let Some(product) = inner.products.iter_mut().find(|p| p.id == product_id) {
                    product.sales_count += 1;
                }
            }
            Ok(purchase)
        })))
    }

    fn get_purchase<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Purchase>> {
        Box::pin(ready(self.with_inner(|inner| {
            Ok(inner.purchases.iter().find(|p| p.id == id).cloned())
        })))
    }
}
