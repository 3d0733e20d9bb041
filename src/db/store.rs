//! Catalog store interface.
//!
//! The repository abstraction behind every read/write path: catalog pages
//! and the confirmation flow depend on this trait, never on literal
//! collections. Production uses the SQLite [`Repository`](super::Repository);
//! unit tests use the in-memory [`MemoryStore`](super::MemoryStore).

use std::future::Future;
use std::pin::Pin;

use crate::errors::AppError;
use crate::models::{
    CreateProductRequest, CreateProjectRequest, CreateQuestionRequest, CreateReviewRequest,
    Funding, Product, Project, Purchase, QnaQuestion, Review, TransactionStatus,
};

/// Boxed future returned by store methods, usable behind `dyn`.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>;

/// Data operations shared by both store implementations.
pub trait CatalogStore: Send + Sync {
    // ==================== PROJECTS ====================

    fn list_projects(&self) -> StoreFuture<'_, Vec<Project>>;
    fn get_project<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Project>>;
    fn create_project<'a>(
        &'a self,
        request: &'a CreateProjectRequest,
    ) -> StoreFuture<'a, Project>;

    // ==================== PRODUCTS ====================

    fn list_products(&self) -> StoreFuture<'_, Vec<Product>>;
    fn get_product<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Product>>;
    fn create_product<'a>(
        &'a self,
        request: &'a CreateProductRequest,
    ) -> StoreFuture<'a, Product>;

    // ==================== QNA ====================

    fn list_questions<'a>(&'a self, project_id: &'a str) -> StoreFuture<'a, Vec<QnaQuestion>>;
    fn get_question<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<QnaQuestion>>;
    fn create_question<'a>(
        &'a self,
        project_id: &'a str,
        request: &'a CreateQuestionRequest,
    ) -> StoreFuture<'a, QnaQuestion>;
    /// Appends an answer and, for creator replies, marks the thread answered.
    fn add_answer<'a>(
        &'a self,
        question_id: &'a str,
        author: &'a str,
        content: &'a str,
        is_creator: bool,
    ) -> StoreFuture<'a, QnaQuestion>;

    // ==================== REVIEWS ====================

    fn list_reviews<'a>(&'a self, product_id: &'a str) -> StoreFuture<'a, Vec<Review>>;
    fn create_review<'a>(
        &'a self,
        product_id: &'a str,
        request: &'a CreateReviewRequest,
    ) -> StoreFuture<'a, Review>;

    // ==================== COMMERCE ====================

    fn create_funding<'a>(
        &'a self,
        project_id: &'a str,
        supporter_id: &'a str,
        reward_id: Option<String>,
        amount: u64,
    ) -> StoreFuture<'a, Funding>;
    fn get_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Funding>>;
    /// Marks a pending funding completed and credits the project (and the
    /// claimed reward tier, when one was chosen).
    fn settle_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding>;
    /// Marks a pending funding cancelled. No charge is recorded.
    fn cancel_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding>;

    fn create_purchase<'a>(
        &'a self,
        product_id: &'a str,
        buyer_id: &'a str,
        amount: u64,
        status: TransactionStatus,
    ) -> StoreFuture<'a, Purchase>;
    fn get_purchase<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Purchase>>;
}
