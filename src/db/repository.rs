//! SQLite-backed catalog store.
//!
//! Uses prepared statements and transactions for data integrity. Embedded
//! documents (creator summaries, images, rewards, answers) are stored as
//! JSON columns; timestamps as RFC3339 TEXT.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Answer, Category, CreateProductRequest, CreateProjectRequest, CreateQuestionRequest,
    CreateReviewRequest, DeliveryMethod, Funding, FundingPeriod, Product, ProductStatus, Project,
    ProjectStatus, Purchase, QnaQuestion, QnaStatus, QuestionType, Review, Reward,
    TransactionStatus,
};

use super::store::{CatalogStore, StoreFuture};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a fully-formed project row. Used by the sample-data seeder.
    pub async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO projects (
                id, title, description, category, main_image, images, creator,
                current_funding, funding_start, funding_end, rewards, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.category.as_str())
        .bind(&project.main_image)
        .bind(serde_json::to_string(&project.images)?)
        .bind(serde_json::to_string(&project.creator)?)
        .bind(project.current_funding as i64)
        .bind(project.funding_period.start.to_rfc3339())
        .bind(project.funding_period.end.to_rfc3339())
        .bind(serde_json::to_string(&project.rewards)?)
        .bind(project.status.as_str())
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a fully-formed product row. Used by the sample-data seeder.
    pub async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO products (
                id, title, description, category, price, original_price,
                main_image, images, creator, rating, review_count, sales_count,
                delivery_method, tags, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.category.as_str())
        .bind(product.price as i64)
        .bind(product.original_price.map(|p| p as i64))
        .bind(&product.main_image)
        .bind(serde_json::to_string(&product.images)?)
        .bind(serde_json::to_string(&product.creator)?)
        .bind(product.rating as f64)
        .bind(product.review_count as i64)
        .bind(product.sales_count as i64)
        .bind(product.delivery_method.as_str())
        .bind(serde_json::to_string(&product.tags)?)
        .bind(product.status.as_str())
        .bind(product.created_at.to_rfc3339())
        .bind(product.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a fully-formed question thread. Used by the sample-data seeder.
    pub async fn insert_question(&self, question: &QnaQuestion) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO qna_questions (
                id, project_id, title, content, question_type, is_private,
                status, author, images, answers, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&question.id)
        .bind(&question.project_id)
        .bind(&question.title)
        .bind(&question.content)
        .bind(question.question_type.as_str())
        .bind(question.is_private as i32)
        .bind(question.status.as_str())
        .bind(&question.author)
        .bind(serde_json::to_string(&question.images)?)
        .bind(serde_json::to_string(&question.answers)?)
        .bind(question.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Number of project rows; the seeder only fills an empty catalog.
    pub async fn count_projects(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

const PROJECT_COLUMNS: &str = "id, title, description, category, main_image, images, creator, \
     current_funding, funding_start, funding_end, rewards, status, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, title, description, category, price, original_price, \
     main_image, images, creator, rating, review_count, sales_count, delivery_method, tags, \
     status, created_at, updated_at";

const QNA_COLUMNS: &str = "id, project_id, title, content, question_type, is_private, status, \
     author, images, answers, created_at";

impl CatalogStore for Repository {
    // ==================== PROJECTS ====================

    fn list_projects(&self) -> StoreFuture<'_, Vec<Project>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!(
                "SELECT {} FROM projects ORDER BY created_at",
                PROJECT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(project_from_row)
                .collect::<Result<Vec<Project>, AppError>>()
        })
    }

    fn get_project<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Project>> {
        Box::pin(async move {
            let row = sqlx::query(&format!(
                "SELECT {} FROM projects WHERE id = ?",
                PROJECT_COLUMNS
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            row.as_ref().map(project_from_row).transpose()
        })
    }

    fn create_project<'a>(
        &'a self,
        request: &'a CreateProjectRequest,
    ) -> StoreFuture<'a, Project> {
        Box::pin(async move {
            let now = Utc::now();
            let rewards: Vec<Reward> = request
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
                .collect();

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
                rewards,
                status: ProjectStatus::Active,
                created_at: now,
                updated_at: now,
            };

            self.insert_project(&project).await?;
            Ok(project)
        })
    }

    // ==================== PRODUCTS ====================

    fn list_products(&self) -> StoreFuture<'_, Vec<Product>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!(
                "SELECT {} FROM products ORDER BY created_at",
                PRODUCT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(product_from_row)
                .collect::<Result<Vec<Product>, AppError>>()
        })
    }

    fn get_product<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Product>> {
        Box::pin(async move {
            let row = sqlx::query(&format!(
                "SELECT {} FROM products WHERE id = ?",
                PRODUCT_COLUMNS
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            row.as_ref().map(product_from_row).transpose()
        })
    }

    fn create_product<'a>(
        &'a self,
        request: &'a CreateProductRequest,
    ) -> StoreFuture<'a, Product> {
        Box::pin(async move {
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

            self.insert_product(&product).await?;
            Ok(product)
        })
    }

    // ==================== QNA ====================

    fn list_questions<'a>(&'a self, project_id: &'a str) -> StoreFuture<'a, Vec<QnaQuestion>> {
        Box::pin(async move {
            let rows = sqlx::query(&format!(
                "SELECT {} FROM qna_questions WHERE project_id = ? ORDER BY created_at",
                QNA_COLUMNS
            ))
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(question_from_row)
                .collect::<Result<Vec<QnaQuestion>, AppError>>()
        })
    }

    fn get_question<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<QnaQuestion>> {
        Box::pin(async move {
            let row = sqlx::query(&format!(
                "SELECT {} FROM qna_questions WHERE id = ?",
                QNA_COLUMNS
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            row.as_ref().map(question_from_row).transpose()
        })
    }

    fn create_question<'a>(
        &'a self,
        project_id: &'a str,
        request: &'a CreateQuestionRequest,
    ) -> StoreFuture<'a, QnaQuestion> {
        Box::pin(async move {
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

            self.insert_question(&question).await?;
            Ok(question)
        })
    }

    fn add_answer<'a>(
        &'a self,
        question_id: &'a str,
        author: &'a str,
        content: &'a str,
        is_creator: bool,
    ) -> StoreFuture<'a, QnaQuestion> {
        Box::pin(async move {
            let mut question = self
                .get_question(question_id)
                .await?
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

            sqlx::query("UPDATE qna_questions SET answers = ?, status = ? WHERE id = ?")
                .bind(serde_json::to_string(&question.answers)?)
                .bind(question.status.as_str())
                .bind(question_id)
                .execute(&self.pool)
                .await?;

            Ok(question)
        })
    }

    // ==================== REVIEWS ====================

    fn list_reviews<'a>(&'a self, product_id: &'a str) -> StoreFuture<'a, Vec<Review>> {
        Box::pin(async move {
            let rows = sqlx::query(
                "SELECT id, product_id, author, rating, content, images, created_at \
                 FROM reviews WHERE product_id = ? ORDER BY created_at",
            )
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

            rows.iter()
                .map(review_from_row)
                .collect::<Result<Vec<Review>, AppError>>()
        })
    }

    fn create_review<'a>(
        &'a self,
        product_id: &'a str,
        request: &'a CreateReviewRequest,
    ) -> StoreFuture<'a, Review> {
        Box::pin(async move {
            let review = Review {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                author: request.author.clone(),
                rating: request.rating,
                content: request.content.clone(),
                images: request.images.clone(),
                created_at: Utc::now(),
            };

            let mut tx = self.pool.begin().await?;

            sqlx::query(
                "INSERT INTO reviews (id, product_id, author, rating, content, images, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&review.id)
            .bind(&review.product_id)
            .bind(&review.author)
            .bind(review.rating as i64)
            .bind(&review.content)
            .bind(serde_json::to_string(&review.images)?)
            .bind(review.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;

            // Fold the new rating into the product aggregates.
            let row = sqlx::query("SELECT rating, review_count FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;
            if let Some(row) = row {
                let rating: f64 = row.get("rating");
                let count: i64 = row.get("review_count");
                let new_count = count + 1;
                let new_rating =
                    (rating * count as f64 + review.rating as f64) / new_count as f64;
                sqlx::query(
                    "UPDATE products SET rating = ?, review_count = ?, updated_at = ? WHERE id = ?",
                )
                .bind(new_rating)
                .bind(new_count)
                .bind(Utc::now().to_rfc3339())
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok(review)
        })
    }

    // ==================== COMMERCE ====================

    fn create_funding<'a>(
        &'a self,
        project_id: &'a str,
        supporter_id: &'a str,
        reward_id: Option<String>,
        amount: u64,
    ) -> StoreFuture<'a, Funding> {
        Box::pin(async move {
            let funding = Funding {
                id: uuid::Uuid::new_v4().to_string(),
                project_id: project_id.to_string(),
                supporter_id: supporter_id.to_string(),
                amount,
                reward_id,
                status: TransactionStatus::Pending,
                created_at: Utc::now(),
            };

            sqlx::query(
                "INSERT INTO fundings (id, project_id, supporter_id, amount, reward_id, status, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&funding.id)
            .bind(&funding.project_id)
            .bind(&funding.supporter_id)
            .bind(funding.amount as i64)
            .bind(&funding.reward_id)
            .bind(funding.status.as_str())
            .bind(funding.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;

            Ok(funding)
        })
    }

    fn get_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Funding>> {
        Box::pin(async move {
            let row = sqlx::query(
                "SELECT id, project_id, supporter_id, amount, reward_id, status, created_at \
                 FROM fundings WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.as_ref().map(funding_from_row))
        })
    }

    fn settle_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;

            let row = sqlx::query(
                "SELECT id, project_id, supporter_id, amount, reward_id, status, created_at \
                 FROM fundings WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            let mut funding = row
                .as_ref()
                .map(funding_from_row)
                .ok_or_else(|| AppError::NotFound(format!("Funding {} not found", id)))?;

            if funding.status != TransactionStatus::Pending {
                return Err(AppError::InvalidState(format!(
                    "Funding {} is already {}",
                    id,
                    funding.status.as_str()
                )));
            }

            sqlx::query("UPDATE fundings SET status = ? WHERE id = ?")
                .bind(TransactionStatus::Completed.as_str())
                .bind(id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "UPDATE projects SET current_funding = current_funding + ?, updated_at = ? \
                 WHERE id = ?",
            )
            .bind(funding.amount as i64)
            .bind(Utc::now().to_rfc3339())
            .bind(&funding.project_id)
            .execute(&mut *tx)
            .await?;

            // Claim the chosen reward tier, capped at its max quantity.
            if let Some(reward_id) = &funding.reward_id {
                let row = sqlx::query("SELECT rewards FROM projects WHERE id = ?")
                    .bind(&funding.project_id)
                    .fetch_optional(&mut *tx)
                    .await?;
                if let Some(row) = row {
                    let rewards_json: String = row.get("rewards");
                    let mut rewards: Vec<Reward> =
                        serde_json::from_str(&rewards_json).unwrap_or_default();
                    if let Some(reward) =
                        rewards.iter_mut().find(|r| &r.id == reward_id)
                    {
                        if !reward.is_sold_out() {
                            reward.current_quantity += 1;
                        }
                    }
                    sqlx::query("UPDATE projects SET rewards = ? WHERE id = ?")
                        .bind(serde_json::to_string(&rewards)?)
                        .bind(&funding.project_id)
                        .execute(&mut *tx)
                        .await?;
                }
            }

            tx.commit().await?;

            funding.status = TransactionStatus::Completed;
            Ok(funding)
        })
    }

    fn cancel_funding<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Funding> {
        Box::pin(async move {
            let result = sqlx::query(
                "UPDATE fundings SET status = ? WHERE id = ? AND status = ?",
            )
            .bind(TransactionStatus::Cancelled.as_str())
            .bind(id)
            .bind(TransactionStatus::Pending.as_str())
            .execute(&self.pool)
            .await?;

            let funding = self
                .get_funding(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Funding {} not found", id)))?;

            if result.rows_affected() == 0 {
                return Err(AppError::InvalidState(format!(
                    "Funding {} is already {}",
                    id,
                    funding.status.as_str()
                )));
            }

            Ok(funding)
        })
    }

    fn create_purchase<'a>(
        &'a self,
        product_id: &'a str,
        buyer_id: &'a str,
        amount: u64,
        status: TransactionStatus,
    ) -> StoreFuture<'a, Purchase> {
        Box::pin(async move {
            let purchase = Purchase {
                id: uuid::Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                buyer_id: buyer_id.to_string(),
                amount,
                status,
                created_at: Utc::now(),
            };

            let mut tx = self.pool.begin().await?;

            sqlx::query(
                "INSERT INTO purchases (id, product_id, buyer_id, amount, status, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&purchase.id)
            .bind(&purchase.product_id)
            .bind(&purchase.buyer_id)
            .bind(purchase.amount as i64)
            .bind(purchase.status.as_str())
            .bind(purchase.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;

            if status == TransactionStatus::Completed {
                sqlx::query(
                    "UPDATE products SET sales_count = sales_count + 1, updated_at = ? \
                     WHERE id = ?",
                )
                .bind(Utc::now().to_rfc3339())
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok(purchase)
        })
    }

    fn get_purchase<'a>(&'a self, id: &'a str) -> StoreFuture<'a, Option<Purchase>> {
        Box::pin(async move {
            let row = sqlx::query(
                "SELECT id, product_id, buyer_id, amount, status, created_at \
                 FROM purchases WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.as_ref().map(purchase_from_row))
        })
    }
}

// Helper functions for row conversion

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Project, AppError> {
    let category: String = row.get("category");
    let images: String = row.get("images");
    let creator: String = row.get("creator");
    let rewards: String = row.get("rewards");
    let status: String = row.get("status");
    let funding_start: String = row.get("funding_start");
    let funding_end: String = row.get("funding_end");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let current_funding: i64 = row.get("current_funding");

    Ok(Project {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: Category::from_str(&category).unwrap_or(Category::AppService),
        main_image: row.get("main_image"),
        images: serde_json::from_str(&images).unwrap_or_default(),
        creator: serde_json::from_str(&creator)?,
        current_funding: current_funding.max(0) as u64,
        funding_period: FundingPeriod {
            start: parse_datetime(&funding_start),
            end: parse_datetime(&funding_end),
        },
        rewards: serde_json::from_str(&rewards).unwrap_or_default(),
        status: ProjectStatus::from_str(&status).unwrap_or(ProjectStatus::Active),
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

fn product_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Product, AppError> {
    let category: String = row.get("category");
    let images: String = row.get("images");
    let creator: String = row.get("creator");
    let tags: String = row.get("tags");
    let status: String = row.get("status");
    let delivery_method: String = row.get("delivery_method");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let price: i64 = row.get("price");
    let original_price: Option<i64> = row.get("original_price");
    let rating: f64 = row.get("rating");
    let review_count: i64 = row.get("review_count");
    let sales_count: i64 = row.get("sales_count");

    Ok(Product {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: Category::from_str(&category).unwrap_or(Category::AppService),
        price: price.max(0) as u64,
        original_price: original_price.map(|p| p.max(0) as u64),
        main_image: row.get("main_image"),
        images: serde_json::from_str(&images).unwrap_or_default(),
        creator: serde_json::from_str(&creator)?,
        rating: rating as f32,
        review_count: review_count.max(0) as u32,
        sales_count: sales_count.max(0) as u32,
        delivery_method: DeliveryMethod::from_str(&delivery_method)
            .unwrap_or(DeliveryMethod::File),
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        status: ProductStatus::from_str(&status).unwrap_or(ProductStatus::Active),
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

fn question_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<QnaQuestion, AppError> {
    let question_type: String = row.get("question_type");
    let status: String = row.get("status");
    let images: String = row.get("images");
    let answers: String = row.get("answers");
    let created_at: String = row.get("created_at");
    let is_private: i32 = row.get("is_private");

    Ok(QnaQuestion {
        id: row.get("id"),
        project_id: row.get("project_id"),
        title: row.get("title"),
        content: row.get("content"),
        question_type: QuestionType::from_str(&question_type).unwrap_or(QuestionType::Other),
        is_private: is_private != 0,
        status: QnaStatus::from_str(&status).unwrap_or(QnaStatus::Pending),
        author: row.get("author"),
        images: serde_json::from_str(&images).unwrap_or_default(),
        answers: serde_json::from_str(&answers).unwrap_or_default(),
        created_at: parse_datetime(&created_at),
    })
}

fn review_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Review, AppError> {
    let images: String = row.get("images");
    let created_at: String = row.get("created_at");
    let rating: i64 = row.get("rating");

    Ok(Review {
        id: row.get("id"),
        product_id: row.get("product_id"),
        author: row.get("author"),
        rating: rating.clamp(0, 5) as u8,
        content: row.get("content"),
        images: serde_json::from_str(&images).unwrap_or_default(),
        created_at: parse_datetime(&created_at),
    })
}

fn funding_from_row(row: &sqlx::sqlite::SqliteRow) -> Funding {
    let amount: i64 = row.get("amount");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");

    Funding {
        id: row.get("id"),
        project_id: row.get("project_id"),
        supporter_id: row.get("supporter_id"),
        amount: amount.max(0) as u64,
        reward_id: row.get("reward_id"),
        status: TransactionStatus::from_str(&status).unwrap_or(TransactionStatus::Pending),
        created_at: parse_datetime(&created_at),
    }
}

fn purchase_from_row(row: &sqlx::sqlite::SqliteRow) -> Purchase {
    let amount: i64 = row.get("amount");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");

    Purchase {
        id: row.get("id"),
        product_id: row.get("product_id"),
        buyer_id: row.get("buyer_id"),
        amount: amount.max(0) as u64,
        status: TransactionStatus::from_str(&status).unwrap_or(TransactionStatus::Pending),
        created_at: parse_datetime(&created_at),
    }
}
