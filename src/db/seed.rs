//! Sample catalog seeder.
//!
//! Fills an empty database with the demo catalog so a fresh instance
//! serves the same listings the original application shipped with.

use chrono::{DateTime, TimeZone, Utc};

use crate::errors::AppError;
use crate::models::{
    Answer, Category, DeliveryMethod, FundingPeriod, Product, ProductStatus, Project,
    ProjectStatus, QnaQuestion, QnaStatus, QuestionType, Reward, User, UserRole,
};

use super::Repository;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn creator(id: &str, name: &str, email: &str, followers: u32, following: u32, likes: u32) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        profile_image: None,
        role: UserRole::Creator,
        followers,
        following,
        likes,
    }
}

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "AI 기반 개인 비서 앱".to_string(),
            description: "일상 생활을 더욱 편리하게 만들어주는 AI 개인 비서".to_string(),
            category: Category::AppService,
            main_image:
                "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("1", "김개발", "dev@example.com", 120, 45, 89),
            current_funding: 3_200_000,
            funding_period: FundingPeriod {
                start: date(2024, 1, 1),
                end: date(2024, 3, 31),
            },
            rewards: vec![
                Reward {
                    id: "1".to_string(),
                    name: "얼리버드 리워드".to_string(),
                    description: "앱 출시 후 1개월 이내에 다운로드 가능한 베타 버전".to_string(),
                    amount: 500,
                    delivery_method: "앱스토어 링크".to_string(),
                    delivery_date: date(2024, 4, 1),
                    max_quantity: Some(100),
                    current_quantity: 45,
                },
                Reward {
                    id: "2".to_string(),
                    name: "프리미엄 리워드".to_string(),
                    description: "베타 버전 + 추가 기능 3개월 무료 이용권".to_string(),
                    amount: 500,
                    delivery_method: "앱스토어 링크 + 이메일".to_string(),
                    delivery_date: date(2024, 4, 1),
                    max_quantity: Some(50),
                    current_quantity: 23,
                },
            ],
            status: ProjectStatus::Active,
            created_at: date(2024, 1, 1),
            updated_at: date(2024, 1, 15),
        },
        Project {
            id: "2".to_string(),
            title: "프로젝트 관리 노션 템플릿".to_string(),
            description: "팀 프로젝트 관리를 위한 완벽한 노션 템플릿".to_string(),
            category: Category::NotionTemplate,
            main_image:
                "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("2", "이디자인", "design@example.com", 89, 23, 156),
            current_funding: 850_000,
            funding_period: FundingPeriod {
                start: date(2024, 1, 15),
                end: date(2024, 2, 15),
            },
            rewards: Vec::new(),
            status: ProjectStatus::Active,
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 20),
        },
        Project {
            id: "3".to_string(),
            title: "자동화 워크플로우 도구".to_string(),
            description: "반복 작업을 자동화하는 강력한 워크플로우 도구".to_string(),
            category: Category::AutomationTool,
            main_image:
                "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("3", "박자동화", "auto@example.com", 234, 67, 445),
            current_funding: 2_100_000,
            funding_period: FundingPeriod {
                start: date(2024, 1, 10),
                end: date(2024, 4, 10),
            },
            rewards: Vec::new(),
            status: ProjectStatus::Active,
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 25),
        },
        Project {
            id: "4".to_string(),
            title: "UI/UX 디자인 시스템".to_string(),
            description: "일관된 디자인을 위한 완벽한 UI/UX 디자인 시스템".to_string(),
            category: Category::DesignResource,
            main_image:
                "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("4", "최디자인", "ui@example.com", 567, 123, 789),
            current_funding: 1_500_000,
            funding_period: FundingPeriod {
                start: date(2024, 1, 5),
                end: date(2024, 3, 5),
            },
            rewards: Vec::new(),
            status: ProjectStatus::Active,
            created_at: date(2024, 1, 5),
            updated_at: date(2024, 1, 18),
        },
    ]
}

fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            title: "AI 기반 개인 비서 앱".to_string(),
            description: "일상 생활을 더욱 편리하게 만들어주는 AI 개인 비서 앱입니다. 스케줄 관리, 알림, 음성 인식 등 다양한 기능을 제공합니다."
                .to_string(),
            category: Category::AppService,
            price: 29_000,
            original_price: Some(49_000),
            main_image:
                "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("1", "김개발", "dev@example.com", 120, 45, 89),
            rating: 4.8,
            review_count: 156,
            sales_count: 2340,
            delivery_method: DeliveryMethod::Link,
            tags: ["AI", "앱", "자동화", "생산성"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            status: ProductStatus::Active,
            created_at: date(2024, 1, 1),
            updated_at: date(2024, 1, 15),
        },
        Product {
            id: "2".to_string(),
            title: "프로젝트 관리 노션 템플릿".to_string(),
            description: "팀 프로젝트 관리를 위한 완벽한 노션 템플릿입니다. 태스크 관리, 일정 추적, 팀 협업을 위한 모든 기능이 포함되어 있습니다."
                .to_string(),
            category: Category::NotionTemplate,
            price: 15_000,
            original_price: None,
            main_image:
                "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("2", "이디자인", "design@example.com", 89, 23, 156),
            rating: 4.9,
            review_count: 89,
            sales_count: 1200,
            delivery_method: DeliveryMethod::Link,
            tags: ["노션", "템플릿", "프로젝트관리", "협업"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            status: ProductStatus::Active,
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 20),
        },
        Product {
            id: "3".to_string(),
            title: "자동화 워크플로우 도구".to_string(),
            description: "반복 작업을 자동화하는 강력한 워크플로우 도구입니다. 복잡한 업무 프로세스를 간단하게 자동화할 수 있습니다."
                .to_string(),
            category: Category::AutomationTool,
            price: 45_000,
            original_price: Some(69_000),
            main_image:
                "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("3", "박자동화", "auto@example.com", 234, 67, 445),
            rating: 4.7,
            review_count: 234,
            sales_count: 890,
            delivery_method: DeliveryMethod::File,
            tags: ["자동화", "워크플로우", "생산성", "업무효율"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            status: ProductStatus::Active,
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 25),
        },
        Product {
            id: "4".to_string(),
            title: "UI/UX 디자인 시스템".to_string(),
            description: "일관된 디자인을 위한 완벽한 UI/UX 디자인 시스템입니다. 컴포넌트, 아이콘, 색상 팔레트가 모두 포함되어 있습니다."
                .to_string(),
            category: Category::DesignResource,
            price: 35_000,
            original_price: None,
            main_image:
                "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=400&h=300&fit=crop"
                    .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            creator: creator("4", "최디자인", "ui@example.com", 567, 123, 789),
            rating: 4.9,
            review_count: 445,
            sales_count: 3200,
            delivery_method: DeliveryMethod::File,
            tags: ["디자인", "UI/UX", "컴포넌트", "시스템"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            status: ProductStatus::Active,
            created_at: date(2024, 1, 5),
            updated_at: date(2024, 1, 18),
        },
    ]
}

fn sample_questions() -> Vec<QnaQuestion> {
    vec![QnaQuestion {
        id: "1".to_string(),
        project_id: "1".to_string(),
        title: "베타 버전은 언제 이용할 수 있나요?".to_string(),
        content: "얼리버드 리워드로 후원했는데 베타 버전 다운로드 일정이 궁금합니다.".to_string(),
        question_type: QuestionType::Technical,
        is_private: false,
        status: QnaStatus::Answered,
        author: "열정후원자".to_string(),
        images: Vec::new(),
        answers: vec![Answer {
            id: "1".to_string(),
            author: "김개발".to_string(),
            content: "4월 첫 주에 앱스토어 링크를 이메일로 보내드릴 예정입니다.".to_string(),
            is_creator: true,
            likes: 12,
            dislikes: 0,
            created_at: date(2024, 1, 22),
        }],
        created_at: date(2024, 1, 20),
    }]
}

/// Seed the sample catalog into an empty database. Returns `true` when
/// fixtures were inserted, `false` when data already existed.
pub async fn seed_sample_data(repo: &Repository) -> Result<bool, AppError> {
    if repo.count_projects().await? > 0 {
        return Ok(false);
    }

    for project in sample_projects() {
        repo.insert_project(&project).await?;
    }
    for product in sample_products() {
        repo.insert_product(&product).await?;
    }
    for question in sample_questions() {
        repo.insert_question(&question).await?;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_rewards_respect_quantity_caps() {
        for project in sample_projects() {
            for reward in &project.rewards {
                assert!(
                    reward.quantity_in_bounds(),
                    "reward {} of project {} exceeds its cap",
                    reward.id,
                    project.id
                );
                assert_eq!(reward.amount, 500);
            }
        }
    }

    #[test]
    fn fixture_discounts_are_real_discounts() {
        for product in sample_products() {
            if let Some(original) = product.original_price {
                assert!(original > product.price, "product {}", product.id);
            }
        }
    }

    #[test]
    fn fixture_funding_periods_are_ordered() {
        for project in sample_projects() {
            assert!(project.funding_period.end > project.funding_period.start);
        }
    }
}
