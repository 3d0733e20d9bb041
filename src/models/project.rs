//! Project model: a listing collecting fixed-amount donations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, User};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Pending => "pending",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProjectStatus::Draft),
            "pending" => Some(ProjectStatus::Pending),
            "approved" => Some(ProjectStatus::Approved),
            "rejected" => Some(ProjectStatus::Rejected),
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

/// Time window during which a project accepts funding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A reward tier promised to supporters, with an optional claim cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: u64,
    pub delivery_method: String,
    pub delivery_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,
    pub current_quantity: u32,
}

impl Reward {
    /// `current_quantity` may never exceed the cap when one is set.
    pub fn quantity_in_bounds(&self) -> bool {
        match self.max_quantity {
            Some(max) => self.current_quantity <= max,
            None => true,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        matches!(self.max_quantity, Some(max) if self.current_quantity >= max)
    }
}

/// A funding project listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub main_image: String,
    pub images: Vec<String>,
    pub creator: User,
    pub current_funding: u64,
    pub funding_period: FundingPeriod,
    pub rewards: Vec<Reward>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn reward(&self, reward_id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == reward_id)
    }
}

/// Request body for registering a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub funding_period: FundingPeriod,
    #[serde(default)]
    pub rewards: Vec<CreateRewardRequest>,
    pub creator: User,
}

/// Reward tier within a project registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRequest {
    pub name: String,
    pub description: String,
    pub amount: u64,
    pub delivery_method: String,
    pub delivery_date: DateTime<Utc>,
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(current: u32, max: Option<u32>) -> Reward {
        Reward {
            id: "r1".to_string(),
            name: "얼리버드 리워드".to_string(),
            description: "베타 버전".to_string(),
            amount: 500,
            delivery_method: "앱스토어 링크".to_string(),
            delivery_date: Utc::now(),
            max_quantity: max,
            current_quantity: current,
        }
    }

    #[test]
    fn reward_quantity_bounds() {
        assert!(reward(45, Some(100)).quantity_in_bounds());
        assert!(reward(100, Some(100)).quantity_in_bounds());
        assert!(!reward(101, Some(100)).quantity_in_bounds());
        assert!(reward(9999, None).quantity_in_bounds());
    }

    #[test]
    fn reward_sold_out_only_at_cap() {
        assert!(!reward(45, Some(100)).is_sold_out());
        assert!(reward(100, Some(100)).is_sold_out());
        assert!(!reward(9999, None).is_sold_out());
    }
}
