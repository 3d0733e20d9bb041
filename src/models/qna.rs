//! QnA thread models: questions attached to a project, answered by its
//! creator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Question classification shown as a badge on the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    General,
    Technical,
    Delivery,
    Refund,
    Other,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::General => "general",
            QuestionType::Technical => "technical",
            QuestionType::Delivery => "delivery",
            QuestionType::Refund => "refund",
            QuestionType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "general" => Some(QuestionType::General),
            "technical" => Some(QuestionType::Technical),
            "delivery" => Some(QuestionType::Delivery),
            "refund" => Some(QuestionType::Refund),
            "other" => Some(QuestionType::Other),
            _ => None,
        }
    }
}

/// Thread state: pending until the creator replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QnaStatus {
    Pending,
    Answered,
}

impl QnaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QnaStatus::Pending => "pending",
            QnaStatus::Answered => "answered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(QnaStatus::Pending),
            "answered" => Some(QnaStatus::Answered),
            _ => None,
        }
    }
}

/// A single reply inside a thread. `is_creator` distinguishes the project
/// creator's replies from other commenters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub author: String,
    pub content: String,
    pub is_creator: bool,
    pub likes: u32,
    pub dislikes: u32,
    pub created_at: DateTime<Utc>,
}

/// A question thread belonging to exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QnaQuestion {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub content: String,
    pub question_type: QuestionType,
    pub is_private: bool,
    pub status: QnaStatus,
    pub author: String,
    pub images: Vec<String>,
    pub answers: Vec<Answer>,
    pub created_at: DateTime<Utc>,
}

/// Request body for opening a question thread.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub question_type: String,
    #[serde(default)]
    pub is_private: bool,
    pub author: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Request body for replying to a thread.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub is_creator: bool,
}
