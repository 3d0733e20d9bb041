//! Funding confirmation flow.
//!
//! One manager drives every support attempt through the same two-step
//! modal sequence the catalog pages share:
//!
//! ```text
//! Idle ──begin──► ConfirmPending ──confirm──► Processing ──► Success ──dismiss──► Idle
//!                      │                          │
//!                      └────────── cancel ────────┴──► Cancelled (row), session removed
//! ```
//!
//! `Processing` covers the simulated payment settlement: a fixed delay in
//! place of a real gateway call. The settlement task is tied to a
//! `CancellationToken`, so abandoning the flow mid-delay aborts the task
//! instead of leaving a dangling callback that charges later. A store
//! failure during settlement lands in `Failed` — the terminal state a
//! real gateway integration needs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::db::CatalogStore;
use crate::errors::AppError;
use crate::models::{Funding, SUPPORT_AMOUNT};

/// Observable state of one funding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowState {
    /// No session exists for the id.
    Idle,
    /// Waiting for the supporter to confirm the non-refundable donation.
    ConfirmPending,
    /// Simulated settlement in progress.
    Processing,
    Success,
    Failed,
}

/// Snapshot of a session as reported to the API layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub state: FlowState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

struct Session {
    state: FlowState,
    project_title: String,
    message: Option<String>,
    cancel: CancellationToken,
}

/// Drives funding sessions over the catalog store. Cheap to clone; the
/// settlement tasks hold their own handle.
#[derive(Clone)]
pub struct FlowManager {
    inner: Arc<FlowInner>,
}

struct FlowInner {
    store: Arc<dyn CatalogStore>,
    settle_delay: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl FlowManager {
    pub fn new(store: Arc<dyn CatalogStore>, settle_delay: Duration) -> Self {
        Self {
            inner: Arc::new(FlowInner {
                store,
                settle_delay,
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Open a session for a support attempt: persists a pending funding of
    /// the fixed amount and waits for confirmation.
    ///
    /// A chosen reward must belong to the project and still have remaining
    /// quantity.
    pub async fn begin(
        &self,
        project_id: &str,
        reward_id: Option<String>,
        supporter_id: &str,
    ) -> Result<Funding, AppError> {
        let project = self
            .inner
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))?;

        if let Some(reward_id) = &reward_id {
            let reward = project.reward(reward_id).ok_or_else(|| {
                AppError::Validation(format!(
                    "Reward {} does not belong to project {}",
                    reward_id, project_id
                ))
            })?;
            if reward.is_sold_out() {
                return Err(AppError::Validation(format!(
                    "Reward {} is sold out",
                    reward_id
                )));
            }
        }

        let funding = self
            .inner
            .store
            .create_funding(project_id, supporter_id, reward_id, SUPPORT_AMOUNT)
            .await?;

        let mut sessions = self.inner.sessions.write().await;
        sessions.insert(
            funding.id.clone(),
            Session {
                state: FlowState::ConfirmPending,
                project_title: project.title.clone(),
                message: None,
                cancel: CancellationToken::new(),
            },
        );

        tracing::info!(funding_id = %funding.id, project_id, "funding flow opened");
        Ok(funding)
    }

    /// Supporter confirmed: start the simulated settlement.
    pub async fn confirm(&self, funding_id: &str) -> Result<FlowSnapshot, AppError> {
        let token = {
            let mut sessions = self.inner.sessions.write().await;
            let session = sessions.get_mut(funding_id).ok_or_else(|| {
                AppError::InvalidState(format!("No active funding session for {}", funding_id))
            })?;
            if session.state != FlowState::ConfirmPending {
                return Err(AppError::InvalidState(format!(
                    "Funding {} cannot be confirmed in its current state",
                    funding_id
                )));
            }
            session.state = FlowState::Processing;
            session.cancel.clone()
        };

        let manager = self.clone();
        let id = funding_id.to_string();
        let delay = self.inner.settle_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(funding_id = %id, "settlement aborted");
                }
                _ = tokio::time::sleep(delay) => {
                    manager.finish_settlement(&id).await;
                }
            }
        });

        self.snapshot(funding_id).await
    }

    /// Supporter declined, or navigated away mid-settlement. The pending
    /// row is marked cancelled and nothing is charged.
    pub async fn cancel(&self, funding_id: &str) -> Result<Funding, AppError> {
        {
            let mut sessions = self.inner.sessions.write().await;
            let session = sessions.get(funding_id).ok_or_else(|| {
                AppError::InvalidState(format!("No active funding session for {}", funding_id))
            })?;
            if !matches!(
                session.state,
                FlowState::ConfirmPending | FlowState::Processing
            ) {
                return Err(AppError::InvalidState(format!(
                    "Funding {} cannot be cancelled in its current state",
                    funding_id
                )));
            }
            session.cancel.cancel();
            sessions.remove(funding_id);
        }

        let funding = self.inner.store.cancel_funding(funding_id).await?;
        tracing::info!(funding_id, "funding flow cancelled");
        Ok(funding)
    }

    /// Close a finished session.
    pub async fn dismiss(&self, funding_id: &str) -> Result<(), AppError> {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions.get(funding_id).ok_or_else(|| {
            AppError::InvalidState(format!("No active funding session for {}", funding_id))
        })?;
        if !matches!(session.state, FlowState::Success | FlowState::Failed) {
            return Err(AppError::InvalidState(format!(
                "Funding {} has not finished settling",
                funding_id
            )));
        }
        sessions.remove(funding_id);
        Ok(())
    }

    /// Current state of a session; ids without one report `Idle`.
    pub async fn snapshot(&self, funding_id: &str) -> Result<FlowSnapshot, AppError> {
        let sessions = self.inner.sessions.read().await;
        Ok(match sessions.get(funding_id) {
            Some(session) => FlowSnapshot {
                state: session.state,
                project_title: Some(session.project_title.clone()),
                message: session.message.clone(),
            },
            None => FlowSnapshot {
                state: FlowState::Idle,
                project_title: None,
                message: None,
            },
        })
    }

    async fn finish_settlement(&self, funding_id: &str) {
        let outcome = self.inner.store.settle_funding(funding_id).await;

        let mut sessions = self.inner.sessions.write().await;
        // The session may have been cancelled while the settlement result
        // was in flight; the row is already cancelled then.
        let Some(session) = sessions.get_mut(funding_id) else {
            return;
        };

        match outcome {
            Ok(funding) => {
                session.state = FlowState::Success;
                session.message = Some(format!(
                    "'{}' 프로젝트에 {}원 후원이 완료되었습니다.",
                    session.project_title, funding.amount
                ));
                tracing::info!(funding_id, "funding settled");
            }
            Err(e) => {
                session.state = FlowState::Failed;
                session.message = Some("후원 결제에 실패했습니다. 다시 시도해주세요.".to_string());
                tracing::error!(funding_id, error = %e, "funding settlement failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration as ChronoDuration, Utc};

    use crate::db::MemoryStore;
    use crate::models::{
        Category, FundingPeriod, Project, ProjectStatus, Reward, TransactionStatus, User,
        UserRole,
    };

    fn sample_project() -> Project {
        let now = Utc::now();
        Project {
            id: "1".to_string(),
            title: "AI 기반 개인 비서 앱".to_string(),
            description: "일상 생활을 더욱 편리하게 만들어주는 AI 개인 비서".to_string(),
            category: Category::AppService,
            main_image: String::new(),
            images: Vec::new(),
            creator: User {
                id: "1".to_string(),
                name: "김개발".to_string(),
                email: "dev@example.com".to_string(),
                profile_image: None,
                role: UserRole::Creator,
                followers: 120,
                following: 45,
                likes: 89,
            },
            current_funding: 3_200_000,
            funding_period: FundingPeriod {
                start: now - ChronoDuration::days(10),
                end: now + ChronoDuration::days(50),
            },
            rewards: vec![
                Reward {
                    id: "r1".to_string(),
                    name: "얼리버드 리워드".to_string(),
                    description: "베타 버전".to_string(),
                    amount: 500,
                    delivery_method: "앱스토어 링크".to_string(),
                    delivery_date: now + ChronoDuration::days(60),
                    max_quantity: Some(100),
                    current_quantity: 45,
                },
                Reward {
                    id: "r2".to_string(),
                    name: "매진 리워드".to_string(),
                    description: "남은 수량 없음".to_string(),
                    amount: 500,
                    delivery_method: "이메일".to_string(),
                    delivery_date: now + ChronoDuration::days(60),
                    max_quantity: Some(50),
                    current_quantity: 50,
                },
            ],
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn manager_with_project() -> (FlowManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.insert_project(sample_project());
        let manager = FlowManager::new(
            store.clone() as Arc<dyn CatalogStore>,
            Duration::from_millis(20),
        );
        (manager, store)
    }

    async fn wait_for_settled(manager: &FlowManager, funding_id: &str) -> FlowSnapshot {
        for _ in 0..100 {
            let snapshot = manager.snapshot(funding_id).await.unwrap();
            if matches!(snapshot.state, FlowState::Success | FlowState::Failed) {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("settlement never finished");
    }

    #[tokio::test]
    async fn full_funding_scenario() {
        let (manager, store) = manager_with_project();

        // Idle before any session exists.
        let idle = manager.snapshot("nothing").await.unwrap();
        assert_eq!(idle.state, FlowState::Idle);

        let funding = manager
            .begin("1", Some("r1".to_string()), "supporter-1")
            .await
            .unwrap();
        assert_eq!(funding.amount, 500);
        assert_eq!(funding.status, TransactionStatus::Pending);

        let snapshot = manager.snapshot(&funding.id).await.unwrap();
        assert_eq!(snapshot.state, FlowState::ConfirmPending);

        let snapshot = manager.confirm(&funding.id).await.unwrap();
        assert_eq!(snapshot.state, FlowState::Processing);

        let settled = wait_for_settled(&manager, &funding.id).await;
        assert_eq!(settled.state, FlowState::Success);
        let message = settled.message.unwrap();
        assert!(message.contains("500원"));
        assert!(message.contains("AI 기반 개인 비서 앱"));

        // The charge landed: row completed, project credited, reward claimed.
        let row = store.get_funding(&funding.id).await.unwrap().unwrap();
        assert_eq!(row.status, TransactionStatus::Completed);
        let project = store.get_project("1").await.unwrap().unwrap();
        assert_eq!(project.current_funding, 3_200_500);
        assert_eq!(project.reward("r1").unwrap().current_quantity, 46);

        // Dismissing returns the session to Idle.
        manager.dismiss(&funding.id).await.unwrap();
        let idle = manager.snapshot(&funding.id).await.unwrap();
        assert_eq!(idle.state, FlowState::Idle);
    }

    #[tokio::test]
    async fn cancel_before_confirm_charges_nothing() {
        let (manager, store) = manager_with_project();

        let funding = manager.begin("1", None, "supporter-1").await.unwrap();
        let cancelled = manager.cancel(&funding.id).await.unwrap();
        assert_eq!(cancelled.status, TransactionStatus::Cancelled);

        // No success modal, no charge.
        let snapshot = manager.snapshot(&funding.id).await.unwrap();
        assert_eq!(snapshot.state, FlowState::Idle);
        let project = store.get_project("1").await.unwrap().unwrap();
        assert_eq!(project.current_funding, 3_200_000);
    }

    #[tokio::test]
    async fn cancel_during_processing_aborts_settlement() {
        let store = Arc::new(MemoryStore::new());
        store.insert_project(sample_project());
        // Long delay so the cancel always lands mid-settlement.
        let manager = FlowManager::new(
            store.clone() as Arc<dyn CatalogStore>,
            Duration::from_secs(60),
        );

        let funding = manager.begin("1", None, "supporter-1").await.unwrap();
        manager.confirm(&funding.id).await.unwrap();
        manager.cancel(&funding.id).await.unwrap();

        let row = store.get_funding(&funding.id).await.unwrap().unwrap();
        assert_eq!(row.status, TransactionStatus::Cancelled);
        let project = store.get_project("1").await.unwrap().unwrap();
        assert_eq!(project.current_funding, 3_200_000);
    }

    #[tokio::test]
    async fn confirm_requires_a_pending_session() {
        let (manager, _store) = manager_with_project();

        let err = manager.confirm("no-such-funding").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let funding = manager.begin("1", None, "supporter-1").await.unwrap();
        manager.confirm(&funding.id).await.unwrap();
        // Second confirm is an illegal transition.
        let err = manager.confirm(&funding.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn begin_rejects_foreign_and_sold_out_rewards() {
        let (manager, _store) = manager_with_project();

        let err = manager
            .begin("1", Some("not-a-reward".to_string()), "supporter-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = manager
            .begin("1", Some("r2".to_string()), "supporter-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn begin_on_unknown_project_is_not_found() {
        let (manager, _store) = manager_with_project();
        let err = manager.begin("999", None, "supporter-1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn dismiss_only_after_settlement() {
        let (manager, _store) = manager_with_project();
        let funding = manager.begin("1", None, "supporter-1").await.unwrap();

        let err = manager.dismiss(&funding.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        manager.confirm(&funding.id).await.unwrap();
        wait_for_settled(&manager, &funding.id).await;
        manager.dismiss(&funding.id).await.unwrap();
    }
}
