//! Fixed-interval refresh loops for the chat views.
//!
//! The store offers no push channel, so open chat views re-fetch on a timer.
//! A [`PollerHandle`] owns its loop: dropping it or calling
//! [`PollerHandle::stop`] aborts the task, so a poll never outlives the view
//! that started it.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::chat::{ChatConsultation, ChatMessage, ConsultationStatus};
use crate::domain::types::{MessageContent, SessionId};
use crate::dto::chat::{ChatDashboardData, ConsultationDetailData};
use crate::repository::{ChatReader, ChatWriter};
use crate::services::ServiceResult;
use crate::services::chat;

/// Visitor widget refresh.
pub const VISITOR_POLL_INTERVAL: Duration = Duration::from_secs(3);
/// Admin consultation list refresh.
pub const ADMIN_LIST_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Admin open conversation refresh.
pub const CONVERSATION_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Runs a refresh closure on a fixed interval.
#[derive(Debug, Clone)]
pub struct Poller {
    name: String,
    interval: Duration,
}

impl Poller {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawns the loop on the current runtime.
    ///
    /// The first refresh runs immediately. Each tick awaits one refresh; a
    /// slow refresh delays the following ticks instead of bunching them up.
    /// Failures are logged and the loop carries on with the next tick.
    pub fn spawn<F, Fut, E>(self, mut refresh: F) -> PollerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Display,
    {
        let Poller { name, interval } = self;
        log::info!("Polling {name} every {}s", interval.as_secs_f64());

        let task_name = name.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = refresh().await {
                    log::warn!("Polling {task_name} failed: {err}");
                }
            }
        });

        PollerHandle { name, task }
    }
}

/// Owner of a running poll loop.
#[derive(Debug)]
pub struct PollerHandle {
    name: String,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(self) {
        // Drop aborts the task.
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            log::info!("Stopped polling {}", self.name);
        }
        self.task.abort();
    }
}

/// Visitor side of an active chat: the conversation as last fetched.
pub struct VisitorChat<R: ?Sized> {
    repo: Arc<R>,
    session_id: SessionId,
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl<R: ?Sized> Clone for VisitorChat<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            session_id: self.session_id,
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<R> VisitorChat<R>
where
    R: ChatReader + ChatWriter + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, session_id: SessionId) -> Self {
        Self {
            repo,
            session_id,
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Replaces the local conversation with the stored one.
    pub async fn refresh(&self) -> ServiceResult<usize> {
        let fresh = chat::visitor_messages(self.repo.as_ref(), self.session_id).await?;
        let count = fresh.len();
        *self.messages.write().await = fresh;
        Ok(count)
    }

    /// Sends a message and reloads the conversation. On failure nothing changes locally.
    pub async fn send(&self, content: MessageContent) -> ServiceResult<ChatMessage> {
        let saved = chat::send_visitor_message(self.repo.as_ref(), self.session_id, content).await?;
        self.refresh().await?;
        Ok(saved)
    }

    pub fn start_polling(&self) -> PollerHandle {
        let chat = self.clone();
        Poller::new(format!("chat session {}", self.session_id), VISITOR_POLL_INTERVAL).spawn(
            move || {
                let chat = chat.clone();
                async move { chat.refresh().await.map(|_| ()) }
            },
        )
    }
}

/// Admin side: the consultation list plus at most one open conversation.
pub struct AdminChatMonitor<R: ?Sized> {
    repo: Arc<R>,
    dashboard: Arc<RwLock<Option<ChatDashboardData>>>,
    open: Arc<RwLock<Option<ConsultationDetailData>>>,
}

impl<R: ?Sized> Clone for AdminChatMonitor<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            dashboard: Arc::clone(&self.dashboard),
            open: Arc::clone(&self.open),
        }
    }
}

impl<R> AdminChatMonitor<R>
where
    R: ChatReader + ChatWriter + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            dashboard: Arc::new(RwLock::new(None)),
            open: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn dashboard(&self) -> Option<ChatDashboardData> {
        self.dashboard.read().await.clone()
    }

    pub async fn open_conversation(&self) -> Option<ConsultationDetailData> {
        self.open.read().await.clone()
    }

    pub async fn refresh_dashboard(&self) -> ServiceResult<ChatDashboardData> {
        let data = chat::load_dashboard(self.repo.as_ref()).await?;
        *self.dashboard.write().await = Some(data.clone());
        Ok(data)
    }

    /// Opens a consultation, marking its visitor messages read.
    pub async fn open(&self, consultation_id: &str) -> ServiceResult<ConsultationDetailData> {
        let detail = chat::open_consultation(self.repo.as_ref(), consultation_id).await?;
        self.store_detail(&detail).await;
        Ok(detail)
    }

    pub async fn close(&self) {
        *self.open.write().await = None;
    }

    /// Re-fetches the messages of the open conversation without marking them read.
    pub async fn refresh_conversation(&self) -> ServiceResult<()> {
        let Some(session_id) = self.open_session().await else {
            return Ok(());
        };
        let messages = chat::visitor_messages(self.repo.as_ref(), session_id).await?;
        if let Some(detail) = self.open.write().await.as_mut() {
            if detail.consultation.session_id == session_id {
                detail.messages = messages;
            }
        }
        Ok(())
    }

    pub async fn reply(&self, content: MessageContent) -> ServiceResult<Option<ConsultationDetailData>> {
        let Some(consultation) = self.open_consultation_record().await else {
            return Ok(None);
        };
        let detail = chat::admin_reply(self.repo.as_ref(), consultation.id.as_str(), content).await?;
        self.store_detail(&detail).await;
        Ok(Some(detail))
    }

    pub async fn set_status(&self, status: ConsultationStatus) -> ServiceResult<Option<ChatConsultation>> {
        let Some(consultation) = self.open_consultation_record().await else {
            return Ok(None);
        };
        let updated =
            chat::update_consultation_status(self.repo.as_ref(), consultation.id.as_str(), status)
                .await?;
        if let Some(detail) = self.open.write().await.as_mut() {
            if detail.consultation.id == updated.id {
                detail.consultation = updated.clone();
            }
        }
        Ok(Some(updated))
    }

    pub fn start_list_polling(&self) -> PollerHandle {
        let monitor = self.clone();
        Poller::new("consultation list", ADMIN_LIST_POLL_INTERVAL).spawn(move || {
            let monitor = monitor.clone();
            async move { monitor.refresh_dashboard().await.map(|_| ()) }
        })
    }

    pub fn start_conversation_polling(&self) -> PollerHandle {
        let monitor = self.clone();
        Poller::new("open conversation", CONVERSATION_POLL_INTERVAL).spawn(move || {
            let monitor = monitor.clone();
            async move { monitor.refresh_conversation().await }
        })
    }

    async fn store_detail(&self, detail: &ConsultationDetailData) {
        *self.dashboard.write().await = Some(detail.dashboard.clone());
        *self.open.write().await = Some(detail.clone());
    }

    async fn open_session(&self) -> Option<SessionId> {
        self.open
            .read()
            .await
            .as_ref()
            .map(|detail| detail.consultation.session_id)
    }

    async fn open_consultation_record(&self) -> Option<ChatConsultation> {
        self.open
            .read()
            .await
            .as_ref()
            .map(|detail| detail.consultation.clone())
    }
}
