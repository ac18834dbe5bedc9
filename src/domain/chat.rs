//! Visitor-to-admin chat: consultations, messages and the dashboard join.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ConsultationId, MessageContent, MessageId, SessionId, VisitorContact, VisitorName,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ConsultationStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ConsultationStatus {
    pub const ALL: [ConsultationStatus; 3] = [
        ConsultationStatus::New,
        ConsultationStatus::InProgress,
        ConsultationStatus::Completed,
    ];
}

impl Display for ConsultationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsultationStatus::New => write!(f, "New"),
            ConsultationStatus::InProgress => write!(f, "In Progress"),
            ConsultationStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl TryFrom<&str> for ConsultationStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "New" => Ok(ConsultationStatus::New),
            "In Progress" => Ok(ConsultationStatus::InProgress),
            "Completed" => Ok(ConsultationStatus::Completed),
            other => Err(format!("unknown consultation status: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Visitor,
    Admin,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatConsultation {
    pub id: ConsultationId,
    pub session_id: SessionId,
    pub visitor_name: VisitorName,
    pub visitor_contact: VisitorContact,
    pub initial_inquiry: MessageContent,
    pub status: ConsultationStatus,
    pub start_time: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewChatConsultation {
    pub id: ConsultationId,
    pub session_id: SessionId,
    pub visitor_name: VisitorName,
    pub visitor_contact: VisitorContact,
    pub initial_inquiry: MessageContent,
    pub status: ConsultationStatus,
    pub start_time: DateTime<Utc>,
}

impl NewChatConsultation {
    /// A fresh consultation in the `New` state.
    #[must_use]
    pub fn new(
        session_id: SessionId,
        visitor_name: VisitorName,
        visitor_contact: VisitorContact,
        initial_inquiry: MessageContent,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ConsultationId::generate(),
            session_id,
            visitor_name,
            visitor_contact,
            initial_inquiry,
            status: ConsultationStatus::New,
            start_time,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub consultation_session_id: SessionId,
    pub sender_type: SenderType,
    pub message_content: MessageContent,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Clone, Debug)]
pub struct NewChatMessage {
    pub id: MessageId,
    pub consultation_session_id: SessionId,
    pub sender_type: SenderType,
    pub message_content: MessageContent,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

impl NewChatMessage {
    /// Visitor-authored messages start unread.
    #[must_use]
    pub fn from_visitor(
        session_id: SessionId,
        content: MessageContent,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            consultation_session_id: session_id,
            sender_type: SenderType::Visitor,
            message_content: content,
            sent_at,
            is_read: false,
        }
    }

    /// Admin replies are stored already read.
    #[must_use]
    pub fn from_admin(session_id: SessionId, content: MessageContent, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::generate(),
            consultation_session_id: session_id,
            sender_type: SenderType::Admin,
            message_content: content,
            sent_at,
            is_read: true,
        }
    }
}

impl ChatMessage {
    /// Only visitor messages count towards the admin's unread badge.
    pub fn is_unread_by_admin(&self) -> bool {
        self.sender_type == SenderType::Visitor && !self.is_read
    }
}

/// Per-consultation figures shown on the admin dashboard.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ConsultationSummary {
    pub consultation: ChatConsultation,
    pub message_count: usize,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: usize,
}

impl ConsultationSummary {
    /// Timestamp used for ordering; falls back to the start time when there are no messages.
    pub fn activity_time(&self) -> DateTime<Utc> {
        self.last_message_time
            .unwrap_or(self.consultation.start_time)
    }
}

/// Messages of one session ordered by `sent_at`; ties keep fetch order.
pub fn messages_for_session(messages: &[ChatMessage], session_id: SessionId) -> Vec<ChatMessage> {
    let mut selected: Vec<ChatMessage> = messages
        .iter()
        .filter(|message| message.consultation_session_id == session_id)
        .cloned()
        .collect();
    sort_messages(&mut selected);
    selected
}

/// Stable ascending sort by `sent_at`.
pub fn sort_messages(messages: &mut [ChatMessage]) {
    messages.sort_by_key(|message| message.sent_at);
}

/// Joins messages to consultations by session id and orders by latest activity.
pub fn summarize_consultations(
    consultations: &[ChatConsultation],
    messages: &[ChatMessage],
) -> Vec<ConsultationSummary> {
    let mut by_session: HashMap<SessionId, Vec<&ChatMessage>> = HashMap::new();
    for message in messages {
        by_session
            .entry(message.consultation_session_id)
            .or_default()
            .push(message);
    }

    let mut summaries: Vec<ConsultationSummary> = consultations
        .iter()
        .map(|consultation| {
            let mut thread = by_session
                .get(&consultation.session_id)
                .cloned()
                .unwrap_or_default();
            thread.sort_by_key(|message| message.sent_at);
            let last = thread.last();

            ConsultationSummary {
                consultation: consultation.clone(),
                message_count: thread.len(),
                last_message: last.map(|message| message.message_content.as_str().to_string()),
                last_message_time: last.map(|message| message.sent_at),
                unread_count: thread
                    .iter()
                    .filter(|message| message.is_unread_by_admin())
                    .count(),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.activity_time().cmp(&a.activity_time()));
    summaries
}

/// Number of consultations per status, in `ConsultationStatus::ALL` order.
pub fn count_by_status(consultations: &[ChatConsultation]) -> Vec<(ConsultationStatus, usize)> {
    ConsultationStatus::ALL
        .iter()
        .map(|status| {
            let count = consultations
                .iter()
                .filter(|consultation| consultation.status == *status)
                .count();
            (*status, count)
        })
        .collect()
}
