//! DTOs for the visitor chat widget and the admin chat dashboard.

use serde::Serialize;

use crate::domain::chat::{ChatConsultation, ChatMessage, ConsultationStatus, ConsultationSummary};

/// Visitor's view of their own conversation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatSessionData {
    pub consultation: ChatConsultation,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: ConsultationStatus,
    pub count: usize,
}

/// Consultation list with per-thread figures, newest activity first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatDashboardData {
    pub consultations: Vec<ConsultationSummary>,
    pub status_counts: Vec<StatusCount>,
    pub total_unread: usize,
}

/// An opened conversation together with the refreshed list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConsultationDetailData {
    pub consultation: ChatConsultation,
    pub messages: Vec<ChatMessage>,
    pub dashboard: ChatDashboardData,
}
