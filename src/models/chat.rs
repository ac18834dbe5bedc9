use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::chat::{
    ChatConsultation as DomainConsultation, ChatMessage as DomainMessage, ConsultationStatus,
    NewChatConsultation as DomainNewConsultation, NewChatMessage as DomainNewMessage, SenderType,
};
use crate::domain::types::{
    ConsultationId, MessageContent, MessageId, SessionId, TypeConstraintError, VisitorContact,
    VisitorName,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::chat::ChatConsultation`].
pub struct ChatConsultation {
    #[serde(rename = "_id")]
    pub id: String,
    pub session_id: String,
    pub visitor_name: String,
    pub visitor_contact: String,
    pub initial_inquiry: String,
    #[serde(default)]
    pub status: ConsultationStatus,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Stored document for [`crate::domain::chat::ChatMessage`].
pub struct ChatMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub consultation_session_id: String,
    pub sender_type: SenderType,
    pub message_content: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

/// Status-only partial update; the admin is the only writer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsultationStatus<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub status: ConsultationStatus,
}

/// Read-flag partial update, the only mutation a message receives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkMessageRead<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub is_read: bool,
}

impl TryFrom<ChatConsultation> for DomainConsultation {
    type Error = TypeConstraintError;

    fn try_from(doc: ChatConsultation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ConsultationId::new(doc.id)?,
            session_id: doc.session_id.parse::<SessionId>()?,
            visitor_name: VisitorName::new(doc.visitor_name)?,
            visitor_contact: VisitorContact::new(doc.visitor_contact)?,
            initial_inquiry: MessageContent::new(doc.initial_inquiry)?,
            status: doc.status,
            start_time: doc.start_time,
        })
    }
}

impl TryFrom<ChatMessage> for DomainMessage {
    type Error = TypeConstraintError;

    fn try_from(doc: ChatMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MessageId::new(doc.id)?,
            consultation_session_id: doc.consultation_session_id.parse::<SessionId>()?,
            sender_type: doc.sender_type,
            message_content: MessageContent::new(doc.message_content)?,
            sent_at: doc.sent_at,
            is_read: doc.is_read,
        })
    }
}

impl From<&DomainNewConsultation> for ChatConsultation {
    fn from(consultation: &DomainNewConsultation) -> Self {
        Self {
            id: consultation.id.as_str().to_string(),
            session_id: consultation.session_id.to_string(),
            visitor_name: consultation.visitor_name.as_str().to_string(),
            visitor_contact: consultation.visitor_contact.as_str().to_string(),
            initial_inquiry: consultation.initial_inquiry.as_str().to_string(),
            status: consultation.status,
            start_time: consultation.start_time,
        }
    }
}

impl From<&DomainNewMessage> for ChatMessage {
    fn from(message: &DomainNewMessage) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            consultation_session_id: message.consultation_session_id.to_string(),
            sender_type: message.sender_type,
            message_content: message.message_content.as_str().to_string(),
            sent_at: message.sent_at,
            is_read: message.is_read,
        }
    }
}
