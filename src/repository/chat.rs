use async_trait::async_trait;

use crate::domain::chat::{
    ChatConsultation, ChatMessage, ConsultationStatus, NewChatConsultation, NewChatMessage,
    messages_for_session,
};
use crate::domain::types::{ConsultationId, MessageId, SessionId};
use crate::models::chat::{
    ChatConsultation as DbConsultation, ChatMessage as DbMessage, MarkMessageRead,
    UpdateConsultationStatus,
};
use crate::models::collections::{CHAT_CONSULTATIONS, CHAT_MESSAGES};
use crate::repository::errors::RepositoryResult;
use crate::repository::store::DocumentStore;
use crate::repository::{ChatReader, ChatWriter, StoreRepository};

#[async_trait]
impl<S: DocumentStore + ?Sized> ChatReader for StoreRepository<S> {
    async fn list_consultations(&self) -> RepositoryResult<Vec<ChatConsultation>> {
        self.load_all::<DbConsultation, ChatConsultation>(CHAT_CONSULTATIONS)
            .await
    }

    async fn get_consultation_by_session(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Option<ChatConsultation>> {
        let consultations = self.list_consultations().await?;
        Ok(consultations
            .into_iter()
            .find(|consultation| consultation.session_id == session_id))
    }

    async fn list_messages(&self) -> RepositoryResult<Vec<ChatMessage>> {
        self.load_all::<DbMessage, ChatMessage>(CHAT_MESSAGES).await
    }

    async fn list_session_messages(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<ChatMessage>> {
        let messages = self.list_messages().await?;
        Ok(messages_for_session(&messages, session_id))
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> ChatWriter for StoreRepository<S> {
    async fn create_consultation(
        &self,
        consultation: &NewChatConsultation,
    ) -> RepositoryResult<ChatConsultation> {
        let document = DbConsultation::from(consultation);
        self.insert::<DbConsultation, ChatConsultation>(CHAT_CONSULTATIONS, &document)
            .await
    }

    async fn update_consultation_status(
        &self,
        id: &ConsultationId,
        status: ConsultationStatus,
    ) -> RepositoryResult<ChatConsultation> {
        let changes = UpdateConsultationStatus {
            id: id.as_str(),
            status,
        };
        self.patch::<_, DbConsultation, ChatConsultation>(CHAT_CONSULTATIONS, &changes)
            .await
    }

    async fn create_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage> {
        let document = DbMessage::from(message);
        self.insert::<DbMessage, ChatMessage>(CHAT_MESSAGES, &document)
            .await
    }

    async fn mark_message_read(&self, id: &MessageId) -> RepositoryResult<()> {
        let changes = MarkMessageRead {
            id: id.as_str(),
            is_read: true,
        };
        self.patch_only(CHAT_MESSAGES, &changes).await
    }
}
