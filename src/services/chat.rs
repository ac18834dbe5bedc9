//! Chat use cases for the visitor widget and the admin dashboard.

use chrono::Utc;

use crate::domain::chat::{
    ChatConsultation, ChatMessage, ConsultationStatus, NewChatConsultation, NewChatMessage,
    count_by_status, messages_for_session, summarize_consultations,
};
use crate::domain::types::{ConsultationId, MessageContent, SessionId};
use crate::dto::chat::{ChatDashboardData, ChatSessionData, ConsultationDetailData, StatusCount};
use crate::forms::chat::StartChatPayload;
use crate::repository::{ChatReader, ChatWriter};
use crate::services::{ServiceError, ServiceResult};

/// Registers a visitor and posts their inquiry as the first message.
///
/// Two sequential writes: the consultation, then the message. When the second
/// one fails the consultation is left without messages.
pub async fn start_chat<R>(repo: &R, payload: StartChatPayload) -> ServiceResult<ChatSessionData>
where
    R: ChatReader + ChatWriter + ?Sized,
{
    let session_id = SessionId::new();
    let now = Utc::now();

    let new_consultation = NewChatConsultation::new(
        session_id,
        payload.visitor_name,
        payload.visitor_contact,
        payload.initial_inquiry.clone(),
        now,
    );
    let consultation = repo
        .create_consultation(&new_consultation)
        .await
        .map_err(|err| {
            log::error!("Failed to create consultation: {err}");
            err
        })?;

    let first = NewChatMessage::from_visitor(session_id, payload.initial_inquiry, now);
    let message = repo.create_message(&first).await.map_err(|err| {
        log::warn!(
            "Consultation {} has no messages: initial inquiry was not stored",
            consultation.id
        );
        log::error!("Failed to create initial message: {err}");
        err
    })?;

    log::info!("Chat session {session_id} started");

    Ok(ChatSessionData {
        consultation,
        messages: vec![message],
    })
}

/// Loads the conversation for a stored session id.
///
/// Returns `None` when the consultation no longer exists.
pub async fn resume_chat<R>(repo: &R, session_id: SessionId) -> ServiceResult<Option<ChatSessionData>>
where
    R: ChatReader + ?Sized,
{
    let consultation = repo
        .get_consultation_by_session(session_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load consultation for session {session_id}: {err}");
            err
        })?;

    let Some(consultation) = consultation else {
        log::info!("Chat session {session_id} no longer exists");
        return Ok(None);
    };

    let messages = visitor_messages(repo, session_id).await?;
    Ok(Some(ChatSessionData {
        consultation,
        messages,
    }))
}

pub async fn visitor_messages<R>(repo: &R, session_id: SessionId) -> ServiceResult<Vec<ChatMessage>>
where
    R: ChatReader + ?Sized,
{
    let messages = repo.list_session_messages(session_id).await.map_err(|err| {
        log::error!("Failed to list messages for session {session_id}: {err}");
        err
    })?;
    Ok(messages)
}

/// Posts a visitor message. Nothing is written when the create fails.
pub async fn send_visitor_message<R>(
    repo: &R,
    session_id: SessionId,
    content: MessageContent,
) -> ServiceResult<ChatMessage>
where
    R: ChatWriter + ?Sized,
{
    let message = NewChatMessage::from_visitor(session_id, content, Utc::now());
    let saved = repo.create_message(&message).await.map_err(|err| {
        log::error!("Failed to send message for session {session_id}: {err}");
        err
    })?;
    Ok(saved)
}

async fn snapshot<R>(repo: &R) -> ServiceResult<(Vec<ChatConsultation>, Vec<ChatMessage>)>
where
    R: ChatReader + ?Sized,
{
    let consultations = repo.list_consultations().await.map_err(|err| {
        log::error!("Failed to list consultations: {err}");
        err
    })?;
    let messages = repo.list_messages().await.map_err(|err| {
        log::error!("Failed to list chat messages: {err}");
        err
    })?;
    Ok((consultations, messages))
}

fn dashboard(consultations: &[ChatConsultation], messages: &[ChatMessage]) -> ChatDashboardData {
    let summaries = summarize_consultations(consultations, messages);
    let total_unread = summaries.iter().map(|summary| summary.unread_count).sum();

    ChatDashboardData {
        consultations: summaries,
        status_counts: count_by_status(consultations)
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
        total_unread,
    }
}

fn find_consultation(
    consultations: &[ChatConsultation],
    consultation_id: &str,
) -> ServiceResult<ChatConsultation> {
    let id = ConsultationId::new(consultation_id).map_err(|_| ServiceError::NotFound)?;
    consultations
        .iter()
        .find(|consultation| consultation.id == id)
        .cloned()
        .ok_or(ServiceError::NotFound)
}

/// Consultations with message counts, newest activity first.
pub async fn load_dashboard<R>(repo: &R) -> ServiceResult<ChatDashboardData>
where
    R: ChatReader + ?Sized,
{
    let (consultations, messages) = snapshot(repo).await?;
    Ok(dashboard(&consultations, &messages))
}

/// Opens a conversation and marks its unread visitor messages read.
///
/// One update per message, issued in order. A visitor message arriving while
/// this runs stays unread and is picked up by the next poll.
pub async fn open_consultation<R>(repo: &R, consultation_id: &str) -> ServiceResult<ConsultationDetailData>
where
    R: ChatReader + ChatWriter + ?Sized,
{
    let consultations = repo.list_consultations().await.map_err(|err| {
        log::error!("Failed to list consultations: {err}");
        err
    })?;
    let consultation = find_consultation(&consultations, consultation_id)?;

    let thread = visitor_messages(repo, consultation.session_id).await?;
    for message in thread.iter().filter(|message| message.is_unread_by_admin()) {
        repo.mark_message_read(&message.id).await.map_err(|err| {
            log::error!("Failed to mark message {} read: {err}", message.id);
            err
        })?;
    }

    log::info!("Consultation {} opened", consultation.id);
    detail(repo, consultation).await
}

async fn detail<R>(repo: &R, consultation: ChatConsultation) -> ServiceResult<ConsultationDetailData>
where
    R: ChatReader + ?Sized,
{
    let (consultations, messages) = snapshot(repo).await?;
    let consultation = consultations
        .iter()
        .find(|c| c.id == consultation.id)
        .cloned()
        .unwrap_or(consultation);

    Ok(ConsultationDetailData {
        messages: messages_for_session(&messages, consultation.session_id),
        dashboard: dashboard(&consultations, &messages),
        consultation,
    })
}

/// Posts an admin reply, then reloads the conversation and the list.
pub async fn admin_reply<R>(
    repo: &R,
    consultation_id: &str,
    content: MessageContent,
) -> ServiceResult<ConsultationDetailData>
where
    R: ChatReader + ChatWriter + ?Sized,
{
    let consultations = repo.list_consultations().await.map_err(|err| {
        log::error!("Failed to list consultations: {err}");
        err
    })?;
    let consultation = find_consultation(&consultations, consultation_id)?;

    let reply = NewChatMessage::from_admin(consultation.session_id, content, Utc::now());
    repo.create_message(&reply).await.map_err(|err| {
        log::error!("Failed to send reply to consultation {}: {err}", consultation.id);
        err
    })?;

    detail(repo, consultation).await
}

pub async fn update_consultation_status<R>(
    repo: &R,
    consultation_id: &str,
    status: ConsultationStatus,
) -> ServiceResult<ChatConsultation>
where
    R: ChatWriter + ?Sized,
{
    let id = ConsultationId::new(consultation_id).map_err(|_| ServiceError::NotFound)?;
    let updated = repo
        .update_consultation_status(&id, status)
        .await
        .map_err(|err| {
            log::error!("Failed to update status of consultation {id}: {err}");
            err
        })?;
    log::info!("Consultation {id} is now {status}");
    Ok(updated)
}
