//! Visitor chat widget endpoints.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::types::MessageContent;
use crate::forms::chat::{SendMessageForm, StartChatForm, StartChatPayload};
use crate::repository::StoreRepository;
use crate::routes::{error_response, load_context, save_context};
use crate::services::{ServiceError, chat as chat_service};

/// Resumes the stored conversation, or `null` when there is none.
#[get("/chat/session")]
pub async fn show_session(session: Session, repo: web::Data<StoreRepository>) -> impl Responder {
    let mut context = load_context(&session);
    let Some(session_id) = context.chat_session_id else {
        return HttpResponse::Ok().json(Option::<()>::None);
    };

    match chat_service::resume_chat(repo.get_ref(), session_id).await {
        Ok(Some(data)) => HttpResponse::Ok().json(data),
        Ok(None) => {
            context.clear_chat();
            if let Err(err) = save_context(&session, &context) {
                return error_response(err, "clear chat session");
            }
            HttpResponse::Ok().json(Option::<()>::None)
        }
        Err(err) => error_response(err, "resume chat"),
    }
}

#[post("/chat/start")]
pub async fn start_chat(
    session: Session,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<StartChatForm>,
) -> impl Responder {
    let payload = match StartChatPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return error_response(ServiceError::Form(err), "start chat"),
    };

    match chat_service::start_chat(repo.get_ref(), payload).await {
        Ok(data) => {
            let mut context = load_context(&session);
            context.chat_session_id = Some(data.consultation.session_id);
            if let Err(err) = save_context(&session, &context) {
                return error_response(err, "store chat session");
            }
            HttpResponse::Ok().json(data)
        }
        Err(err) => error_response(err, "start chat"),
    }
}

#[get("/chat/messages")]
pub async fn list_messages(session: Session, repo: web::Data<StoreRepository>) -> impl Responder {
    let Some(session_id) = load_context(&session).chat_session_id else {
        return error_response(ServiceError::NotFound, "list chat messages");
    };

    match chat_service::visitor_messages(repo.get_ref(), session_id).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(err) => error_response(err, "list chat messages"),
    }
}

#[post("/chat/messages")]
pub async fn send_message(
    session: Session,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SendMessageForm>,
) -> impl Responder {
    let Some(session_id) = load_context(&session).chat_session_id else {
        return error_response(ServiceError::NotFound, "send chat message");
    };
    let content = match MessageContent::try_from(form) {
        Ok(content) => content,
        Err(err) => return error_response(ServiceError::Form(err), "send chat message"),
    };

    match chat_service::send_visitor_message(repo.get_ref(), session_id, content).await {
        Ok(message) => HttpResponse::Ok().json(message),
        Err(err) => error_response(err, "send chat message"),
    }
}
