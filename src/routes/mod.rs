//! HTTP handlers and the glue they share.

use std::future::{Ready, ready};
use std::path::Path;

use actix_files::NamedFile;
use actix_identity::IdentityExt;
use actix_session::Session;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::domain::session::SessionContext;
use crate::models::config::ServerConfig;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod admin;
pub mod catalog;
pub mod chat;
pub mod quote;

/// Cookie session key holding the serialized [`SessionContext`].
pub const SESSION_CONTEXT_KEY: &str = "storefront";

/// Identity recorded for the logged-in administrator.
pub const ADMIN_IDENTITY: &str = "admin";

/// Body of every error response; shown to the visitor as a toast.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub fields: Vec<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

/// Maps a service failure to a JSON error response.
///
/// Unexpected failures are logged with `action` as context.
pub fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    let status = match &err {
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        ServiceError::Form(_)
        | ServiceError::TypeConstraint(_)
        | ServiceError::QuoteValidation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Repository(
            RepositoryError::ConnectionError(_) | RepositoryError::StoreError(_),
        ) => StatusCode::BAD_GATEWAY,
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        log::error!("Failed to {action}: {err}");
    }

    HttpResponse::build(status).json(ErrorBody {
        fields: err.fields(),
        error: err.to_string(),
    })
}

/// Reads the visitor's context; a missing or unreadable cookie starts fresh.
pub fn load_context(session: &Session) -> SessionContext {
    match session.get::<SessionContext>(SESSION_CONTEXT_KEY) {
        Ok(Some(context)) => context,
        Ok(None) => SessionContext::new(),
        Err(err) => {
            log::warn!("Discarding unreadable session context: {err}");
            SessionContext::new()
        }
    }
}

pub fn save_context(session: &Session, context: &SessionContext) -> Result<(), ServiceError> {
    session
        .insert(SESSION_CONTEXT_KEY, context)
        .map_err(|err| ServiceError::Internal(format!("cannot store session: {err}")))
}

/// Extractor admitting only requests from a logged-in administrator.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: String,
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let admin = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .filter(|id| id == ADMIN_IDENTITY);

        ready(match admin {
            Some(id) => Ok(AdminUser { id }),
            None => Err(InternalError::from_response(
                "admin login required",
                HttpResponse::Unauthorized().json(ErrorBody::new("unauthorized")),
            )
            .into()),
        })
    }
}

/// Storefront entry page.
#[get("/")]
pub async fn index(
    config: web::Data<ServerConfig>,
    req: HttpRequest,
) -> HttpResponse {
    let path = Path::new(&config.assets_dir).join("index.html");
    match NamedFile::open_async(path).await {
        Ok(file) => file.respond_to(&req).map_into_boxed_body(),
        Err(err) => {
            log::warn!("Home page is unavailable: {err}");
            HttpResponse::NotFound().json(ErrorBody::new("not found"))
        }
    }
}

/// Unknown paths land on the home page.
pub async fn home_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
