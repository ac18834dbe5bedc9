//! Admin endpoints. Everything except login requires [`AdminUser`].

use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, delete, get, post, web};

use crate::domain::chat::ConsultationStatus;
use crate::domain::types::MessageContent;
use crate::forms::auth::LoginForm;
use crate::forms::category::SaveCategoryForm;
use crate::forms::chat::{SendMessageForm, UpdateStatusForm};
use crate::forms::product::SaveProductForm;
use crate::forms::sample_pdf::{ReorderSamplePdfForm, SaveSamplePdfForm};
use crate::forms::slide::SaveSlideForm;
use crate::forms::upload::UploadImageForm;
use crate::forms::DeleteQuery;
use crate::models::config::ServerConfig;
use crate::repository::StoreRepository;
use crate::routes::{ADMIN_IDENTITY, AdminUser, error_response};
use crate::services::{ServiceError, admin as admin_service, chat as chat_service};

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    match admin_service::login(&server_config.admin_password, form) {
        Ok(()) => match Identity::login(&req.extensions(), ADMIN_IDENTITY.to_string()) {
            Ok(_) => HttpResponse::NoContent().finish(),
            Err(err) => error_response(
                ServiceError::Internal(format!("cannot record login: {err}")),
                "log in",
            ),
        },
        Err(err) => error_response(err, "log in"),
    }
}

#[post("/logout")]
pub async fn logout(_admin: AdminUser, user: Identity) -> impl Responder {
    user.logout();
    HttpResponse::NoContent().finish()
}

// Chat dashboard

#[get("/chat")]
pub async fn chat_dashboard(_admin: AdminUser, repo: web::Data<StoreRepository>) -> impl Responder {
    match chat_service::load_dashboard(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load chat dashboard"),
    }
}

/// Marks the visitor's messages read, so it is never a GET.
#[post("/chat/{consultation_id}/open")]
pub async fn open_consultation(
    _admin: AdminUser,
    consultation_id: web::Path<String>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match chat_service::open_consultation(repo.get_ref(), &consultation_id).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "open consultation"),
    }
}

#[post("/chat/{consultation_id}/reply")]
pub async fn reply(
    _admin: AdminUser,
    consultation_id: web::Path<String>,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SendMessageForm>,
) -> impl Responder {
    let content = match MessageContent::try_from(form) {
        Ok(content) => content,
        Err(err) => return error_response(ServiceError::Form(err), "reply to consultation"),
    };

    match chat_service::admin_reply(repo.get_ref(), &consultation_id, content).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "reply to consultation"),
    }
}

#[post("/chat/{consultation_id}/status")]
pub async fn update_status(
    _admin: AdminUser,
    consultation_id: web::Path<String>,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<UpdateStatusForm>,
) -> impl Responder {
    let status = match ConsultationStatus::try_from(form) {
        Ok(status) => status,
        Err(err) => return error_response(ServiceError::Form(err), "update consultation status"),
    };

    match chat_service::update_consultation_status(repo.get_ref(), &consultation_id, status).await {
        Ok(consultation) => HttpResponse::Ok().json(consultation),
        Err(err) => error_response(err, "update consultation status"),
    }
}

// Products

#[get("/products")]
pub async fn list_products(_admin: AdminUser, repo: web::Data<StoreRepository>) -> impl Responder {
    match admin_service::list_products(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "list products"),
    }
}

#[post("/products")]
pub async fn save_product(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SaveProductForm>,
) -> impl Responder {
    match admin_service::save_product(repo.get_ref(), form).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "save product"),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    _admin: AdminUser,
    product_id: web::Path<String>,
    query: web::Query<DeleteQuery>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::delete_product(repo.get_ref(), &product_id, query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "delete product"),
    }
}

// Categories

#[get("/categories")]
pub async fn list_categories(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::list_categories(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "list categories"),
    }
}

#[post("/categories")]
pub async fn save_category(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SaveCategoryForm>,
) -> impl Responder {
    match admin_service::save_category(repo.get_ref(), form).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "save category"),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    _admin: AdminUser,
    category_id: web::Path<String>,
    query: web::Query<DeleteQuery>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::delete_category(repo.get_ref(), &category_id, query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "delete category"),
    }
}

// Slides

#[get("/slides")]
pub async fn list_slides(_admin: AdminUser, repo: web::Data<StoreRepository>) -> impl Responder {
    match admin_service::list_slides(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "list catalog slides"),
    }
}

#[post("/slides")]
pub async fn save_slide(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SaveSlideForm>,
) -> impl Responder {
    match admin_service::save_slide(repo.get_ref(), form).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "save catalog slide"),
    }
}

#[delete("/slides/{slide_id}")]
pub async fn delete_slide(
    _admin: AdminUser,
    slide_id: web::Path<String>,
    query: web::Query<DeleteQuery>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::delete_slide(repo.get_ref(), &slide_id, query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "delete catalog slide"),
    }
}

// Sample books

#[get("/sample-pdfs")]
pub async fn list_sample_pdfs(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::list_sample_pdfs(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "list sample books"),
    }
}

#[post("/sample-pdfs")]
pub async fn save_sample_pdf(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<SaveSamplePdfForm>,
) -> impl Responder {
    match admin_service::save_sample_pdf(repo.get_ref(), form).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "save sample book"),
    }
}

#[delete("/sample-pdfs/{pdf_id}")]
pub async fn delete_sample_pdf(
    _admin: AdminUser,
    pdf_id: web::Path<String>,
    query: web::Query<DeleteQuery>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match admin_service::delete_sample_pdf(repo.get_ref(), &pdf_id, query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "delete sample book"),
    }
}

#[post("/sample-pdfs/reorder")]
pub async fn reorder_sample_pdf(
    _admin: AdminUser,
    repo: web::Data<StoreRepository>,
    web::Json(form): web::Json<ReorderSamplePdfForm>,
) -> impl Responder {
    match admin_service::reorder_sample_pdf(repo.get_ref(), form).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "reorder sample books"),
    }
}

#[post("/uploads/image")]
pub async fn upload_image(
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    match admin_service::upload_image(form) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "upload image"),
    }
}
