use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::catalog::{ProductQuery, SampleBooksQuery};
use crate::repository::StoreRepository;
use crate::routes::error_response;
use crate::services::{catalog as catalog_service, slides as slides_service};

#[get("/products")]
pub async fn list_products(
    repo: web::Data<StoreRepository>,
    query: web::Query<ProductQuery>,
) -> impl Responder {
    match catalog_service::load_products_page(repo.get_ref(), query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load products"),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    repo: web::Data<StoreRepository>,
) -> impl Responder {
    match catalog_service::load_product_detail(repo.get_ref(), &product_id).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load product"),
    }
}

#[get("/categories")]
pub async fn list_categories(repo: web::Data<StoreRepository>) -> impl Responder {
    match catalog_service::load_categories_page(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load categories"),
    }
}

#[get("/sample-books")]
pub async fn list_sample_books(
    repo: web::Data<StoreRepository>,
    query: web::Query<SampleBooksQuery>,
) -> impl Responder {
    match catalog_service::load_sample_books(repo.get_ref(), query.into_inner()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load sample books"),
    }
}

#[get("/catalog/slides")]
pub async fn show_slides(repo: web::Data<StoreRepository>) -> impl Responder {
    match slides_service::load_slide_deck(repo.get_ref()).await {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load catalog slides"),
    }
}
