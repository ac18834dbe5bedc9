//! Quote wizard endpoints.
//!
//! The wizard is held in [`QuoteSessionStore`]; the visitor's cookie session
//! only carries its key.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::quote::QuoteWizard;
use crate::domain::session::SessionContext;
use crate::domain::types::SessionId;
use crate::dto::quote::QuotePageData;
use crate::forms::quote::{QuoteAreaForm, QuoteCustomerForm, QuoteProductForm, QuoteQuantityForm};
use crate::repository::StoreRepository;
use crate::repository::quote_sessions::QuoteSessionStore;
use crate::routes::{error_response, load_context, save_context};
use crate::services::{ServiceError, ServiceResult, quote as quote_service};

/// A visitor's wizard taken out of the store for the length of one request.
struct QuoteCheckout {
    context: SessionContext,
    key: SessionId,
    wizard: QuoteWizard,
}

fn checkout(session: &Session, quotes: &QuoteSessionStore) -> Result<QuoteCheckout, ServiceError> {
    let mut context = load_context(session);
    let key = context.quote_key_mut();
    let wizard = quotes.load(key)?;
    Ok(QuoteCheckout {
        context,
        key,
        wizard,
    })
}

/// Stores the wizard whatever the outcome, so validation errors stay visible.
fn respond(
    session: &Session,
    quotes: &QuoteSessionStore,
    checkout: QuoteCheckout,
    result: ServiceResult<QuotePageData>,
    action: &str,
) -> HttpResponse {
    let QuoteCheckout {
        context,
        key,
        wizard,
    } = checkout;

    if let Err(err) = quotes.save(key, wizard) {
        return error_response(err.into(), action);
    }
    if let Err(err) = save_context(session, &context) {
        return error_response(err, action);
    }
    match result {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, action),
    }
}

#[get("/quote")]
pub async fn show_quote(session: Session, quotes: web::Data<QuoteSessionStore>) -> impl Responder {
    let wizard = match load_context(&session).quote_key {
        Some(key) => quotes.load(key),
        None => Ok(QuoteWizard::new()),
    };
    match wizard {
        Ok(wizard) => HttpResponse::Ok().json(QuotePageData::from(&wizard)),
        Err(err) => error_response(err.into(), "show quote"),
    }
}

#[post("/quote/start")]
pub async fn start_quote(
    session: Session,
    repo: web::Data<StoreRepository>,
    quotes: web::Data<QuoteSessionStore>,
    web::Json(form): web::Json<QuoteProductForm>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "start quote"),
    };
    let result = match quote_service::start_quote(repo.get_ref(), form).await {
        Ok(wizard) => {
            let data = QuotePageData::from(&wizard);
            checkout.wizard = wizard;
            Ok(data)
        }
        Err(err) => Err(err),
    };
    respond(&session, &quotes, checkout, result, "start quote")
}

#[post("/quote/products")]
pub async fn add_product(
    session: Session,
    repo: web::Data<StoreRepository>,
    quotes: web::Data<QuoteSessionStore>,
    web::Json(form): web::Json<QuoteProductForm>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "add product to quote"),
    };
    let result =
        quote_service::add_quote_product(repo.get_ref(), &mut checkout.wizard, form).await;
    respond(&session, &quotes, checkout, result, "add product to quote")
}

#[delete("/quote/products/{product_id}")]
pub async fn remove_product(
    session: Session,
    quotes: web::Data<QuoteSessionStore>,
    product_id: web::Path<String>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "remove product from quote"),
    };
    let form = QuoteProductForm {
        product_id: product_id.into_inner(),
    };
    let result = quote_service::remove_quote_product(&mut checkout.wizard, form);
    respond(&session, &quotes, checkout, result, "remove product from quote")
}

#[post("/quote/quantity")]
pub async fn set_quantity(
    session: Session,
    quotes: web::Data<QuoteSessionStore>,
    web::Json(form): web::Json<QuoteQuantityForm>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "set quote quantity"),
    };
    let result = quote_service::set_quote_quantity(&mut checkout.wizard, form);
    respond(&session, &quotes, checkout, result, "set quote quantity")
}

#[post("/quote/area")]
pub async fn set_area(
    session: Session,
    quotes: web::Data<QuoteSessionStore>,
    web::Json(form): web::Json<QuoteAreaForm>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "set quote area"),
    };
    let result = quote_service::set_quote_area(&mut checkout.wizard, form);
    respond(&session, &quotes, checkout, result, "set quote area")
}

#[post("/quote/customer")]
pub async fn set_customer(
    session: Session,
    quotes: web::Data<QuoteSessionStore>,
    web::Json(form): web::Json<QuoteCustomerForm>,
) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "set quote customer"),
    };
    let result = quote_service::set_quote_customer(&mut checkout.wizard, form);
    respond(&session, &quotes, checkout, result, "set quote customer")
}

#[post("/quote/next")]
pub async fn next_step(session: Session, quotes: web::Data<QuoteSessionStore>) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "advance quote"),
    };
    let result = quote_service::next_step(&mut checkout.wizard);
    respond(&session, &quotes, checkout, result, "advance quote")
}

#[post("/quote/back")]
pub async fn back_step(session: Session, quotes: web::Data<QuoteSessionStore>) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "go back in quote"),
    };
    let result = quote_service::back_step(&mut checkout.wizard);
    respond(&session, &quotes, checkout, result, "go back in quote")
}

#[post("/quote/submit")]
pub async fn submit_quote(session: Session, quotes: web::Data<QuoteSessionStore>) -> impl Responder {
    let mut checkout = match checkout(&session, &quotes) {
        Ok(checkout) => checkout,
        Err(err) => return error_response(err, "submit quote"),
    };
    let result = quote_service::submit_quote(&mut checkout.wizard);
    respond(&session, &quotes, checkout, result, "submit quote")
}
