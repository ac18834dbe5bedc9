#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::StoreRepository;
#[cfg(feature = "server")]
use crate::repository::quote_sessions::QuoteSessionStore;

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod formatting;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod polling;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

/// Registers every storefront and admin route on `config`.
#[cfg(feature = "server")]
pub fn configure(config: &mut web::ServiceConfig) {
    use crate::routes::{admin, catalog, chat, quote};

    config
        .service(routes::index)
        .service(
            web::scope("/api/admin")
                .service(admin::login)
                .service(admin::logout)
                .service(admin::chat_dashboard)
                .service(admin::open_consultation)
                .service(admin::reply)
                .service(admin::update_status)
                .service(admin::list_products)
                .service(admin::save_product)
                .service(admin::delete_product)
                .service(admin::list_categories)
                .service(admin::save_category)
                .service(admin::delete_category)
                .service(admin::list_slides)
                .service(admin::save_slide)
                .service(admin::delete_slide)
                .service(admin::reorder_sample_pdf)
                .service(admin::list_sample_pdfs)
                .service(admin::save_sample_pdf)
                .service(admin::delete_sample_pdf)
                .service(admin::upload_image),
        )
        .service(
            web::scope("/api")
                .service(catalog::list_products)
                .service(catalog::show_product)
                .service(catalog::list_categories)
                .service(catalog::list_sample_books)
                .service(catalog::show_slides)
                .service(quote::show_quote)
                .service(quote::start_quote)
                .service(quote::add_product)
                .service(quote::remove_product)
                .service(quote::set_quantity)
                .service(quote::set_area)
                .service(quote::set_customer)
                .service(quote::next_step)
                .service(quote::back_step)
                .service(quote::submit_quote)
                .service(chat::show_session)
                .service(chat::start_chat)
                .service(chat::list_messages)
                .service(chat::send_message),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = StoreRepository::connect(
        &server_config.store_url,
        server_config.store_api_key.clone(),
        Duration::from_secs(server_config.store_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to set up the collection store: {e}")))?;

    // Keys for identity and the session cookie.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid cookie secret: {e}")))?;

    // Shared by every worker.
    let quotes = web::Data::new(QuoteSessionStore::default());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting storefront on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &server_config.assets_dir))
            .configure(configure)
            .default_service(web::to(routes::home_redirect))
            .app_data(web::Data::new(repo.clone()))
            .app_data(quotes.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
