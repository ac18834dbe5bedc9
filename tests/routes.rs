use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use flooring_storefront::configure;
use flooring_storefront::models::collections::PRODUCTS;
use flooring_storefront::models::config::ServerConfig;
use flooring_storefront::repository::quote_sessions::QuoteSessionStore;
use flooring_storefront::routes::home_redirect;
use serde_json::{Value, json};

mod common;

const ADMIN_PASSWORD: &str = "floor-admin";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        secret: "x".repeat(64),
        admin_password: ADMIN_PASSWORD.to_string(),
        store_url: "memory://".to_string(),
        store_api_key: None,
        store_timeout_secs: 30,
        assets_dir: "./does-not-exist".to_string(),
    }
}

macro_rules! storefront_app {
    ($test_store:expr) => {
        test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[7u8; 64]))
                        .cookie_secure(false)
                        .build(),
                )
                .configure(configure)
                .default_service(web::to(home_redirect))
                .app_data(web::Data::new($test_store.dyn_repo()))
                .app_data(web::Data::new(QuoteSessionStore::default()))
                .app_data(web::Data::new(server_config())),
        )
        .await
    };
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .map(|cookie| cookie.into_owned())
}

#[actix_web::test]
async fn test_product_filters_combine() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 4);
    assert_eq!(body["brands"], json!(["Hansol", "LX"]));
    assert_eq!(body["categories"][0]["category_slug"], "laminate");

    let req = test::TestRequest::get()
        .uri("/api/products?brand=LX&category=tile")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], "p-grey");

    // "전체" disables a facet.
    let req = test::TestRequest::get()
        .uri("/api/products?category=%EC%A0%84%EC%B2%B4&search=oak")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["product_name"], "Natural Oak");
}

#[actix_web::test]
async fn test_product_detail_and_missing_product() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::get().uri("/api/products/p-oak").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["formatted_price"], "25,000원");
    assert_eq!(body["category"]["category_name"], "Laminate");

    let req = test::TestRequest::get().uri("/api/products/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_quote_flow_is_kept_in_the_session() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::post()
        .uri("/api/quote/start")
        .set_json(json!({ "product_id": "p-oak" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let mut cookie = session_cookie(&resp).unwrap();

    let steps = [
        ("/api/quote/next", json!({})),
        ("/api/quote/area", json!({ "area": "2" })),
        ("/api/quote/next", json!({})),
        (
            "/api/quote/customer",
            json!({
                "address": "Seoul, Gangnam-gu",
                "name": "Kim",
                "phone": "01012345678",
                "has_elevator": true
            }),
        ),
    ];
    for (uri, payload) in steps {
        let req = test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        cookie = session_cookie(&resp).unwrap_or(cookie);
    }

    let req = test::TestRequest::post()
        .uri("/api/quote/submit")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie = session_cookie(&resp).unwrap_or(cookie);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["step"], "submitted");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["formatted_total"], "100,000원");
    assert_eq!(body["customer"]["phone"], "010-1234-5678");
    assert_eq!(body["confirmation"]["redirect_to"], "/");

    // Submitted quotes are read-only.
    let req = test::TestRequest::post()
        .uri("/api/quote/area")
        .cookie(cookie)
        .set_json(json!({ "area": "5" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_quote_step_errors_name_fields() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::post().uri("/api/quote/next").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"], json!(["products"]));
}

#[actix_web::test]
async fn test_large_quote_keeps_the_cookie_small() {
    let test_store = common::TestStore::seeded().await;
    for n in 0..11 {
        test_store
            .insert(
                PRODUCTS,
                json!({
                    "_id": format!("p-extra-{n}"),
                    "productName": format!("Extra Plank {n} with a fairly long display name"),
                    "brandName": "Hansol",
                    "specifications": "x".repeat(300),
                    "price": 10000 + n,
                    "category": "laminate"
                }),
            )
            .await;
    }
    let app = storefront_app!(test_store);

    let req = test::TestRequest::post()
        .uri("/api/quote/start")
        .set_json(json!({ "product_id": "p-oak" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let mut cookie = session_cookie(&resp).unwrap();

    let mut ids = vec!["p-walnut".to_string(), "p-grey".to_string(), "p-mystery".to_string()];
    ids.extend((0..11).map(|n| format!("p-extra-{n}")));
    for id in ids {
        let req = test::TestRequest::post()
            .uri("/api/quote/products")
            .cookie(cookie.clone())
            .set_json(json!({ "product_id": id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{id}");
        cookie = session_cookie(&resp).unwrap_or(cookie);
    }

    let req = test::TestRequest::post()
        .uri("/api/quote/customer")
        .cookie(cookie.clone())
        .set_json(json!({
            "address": "a".repeat(200),
            "name": "n".repeat(50),
            "phone": "01012345678",
            "notes": "z".repeat(1000)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie = session_cookie(&resp).unwrap_or(cookie);
    assert!(cookie.to_string().len() < 4096, "{}", cookie.to_string().len());

    let req = test::TestRequest::get()
        .uri("/api/quote")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 15);
    assert_eq!(body["customer"]["notes"].as_str().unwrap().len(), 1000);

    let req = test::TestRequest::post()
        .uri("/api/quote/customer")
        .cookie(cookie)
        .set_json(json!({ "notes": "z".repeat(3000) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"], json!(["notes"]));
}

#[actix_web::test]
async fn test_quote_is_not_shared_between_visitors() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::post()
        .uri("/api/quote/start")
        .set_json(json!({ "product_id": "p-oak" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/quote").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"], json!([]));
}

#[actix_web::test]
async fn test_opening_a_consultation_requires_post() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::post()
        .uri("/api/chat/start")
        .set_json(json!({
            "visitor_name": "Lee",
            "visitor_contact": "010-5555-0000",
            "initial_inquiry": "Do you install on weekends?"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let visitor = session_cookie(&resp).unwrap();
    let body: Value = test::read_body_json(resp).await;
    let consultation_id = body["consultation"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/chat/messages")
        .cookie(visitor)
        .set_json(json!({ "message_content": "Saturday would be best" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let admin = session_cookie(&resp).unwrap();

    let open_uri = format!("/api/admin/chat/{consultation_id}/open");
    let req = test::TestRequest::get()
        .uri(&open_uri)
        .cookie(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(!resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/api/admin/chat")
        .cookie(admin.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["total_unread"].as_u64().unwrap() > 0);

    let req = test::TestRequest::post()
        .uri(&open_uri)
        .cookie(admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dashboard"]["total_unread"], 0);
    assert!(
        body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .all(|message| message["is_read"] == true)
    );
}

#[actix_web::test]
async fn test_admin_routes_require_login() {
    let test_store = common::TestStore::seeded().await;
    let app = storefront_app!(test_store);

    let req = test::TestRequest::get().uri("/api/admin/products").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/admin/products")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/api/admin/products/p-oak")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri("/api/admin/products/p-oak?confirm=true")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_unknown_paths_redirect_home() {
    let test_store = common::TestStore::new();
    let app = storefront_app!(test_store);

    let req = test::TestRequest::get().uri("/no/such/page").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
