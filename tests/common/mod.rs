#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use std::sync::Arc;
use tinylink::application::services::{LinkService, LinkServiceOptions};
use tinylink::domain::entities::{LinkRecord, NewLink};
use tinylink::domain::repositories::LinkStore;
use tinylink::infrastructure::persistence::MemoryLinkStore;
use tinylink::routes::app_router;
use tinylink::state::AppState;

pub const BASE_URL: &str = "https://sntg.it";
pub const NOT_FOUND_URL: &str = "https://example.com/404";

pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let link_service = Arc::new(LinkService::new(
        store.clone(),
        LinkServiceOptions::default(),
    ));

    let state = AppState::new(link_service, BASE_URL, NOT_FOUND_URL, false);

    (state, store)
}

/// Full application router, including path normalization and CORS.
pub fn make_server(state: AppState) -> TestServer {
    let app = app_router(state);
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

pub async fn create_test_link(store: &MemoryLinkStore, code: &str, new_link: NewLink) -> LinkRecord {
    let record = LinkRecord::new(code.to_string(), new_link);
    store.put(&record).await.unwrap();
    record
}

pub async fn stored(store: &MemoryLinkStore, code: &str) -> LinkRecord {
    store.get(code).await.unwrap().expect("record should exist")
}
