#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use realtrust_api::config::ServerConfig;
use realtrust_api::router::build_app_router;
use realtrust_api::state::AppState;
use realtrust_core::types::ImageRef;
use realtrust_db::memory::MemoryRecordStore;
use realtrust_media::{MediaDelegate, MediaError, MediaHost, MediaProfile};
use tower::ServiceExt;

/// Smallest byte strings each format sniffer accepts.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\0\x01\0";

const BOUNDARY: &str = "realtrust-test-boundary";

/// Build a test `ServerConfig` from the defaults plus dummy credentials.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| {
        let value = match key {
            "DATABASE_URL" => "postgres://localhost/realtrust_test",
            "CLOUDINARY_CLOUD_NAME" => "test",
            "CLOUDINARY_API_KEY" => "key",
            "CLOUDINARY_API_SECRET" => "secret",
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test config is valid")
}

// ---------------------------------------------------------------------------
// Media host double
// ---------------------------------------------------------------------------

/// In-process [`MediaHost`] that hands out sequential handles and records
/// every destroy call.
#[derive(Default)]
pub struct FakeMediaHost {
    pub fail_upload: AtomicBool,
    pub fail_destroy: AtomicBool,
    uploads: AtomicUsize,
    destroyed: Mutex<Vec<String>>,
}

impl FakeMediaHost {
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaHost for FakeMediaHost {
    async fn upload(
        &self,
        profile: MediaProfile,
        _data: Vec<u8>,
        _file_name: &str,
    ) -> Result<ImageRef, MediaError> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(MediaError::Remote {
                status: 502,
                message: "upstream unavailable".into(),
            });
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        let public_id = format!("{}/fake-{n}", profile.folder());
        Ok(ImageRef {
            url: format!("https://media.test/{public_id}.png"),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(MediaError::Remote {
                status: 500,
                message: "destroy failed".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App builder
// ---------------------------------------------------------------------------

/// The production router over a memory store and a fake media host.
pub struct TestApp {
    router: Router,
    pub media: Arc<FakeMediaHost>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let media = Arc::new(FakeMediaHost::default());
        let state = AppState {
            store: Arc::new(MemoryRecordStore::new()),
            media: MediaDelegate::new(media.clone()),
        };
        Self {
            router: build_app_router(state, &config),
            media,
        }
    }

    /// A handle to the router; every clone shares the same store.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw_json(app: Router, uri: &str, raw: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `multipart/form-data` body builder.
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: Method, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

pub async fn post_form(app: Router, uri: &str, form: Form) -> Response {
    send(app, form.into_request(Method::POST, uri)).await
}

pub async fn put_form(app: Router, uri: &str, form: Form) -> Response {
    send(app, form.into_request(Method::PUT, uri)).await
}

/// Image bytes of exactly `len` bytes that sniff as PNG.
pub fn png_of_len(len: usize) -> Vec<u8> {
    let mut data = PNG_BYTES.to_vec();
    data.resize(len, 0);
    data
}
