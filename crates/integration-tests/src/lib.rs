//! Integration tests for Threads in the Matrix.
//!
//! Each test builds the full router over a temporary directory holding its
//! own `users.csv` and `images.csv`, then drives it request by request the
//! way a browser would, carrying the session cookie between calls.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p threads-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tempfile::TempDir;
use threads_web::config::WebConfig;
use threads_web::state::AppState;
use tower::ServiceExt;

/// Header row of the user table.
pub const USERS_HEADER: &str =
    "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement";

/// A user table with one account, `alice` / `pw1`.
pub const USERS_WITH_ALICE: &str = "Username,Password,Phone Number,Waist Measurement,Bust Measurement,Hip Measurement\nalice,pw1,555-0100,28.0,34.5,36.0\n";

/// A catalog of seven displayable images.
pub const SEVEN_IMAGES: &str = "ImageURL\n\
    https://img.example/1.jpg\n\
    https://img.example/2.jpg\n\
    https://img.example/3.jpg\n\
    https://img.example/4.jpg\n\
    https://img.example/5.jpg\n\
    https://img.example/6.jpg\n\
    https://img.example/7.jpg\n";

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// One browser talking to a fresh site.
pub struct TestContext {
    dir: TempDir,
    router: Router,
    cookie: Option<String>,
}

impl TestContext {
    /// A site whose user table holds `alice` and whose catalog has seven images.
    pub fn new() -> Self {
        Self::with_tables(Some(USERS_WITH_ALICE), Some(SEVEN_IMAGES))
    }

    /// A site over the given table contents; `None` leaves the file absent.
    pub fn with_tables(users: Option<&str>, images: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        if let Some(contents) = users {
            fs::write(dir.path().join("users.csv"), contents).unwrap();
        }
        if let Some(contents) = images {
            fs::write(dir.path().join("images.csv"), contents).unwrap();
        }

        let config = WebConfig {
            users_csv: dir.path().join("users.csv"),
            images_csv: dir.path().join("images.csv"),
            ..WebConfig::default()
        };
        let router = threads_web::app(AppState::new(config));

        Self {
            dir,
            router,
            cookie: None,
        }
    }

    /// Path of the user table.
    pub fn users_path(&self) -> PathBuf {
        self.dir.path().join("users.csv")
    }

    /// Current contents of the user table.
    pub fn users_csv(&self) -> String {
        fs::read_to_string(self.users_path()).unwrap()
    }

    /// Whether a session cookie has been issued.
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> Page {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a form POST. Values must not need percent-encoding.
    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let body = form
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// POST a form, check it redirects home and follow the redirect.
    pub async fn submit(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let response = self.post(uri, form).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{uri} {form:?}");
        assert_eq!(response.location.as_deref(), Some("/"));
        self.get("/").await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Page {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Page {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Number of times `needle` occurs in the body.
    pub fn count(&self, needle: &str) -> usize {
        self.body.matches(needle).count()
    }
}
