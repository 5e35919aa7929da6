use crate::{
    config::{self, DEFAULT_PAGE_SIZE},
    error::ClientError,
    models::{CreatePostRequest, CreatePostResponse, Post, PostPage, SearchBody, SearchQuery},
};
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use std::future::Future;
use tracing::{debug, warn};

/// The four content-service operations the views depend on.
pub trait ContentService {
    fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> impl Future<Output = Result<CreatePostResponse, ClientError>> + Send;

    /// An empty `city_code` lists every city.
    fn list_posts(
        &self,
        city_code: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<PostPage, ClientError>> + Send;

    /// Fails with [`ClientError::NotFound`] when the post does not exist.
    fn get_post(&self, post_id: &str) -> impl Future<Output = Result<Post, ClientError>> + Send;

    fn search_posts(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<PostPage, ClientError>> + Send;
}

/// REST/JSON client for the content service.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: Client,
    base_url: String,
}

impl ContentClient {
    /// `base_url` overrides the `FUCKBOSS_API_BASE_URL` default; with neither,
    /// requests use same-origin relative paths.
    pub fn new(base_url: Option<&str>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: Option<&str>) -> Self {
        Self {
            http,
            base_url: config::base_url_from_env(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .inspect_err(|e| warn!("Content service unreachable: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let err = error_from_response(response).await;
            warn!("Content service returned {}: {}", status, err);
            return Err(err);
        }

        Ok(response.json::<T>().await?)
    }
}

impl ContentService for ContentClient {
    async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<CreatePostResponse, ClientError> {
        debug!("Creating post for {} in {}", request.company, request.city_code);
        self.send(self.http.post(self.url("/api/posts")).json(request))
            .await
    }

    async fn list_posts(
        &self,
        city_code: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage, ClientError> {
        debug!("Listing posts: city={:?} page={} size={}", city_code, page, page_size);
        // cityCode is always sent, even when empty: empty means "all cities"
        let query = [
            ("cityCode", city_code.to_string()),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.send(self.http.get(self.url("/api/posts")).query(&query))
            .await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, ClientError> {
        debug!("Fetching post {}", post_id);
        let path = format!("/api/posts/{}", urlencoding::encode(post_id));
        self.send(self.http.get(self.url(&path)))
            .await
            .map_err(ClientError::classify_not_found)
    }

    async fn search_posts(&self, query: &SearchQuery) -> Result<PostPage, ClientError> {
        let body = SearchBody {
            keyword: &query.keyword,
            city_code: query.city_code.as_deref(),
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };
        debug!("Searching posts: {:?} page={}", body.keyword, body.page);
        self.send(self.http.post(self.url("/api/posts/search")).json(&body))
            .await
    }
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    ClientError::Request {
        status: Some(status.as_u16()),
        message: error_message(status, &body),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Structured `{"error": ...}` (or `{"message": ...}`) body first, then the raw
/// body text, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let structured = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .filter(|msg| !msg.trim().is_empty());
    if let Some(message) = structured {
        return message;
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}
