use crate::{errors::ApiError, models::PageRequest};
use serde::Deserialize;
use validator::Validate;

const MIN_KEYWORD_LENGTH: usize = 2;

/// Body of `POST /api/posts`. Missing fields deserialize as empty so they are
/// reported by validation instead of the JSON extractor.
#[derive(Debug, Default, Validate, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100, message = "company name must be 1-100 characters"))]
    pub company: String,
    #[validate(length(min = 1, message = "city code is required"))]
    pub city_code: String,
    #[validate(length(min = 1, message = "city name is required"))]
    pub city_name: String,
    #[validate(length(min = 10, max = 5000, message = "content must be 10-5000 characters"))]
    pub content: String,
    pub occurred_at: Option<i64>,
}

impl CreatePostRequest {
    /// Trims surrounding whitespace so the length rules apply to the visible text.
    pub fn normalized(self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            city_code: self.city_code.trim().to_string(),
            city_name: self.city_name.trim().to_string(),
            content: self.content.trim().to_string(),
            occurred_at: self.occurred_at.filter(|ts| *ts > 0),
        }
    }
}

/// GET /api/posts?cityCode=&page=&pageSize=
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListPostsParams {
    pub city_code: String,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListPostsParams {
    pub fn city_filter(&self) -> Option<&str> {
        Some(self.city_code.trim()).filter(|code| !code.is_empty())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.page_size.as_deref())
    }
}

/// Body of `POST /api/posts/search`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPostsRequest {
    pub keyword: String,
    pub city_code: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

/// GET /api/posts/search?keyword=&cityCode=&page=&pageSize=
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPostsParams {
    pub keyword: String,
    pub city_code: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// A validated keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Lowercased whitespace-separated terms; every term must match.
    pub terms: Vec<String>,
    pub city_code: Option<String>,
    pub page: PageRequest,
}

impl SearchQuery {
    pub fn parse(keyword: &str, city_code: Option<&str>, page: PageRequest) -> Result<Self, ApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ApiError::ValidationError("keyword is required".into()));
        }
        if keyword.chars().count() < MIN_KEYWORD_LENGTH {
            return Err(ApiError::ValidationError(format!(
                "keyword must be at least {} characters",
                MIN_KEYWORD_LENGTH
            )));
        }

        Ok(Self {
            terms: keyword.split_whitespace().map(str::to_lowercase).collect(),
            city_code: city_code
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            page,
        })
    }
}

impl TryFrom<SearchPostsRequest> for SearchQuery {
    type Error = ApiError;

    fn try_from(body: SearchPostsRequest) -> Result<Self, Self::Error> {
        Self::parse(
            &body.keyword,
            body.city_code.as_deref(),
            PageRequest::new(body.page, body.page_size),
        )
    }
}

impl TryFrom<SearchPostsParams> for SearchQuery {
    type Error = ApiError;

    fn try_from(params: SearchPostsParams) -> Result<Self, Self::Error> {
        Self::parse(
            &params.keyword,
            params.city_code.as_deref(),
            PageRequest::from_query(params.page.as_deref(), params.page_size.as_deref()),
        )
    }
}
