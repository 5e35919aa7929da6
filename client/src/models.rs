use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const SUMMARY_LENGTH: usize = 200;

/// A single anonymous company-exposure entry. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub company: String,
    pub city_code: String,
    pub city_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<i64>,
    pub created_at: i64,
}

impl Post {
    /// First 200 characters of the content, with `...` appended when cut.
    pub fn summary(&self) -> Cow<'_, str> {
        match self.content.char_indices().nth(SUMMARY_LENGTH) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &self.content[..cut])),
            None => Cow::Borrowed(&self.content),
        }
    }
}

/// One page of posts. `posts.len() <= page_size` and `page >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub company: String,
    pub city_code: String,
    pub city_name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: String,
    pub created_at: i64,
}

/// Keyword search. `page` and `page_size` default to 1 and 20 when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub city_code: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn city(mut self, city_code: impl Into<String>) -> Self {
        self.city_code = Some(city_code.into());
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// Wire body of `POST /api/posts/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchBody<'a> {
    pub keyword: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_code: Option<&'a str>,
    pub page: u32,
    pub page_size: u32,
}
