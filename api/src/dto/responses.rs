use crate::{models::Post, store::Page};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: Uuid,
    pub created_at: i64,
}

/// Paginated post list, shared by listing and search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl From<Page> for PostListResponse {
    fn from(page: Page) -> Self {
        Self {
            posts: page.posts,
            total: page.total,
            page: page.request.page,
            page_size: page.request.page_size,
        }
    }
}
