mod requests;
mod responses;

pub use requests::{CreatePostRequest, ListPostsParams, SearchPostsParams, SearchPostsRequest, SearchQuery};
pub use responses::{CreatePostResponse, PostListResponse};
