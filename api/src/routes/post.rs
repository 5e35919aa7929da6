use crate::{
    AppState,
    dto::{
        CreatePostRequest, CreatePostResponse, ListPostsParams, PostListResponse,
        SearchPostsParams, SearchPostsRequest, SearchQuery,
    },
    errors::ApiError,
    models::Post,
    rate_limit::ClientIp,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// POST /api/posts
/// Body: { "company": "...", "cityCode": "...", "cityName": "...", "content": "...", "occurredAt": 0 }
pub async fn create_post(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<CreatePostResponse>, ApiError> {
    let payload = payload.normalized();
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    state.limiter.check(&client_ip)?;

    let post = Post {
        id: Uuid::new_v4(),
        company: payload.company,
        city_code: payload.city_code,
        city_name: payload.city_name,
        content: payload.content,
        occurred_at: payload.occurred_at,
        created_at: Utc::now().timestamp(),
    };

    state.posts.insert(post.clone());

    info!("Post created: {} in {} from {}", post.id, post.city_code, client_ip);

    Ok(Json(CreatePostResponse {
        post_id: post.id,
        created_at: post.created_at,
    }))
}

/// GET /api/posts?cityCode=&page=1&pageSize=20
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Json<PostListResponse> {
    let page = state.posts.list(params.city_filter(), params.page_request());

    Json(page.into())
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    // A malformed id can never match a stored post
    let id = Uuid::parse_str(id.trim()).map_err(|_| ApiError::PostNotFound)?;
    let post = state.posts.get(&id).ok_or(ApiError::PostNotFound)?;

    Ok(Json(post))
}

/// POST /api/posts/search
/// Body: { "keyword": "...", "cityCode": "...", "page": 1, "pageSize": 20 }
pub async fn search_posts(
    State(state): State<AppState>,
    Json(payload): Json<SearchPostsRequest>,
) -> Result<Json<PostListResponse>, ApiError> {
    run_search(&state, payload.try_into()?)
}

/// GET /api/posts/search?keyword=&cityCode=&page=1&pageSize=20
pub async fn search_posts_by_query(
    State(state): State<AppState>,
    Query(params): Query<SearchPostsParams>,
) -> Result<Json<PostListResponse>, ApiError> {
    run_search(&state, params.try_into()?)
}

fn run_search(state: &AppState, query: SearchQuery) -> Result<Json<PostListResponse>, ApiError> {
    let page = state.posts.search(&query);
    debug!("Search {:?} matched {} posts", query.terms, page.total);

    Ok(Json(page.into()))
}
