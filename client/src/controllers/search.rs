use super::{Sequencer, Ticket};
use crate::{
    ClientError, ContentService, Post, PostPage, SearchQuery, config::DEFAULT_PAGE_SIZE,
    highlight::HighlightedPost,
};
use tracing::debug;

/// A `search_posts` call to issue on behalf of a [`SearchController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: SearchQuery,
}

/// Keyword search with an optional city filter.
///
/// Searches run on explicit submit; after that, changing the city or page
/// re-runs the active keyword. Failed searches clear the results.
#[derive(Debug)]
pub struct SearchController {
    keyword: String,
    city_code: Option<String>,
    page: u32,
    page_size: u32,
    posts: Vec<Post>,
    total: u64,
    notice: Option<String>,
    seq: Sequencer,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchController {
    pub fn new(page_size: u32) -> Self {
        Self {
            keyword: String::new(),
            city_code: None,
            page: 1,
            page_size: page_size.max(1),
            posts: Vec::new(),
            total: 0,
            notice: None,
            seq: Sequencer::default(),
        }
    }

    /// The active (trimmed) keyword; empty before the first search.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn city_code(&self) -> Option<&str> {
        self.city_code.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.seq.is_pending()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Results with the active keyword marked in company name and content.
    pub fn highlighted(&self) -> Vec<HighlightedPost<'_>> {
        self.posts
            .iter()
            .map(|post| HighlightedPost::new(post, &self.keyword))
            .collect()
    }

    /// User-triggered search. A blank keyword issues nothing and clears the
    /// results.
    pub fn submit(&mut self, keyword: &str, city_code: Option<&str>) -> Option<SearchRequest> {
        self.keyword = keyword.trim().to_string();
        self.city_code = normalize_city(city_code);
        self.page = 1;
        self.request()
    }

    /// Re-runs the active search for the new city, if there is one.
    pub fn set_city(&mut self, city_code: Option<&str>) -> Option<SearchRequest> {
        let city_code = normalize_city(city_code);
        if self.city_code == city_code {
            return None;
        }
        self.city_code = city_code;
        self.page = 1;
        self.request()
    }

    pub fn set_page(&mut self, page: u32) -> Option<SearchRequest> {
        let page = page.max(1);
        if self.page == page {
            return None;
        }
        self.page = page;
        self.request()
    }

    /// Applies a response. Returns `false` when it was stale and dropped.
    pub fn apply(&mut self, ticket: Ticket, result: Result<PostPage, ClientError>) -> bool {
        if !self.seq.settle(ticket) {
            debug!("Dropping stale search response {:?}", ticket);
            return false;
        }

        match result {
            Ok(page) => {
                self.posts = page.posts;
                self.total = page.total;
                self.page = page.page.max(1);
            }
            Err(err) => {
                self.clear_results();
                self.notice = Some(err.message().to_string());
            }
        }
        true
    }

    pub async fn load<S: ContentService>(&mut self, service: &S, request: SearchRequest) -> bool {
        let result = service.search_posts(&request.query).await;
        self.apply(request.ticket, result)
    }

    fn request(&mut self) -> Option<SearchRequest> {
        if self.keyword.is_empty() {
            self.seq.abandon();
            self.clear_results();
            return None;
        }

        Some(SearchRequest {
            ticket: self.seq.issue(),
            query: SearchQuery {
                keyword: self.keyword.clone(),
                city_code: self.city_code.clone(),
                page: Some(self.page),
                page_size: Some(self.page_size),
            },
        })
    }

    fn clear_results(&mut self) {
        self.posts.clear();
        self.total = 0;
    }
}

fn normalize_city(city_code: Option<&str>) -> Option<String> {
    city_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
