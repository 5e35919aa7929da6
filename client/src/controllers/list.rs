use super::{Sequencer, Ticket};
use crate::{ClientError, ContentService, Post, PostPage, config::DEFAULT_PAGE_SIZE};
use tracing::debug;

/// A `list_posts` call to issue on behalf of a [`ListController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub ticket: Ticket,
    pub city_code: String,
    pub page: u32,
    pub page_size: u32,
}

/// Paginated post list filtered by city. An empty city code means all cities.
///
/// Failed loads keep whatever was displayed before and leave a notice.
#[derive(Debug)]
pub struct ListController {
    city_code: String,
    page: u32,
    page_size: u32,
    posts: Vec<Post>,
    total: u64,
    notice: Option<String>,
    seq: Sequencer,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListController {
    /// The page size is fixed for the controller's lifetime.
    pub fn new(page_size: u32) -> Self {
        Self {
            city_code: String::new(),
            page: 1,
            page_size: page_size.max(1),
            posts: Vec::new(),
            total: 0,
            notice: None,
            seq: Sequencer::default(),
        }
    }

    pub fn city_code(&self) -> &str {
        &self.city_code
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
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

    /// Takes the pending failure notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Initial load for the current filter and page.
    pub fn mount(&mut self) -> ListRequest {
        self.request()
    }

    /// Switching city always goes back to page 1.
    pub fn set_city(&mut self, city_code: &str) -> Option<ListRequest> {
        if self.city_code == city_code {
            return None;
        }
        self.city_code = city_code.to_string();
        self.page = 1;
        Some(self.request())
    }

    pub fn set_page(&mut self, page: u32) -> Option<ListRequest> {
        let page = page.max(1);
        if self.page == page {
            return None;
        }
        self.page = page;
        Some(self.request())
    }

    /// Applies a response. Returns `false` when the ticket was superseded and
    /// the response was dropped.
    pub fn apply(&mut self, ticket: Ticket, result: Result<PostPage, ClientError>) -> bool {
        if !self.seq.settle(ticket) {
            debug!("Dropping stale list response {:?}", ticket);
            return false;
        }

        match result {
            Ok(page) => {
                self.posts = page.posts;
                self.total = page.total;
                // The server's page number is authoritative
                self.page = page.page.max(1);
            }
            Err(err) => self.notice = Some(err.message().to_string()),
        }
        true
    }

    /// Issues `request` against `service` and applies the response.
    pub async fn load<S: ContentService>(&mut self, service: &S, request: ListRequest) -> bool {
        let result = service
            .list_posts(&request.city_code, request.page, request.page_size)
            .await;
        self.apply(request.ticket, result)
    }

    fn request(&mut self) -> ListRequest {
        ListRequest {
            ticket: self.seq.issue(),
            city_code: self.city_code.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}
