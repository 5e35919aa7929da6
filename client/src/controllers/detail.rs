use super::{Sequencer, Ticket};
use crate::{ClientError, ContentService, Post, Route};
use tracing::debug;

/// A `get_post` call to issue on behalf of a [`DetailController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub ticket: Ticket,
    pub post_id: String,
}

/// Empty state shown when a post could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPost {
    pub message: String,
    /// `true` when the service said the post does not exist, `false` for any
    /// other failure. Both recover the same way.
    pub not_found: bool,
}

impl MissingPost {
    /// Where the empty state's "back" action leads.
    pub fn back(&self) -> Route {
        Route::Home
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Found(Post),
    Missing(MissingPost),
}

/// Single post view. Fetches once per post id.
#[derive(Debug)]
pub struct DetailController {
    post_id: Option<String>,
    state: DetailState,
    seq: Sequencer,
}

impl Default for DetailController {
    fn default() -> Self {
        Self {
            post_id: None,
            state: DetailState::Loading,
            seq: Sequencer::default(),
        }
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Shows `post_id`. Issues nothing when it is already the current post.
    pub fn open(&mut self, post_id: &str) -> Option<DetailRequest> {
        if self.post_id.as_deref() == Some(post_id) {
            return None;
        }
        self.post_id = Some(post_id.to_string());
        self.state = DetailState::Loading;

        Some(DetailRequest {
            ticket: self.seq.issue(),
            post_id: post_id.to_string(),
        })
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Post, ClientError>) -> bool {
        if !self.seq.settle(ticket) {
            debug!("Dropping stale post response {:?}", ticket);
            return false;
        }

        self.state = match result {
            Ok(post) => DetailState::Found(post),
            Err(err) => DetailState::Missing(MissingPost {
                not_found: err.is_not_found(),
                message: err.message().to_string(),
            }),
        };
        true
    }

    pub async fn load<S: ContentService>(&mut self, service: &S, request: DetailRequest) -> bool {
        let result = service.get_post(&request.post_id).await;
        self.apply(request.ticket, result)
    }
}
