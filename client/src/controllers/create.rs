use super::{Sequencer, Ticket};
use crate::{
    ClientError, ContentService, CreatePostRequest, CreatePostResponse, Route, ValidationError,
    cities,
};
use tracing::{debug, info};
use validator::Validate;

/// Create-post form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 100, message = "company name must be 1-100 characters"))]
    pub company: String,
    #[validate(length(min = 1, message = "please select a city"))]
    pub city_code: String,
    #[validate(length(min = 10, max = 5000, message = "content must be 10-5000 characters"))]
    pub content: String,
    pub occurred_at: Option<i64>, // Unix seconds
}

impl PostForm {
    /// Validates the trimmed fields and builds the wire request, filling in
    /// the city's display name from the city table.
    pub fn to_request(&self) -> Result<CreatePostRequest, ValidationError> {
        let trimmed = PostForm {
            company: self.company.trim().to_string(),
            city_code: self.city_code.trim().to_string(),
            content: self.content.trim().to_string(),
            occurred_at: self.occurred_at.filter(|ts| *ts > 0),
        };
        trimmed.validate()?;

        let city = cities::find(&trimmed.city_code)
            .ok_or_else(|| ValidationError::UnknownCity(trimmed.city_code.clone()))?;

        Ok(CreatePostRequest {
            company: trimmed.company,
            city_code: city.code.to_string(),
            city_name: city.name.to_string(),
            content: trimmed.content,
            occurred_at: trimmed.occurred_at,
        })
    }
}

/// `Idle -> Submitting -> (navigate away | Failed)`. `Failed` accepts a new
/// submit just like `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePhase {
    Idle,
    Submitting,
    Failed(String),
}

/// A `create_post` call to issue on behalf of a [`CreateController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubmission {
    pub ticket: Ticket,
    pub request: CreatePostRequest,
}

#[derive(Debug)]
pub struct CreateController {
    form: PostForm,
    phase: CreatePhase,
    seq: Sequencer,
}

impl Default for CreateController {
    fn default() -> Self {
        Self {
            form: PostForm::default(),
            phase: CreatePhase::Idle,
            seq: Sequencer::default(),
        }
    }
}

impl CreateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    pub fn phase(&self) -> &CreatePhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CreatePhase::Submitting
    }

    /// Validates and starts a submission. `Ok(None)` while one is already in
    /// flight; validation errors never reach the network.
    pub fn submit(&mut self) -> Result<Option<CreateSubmission>, ValidationError> {
        if self.is_submitting() {
            debug!("Ignoring submit while a post is being created");
            return Ok(None);
        }

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.phase = CreatePhase::Idle;
                return Err(err);
            }
        };
        self.phase = CreatePhase::Submitting;

        Ok(Some(CreateSubmission {
            ticket: self.seq.issue(),
            request,
        }))
    }

    /// On success clears the form and returns the new post's route, using the
    /// id the service assigned. On failure the form is kept for a retry.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<CreatePostResponse, ClientError>,
    ) -> Option<Route> {
        if !self.seq.settle(ticket) {
            return None;
        }

        match result {
            Ok(created) => {
                info!("Post {} created", created.post_id);
                self.form = PostForm::default();
                self.phase = CreatePhase::Idle;
                Some(Route::Post(created.post_id))
            }
            Err(err) => {
                self.phase = CreatePhase::Failed(err.message().to_string());
                None
            }
        }
    }

    /// Validates, submits to `service`, and applies the outcome.
    pub async fn submit_to<S: ContentService>(
        &mut self,
        service: &S,
    ) -> Result<Option<Route>, ValidationError> {
        let Some(submission) = self.submit()? else {
            return Ok(None);
        };
        let result = service.create_post(&submission.request).await;
        Ok(self.apply(submission.ticket, result))
    }
}
