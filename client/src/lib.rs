//! Client side of the anonymous company-exposure board.
//!
//! [`ContentClient`] talks REST/JSON to the content service. The controllers in
//! [`controllers`] hold per-view state (list, search, detail, create) and turn
//! user actions into requests, tagging each one so late responses cannot
//! overwrite newer state.

pub mod cities;
pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod highlight;
pub mod models;
pub mod routes;

pub use client::{ContentClient, ContentService};
pub use error::{ClientError, ValidationError};
pub use models::{CreatePostRequest, CreatePostResponse, Post, PostPage, SearchQuery};
pub use routes::Route;
