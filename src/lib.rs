//! # posts-api
//!
//! An in-memory CRUD service for blog posts, each embedding its author.
//!
//! Posts have no id of their own: a post's identifier is its current
//! zero-based position in the collection, so deleting a post renumbers every
//! post after it. State lives in a single [`PostStore`] for the life of the
//! process and is gone on restart.
//!
//! The crate is two layers:
//!
//! - [`api`], [`PostStore`], [`Post`]: the `/posts` routes, the collection
//!   behind a mutex, and the JSON wire model.
//! - A small HTTP layer underneath: per-method radix-tree routing via
//!   [`matchit`], hyper connection handling on tokio, graceful shutdown on
//!   SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use posts_api::{PostStore, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), posts_api::Error> {
//!     let app = api::routes(Arc::new(PostStore::new()));
//!     Server::bind("0.0.0.0:5000").await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod post;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod api;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use post::{Author, AuthorPatch, Post, PostPatch};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::PostStore;
