//! posts-api server binary.
//!
//! Run with:
//!   RUST_LOG=debug cargo run
//!
//! Try:
//!   curl -X POST http://localhost:5000/posts \
//!        -d '{"title":"A","body":"b","author":{"fullName":"X","userName":"x","email":"x@x"}}'
//!   curl http://localhost:5000/posts/0
//!   curl -X PATCH http://localhost:5000/posts/0 -d '{"title":"B"}'
//!   curl -X DELETE http://localhost:5000/posts/0

use std::sync::Arc;

use posts_api::{PostStore, Server, api};
use tracing_subscriber::EnvFilter;

const LISTEN_ADDR: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<(), posts_api::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = api::routes(Arc::new(PostStore::new()));

    Server::bind(LISTEN_ADDR).await?.serve(app).await
}
