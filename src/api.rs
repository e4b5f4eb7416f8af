//! The `/posts` HTTP surface.
//!
//! | Method | Path          | Success                          |
//! |--------|---------------|----------------------------------|
//! | POST   | `/posts`      | 200, the whole collection        |
//! | GET    | `/posts`      | 200, the whole collection        |
//! | GET    | `/posts/{id}` | 200, one post                    |
//! | PUT    | `/posts/{id}` | 200, the replaced post           |
//! | PATCH  | `/posts/{id}` | 200, the merged post             |
//! | DELETE | `/posts/{id}` | 200, empty body                  |
//!
//! `{id}` is the post's current position. Failures are plain text: 400 for
//! an id that is not a non-negative integer or a body that is not a post,
//! 404 for an id past the end of the collection.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::handler::Handler;
use crate::method::Method;
use crate::post::{Post, PostPatch};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::PostStore;

const GET_ID_INVALID: &str = "ID could not be converted to integer";
const WRITE_ID_INVALID: &str = "ID could not be converted into an integer";
const BODY_INVALID: &str = "Request body could not be decoded into a post";

/// A request the handlers refuse. `Display` is the exact response body.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("No post found with specified id")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            Self::InvalidArgument(_) => Status::BadRequest,
            Self::NotFound => Status::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Response::builder().status(self.status()).text(self.to_string())
    }
}

/// Builds the router serving every `/posts` route from `store`.
pub fn routes(store: Arc<PostStore>) -> Router {
    Router::new()
        .on(Method::Post,   "/posts",      with_store(&store, create))
        .on(Method::Get,    "/posts",      with_store(&store, list))
        .on(Method::Get,    "/posts/{id}", with_store(&store, get))
        .on(Method::Put,    "/posts/{id}", with_store(&store, replace))
        .on(Method::Patch,  "/posts/{id}", with_store(&store, update))
        .on(Method::Delete, "/posts/{id}", with_store(&store, delete))
}

/// Adapts a `(store, request)` handler into a plain [`Handler`].
fn with_store<F, Fut, R>(store: &Arc<PostStore>, f: F) -> impl Handler + use<F, Fut, R>
where
    F: Fn(Arc<PostStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let store = Arc::clone(store);
    move |req: Request| f(Arc::clone(&store), req)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn create(store: Arc<PostStore>, req: Request) -> Result<Json<Vec<Post>>, ApiError> {
    let post = decode(&req)?.into_post();
    let posts = store.create(post);
    debug!(index = posts.len() - 1, "post created");
    Ok(Json(posts))
}

async fn list(store: Arc<PostStore>, _req: Request) -> Json<Vec<Post>> {
    Json(store.list())
}

async fn get(store: Arc<PostStore>, req: Request) -> Result<Json<Post>, ApiError> {
    let index = parse_id(&req, GET_ID_INVALID)?;
    store.get(index).map(Json).ok_or(ApiError::NotFound)
}

async fn replace(store: Arc<PostStore>, req: Request) -> Result<Json<Post>, ApiError> {
    let index = existing_index(&store, &req)?;
    let post = decode(&req)?.into_post();
    let post = store.replace(index, post).ok_or(ApiError::NotFound)?;
    debug!(index, "post replaced");
    Ok(Json(post))
}

async fn update(store: Arc<PostStore>, req: Request) -> Result<Json<Post>, ApiError> {
    let index = existing_index(&store, &req)?;
    let patch = decode(&req)?;
    let post = store.update(index, patch).ok_or(ApiError::NotFound)?;
    debug!(index, "post updated");
    Ok(Json(post))
}

async fn delete(store: Arc<PostStore>, req: Request) -> Result<Status, ApiError> {
    let index = existing_index(&store, &req)?;
    store.delete(index).ok_or(ApiError::NotFound)?;
    debug!(index, "post deleted");
    Ok(Status::Ok)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_id(req: &Request, invalid: &'static str) -> Result<usize, ApiError> {
    req.param("id")
        .and_then(|id| id.parse().ok())
        .ok_or(ApiError::InvalidArgument(invalid))
}

/// Parses the id and checks it against the current length, before the body
/// is looked at.
fn existing_index(store: &PostStore, req: &Request) -> Result<usize, ApiError> {
    let index = parse_id(req, WRITE_ID_INVALID)?;
    if index >= store.len() {
        return Err(ApiError::NotFound);
    }
    Ok(index)
}

fn decode(req: &Request) -> Result<PostPatch, ApiError> {
    PostPatch::from_json(req.body()).map_err(|e| {
        debug!(method = %req.method(), path = req.path(), "rejecting request body: {e}");
        ApiError::InvalidArgument(BODY_INVALID)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, path: &str, body: &str) -> Request {
        Request::new(method, path).with_body(body.to_owned())
    }

    #[test]
    fn errors_render_as_plain_text() {
        let res = ApiError::NotFound.into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body(), b"No post found with specified id");

        let res = ApiError::InvalidArgument(GET_ID_INVALID).into_response();
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), GET_ID_INVALID.as_bytes());
    }

    #[tokio::test]
    async fn write_routes_use_the_longer_id_message() {
        let app = routes(Arc::new(PostStore::new()));
        for method in [Method::Put, Method::Patch, Method::Delete] {
            let res = app.call(request(method, "/posts/abc", "{}")).await;
            assert_eq!(res.status_code(), 400, "{method}");
            assert_eq!(res.body(), WRITE_ID_INVALID.as_bytes(), "{method}");
        }
    }

    #[tokio::test]
    async fn negative_id_is_an_invalid_argument() {
        let app = routes(Arc::new(PostStore::new()));
        let res = app.call(request(Method::Get, "/posts/-1", "")).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), GET_ID_INVALID.as_bytes());
    }

    #[tokio::test]
    async fn bounds_are_checked_before_the_body() {
        let store = Arc::new(PostStore::new());
        let app = routes(Arc::clone(&store));
        let res = app.call(request(Method::Put, "/posts/0", "not json")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn malformed_body_leaves_the_store_untouched() {
        let store = Arc::new(PostStore::new());
        let app = routes(Arc::clone(&store));
        app.call(request(Method::Post, "/posts", r#"{"title":"keep"}"#)).await;

        for (method, path) in [(Method::Post, "/posts"), (Method::Put, "/posts/0"), (Method::Patch, "/posts/0")] {
            let res = app.call(request(method, path, r#"{"title":"#)).await;
            assert_eq!(res.status_code(), 400, "{method}");
            assert_eq!(res.body(), BODY_INVALID.as_bytes(), "{method}");
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).map(|p| p.title), Some("keep".to_owned()));
    }

    #[tokio::test]
    async fn empty_body_creates_an_empty_post() {
        let store = Arc::new(PostStore::new());
        let app = routes(Arc::clone(&store));
        let res = app.call(request(Method::Post, "/posts", "")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(store.get(0), Some(Post::default()));
    }

    #[tokio::test]
    async fn index_equal_to_length_is_not_found() {
        let store = Arc::new(PostStore::new());
        let app = routes(Arc::clone(&store));
        app.call(request(Method::Post, "/posts", "{}")).await;

        for method in [Method::Put, Method::Patch, Method::Delete] {
            let res = app.call(request(method, "/posts/1", "{}")).await;
            assert_eq!(res.status_code(), 404, "{method}");
        }
        assert_eq!(store.len(), 1);
    }
}
