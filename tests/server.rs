//! A real server on an ephemeral port, driven over TCP.

use std::sync::Arc;
use std::time::Duration;

use posts_api::{PostStore, Server, api};
use tokio::sync::oneshot;

#[tokio::test]
async fn serves_posts_over_http_and_shuts_down() {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(
        api::routes(Arc::new(PostStore::new())),
        async move {
            let _ = stopped.await;
        },
    ));

    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/posts"))
        .body(r#"{"title":"A","body":"b","author":{"fullName":"X","userName":"x","email":"x@x"}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(
        res.text().await.unwrap(),
        r#"[{"title":"A","body":"b","author":{"fullName":"X","userName":"x","email":"x@x"}}]"#
    );

    let res = client.get(format!("{base}/posts/abc")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(res.text().await.unwrap(), "ID could not be converted to integer");

    let res = client.delete(format!("{base}/posts/0")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.get(format!("{base}/posts/0")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let res = client
        .request(reqwest::Method::from_bytes(b"PURGE").unwrap(), format!("{base}/posts"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 405);

    drop(client);
    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server drains within five seconds")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn bind_rejects_a_malformed_address() {
    let err = match Server::bind("localhost-5000").await {
        Ok(_) => panic!("bound a malformed address"),
        Err(e) => e,
    };
    assert!(matches!(err, posts_api::Error::Addr { .. }));
    assert!(err.to_string().contains("localhost-5000"));
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(
        api::routes(Arc::new(PostStore::new())),
        async move {
            let _ = stopped.await;
        },
    ));

    // The client keeps its pooled connection open for the rest of the test.
    let client = reqwest::Client::new();
    let res = client.get(format!("{base}/posts")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "[]");

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server returns while an idle connection is still open")
        .unwrap()
        .unwrap();

    drop(client);
}
