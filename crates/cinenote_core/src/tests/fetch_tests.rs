use super::*;
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

async fn spawn_api(router: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn keeps_the_first_movie_of_the_payload() {
    let router = Router::new().route(
        "/movies/random/1",
        get(|| async {
            Json(json!([{
                "poster_path": "/x.jpg",
                "original_title": "Test Movie",
                "release_date": "2020-01-15",
                "overview": "Un film de test.",
                "vote_average": 7.5,
                "vote_count": 100
            }]))
        }),
    );
    let base_url = spawn_api(router).await;

    let movie = fetch_random_movie(&Client::new(), &base_url)
        .await
        .expect("fetch");

    assert_eq!(movie.original_title, "Test Movie");
    assert_eq!(movie.poster_path, "/x.jpg");
    assert_eq!(movie.release_date, "2020-01-15");
    assert_eq!(movie.vote_average, 7.5);
    assert_eq!(movie.vote_count, 100);
}

#[tokio::test]
async fn ignores_unknown_payload_fields() {
    let router = Router::new().route(
        "/movies/random/1",
        get(|| async {
            Json(json!([{
                "id": "b4ef7d2a",
                "poster_path": "/y.jpg",
                "original_title": "Autre Film",
                "release_date": "1999-12-31",
                "overview": "Synopsis.",
                "vote_average": 6.0,
                "vote_count": 42,
                "casts": []
            }]))
        }),
    );
    let base_url = spawn_api(router).await;

    let movie = fetch_random_movie(&Client::new(), &base_url)
        .await
        .expect("fetch");

    assert_eq!(movie.original_title, "Autre Film");
}

#[tokio::test]
async fn surfaces_status_code_and_body_on_http_error() {
    let router = Router::new().route(
        "/movies/random/1",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal error") }),
    );
    let base_url = spawn_api(router).await;

    let err = fetch_random_movie(&Client::new(), &base_url)
        .await
        .expect_err("http error");

    match &err {
        MovieFetchError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "Internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let message = err.user_message();
    assert!(message.contains("500"));
    assert!(message.contains("Internal error"));
}

#[tokio::test]
async fn collapses_transport_failure_to_the_generic_message() {
    // Bind then drop to get a local port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = fetch_random_movie(&Client::new(), &format!("http://{addr}"))
        .await
        .expect_err("dead endpoint");

    assert!(matches!(err, MovieFetchError::Transport(_)));
    assert_eq!(err.user_message(), GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn treats_empty_payload_as_a_failed_fetch() {
    let router = Router::new().route("/movies/random/1", get(|| async { Json(json!([])) }));
    let base_url = spawn_api(router).await;

    let err = fetch_random_movie(&Client::new(), &base_url)
        .await
        .expect_err("empty payload");

    assert!(matches!(err, MovieFetchError::EmptyPayload));
    assert_eq!(err.user_message(), GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn treats_malformed_payload_like_a_transport_failure() {
    let router = Router::new().route(
        "/movies/random/1",
        get(|| async { Json(json!({"films": []})) }),
    );
    let base_url = spawn_api(router).await;

    let err = fetch_random_movie(&Client::new(), &base_url)
        .await
        .expect_err("malformed payload");

    assert!(matches!(err, MovieFetchError::Transport(_)));
    assert_eq!(err.user_message(), GENERIC_FETCH_MESSAGE);
}

#[tokio::test]
async fn rejects_an_unparseable_base_url() {
    let err = fetch_random_movie(&Client::new(), "not a url")
        .await
        .expect_err("bad base url");

    assert!(matches!(err, MovieFetchError::InvalidBaseUrl(_)));
    assert_eq!(err.user_message(), GENERIC_FETCH_MESSAGE);
}
