use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, MALFORMED_BODY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_query_and_method() {
    let resp = app()
        .oneshot(empty_request("GET", "/echo?a%5B%5D=1&a%5B%5D=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-echo"], "yes");
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.query.as_deref(), Some("a%5B%5D=1&a%5B%5D=2"));
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reflects_body_and_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header("my-header", "value")
                .body("bar=foo".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.query, None);
    assert_eq!(echo.body, "bar=foo");
    assert_eq!(echo.headers["content-type"], "application/x-www-form-urlencoded");
    assert_eq!(echo.headers["my-header"], "value");
}

// --- status ---

#[tokio::test]
async fn status_route_answers_requested_code() {
    for code in [400u16, 401, 403, 404, 429, 500, 502, 503, 504] {
        let resp = app()
            .oneshot(empty_request("POST", &format!("/status/{code}")))
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), code);
        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["code"], code);
    }
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(empty_request("GET", "/status/teapot")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- malformed / text ---

#[tokio::test]
async fn malformed_route_claims_json_but_is_not() {
    let resp = app().oneshot(empty_request("GET", "/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/json");
    assert_eq!(body_bytes(resp).await, MALFORMED_BODY.as_bytes());
}

#[tokio::test]
async fn text_route_returns_plain_text() {
    let resp = app().oneshot(empty_request("GET", "/text")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "hello".as_bytes());
}

#[tokio::test]
async fn cookies_route_repeats_set_cookie() {
    let resp = app().oneshot(empty_request("GET", "/cookies")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<_> = resp.headers().get_all(http::header::SET_COOKIE).iter().collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
}

// --- slow ---

#[tokio::test]
async fn slow_route_eventually_answers() {
    let resp = app().oneshot(empty_request("GET", "/slow/10")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["slept"], 10);
}
