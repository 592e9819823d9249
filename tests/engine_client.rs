use serde_json::json;
use tiktok_scraper_service::{
    config::{Browser, SessionConfig},
    error::AppError,
    scraper::{EngineClient, VideoQuery, VideoSource},
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(ms_token: Option<&str>) -> SessionConfig {
    SessionConfig {
        ms_token: ms_token.map(str::to_string),
        browser: Browser::Chromium,
    }
}

#[tokio::test]
async fn posts_session_settings_and_decodes_videos() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(body_json(json!({
            "username": "someuser",
            "count": 10,
            "msTokens": ["secret"],
            "numSessions": 1,
            "sleepAfter": 3,
            "browser": "chromium"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "videos": [
                {"id": "1", "createTime": 1_700_000_000, "stats": {"diggCount": 4}},
                {"desc": "no id"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = EngineClient::new(&format!("{}/", server.uri())).unwrap();
    let session = session(Some("secret"));
    let videos = client
        .fetch_videos(VideoQuery {
            handle: "someuser",
            count: 10,
            session: &session,
        })
        .await
        .unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id.as_deref(), Some("1"));
    assert_eq!(videos[0].create_time, Some(1_700_000_000));
    assert_eq!(videos[1].id, None);
    assert_eq!(videos[1].desc.as_deref(), Some("no id"));
}

#[tokio::test]
async fn anonymous_session_sends_null_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(body_json(json!({
            "username": "anon",
            "count": 3,
            "msTokens": [null],
            "numSessions": 1,
            "sleepAfter": 3,
            "browser": "chromium"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = EngineClient::new(&server.uri()).unwrap();
    let session = session(None);
    let videos = client
        .fetch_videos(VideoQuery {
            handle: "anon",
            count: 3,
            session: &session,
        })
        .await
        .unwrap();

    assert!(videos.is_empty());
}

#[tokio::test]
async fn engine_error_status_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("captcha required"))
        .mount(&server)
        .await;

    let client = EngineClient::new(&server.uri()).unwrap();
    let session = session(None);
    let err = client
        .fetch_videos(VideoQuery {
            handle: "someuser",
            count: 10,
            session: &session,
        })
        .await
        .unwrap_err();

    match err {
        AppError::FetchError(msg) => {
            assert!(msg.contains("503"), "{}", msg);
            assert!(msg.contains("captcha required"), "{}", msg);
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_payload_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let client = EngineClient::new(&server.uri()).unwrap();
    let session = session(None);
    let err = client
        .fetch_videos(VideoQuery {
            handle: "someuser",
            count: 10,
            session: &session,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::FetchError(_)));
}

#[tokio::test]
async fn unreachable_engine_is_a_fetch_failure() {
    // Nothing listens on the discard port.
    let client = EngineClient::new("http://127.0.0.1:9").unwrap();
    let session = session(None);
    let err = client
        .fetch_videos(VideoQuery {
            handle: "someuser",
            count: 10,
            session: &session,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::FetchError(_)));
}

async fn fetch_with_reply(reply: serde_json::Value) -> Vec<tiktok_scraper_service::video::RawVideoRecord> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(&server)
        .await;

    let client = EngineClient::new(&server.uri()).unwrap();
    let session = session(None);
    client
        .fetch_videos(VideoQuery {
            handle: "someuser",
            count: 10,
            session: &session,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn null_video_list_means_no_videos() {
    assert!(fetch_with_reply(json!({"videos": null})).await.is_empty());
}

#[tokio::test]
async fn non_object_entries_are_skipped() {
    let videos = fetch_with_reply(json!({
        "videos": [null, {"id": "1"}, 42, {"id": "2", "createTime": "1700000000"}]
    }))
    .await;

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id.as_deref(), Some("1"));
    assert_eq!(videos[1].id.as_deref(), Some("2"));
    assert_eq!(videos[1].create_time, Some(1_700_000_000));
}
