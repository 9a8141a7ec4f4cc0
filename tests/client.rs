//! 보육기관 REST 클라이언트를 모의 서버로 확인합니다.

use std::sync::Arc;
use running_tracker_backend::client::dtos::{
    GetGovJiGouDishMenuWeeklys, GovJiGouDishMenuWeekly, GovLogin, LoginReq, SaveGovJiGouDishMenuWeekly, FileUploader,
};
use running_tracker_backend::client::{ClientError, InMemoryTokenStore, JsonServiceClient, TokenStore, UploadFile};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer, token: Option<&str>) -> (JsonServiceClient, Arc<InMemoryTokenStore>) {
    let store = Arc::new(match token {
        Some(token) => InMemoryTokenStore::with_token(token),
        None => InMemoryTokenStore::new(),
    });
    let client = JsonServiceClient::with_token_store(format!("{}/", server.uri()), store.clone());
    (client, store)
}

#[tokio::test]
async fn get_request_uses_path_and_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subdev/GovJiGouService/gov_jigou_dishmenu_weeklys/jg-1"))
        .and(query_param("pageSize", "20"))
        .and(header("Authorization", "raw-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Code": 200,
            "Total": 1,
            "Data": [{"F_Id": "w-1", "Title": "3월 첫째 주"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("raw-token")).await;
    let response = client
        .send(&GetGovJiGouDishMenuWeeklys {
            jigou_id: Some("jg-1".into()),
            page_size: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.total, Some(1));
    assert_eq!(response.data[0].title.as_deref(), Some("3월 첫째 주"));
}

#[tokio::test]
async fn post_sends_body_with_scope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/subdev/GovJiGouService/gov_jigou_dishmenu_weekly"))
        .and(body_json(json!({"Title": "주간 식단", "f_jigou_id": "jg-1", "Scope": "JiGou"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Code": 200, "Id": "new-id"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None).await;
    let response = client
        .send(&SaveGovJiGouDishMenuWeekly {
            body: Some(GovJiGouDishMenuWeekly {
                title: Some("주간 식단".into()),
                f_jigou_id: Some("jg-1".into()),
                ..Default::default()
            }),
        })
        .await
        .unwrap();

    assert_eq!(response.id.as_deref(), Some("new-id"));
}

#[tokio::test]
async fn business_code_600_clears_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/subdev/GovService/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 600, "msg": "登录已过期"})))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("stale-token")).await;
    let err = client
        .send(&GovLogin {
            body: Some(LoginReq {
                phone_number: Some("13800000000".into()),
                code: Some("1234".into()),
                scope: None,
            }),
        })
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    assert!(matches!(err, ClientError::SessionExpired(ref message) if message == "登录已过期"));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn non_json_error_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("token")).await;
    let err = client
        .get(&GetGovJiGouDishMenuWeeklys {
            jigou_id: Some("jg-1".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 502, ref body } if body == "bad gateway"));
    assert_eq!(store.get().as_deref(), Some("token"));
}

#[tokio::test]
async fn missing_path_param_fails_before_request() {
    let server = MockServer::start().await;
    let (client, _) = client_for(&server, None).await;

    let err = client.send(&GetGovJiGouDishMenuWeeklys::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingPathParam(ref name) if name == "jigou_id"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn upload_posts_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/File/Uploader/image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileId": "f-1",
            "url": "https://cdn.example.com/f-1.png",
            "fileName": "menu.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("token")).await;
    let file = UploadFile::new("file", "menu.png", vec![0x89, 0x50, 0x4e, 0x47]).with_mime_type("image/png");
    let uploaded = client
        .upload(
            &FileUploader {
                kind: Some("image".into()),
                folder: Some("dishmenu".into()),
            },
            vec![file],
        )
        .await
        .unwrap();

    assert_eq!(uploaded.file_id.as_deref(), Some("f-1"));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"folder\""));
    assert!(body.contains("dishmenu"));
    assert!(body.contains("filename=\"menu.png\""));
}

#[tokio::test]
async fn verb_override_keeps_request_data_of_dto_method() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/subdev/GovJiGouService/gov_jigou_dishmenu_weeklys/jg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Code": 200, "Data": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/subdev/GovJiGouService/gov_jigou_dishmenu_weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Code": 200, "Id": "w-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None).await;
    let client = client.with_client(reqwest::Client::new());

    // GET DTO를 POST로 보내도 본문은 없습니다.
    client
        .post(&GetGovJiGouDishMenuWeeklys {
            jigou_id: Some("jg-1".into()),
            page_size: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();

    // POST DTO를 GET으로 보내면 DTO의 body가 그대로 실립니다.
    client
        .get(&SaveGovJiGouDishMenuWeekly {
            body: Some(GovJiGouDishMenuWeekly {
                title: Some("주간 식단".into()),
                ..Default::default()
            }),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let post = requests.iter().find(|r| r.method.as_str() == "POST").unwrap();
    assert!(post.body.is_empty());
    assert_eq!(post.url.query(), Some("pageSize=20"));

    let get = requests.iter().find(|r| r.method.as_str() == "GET").unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&get.body).unwrap();
    assert_eq!(sent, json!({"Title": "주간 식단", "Scope": "JiGou"}));
}
