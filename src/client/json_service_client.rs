//! JSON 서비스 클라이언트
//!
//! 요청 DTO를 URL과 본문으로 바꿔 호출하고 응답을 DTO의 응답 타입으로 디코딩합니다.
//! 저장된 토큰은 접두어 없이 `Authorization` 헤더에 그대로 실립니다.

use std::sync::Arc;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use crate::client::error::ClientError;
use crate::client::token_store::{InMemoryTokenStore, TokenStore};
use crate::client::url;

/// 세션 만료를 뜻하는 업무 코드
pub const SESSION_EXPIRED_CODE: i64 = 600;

const SESSION_EXPIRED_FALLBACK: &str = "로그인이 만료되었습니다";

/// 호출 가능한 요청 DTO
///
/// 직렬화 결과의 필드 이름이 URL 템플릿 자리표시자, 쿼리 파라미터,
/// 본문(`body`) 구분에 그대로 쓰입니다.
pub trait ApiRequest: Serialize {
    type Response: DeserializeOwned;

    /// `api/.../{field}` 형식의 상대 경로
    fn url_template(&self) -> &'static str;

    fn method(&self) -> Method {
        Method::POST
    }
}

/// 업로드할 파일 하나
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// 폼 필드 이름
    pub name: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Clone)]
pub struct JsonServiceClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl JsonServiceClient {
    /// 메모리 토큰 저장소를 쓰는 클라이언트. `base_url`은 템플릿 앞에 그대로 붙습니다.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_token_store(base_url, Arc::new(InMemoryTokenStore::new()))
    }

    pub fn with_token_store(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    /// 커넥션 풀을 공유할 때
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn to_absolute_url<R: ApiRequest>(&self, request: &R) -> Result<String, ClientError> {
        let fields = url::request_fields(request)?;
        url::to_absolute_url(&self.base_url, request.url_template(), &fields)
    }

    /// DTO에 정의된 메서드로 호출합니다.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ClientError> {
        self.call(request, request.method()).await
    }

    pub async fn get<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ClientError> {
        self.call(request, Method::GET).await
    }

    pub async fn post<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ClientError> {
        self.call(request, Method::POST).await
    }

    /// 요청 데이터는 호출 메서드가 아니라 DTO에 정의된 메서드 기준으로 만듭니다.
    async fn call<R: ApiRequest>(&self, request: &R, method: Method) -> Result<R::Response, ClientError> {
        let fields = url::request_fields(request)?;
        let template = request.url_template();
        let target = url::to_absolute_url(&self.base_url, template, &fields)?;
        let data = url::to_data(&request.method(), template, &fields);

        log::debug!("➡️ {} {}", method, target);

        let mut builder = self
            .http
            .request(method, &target)
            .header(AUTHORIZATION, self.tokens.get().unwrap_or_default());
        if let Some(data) = data {
            builder = builder.json(&data);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("⚠️ API 요청 실패: {} ({})", target, e);
            ClientError::Http(e)
        })?;

        self.decode(response).await
    }

    /// 파일과 나머지 요청 필드를 multipart로 POST합니다.
    ///
    /// 파일 필드 이름과 같은 요청 필드는 텍스트 필드로 보내지 않습니다.
    pub async fn upload<R: ApiRequest>(&self, request: &R, files: Vec<UploadFile>) -> Result<R::Response, ClientError> {
        let fields = url::request_fields(request)?;
        let target = url::to_absolute_url(&self.base_url, request.url_template(), &fields)?;

        let mut form = Form::new();
        for (key, value) in &fields {
            if value.is_null() || files.iter().any(|file| &file.name == key) {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(key.clone(), text);
        }

        for file in files {
            let mut part = Part::bytes(file.content).file_name(file.file_name);
            if let Some(mime_type) = &file.mime_type {
                part = part.mime_str(mime_type)?;
            }
            form = form.part(file.name, part);
        }

        log::debug!("➡️ UPLOAD {}", target);

        let response = self
            .http
            .post(&target)
            .header(AUTHORIZATION, self.tokens.get().unwrap_or_default())
            .multipart(form)
            .send()
            .await?;

        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(ClientError::Serialization(e)),
            Err(_) => return Err(ClientError::Api { status: status.as_u16(), body }),
        };

        if let Some(message) = session_expired_message(&value) {
            self.tokens.clear();
            log::warn!("🔒 세션 만료 응답, 저장된 토큰 삭제");
            return Err(ClientError::SessionExpired(message));
        }

        if !status.is_success() {
            return Err(ClientError::Api { status: status.as_u16(), body });
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// 업무 코드(`code` 또는 `Code`)가 600이면 안내 메시지를 돌려줍니다.
pub fn session_expired_message(value: &Value) -> Option<String> {
    let code = value
        .get("code")
        .or_else(|| value.get("Code"))
        .and_then(Value::as_i64)?;

    if code != SESSION_EXPIRED_CODE {
        return None;
    }

    let message = ["Message", "msg", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .unwrap_or(SESSION_EXPIRED_FALLBACK);

    Some(message.to_string())
}
