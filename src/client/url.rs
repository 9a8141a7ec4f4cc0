//! URL 템플릿과 요청 데이터 구성
//!
//! 요청 DTO를 JSON 객체로 직렬화한 뒤 필드 이름으로 나눕니다.
//!
//! - `{name}` 자리표시자에 들어간 필드는 경로 파라미터
//! - `body` 필드는 POST 본문
//! - 나머지 `null`이 아닌 필드는 쿼리 파라미터

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::client::dtos::GovScope;
use crate::client::error::ClientError;

/// 본문으로 보내는 필드 이름
pub const BODY_FIELD: &str = "body";

/// 기관 범위를 붙이는 필드 이름
pub const SCOPE_FIELD: &str = "Scope";

/// 요청 DTO를 필드 맵으로 직렬화합니다.
pub fn request_fields<R: Serialize>(request: &R) -> Result<Map<String, Value>, ClientError> {
    match serde_json::to_value(request)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ClientError::InvalidRequest),
    }
}

/// 템플릿에 들어 있는 `{name}` 자리표시자 이름 (등장 순서)
pub fn path_params(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) if end > 0 => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            Some(end) => rest = &after[end + 1..],
            None => break,
        }
    }

    names
}

/// `encodeURIComponent`와 같은 규칙으로 인코딩합니다.
///
/// 영숫자와 `- _ . ! ~ * ' ( )`만 그대로 둡니다.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 경로 파라미터를 치환한 상대 URL과 쿼리 문자열을 만듭니다.
///
/// 반환값은 `base_url` 없이 템플릿 기준의 경로입니다.
pub fn relative_url(template: &str, fields: &Map<String, Value>) -> Result<String, ClientError> {
    let params = path_params(template);
    let mut url = template.to_string();

    for name in &params {
        let value = match fields.get(name) {
            Some(Value::Null) | None => return Err(ClientError::MissingPathParam(name.clone())),
            Some(value) => value,
        };
        url = url.replace(&format!("{{{}}}", name), &encode_component(&scalar_string(value)));
    }

    let mut query = Vec::new();
    for (key, value) in fields {
        if key == BODY_FIELD || params.contains(key) {
            continue;
        }
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    query.push(format!("{}={}", encode_component(key), encode_component(&scalar_string(item))));
                }
            }
            other => query.push(format!("{}={}", encode_component(key), encode_component(&scalar_string(other)))),
        }
    }

    if !query.is_empty() {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query.join("&"));
    }

    Ok(url)
}

/// `base_url` 뒤에 상대 URL을 그대로 이어 붙입니다.
pub fn to_absolute_url(base_url: &str, template: &str, fields: &Map<String, Value>) -> Result<String, ClientError> {
    Ok(format!("{}{}", base_url, relative_url(template, fields)?))
}

/// 요청 본문을 만듭니다.
///
/// GET은 본문이 없고, POST는 `body` 필드를, 나머지 메서드는 경로 파라미터와
/// `body`를 뺀 필드 객체를 보냅니다. 본문이 객체면 `"Scope": "JiGou"`를 추가합니다.
pub fn to_data(method: &Method, template: &str, fields: &Map<String, Value>) -> Option<Value> {
    if method == Method::GET {
        return None;
    }

    let mut data = if method == Method::POST {
        fields.get(BODY_FIELD).cloned().filter(|body| !body.is_null())?
    } else {
        let params = path_params(template);
        Value::Object(
            fields
                .iter()
                .filter(|(key, _)| key.as_str() != BODY_FIELD && !params.contains(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    };

    if let Value::Object(map) = &mut data {
        map.insert(SCOPE_FIELD.to_string(), Value::String(GovScope::JiGou.as_str().to_string()));
    }

    Some(data)
}
