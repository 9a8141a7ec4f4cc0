use thiserror::Error;

/// REST 클라이언트 에러
#[derive(Error, Debug)]
pub enum ClientError {
    /// 연결, TLS, 타임아웃 등 전송 계층 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    #[error("경로 파라미터가 없습니다: {0}")]
    MissingPathParam(String),

    #[error("요청 DTO는 JSON 객체로 직렬화되어야 합니다")]
    InvalidRequest,

    #[error("JSON 변환 실패: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 서버가 세션 만료(업무 코드 600)를 알림. 저장된 토큰은 이미 지워진 상태입니다.
    #[error("로그인이 만료되었습니다: {0}")]
    SessionExpired(String),

    #[error("API 오류 ({status}): {body}")]
    Api { status: u16, body: String },
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired(_))
    }
}
