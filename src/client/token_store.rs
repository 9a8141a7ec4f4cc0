//! `Authorization` 헤더용 토큰 저장소

use std::sync::RwLock;

/// 클라이언트가 요청마다 읽는 토큰 저장소
///
/// 세션 만료 응답을 받으면 클라이언트가 [`TokenStore::clear`]를 호출합니다.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("abc".to_string());
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.clear();
        assert_eq!(store.get(), None);
    }
}
