//! 이메일 인증 관련 리포지토리
//!
//! 세 컬렉션 모두 "사용 처리"를 `is_used: false` 조건부 갱신으로 해서
//! 같은 토큰이 동시에 두 번 소비되지 않습니다.

pub mod verification_repo;
pub mod code_repo;
pub mod reset_repo;

pub use verification_repo::VerificationRepository;
pub use code_repo::CodeRepository;
pub use reset_repo::ResetRepository;

use mongodb::{bson::doc, options::IndexOptions, IndexModel};

/// `token` 유니크 인덱스와 `expires_at` TTL 인덱스
///
/// TTL 인덱스는 만료 하루 뒤 문서를 정리합니다. 만료 판정 자체는 애플리케이션이 합니다.
pub(crate) fn token_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "token": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_unique".to_string())
                .build())
            .build(),
        IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(IndexOptions::builder()
                .expire_after(std::time::Duration::from_secs(24 * 60 * 60))
                .name("expires_at_ttl".to_string())
                .build())
            .build(),
    ]
}
