//! 보안 난수 기반 토큰/코드 생성

use rand::Rng;
use crate::config::VerificationConfig;

/// 32바이트 난수를 소문자 hex 64자로 만듭니다.
pub fn hex_token() -> String {
    let mut bytes = [0u8; VerificationConfig::TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `length`자리 10진 코드. 앞자리 0을 허용합니다.
pub fn numeric_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_token_shape() {
        let token = hex_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(token, hex_token());
    }

    #[test]
    fn test_numeric_code_shape() {
        for _ in 0..50 {
            let code = numeric_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
