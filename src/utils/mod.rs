//! 공통 유틸리티
//!
//! - [`string_utils`] - 입력 문자열 정리/검증
//! - [`random`] - 인증 토큰과 숫자 코드 생성
//! - [`display_terminal`] - 시작 로그용 터미널 출력

pub mod string_utils;
pub mod random;
pub mod display_terminal;
