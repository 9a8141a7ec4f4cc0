//! 인증 API 요청 DTO

pub mod register;
pub mod login;
pub mod verification;
pub mod password;
pub mod profile;

pub use register::RegisterRequest;
pub use login::{LoginMethod, LoginRequest};
pub use verification::{EmailRequest, SendCodeRequest, VerifyEmailRequest};
pub use password::{ForgotPasswordRequest, ResetPasswordRequest};
pub use profile::UpdateProfileRequest;
