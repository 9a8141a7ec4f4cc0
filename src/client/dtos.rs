//! 보육기관 API DTO
//!
//! 서버 필드 이름은 PascalCase, snake_case, camelCase가 섞여 있어
//! 필드마다 `rename`으로 맞춥니다. 전체 카탈로그가 아니라 공통 응답 타입과
//! 주간 식단 관련 타입, 로그인/업로드 요청만 담았습니다.

use std::collections::{BTreeMap, HashMap};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::client::json_service_client::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovScope {
    User,
    JiGou,
}

impl GovScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            GovScope::User => "User",
            GovScope::JiGou => "JiGou",
        }
    }
}

/// 밀리초 타임스탬프 또는 날짜 문자열
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Millis(i64),
    Text(String),
}

/// 목록 조회 공통 입력
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInputBase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
}

/// 모든 응답의 공통 필드
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseResponse {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(rename = "Total", default)]
    pub total: Option<i64>,
    #[serde(rename = "Data", default = "Vec::new")]
    pub data: Vec<T>,
}

/// 정부 API 목록 응답. 기관/인원/반/원아 정보가 Id 기준 맵으로 함께 옵니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovListResponse<T> {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(rename = "Total", default)]
    pub total: Option<i64>,
    #[serde(rename = "Data", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(rename = "GovJiGous", default)]
    pub gov_jigous: HashMap<String, Value>,
    #[serde(rename = "RenYuans", default)]
    pub ren_yuans: HashMap<String, Value>,
    #[serde(rename = "JiGouBanJis", default)]
    pub jigou_ban_jis: HashMap<String, Value>,
    #[serde(rename = "JiGouKids", default)]
    pub jigou_kids: HashMap<String, Value>,
    #[serde(rename = "SuiFang_JiLu", default)]
    pub sui_fang_ji_lu: Option<String>,
    /// 특별 안내
    #[serde(rename = "TeBie_TiXing", default)]
    pub te_bie_ti_xing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(rename = "Data", default = "Option::default")]
    pub data: Option<T>,
}

/// 엔티티 공통 필드 (삭제 표시 포함)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBase {
    #[serde(rename = "F_Id", default, skip_serializing_if = "Option::is_none")]
    pub f_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_creator_time: Option<DateValue>,
    #[serde(rename = "TenantId", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_delete_mark: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_delete_time: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_delete_user_id: Option<String>,
}

/// 업로드된 파일 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileControlsModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// 영양소 이름별 함량
pub type Nutrition = BTreeMap<String, f64>;

/// 기관 주간 식단
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovJiGouDishMenuWeekly {
    #[serde(flatten)]
    pub entity: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_jigou_id: Option<String>,
    /// 해당 주의 월요일
    #[serde(rename = "DateOn", default, skip_serializing_if = "Option::is_none")]
    pub date_on: Option<DateValue>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Nutritions", default, skip_serializing_if = "Option::is_none")]
    pub nutritions: Option<Nutrition>,
    #[serde(rename = "DishMenus", default, skip_serializing_if = "Vec::is_empty")]
    pub dish_menus: Vec<DishMenu>,
}

/// 하루 식단
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DishMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_on: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritions: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<DishMenuContent>,
}

/// 끼니 (아침, 점심, 저녁 등)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DishMenuContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dishs: Vec<DishMenuDish>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment: Vec<FileControlsModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DishMenuDish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 식재료별 사용량
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ingredient_amount: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<GovScope>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovLoginResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(rename = "Token", default)]
    pub token: Option<String>,
    #[serde(rename = "UserId", default)]
    pub user_id: Option<String>,
}

// ---- 요청 DTO ----

/// 기관의 주간 식단 목록
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGovJiGouDishMenuWeeklys {
    #[serde(rename = "jigou_id", skip_serializing_if = "Option::is_none")]
    pub jigou_id: Option<String>,
    /// 조회 기간 `[시작, 끝]`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub riqi: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ApiRequest for GetGovJiGouDishMenuWeeklys {
    type Response = GovListResponse<GovJiGouDishMenuWeekly>;

    fn url_template(&self) -> &'static str {
        "api/subdev/GovJiGouService/gov_jigou_dishmenu_weeklys/{jigou_id}"
    }

    fn method(&self) -> Method {
        Method::GET
    }
}

/// 기관 주간 식단 저장
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveGovJiGouDishMenuWeekly {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<GovJiGouDishMenuWeekly>,
}

impl ApiRequest for SaveGovJiGouDishMenuWeekly {
    type Response = IdResponse;

    fn url_template(&self) -> &'static str {
        "api/subdev/GovJiGouService/gov_jigou_dishmenu_weekly"
    }
}

/// 로그인 인증 코드 발송
#[derive(Debug, Clone, Default, Serialize)]
pub struct GovLoginSendCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<LoginReq>,
}

impl ApiRequest for GovLoginSendCode {
    type Response = BaseResponse;

    fn url_template(&self) -> &'static str {
        "api/subdev/GovService/login/sendcode"
    }
}

/// 휴대폰 번호 + 인증 코드 로그인
#[derive(Debug, Clone, Default, Serialize)]
pub struct GovLogin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<LoginReq>,
}

impl ApiRequest for GovLogin {
    type Response = GovLoginResponse;

    fn url_template(&self) -> &'static str {
        "api/subdev/GovService/login"
    }
}

/// 파일 업로드. [`JsonServiceClient::upload`](crate::client::JsonServiceClient::upload)로 보냅니다.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUploader {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl ApiRequest for FileUploader {
    type Response = FileControlsModel;

    fn url_template(&self) -> &'static str {
        "api/File/Uploader/{type}"
    }
}
