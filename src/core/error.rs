//! 核心错误处理模块

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::ValidationErrors;

/// 字段名 -> 该字段的校验失败原因
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 核心错误类型
///
/// 服务只会产生客户端错误：请求体校验失败，或者请求本身无法解析。
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("请求参数校验失败")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldErrors,
}

impl CoreError {
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let (status, error, fields) = match self {
            CoreError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", fields.clone())
            }
            CoreError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", FieldErrors::new()),
        };

        let response = ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            fields,
        };
        (status, response)
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        tracing::debug!(
            code = error_response.code,
            error = %error_response.error,
            "请求被拒绝: {}",
            error_response.message
        );
        (status, Json(error_response)).into_response()
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(err: ValidationErrors) -> Self {
        let fields = err
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| {
                        error
                            .message
                            .as_ref()
                            .map(|msg| msg.to_string())
                            .unwrap_or_else(|| error.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        CoreError::Validation(fields)
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(format!("请求体格式错误: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        CoreError::BadRequest(format!("路径参数错误: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        CoreError::BadRequest(format!("查询参数错误: {}", rejection.body_text()))
    }
}
