//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::inventory::views;
use crate::infrastructure::store::StoreError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal error: {0}")]
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code_name(&self) -> &'static str {
        match self {
            CoreError::BadRequest(_) => "BAD_REQUEST",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            CoreError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// 面向用户的信息；存储层细节只进日志
    pub fn user_message(&self) -> String {
        match self {
            CoreError::BadRequest(msg) | CoreError::NotFound(msg) => msg.clone(),
            CoreError::ServiceUnavailable(_) => {
                "The inventory store is unreachable, please try again later".to_string()
            }
            CoreError::InternalServerError(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            CoreError::ServiceUnavailable(msg) => error!("Store unavailable: {}", msg),
            CoreError::InternalServerError(msg) => error!("Internal error: {}", msg),
            _ => {}
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();

        let error_response = ErrorResponse {
            error: self.code_name().to_string(),
            message: self.user_message(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => CoreError::ServiceUnavailable(msg),
            StoreError::Query(msg) => CoreError::InternalServerError(msg),
        }
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        CoreError::BadRequest(validation_messages(&err).join(", "))
    }
}

/// 面板页面错误，渲染为 HTML 失败页
#[derive(Debug)]
pub struct PanelError(pub CoreError);

impl From<CoreError> for PanelError {
    fn from(err: CoreError) -> Self {
        PanelError(err)
    }
}

impl From<StoreError> for PanelError {
    fn from(err: StoreError) -> Self {
        PanelError(err.into())
    }
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status();
        let page = views::error_page(status, &self.0.user_message());
        (status, Html(page)).into_response()
    }
}

/// 按字段名排序展开校验错误，保证输出顺序稳定
pub fn validation_messages(err: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = err
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
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields.into_iter().flat_map(|(_, messages)| messages).collect()
}
