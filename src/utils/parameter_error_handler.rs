//! 请求参数解析错误处理
//!
//! JSON / Query 解析失败时返回统一的响应结构，而不是 actix 默认的纯文本。

use actix_web::{HttpRequest, HttpResponse, error};

use crate::models::ApiResponse;

/// JSON 请求体解析错误处理器
pub fn json_error_handler(
    err: error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid JSON payload: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(message));
    error::InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(
    err: error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(message));
    error::InternalError::from_response(err, response).into()
}
