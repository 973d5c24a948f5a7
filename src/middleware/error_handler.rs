use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::ContentType, StatusCode},
    Error as ActixError, HttpResponse,
};
use serde::{Deserialize, Serialize};
use std::{future::Future, pin::Pin};

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub code: u32,
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Localized reason phrase for the statuses this service emits.
pub fn status_text(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => t!("errors.http.bad_request").to_string(),
        StatusCode::NOT_FOUND => t!("errors.http.not_found").to_string(),
        StatusCode::SERVICE_UNAVAILABLE => t!("errors.http.service_unavailable").to_string(),
        s if s.is_server_error() => t!("errors.http.internal_server_error").to_string(),
        s => s.canonical_reason().unwrap_or("Error").to_string(),
    }
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16() as u32,
            status: status_text(status),
            message: message.into(),
            data: None,
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.code as u16).unwrap_or_else(|_| {
            log::error!("{}", t!("logs.invalid_status_code", code = self.code));
            StatusCode::INTERNAL_SERVER_ERROR
        });
        HttpResponse::build(status).content_type(ContentType::json()).json(self)
    }
}

/// Rewrites extractor failures, handler errors and unmatched routes into a
/// JSON [`ErrorResponse`]. Errors raised by inner middleware pass through.
pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Transform = ErrorHandlerService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;

    fn new_transform(&self, service: S) -> Self::Future {
        Box::pin(async move { Ok(ErrorHandlerService { service }) })
    }
}

pub struct ErrorHandlerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 路由匹配需要独占 HttpRequest，调用内部服务前只能保留字符串
        let method = req.method().to_string();
        let uri = req.uri().to_string();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => {
                    log::error!("{}", t!("logs.error_occurred", context = err.to_string()));
                    return Err(err);
                }
            };

            let status = res.status();
            let error = res.response().error().map(|err| err.to_string());
            let message = match error {
                Some(message) => message,
                None if status == StatusCode::NOT_FOUND => {
                    format!("No route for {} {}", method, path)
                }
                None => return Ok(res.map_into_boxed_body()),
            };
            log::warn!("Request failed: {} {} -> {}: {}", method, uri, status, message);

            let (http_req, _) = res.into_parts();
            let response = ErrorResponse::new(status, message).into_response();
            Ok(ServiceResponse::new(http_req, response))
        })
    }
}

pub fn error_handler() -> ErrorHandlerMiddleware {
    ErrorHandlerMiddleware
}
