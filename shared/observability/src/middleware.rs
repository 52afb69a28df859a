//! HTTP middleware for request/response logging.
//!
//! Every request gets a request ID, taken from the incoming `x-request-id`
//! header when present and generated otherwise. The ID is stored in the
//! request extensions, echoed back on the response, and recorded on the
//! `http_request` span that wraps the handler.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use tracing::{error, info, span, warn, Instrument, Level};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_request(req: &ServiceRequest) -> Self {
        let id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self(id)
    }
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    /// Path prefixes that skip logging entirely
    pub exclude_paths: Vec<String>,
    /// Successful responses slower than this are logged at warn
    pub slow_request_threshold_ms: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "search-functions".to_string(),
            exclude_paths: vec!["/health".to_string(), "/favicon.ico".to_string()],
            slow_request_threshold_ms: 2000,
        }
    }
}

impl ObservabilityConfig {
    pub fn for_service(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware {
    config: Rc<ObservabilityConfig>,
}

impl ObservabilityMiddleware {
    pub fn new(config: ObservabilityConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ObservabilityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ObservabilityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ObservabilityMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct ObservabilityMiddlewareService<S> {
    service: Rc<S>,
    config: Rc<ObservabilityConfig>,
}

impl<S, B> Service<ServiceRequest> for ObservabilityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let path = req.path().to_string();
            if config.exclude_paths.iter().any(|p| path.starts_with(p.as_str())) {
                return service.call(req).await;
            }

            let method = req.method().to_string();
            let request_id = RequestId::from_request(&req);
            req.extensions_mut().insert(request_id.clone());

            let request_span = span!(
                Level::INFO,
                "http_request",
                service = %config.service_name,
                request_id = %request_id.0,
                method = %method,
                path = %path,
            );

            let start = Instant::now();
            let result = service.call(req).instrument(request_span).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(mut res) => {
                    let status = res.status().as_u16();
                    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
                        res.headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }

                    if status >= 500 {
                        error!(request_id = %request_id.0, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    } else if status >= 400 {
                        warn!(request_id = %request_id.0, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    } else if duration_ms > config.slow_request_threshold_ms {
                        warn!(request_id = %request_id.0, status, duration_ms, "← SLOW {} {} {} {}ms", method, path, status, duration_ms);
                    } else {
                        info!(request_id = %request_id.0, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    }

                    Ok(res)
                }
                Err(e) => {
                    error!(request_id = %request_id.0, duration_ms, error = %e, "← {} {} ERROR {}ms", method, path, duration_ms);
                    Err(e)
                }
            }
        })
    }
}

/// Middleware with default settings for a service.
pub fn observability(service_name: impl Into<String>) -> ObservabilityMiddleware {
    ObservabilityMiddleware::new(ObservabilityConfig::for_service(service_name))
}
