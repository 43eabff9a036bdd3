//! 核心中间件模块

use axum::{
    extract::Request,
    http::{header::USER_AGENT, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn, Instrument};

/// 请求日志中间件
///
/// 每个请求一条结构化日志：5xx 记 error，4xx 记 warn，
/// 成功的健康检查记 debug，其余记 info。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let span = tracing::info_span!("request", %method, path = %path);
    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    span.in_scope(|| match RequestOutcome::of(status, &path) {
        RequestOutcome::ServerError => {
            error!(status = status.as_u16(), elapsed_ms, %user_agent, "request failed")
        }
        RequestOutcome::ClientError => {
            warn!(status = status.as_u16(), elapsed_ms, %user_agent, "request rejected")
        }
        RequestOutcome::HealthCheck => {
            debug!(status = status.as_u16(), elapsed_ms, "health check")
        }
        RequestOutcome::Ok => {
            info!(status = status.as_u16(), elapsed_ms, %user_agent, "request completed")
        }
    });

    response
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestOutcome {
    Ok,
    HealthCheck,
    ClientError,
    ServerError,
}

impl RequestOutcome {
    fn of(status: StatusCode, path: &str) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else if path == "/health" {
            Self::HealthCheck
        } else {
            Self::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use axum_test::TestServer;

    fn server() -> TestServer {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .route(
                "/boom",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
            )
            .layer(middleware::from_fn(request_logging_middleware));
        TestServer::new(app).unwrap()
    }

    #[test]
    fn test_outcome_by_status_class() {
        assert_eq!(
            RequestOutcome::of(StatusCode::OK, "/recipes"),
            RequestOutcome::Ok
        );
        assert_eq!(
            RequestOutcome::of(StatusCode::OK, "/health"),
            RequestOutcome::HealthCheck
        );
        assert_eq!(
            RequestOutcome::of(StatusCode::NOT_FOUND, "/health"),
            RequestOutcome::ClientError
        );
        assert_eq!(
            RequestOutcome::of(StatusCode::BAD_GATEWAY, "/recipes"),
            RequestOutcome::ServerError
        );
    }

    #[tokio::test]
    async fn test_responses_pass_through_unchanged() {
        let server = server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("ok");

        let response = server.get("/teapot").await;
        response.assert_status(StatusCode::IM_A_TEAPOT);
        response.assert_text("short and stout");

        let response = server.get("/boom").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        response.assert_text("down");
    }
}
