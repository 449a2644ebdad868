//! 可观测性模块集成测试
//!
//! 测试 metrics、middleware 与配置的核心功能。

// ============================================================================
// 指标记录测试
// ============================================================================

mod metrics_tests {
    use paymore_shared::observability::metrics::{
        record_http_request, record_report_transition, set_dataset_records,
    };

    #[test]
    fn test_record_http_request() {
        // 未安装 recorder 时记录指标不会失败
        record_http_request("GET", "/terminals", 200, 0.05);
        record_http_request("POST", "/terminals", 201, 0.12);
        record_http_request("POST", "/terminals/{id}/restart", 409, 0.01);
        record_http_request("GET", "/reports/{id}", 404, 0.01);
    }

    #[test]
    fn test_dataset_and_report_metrics() {
        set_dataset_records("terminals", 1000);
        set_dataset_records("transactions", 0);
        record_report_transition("PROCESSING", "COMPLETED");
    }
}

// ============================================================================
// 中间件测试
// ============================================================================

mod middleware_tests {
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use paymore_shared::observability::middleware::{
        REQUEST_ID_HEADER, RequestId, http_tracing, request_id,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(id): Extension<RequestId>| async move { id.as_str().to_string() }),
            )
            .layer(middleware::from_fn(http_tracing))
            .layer(middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn test_request_id_visible_to_handlers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(REQUEST_ID_HEADER, "req-abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-abc");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"req-abc");
    }

    #[tokio::test]
    async fn test_unmatched_route_still_tagged() {
        let response = app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

// ============================================================================
// 配置测试
// ============================================================================

mod config_tests {
    use paymore_shared::observability::ObservabilityConfig;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(config.metrics_port.is_none());
    }

    #[test]
    fn test_with_service_name() {
        let config = ObservabilityConfig::default().with_service_name("paymore-mock");
        assert_eq!(config.service_name, "paymore-mock");
    }
}
