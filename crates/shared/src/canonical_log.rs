//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシを
//! 1行に集約したサマリログを出力する tower Layer。
//!
//! ルーターは内部エラーを 500 に平坦化してクライアントへ詳細を返さないため、
//! 5xx のサマリは ERROR レベルで出力し、原因ログと突き合わせられるようにする。
//!
//! ## レイヤー配置
//!
//! ```text
//! TraceLayer → CanonicalLogLineLayer → handler
//! ```
//!
//! TraceLayer のスパン内に置くことで、`request_id` がサマリに付与される。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// ヘルスチェックパスかどうか
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// Canonical Log Line を出力する Layer
///
/// ヘルスチェックパスは出力対象外。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使うため clone と入れ替える
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();
        if is_health_check_path(&path) {
            return Box::pin(async move { inner.call(req).await });
        }

        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) if response.status().is_server_error() => {
                    tracing::error!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "リクエスト完了（サーバーエラー）"
                    );
                }
                Ok(response) => {
                    tracing::info!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "リクエスト処理エラー"
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[derive(Clone)]
    struct FixedStatusService {
        status: http::StatusCode,
    }

    impl Service<Request<()>> for FixedStatusService {
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
        type Response = Response<()>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            let status = self.status;
            Box::pin(async move { Ok(Response::builder().status(status).body(()).unwrap()) })
        }
    }

    /// ログイベントのレベルとフィールドを記録する Layer
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<(tracing::Level, Vec<(String, String)>)>>>,
    }

    struct FieldVisitor(Vec<(String, String)>);

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }

        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            self.0.push((field.name().to_string(), value.to_string()));
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            self.0.push((field.name().to_string(), value.to_string()));
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor(Vec::new());
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    async fn call(path: &str, status: http::StatusCode) -> CaptureLayer {
        let capture = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut sut = CanonicalLogLineLayer.layer(FixedStatusService { status });
        let request = Request::builder()
            .method(http::Method::POST)
            .uri(path)
            .body(())
            .unwrap();
        let response = sut.call(request).await.unwrap();
        assert_eq!(response.status(), status, "ステータスは透過的に返される");

        capture
    }

    #[tokio::test]
    async fn test_正常応答はinfoでメソッドとパスを含む() {
        let capture = call("/login", http::StatusCode::OK).await;

        let events = capture.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (level, fields) = &events[0];
        assert_eq!(*level, tracing::Level::INFO);
        assert_eq!(field(fields, "log.type"), Some("canonical"));
        assert_eq!(field(fields, "http.method"), Some("POST"));
        assert_eq!(field(fields, "http.path"), Some("/login"));
        assert_eq!(field(fields, "http.status_code"), Some("200"));
        assert!(field(fields, "http.latency_ms").is_some());
    }

    #[tokio::test]
    async fn test_認証失敗の401はinfoで出力される() {
        let capture = call("/login", http::StatusCode::UNAUTHORIZED).await;

        let events = capture.events.lock().unwrap();
        assert_eq!(events[0].0, tracing::Level::INFO);
        assert_eq!(field(&events[0].1, "http.status_code"), Some("401"));
    }

    #[tokio::test]
    async fn test_500はerrorレベルで出力される() {
        let capture = call("/login", http::StatusCode::INTERNAL_SERVER_ERROR).await;

        let events = capture.events.lock().unwrap();
        assert_eq!(events[0].0, tracing::Level::ERROR);
        assert_eq!(field(&events[0].1, "http.status_code"), Some("500"));
    }

    #[tokio::test]
    async fn test_healthパスでは出力されない() {
        let capture = call("/health/ready", http::StatusCode::OK).await;

        assert!(capture.events.lock().unwrap().is_empty());
    }
}
