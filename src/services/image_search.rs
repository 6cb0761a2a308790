//! 图片搜索服务 - 业务能力层
//!
//! 只负责"发一个查询、拿回一次响应"，包括限流重试；不关心流程

use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::infrastructure::http::SEARCH_TIMEOUT;
use crate::infrastructure::retry::{run_with_retry, AttemptOutcome, RetryPolicy};
use crate::models::SearchResponse;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// 每次查询请求的结果数量
const MAX_RESULTS: u32 = 5;

/// 图片搜索能力
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// 执行一次查询；任何失败都返回 `None`
    async fn search(&self, query: &str) -> Option<SearchResponse>;
}

/// Tavily 搜索请求体
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    topic: &'static str,
    search_depth: &'static str,
    max_results: u32,
    include_images: bool,
    include_image_descriptions: bool,
}

impl<'a> TavilyRequest<'a> {
    fn new(query: &'a str) -> Self {
        Self {
            query,
            topic: "general",
            search_depth: "basic",
            max_results: MAX_RESULTS,
            include_images: true,
            include_image_descriptions: true,
        }
    }
}

/// Tavily 搜索客户端
pub struct TavilySearch {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl TavilySearch {
    /// 创建新的搜索客户端
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.tavily_api_url.clone(),
            api_key: config.tavily_api_key.clone(),
            retry: RetryPolicy::with_max_attempts(config.search_max_retries),
            timeout: SEARCH_TIMEOUT,
        }
    }

    /// 发送一次请求并把结果归类
    async fn send_once(&self, query: &str) -> AttemptOutcome<SearchResponse> {
        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&TavilyRequest::new(query))
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(source) => {
                let err = AppError::api_request_failed(&self.api_url, source);
                warn!("{}", err);
                return AttemptOutcome::NetworkError;
            }
        };

        let status = response.status();
        let body = if status.is_success() {
            match response.text().await {
                Ok(body) => body,
                Err(source) => {
                    let err = AppError::api_request_failed(&self.api_url, source);
                    warn!("{}", err);
                    return AttemptOutcome::NetworkError;
                }
            }
        } else {
            String::new()
        };

        classify(&self.api_url, status, &body)
    }
}

/// 按状态码和响应体归类一次已收到的响应
///
/// 429 可重试；其他非 2xx 和无法解析的响应体都不重试
fn classify(endpoint: &str, status: StatusCode, body: &str) -> AttemptOutcome<SearchResponse> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let err = ApiError::RateLimited {
            endpoint: endpoint.to_string(),
        };
        warn!("{}", err);
        return AttemptOutcome::RateLimited;
    }
    if !status.is_success() {
        let err = ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        };
        warn!("{}", err);
        return AttemptOutcome::Rejected;
    }

    match serde_json::from_str::<SearchResponse>(body) {
        Ok(parsed) => AttemptOutcome::Success(parsed),
        Err(source) => {
            let err = ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            };
            warn!("{}", err);
            AttemptOutcome::Rejected
        }
    }
}

#[async_trait]
impl ImageSearch for TavilySearch {
    async fn search(&self, query: &str) -> Option<SearchResponse> {
        debug!("搜索查询: {}", query);
        let label = format!("搜索 \"{}\"", query);
        run_with_retry(&self.retry, &label, |_| self.send_once(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const ENDPOINT: &str = "https://api.tavily.example/search";

    /// 读取一个完整的 HTTP 请求（请求头 + Content-Length 指定的请求体）
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// 本地 HTTP 服务：每个请求都返回同一个响应，并记录收到的原始请求
    async fn serve(status_line: &'static str, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                seen.lock().unwrap().push(request);
                let reply = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/search", addr), requests)
    }

    fn search_at(url: &str, max_retries: u32) -> TavilySearch {
        let config = Config {
            tavily_api_key: "tvly-test".to_string(),
            tavily_api_url: url.to_string(),
            search_max_retries: max_retries,
            ..Config::default()
        };
        TavilySearch::new(reqwest::Client::new(), &config)
    }

    /// 接受连接但从不回复
    async fn serve_silent() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}/search", addr)
    }

    #[test]
    fn test_default_timeout() {
        let search = search_at(ENDPOINT, 1);
        assert_eq!(search.timeout, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let url = serve_silent().await;
        let mut search = search_at(&url, 1);
        search.timeout = Duration::from_millis(200);

        let started = std::time::Instant::now();
        assert!(search.search("Петля").await.is_none());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_classify_rate_limited() {
        assert_eq!(
            classify(ENDPOINT, StatusCode::TOO_MANY_REQUESTS, ""),
            AttemptOutcome::RateLimited
        );
    }

    #[test]
    fn test_classify_other_errors_rejected() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            assert_eq!(classify(ENDPOINT, status, ""), AttemptOutcome::Rejected);
        }
    }

    #[test]
    fn test_classify_malformed_body_rejected() {
        assert_eq!(
            classify(ENDPOINT, StatusCode::OK, "<html>oops</html>"),
            AttemptOutcome::Rejected
        );
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify(
            ENDPOINT,
            StatusCode::OK,
            r#"{"images": ["https://a.example/1.jpg"], "results": [{"url": "https://a.example/p"}]}"#,
        );
        let AttemptOutcome::Success(response) = outcome else {
            panic!("expected success, got {:?}", outcome);
        };
        assert_eq!(response.candidates().len(), 1);
        assert_eq!(response.results()[0].url(), "https://a.example/p");
    }

    #[tokio::test]
    async fn test_success_sends_bearer_and_body() {
        let (url, requests) = serve("200 OK", r#"{"images": ["https://a.example/1.jpg"], "results": []}"#).await;

        let response = search_at(&url, 3).search("GEZE TS 2000").await;

        assert_eq!(response.map(|r| r.candidates().len()), Some(1));
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = requests[0].to_lowercase();
        assert!(request.starts_with("post /search"));
        assert!(request.contains("authorization: bearer tvly-test"));
        assert!(requests[0].contains(r#""query":"GEZE TS 2000""#));
        assert!(requests[0].contains(r#""include_images":true"#));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let (url, requests) = serve("500 Internal Server Error", "{}").await;

        assert!(search_at(&url, 3).search("anything").await.is_none());
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_retried() {
        let (url, requests) = serve("200 OK", "not json").await;

        assert!(search_at(&url, 3).search("anything").await.is_none());
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_until_cap() {
        let (url, requests) = serve("429 Too Many Requests", "{}").await;

        // 上限为 2：两次请求，退避 1.5 + 3 秒
        assert!(search_at(&url, 2).search("anything").await.is_none());
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(TavilyRequest::new("\"Ручка\" фото товара")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query": "\"Ручка\" фото товара",
                "topic": "general",
                "search_depth": "basic",
                "max_results": 5,
                "include_images": true,
                "include_image_descriptions": true
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_none() {
        let config = Config {
            tavily_api_key: "tvly-test".to_string(),
            tavily_api_url: "http://127.0.0.1:9/search".to_string(),
            search_max_retries: 1,
            ..Config::default()
        };
        let search = TavilySearch::new(reqwest::Client::new(), &config);
        assert!(search.search("anything").await.is_none());
    }
}
