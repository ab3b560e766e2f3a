//! reqwest-backed registry transport.
//!
//! 基于 reqwest 的注册表传输层：不重试；非 2xx 响应以响应体文本（或端点默认
//! 消息）作为错误信息。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, debug_span, warn, Instrument};

use pr_core::config::AppConfig;
use pr_core::ports::{ApiRequest, HttpMethod, RegistryTransportPort, TransportError};

pub struct HttpRegistryTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistryTransport {
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(format!("falha ao criar cliente HTTP: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        Self::new(&config.api_url, config.request_timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RegistryTransportPort for HttpRegistryTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let span = debug_span!("infra.http.send", method = %request.method, path = %request.path);
        async {
            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            let text = response.text().await.map_err(map_reqwest_error)?;

            if !status.is_success() {
                warn!(status = status.as_u16(), "registry returned an error status");
                return Err(TransportError::from_status(
                    status.as_u16(),
                    text,
                    request.fallback_error,
                ));
            }

            debug!(status = status.as_u16(), bytes = text.len(), "registry responded");
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
        }
        .instrument(span)
        .await
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn transport(url: String) -> HttpRegistryTransport {
        HttpRegistryTransport::new(&url, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn post_attaches_bearer_and_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/properties")
            .match_header("authorization", "Bearer jwt-1")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "matricula": "M-1" })))
            .with_status(201)
            .with_body(r#"{"tx_hash":"0xabc","matricula":"M-1"}"#)
            .create_async()
            .await;

        let response = transport(server.url())
            .send(
                ApiRequest::post("/properties")
                    .with_json(json!({ "matricula": "M-1" }))
                    .with_bearer("jwt-1"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response["tx_hash"], "0xabc");
    }

    #[tokio::test]
    async fn unauthenticated_request_has_no_authorization_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/siwe/start")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"nonce":"n-1"}"#)
            .create_async()
            .await;

        let response = transport(format!("{}/", server.url()))
            .send(ApiRequest::post("/auth/siwe/start"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response, json!({ "nonce": "n-1" }));
    }

    #[tokio::test]
    async fn error_status_uses_body_text() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/properties")
            .with_status(400)
            .with_body("matricula exists")
            .create_async()
            .await;

        let err = transport(server.url())
            .send(ApiRequest::post("/properties").with_fallback_error("Erro ao registrar propriedade"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 400,
                message: "matricula exists".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_error_body_uses_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/audit/transfers")
            .with_status(500)
            .create_async()
            .await;

        let err = transport(server.url())
            .send(ApiRequest::get("/audit/transfers").with_fallback_error("Erro ao listar transferências"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Erro ao listar transferências");
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/transfers/1/initiate")
            .with_status(204)
            .create_async()
            .await;

        let response = transport(server.url())
            .send(ApiRequest::post("/transfers/1/initiate"))
            .await
            .unwrap();

        assert_eq!(response, Value::Null);
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let err = transport(server.url())
            .send(ApiRequest::get("/health"))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let transport =
            HttpRegistryTransport::new(&format!("http://{addr}"), Some(Duration::from_millis(100)))
                .unwrap();
        let err = transport
            .send(ApiRequest::get("/health"))
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::Timeout);
        server.abort();
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let err = transport("http://127.0.0.1:1".into())
            .send(ApiRequest::get("/health"))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Network(_)), "{err:?}");
    }
}
