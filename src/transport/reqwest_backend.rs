//! Default transport backed by `reqwest`.

use async_trait::async_trait;

use crate::error::TransportError;

use super::{HttpTransport, RawResponse, ResponseBody, ResponseReader, WireRequest};

/// The default [`HttpTransport`], wrapping a `reqwest::Client`.
///
/// The stock `WrappedApi::transport` implementation constructs a fresh
/// instance per send; an API definition that wants connection reuse can
/// build one client up front and hand out clones of a shared transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with its own client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wraps an existing client, sharing its connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: WireRequest) -> Result<RawResponse, TransportError> {
        let method = request.method.to_reqwest()?;

        let mut builder = self
            .client
            .request(method, request.url.clone())
            .timeout(request.timeout);

        for header in &request.headers {
            builder = builder.header(header.key(), header.value());
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let body = match request.reader {
            ResponseReader::Text => ResponseBody::Text(response.text().await?),
            ResponseReader::Bytes => ResponseBody::Bytes(response.bytes().await?),
            ResponseReader::Discard => ResponseBody::Empty,
        };

        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;
    use url::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::method::RequestMethod;
    use crate::param::Header;

    use super::*;

    fn wire(url: Url, method: RequestMethod) -> WireRequest {
        WireRequest {
            url,
            method,
            headers: Vec::new(),
            body: Bytes::new(),
            timeout: Duration::from_secs(5),
            reader: ResponseReader::Text,
        }
    }

    #[tokio::test]
    async fn test_execute_reads_text_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hi there"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/hello", server.uri())).unwrap();
        let transport = ReqwestTransport::new();
        let response = transport
            .execute(wire(url, RequestMethod::Get))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), Some("hi there"));
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("X-Token", "secret"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/submit", server.uri())).unwrap();
        let mut request = wire(url, RequestMethod::Post);
        request.headers.push(Header::new("X-Token", "secret"));
        request.body = Bytes::from_static(b"payload");

        let transport = ReqwestTransport::new();
        let response = transport.execute(request).await.unwrap();

        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_execute_reads_bytes_when_asked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146]))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/blob", server.uri())).unwrap();
        let mut request = wire(url, RequestMethod::Get);
        request.reader = ResponseReader::Bytes;

        let transport = ReqwestTransport::new();
        let response = transport.execute(request).await.unwrap();

        assert_eq!(response.bytes(), Some([0u8, 159, 146].as_slice()));
    }

    #[tokio::test]
    async fn test_execute_discard_reader_drops_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ignored"))
            .respond_with(ResponseTemplate::new(200).set_body_string("never read"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/ignored", server.uri())).unwrap();
        let mut request = wire(url, RequestMethod::Get);
        request.reader = ResponseReader::Discard;

        let transport = ReqwestTransport::new();
        let response = transport.execute(request).await.unwrap();

        assert_eq!(response.body(), &ResponseBody::Empty);
    }

    #[tokio::test]
    async fn test_execute_maps_connection_failure() {
        // Nothing listens on this port.
        let url = Url::parse("http://127.0.0.1:9/unreachable").unwrap();
        let transport = ReqwestTransport::new();
        let error = transport
            .execute(wire(url, RequestMethod::Get))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            TransportError::Connection(_) | TransportError::Other(_)
        ));
    }
}
