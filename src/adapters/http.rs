use crate::domain::model::Locale;
use crate::domain::ports::TranslationProvider;
use crate::utils::error::TranslationError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for a Google-translate-compatible `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TranslationProvider for HttpTranslator {
    async fn translate(&self, text: &str, target: Locale) -> Result<String, TranslationError> {
        tracing::debug!("Making translation request to: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", Locale::SOURCE.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    TranslationError::Network(e)
                }
            })?;

        tracing::debug!("Translation response status: {}", response.status());

        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslationError::QuotaExceeded),
            StatusCode::BAD_REQUEST => {
                return Err(TranslationError::UnsupportedLanguage(
                    target.as_str().to_string(),
                ))
            }
            status => return Err(TranslationError::HttpStatus(status.as_u16())),
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        join_segments(&body)
    }
}

/// Concatenates the translated segments of a reply shaped like
/// `[[["Olá","Hello",...], ...], ...]`.
fn join_segments(body: &serde_json::Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::MalformedResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::MalformedResponse(
            "no translated text".to_string(),
        ));
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn translator(server: &MockServer) -> HttpTranslator {
        HttpTranslator::new(server.url("/translate_a/single"), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_translate_joins_segments() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/translate_a/single")
                .query_param("sl", "en")
                .query_param("tl", "pt")
                .query_param("q", "Good morning. See you");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    [
                        ["Bom dia. ", "Good morning. ", null, null, 10],
                        ["Até logo", "See you", null, null, 10]
                    ],
                    null,
                    "en"
                ]));
        });

        let result = translator(&server)
            .translate("Good morning. See you", Locale::Pt)
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result, "Bom dia. Até logo");
    }

    #[tokio::test]
    async fn test_quota_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/translate_a/single");
            then.status(429);
        });

        let err = translator(&server)
            .translate("Hello", Locale::Pt)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_bad_request_is_unsupported_language() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/translate_a/single");
            then.status(400);
        });

        let err = translator(&server)
            .translate("Hello", Locale::Pt)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::UnsupportedLanguage(ref l) if l == "pt"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/translate_a/single");
            then.status(503);
        });

        let err = translator(&server)
            .translate("Hello", Locale::Pt)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::HttpStatus(503)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/translate_a/single");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"unexpected": true}));
        });

        let err = translator(&server)
            .translate("Hello", Locale::Pt)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::MalformedResponse(_)));
    }

    #[test]
    fn test_join_segments_rejects_empty_list() {
        let body = serde_json::json!([[], null, "en"]);
        assert!(join_segments(&body).is_err());
    }
}
