//! Executes `HttpRequest`s for hosts that want the client to do the I/O.
//!
//! The core never requires a transport; `build_*`/`parse_*` pairs work with
//! any HTTP stack. `UreqTransport` is the blocking implementation shipped
//! behind the default `ureq` feature.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Run one round-trip. Non-2xx statuses are data, not errors; only a
    /// request that never produced a response yields `ApiError::Transport`.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use super::Transport;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new(timeout: Duration) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            Self::new(Duration::from_secs(config.timeout_secs))
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::from_config(&ClientConfig::default())
        }
    }

    fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    impl Transport for UreqTransport {
        fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            tracing::debug!(method = %req.method, url = %req.url, "executing request");
            let body = req.body.unwrap_or_default();
            let result = match req.method {
                HttpMethod::Get => with_headers(self.agent.get(&req.url), &req.headers).call(),
                HttpMethod::Delete => with_headers(self.agent.delete(&req.url), &req.headers).call(),
                HttpMethod::Post => with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes()),
                HttpMethod::Put => with_headers(self.agent.put(&req.url), &req.headers).send(body.as_bytes()),
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_vec()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse { status, headers, body })
        }
    }
}
