//! `/salaryBLS`: salary benchmarks from Bureau of Labor Statistics data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{parse_json, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

const PREFIX: &str = "/salaryBLS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryQuery {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Percentile figures; any of them may be missing for thin data.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SalaryBenchmark {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub percentile_10: Option<f64>,
    #[serde(default)]
    pub percentile_25: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub percentile_75: Option<f64>,
    #[serde(default)]
    pub percentile_90: Option<f64>,
    #[serde(default)]
    pub source: Option<Value>,
}

pub struct SalaryApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SalaryApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_lookup(&self, query: &SalaryQuery) -> Result<HttpRequest, ApiError> {
        self.client.query_request(PREFIX, query)
    }

    pub fn parse_lookup(&self, response: HttpResponse) -> Result<SalaryBenchmark, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn lookup_encodes_query() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c
            .salary()
            .build_lookup(&SalaryQuery {
                title: "Data Scientist".into(),
                location: Some("Austin, TX".into()),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:8000/api/salaryBLS?title=Data+Scientist&location=Austin%2C+TX"
        );
    }

    #[test]
    fn lookup_without_location() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c
            .salary()
            .build_lookup(&SalaryQuery {
                title: "Nurse".into(),
                location: None,
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/salaryBLS?title=Nurse");
    }

    #[test]
    fn parse_partial_benchmark() {
        let c = ApiClient::new("http://localhost:8000/api");
        let bench = c
            .salary()
            .parse_lookup(HttpResponse::new(200, r#"{"title":"Nurse","median":81220}"#))
            .unwrap();
        assert_eq!(bench.median, Some(81220.0));
        assert_eq!(bench.percentile_90, None);
    }
}
