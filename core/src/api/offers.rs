//! `/offers`: job offers, compensation breakdowns, negotiation prep, exports.

use serde::Serialize;
use serde_json::Value;

use crate::client::{check_status, parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/offers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ExportFormat::Json => "application/json",
        }
    }
}

/// A downloaded export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct CompareOffers<'a> {
    offer_ids: &'a [String],
}

pub struct OffersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OffersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_get(&self, offer_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", segment(offer_id)))
    }

    pub fn build_create(&self, offer: &Value) -> Result<HttpRequest, ApiError> {
        self.client.json_request(HttpMethod::Post, PREFIX, offer)
    }

    pub fn build_update(&self, offer_id: &str, offer: &Value) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Put, &format!("{PREFIX}/{}", segment(offer_id)), offer)
    }

    pub fn build_delete(&self, offer_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &format!("{PREFIX}/{}", segment(offer_id)))
    }

    pub fn build_compare(&self, offer_ids: &[String]) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Post, &format!("{PREFIX}/compare"), &CompareOffers { offer_ids })
    }

    pub fn build_compensation(&self, offer_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}/compensation", segment(offer_id)))
    }

    /// `options` carries negotiation preferences such as target salary.
    pub fn build_negotiation_prep(&self, offer_id: &str, options: &Value) -> Result<HttpRequest, ApiError> {
        self.client.json_request(
            HttpMethod::Post,
            &format!("{PREFIX}/{}/negotiation-prep", segment(offer_id)),
            options,
        )
    }

    pub fn build_export(&self, offer_id: &str, format: ExportFormat) -> HttpRequest {
        let mut req = self.client.request(
            HttpMethod::Get,
            &format!("{PREFIX}/{}/export/{}", segment(offer_id), format.as_str()),
        );
        req.headers
            .push(("accept".to_string(), format.content_type().to_string()));
        req
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }

    pub fn parse_compare(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_compensation(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_negotiation_prep(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_export(
        &self,
        offer_id: &str,
        format: ExportFormat,
        response: HttpResponse,
    ) -> Result<ExportedFile, ApiError> {
        check_status(&response)?;
        let filename = response
            .header("content-disposition")
            .and_then(disposition_filename)
            .unwrap_or_else(|| format!("offer-{offer_id}.{}", format.as_str()));
        let content_type = response
            .header("content-type")
            .unwrap_or(format.content_type())
            .to_string();
        Ok(ExportedFile {
            filename,
            content_type,
            bytes: response.body,
        })
    }
}

/// `attachment; filename="offer.pdf"` -> `offer.pdf`.
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/api")
    }

    #[test]
    fn crud_paths() {
        let c = client();
        let offers = c.offers();
        assert_eq!(offers.build_list().url, "http://localhost:8000/api/offers");
        assert_eq!(offers.build_get("o-1").url, "http://localhost:8000/api/offers/o-1");
        let del = offers.build_delete("o-1");
        assert_eq!(del.method, HttpMethod::Delete);
        assert!(del.body.is_none());

        let upd = offers.build_update("o-1", &json!({"base_salary": 150000})).unwrap();
        assert_eq!(upd.method, HttpMethod::Put);
        assert_eq!(upd.url, "http://localhost:8000/api/offers/o-1");
    }

    #[test]
    fn compare_sends_offer_ids() {
        let c = client();
        let req = c.offers().build_compare(&["a".into(), "b".into()]).unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/offers/compare");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"offer_ids": ["a", "b"]}));
    }

    #[test]
    fn negotiation_prep_path() {
        let c = client();
        let req = c
            .offers()
            .build_negotiation_prep("o-1", &json!({"target_salary": 180000}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8000/api/offers/o-1/negotiation-prep");
    }

    #[test]
    fn export_requests_binary() {
        let c = client();
        let req = c.offers().build_export("o-1", ExportFormat::Pdf);
        assert_eq!(req.url, "http://localhost:8000/api/offers/o-1/export/pdf");
        assert_eq!(req.header("accept"), Some("application/pdf"));
    }

    #[test]
    fn export_uses_disposition_filename() {
        let c = client();
        let response = HttpResponse {
            status: 200,
            headers: vec![
                ("Content-Disposition".into(), r#"attachment; filename="acme-offer.docx""#.into()),
                ("Content-Type".into(), ExportFormat::Docx.content_type().into()),
            ],
            body: vec![0x50, 0x4b, 0x03, 0x04],
        };
        let file = c.offers().parse_export("o-1", ExportFormat::Docx, response).unwrap();
        assert_eq!(file.filename, "acme-offer.docx");
        assert_eq!(file.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[test]
    fn export_falls_back_to_generated_filename() {
        let c = client();
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"%PDF-1.7".to_vec(),
        };
        let file = c.offers().parse_export("o-9", ExportFormat::Pdf, response).unwrap();
        assert_eq!(file.filename, "offer-o-9.pdf");
        assert_eq!(file.content_type, "application/pdf");
    }

    #[test]
    fn parse_delete_not_found() {
        let c = client();
        let err = c.offers().parse_delete(HttpResponse::new(404, r#"{"detail":"Offer not found"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref detail } if detail == "Offer not found"));
    }

    #[test]
    fn parse_list_success() {
        let c = client();
        let offers = c
            .offers()
            .parse_list(HttpResponse::new(200, r#"[{"id":"o-1","company":"Acme"}]"#))
            .unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0]["company"], "Acme");
    }
}
