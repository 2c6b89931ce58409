//! `/career-simulation`: submit and poll long-horizon career simulations.

use crate::client::{parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::simulation::{build_simulation_request, SimulationOptions, SimulationRecord, SimulationRequest};

const PREFIX: &str = "/career-simulation";

pub struct CareerSimulationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CareerSimulationApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_create(&self, request: &SimulationRequest) -> Result<HttpRequest, ApiError> {
        self.client.json_request(HttpMethod::Post, PREFIX, request)
    }

    /// Shape raw form input and build the create request in one step.
    pub fn build_create_from_options(
        &self,
        offer_id: &str,
        options: &SimulationOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.build_create(&build_simulation_request(offer_id, options))
    }

    pub fn build_get(&self, simulation_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", segment(simulation_id)))
    }

    pub fn build_list(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_list_for_offer(&self, offer_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/offer/{}", segment(offer_id)))
    }

    pub fn build_delete(&self, simulation_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &format!("{PREFIX}/{}", segment(simulation_id)))
    }

    /// The backend answers with the stored record, normally `pending`.
    pub fn parse_create(&self, response: HttpResponse) -> Result<SimulationRecord, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<SimulationRecord, ApiError> {
        parse_json(&response)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<SimulationRecord>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_list_for_offer(&self, response: HttpResponse) -> Result<Vec<SimulationRecord>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }
}
