//! HTTP client for the performance API backend
//!
//! One method per (resource x operation) pair plus authentication.
//! Paths mirror the backend route table verbatim, irregular casings
//! included. No retry, backoff, or in-flight deduplication: transient
//! failures surface immediately to the caller.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::client::{AuthEnvelope, RegisterRequest};
use shared::models::{
    CyclePayload, Employee, EmployeePayload, Goal, GoalPayload, Review, ReviewCycle, ReviewPayload,
};
use shared::response::{ListBody, OneBody};

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request with an `id` query parameter
    async fn delete_by_id<T: DeserializeOwned>(&self, path: &str, id: i64) -> ClientResult<T> {
        let response = self
            .client
            .delete(self.url(path))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response: parsed JSON on success, the raw
    /// response text otherwise.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Employees ==========

    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        let body: ListBody<Employee> = self.get("fetchall").await?;
        Ok(body.into_items()?)
    }

    pub async fn get_employee(&self, id: i64) -> ClientResult<Employee> {
        let body: OneBody<Employee> = self.get(&format!("employees/{id}")).await?;
        Ok(body.into_inner())
    }

    pub async fn create_employee(&self, employee: &EmployeePayload) -> ClientResult<serde_json::Value> {
        self.post("register", employee).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        employee: &EmployeePayload,
    ) -> ClientResult<serde_json::Value> {
        self.put(&format!("empupdate/{id}"), employee).await
    }

    pub async fn delete_employee(&self, id: i64) -> ClientResult<serde_json::Value> {
        self.delete_by_id("delete", id).await
    }

    // ========== Goals ==========

    pub async fn list_goals(&self) -> ClientResult<Vec<Goal>> {
        let body: ListBody<Goal> = self.get("goalfetchall").await?;
        Ok(body.into_items()?)
    }

    pub async fn create_goal(&self, goal: &GoalPayload) -> ClientResult<serde_json::Value> {
        self.post("savegoals", goal).await
    }

    pub async fn update_goal(&self, id: i64, goal: &GoalPayload) -> ClientResult<serde_json::Value> {
        self.put(&format!("goalsUpdate/{id}"), goal).await
    }

    pub async fn delete_goal(&self, id: i64) -> ClientResult<serde_json::Value> {
        self.delete_by_id("idremove", id).await
    }

    // ========== Review Cycles ==========

    pub async fn list_review_cycles(&self) -> ClientResult<Vec<ReviewCycle>> {
        let body: ListBody<ReviewCycle> = self.get("cyclesfetchall").await?;
        Ok(body.into_items()?)
    }

    pub async fn create_review_cycle(&self, cycle: &CyclePayload) -> ClientResult<serde_json::Value> {
        self.post("CyclesSave", cycle).await
    }

    pub async fn update_review_cycle(
        &self,
        id: i64,
        cycle: &CyclePayload,
    ) -> ClientResult<serde_json::Value> {
        self.put(&format!("updateCycles/{id}"), cycle).await
    }

    pub async fn delete_review_cycle(&self, id: i64) -> ClientResult<serde_json::Value> {
        self.delete_by_id("CyclesDelete", id).await
    }

    // ========== Reviews ==========

    pub async fn list_reviews(&self) -> ClientResult<Vec<Review>> {
        let body: ListBody<Review> = self.get("reviewsfetchall").await?;
        Ok(body.into_items()?)
    }

    pub async fn create_review(&self, review: &ReviewPayload) -> ClientResult<serde_json::Value> {
        self.post("saveReviews", review).await
    }

    pub async fn update_review(
        &self,
        id: i64,
        review: &ReviewPayload,
    ) -> ClientResult<serde_json::Value> {
        self.put(&format!("updateReviews/{id}"), review).await
    }

    pub async fn delete_review(&self, id: i64) -> ClientResult<serde_json::Value> {
        self.delete_by_id("deleteReviews", id).await
    }

    // ========== Auth ==========

    /// Authenticate with email and password. Credentials travel in the
    /// query string because that is what the backend defines; a known
    /// weakness, noted not fixed.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthEnvelope> {
        self.get_with_query(
            "emplogin",
            &[("email", email.to_string()), ("password", password.to_string())],
        )
        .await
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthEnvelope> {
        self.post("register", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_normalizes_slashes() {
        let client = ClientConfig::new("http://localhost:8080/").build_http_client();
        assert_eq!(client.url("fetchall"), "http://localhost:8080/fetchall");
        assert_eq!(client.url("/empupdate/3"), "http://localhost:8080/empupdate/3");
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = ClientConfig::new("http://api.example.com///").build_http_client();
        assert_eq!(client.base_url(), "http://api.example.com");
    }
}
