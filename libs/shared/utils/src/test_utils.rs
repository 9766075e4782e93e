//! Helpers shared by cell tests: a canned configuration pointed at a mock
//! Meevo server and builders for the JSON shapes the real API returns.

use serde_json::{json, Value};
use shared_config::{AppConfig, SearchTuning};

pub struct TestConfig;

impl TestConfig {
    /// Configuration wired to a wiremock server standing in for Meevo.
    pub fn app_config(mock_uri: &str) -> AppConfig {
        AppConfig {
            meevo_auth_url: format!("{}/oauth2/token", mock_uri),
            meevo_api_url: mock_uri.trim_end_matches('/').to_string(),
            meevo_client_id: "test-client-id".to_string(),
            meevo_client_secret: "test-client-secret".to_string(),
            meevo_tenant_id: "200507".to_string(),
            meevo_location_id: "201664".to_string(),
            environment_name: "TEST".to_string(),
            location_name: "Test Location".to_string(),
            port: 0,
            search: SearchTuning::default(),
        }
    }
}

/// Builders mirroring the Meevo wire format (camelCase, `data` envelope).
pub struct MockMeevoResponses;

impl MockMeevoResponses {
    pub fn token(access_token: &str, expires_in: i64) -> Value {
        json!({
            "access_token": access_token,
            "expires_in": expires_in,
        })
    }

    pub fn page(records: Vec<Value>) -> Value {
        json!({ "data": records })
    }

    pub fn empty_page() -> Value {
        json!({ "data": [] })
    }

    pub fn client(
        client_id: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Value {
        json!({
            "clientId": client_id,
            "firstName": first_name,
            "lastName": last_name,
            "primaryPhoneNumber": phone,
            "emailAddress": email,
        })
    }

    pub fn client_detail(
        client_id: &str,
        first_name: &str,
        last_name: &str,
        guardian_id: Option<&str>,
    ) -> Value {
        json!({
            "data": {
                "clientId": client_id,
                "firstName": first_name,
                "lastName": last_name,
                "guardianId": guardian_id,
            }
        })
    }

    pub fn booked_service(
        appointment_service_id: &str,
        start_time: &str,
        is_cancelled: bool,
        concurrency_check_digits: &str,
    ) -> Value {
        json!({
            "appointmentId": format!("appt-{}", appointment_service_id),
            "appointmentServiceId": appointment_service_id,
            "startTime": start_time,
            "serviceId": "haircut",
            "employeeId": "stylist-1",
            "isCancelled": is_cancelled,
            "concurrencyCheckDigits": concurrency_check_digits,
        })
    }
}
