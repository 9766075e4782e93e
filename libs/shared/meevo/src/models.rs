use serde::Deserialize;

/// Response from the OAuth2 client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// A client as it appears in the paginated `/clients` list view.
///
/// The list view does not expose the guardian reference; that requires a
/// follow-up fetch of [`ClientDetail`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub client_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub primary_phone_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

impl ClientRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Full client record from the single-client detail endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    pub client_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub guardian_id: Option<String>,
}

/// One booked service line item for a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedService {
    #[serde(default)]
    pub appointment_id: Option<String>,
    pub appointment_service_id: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub concurrency_check_digits: String,
}

/// Meevo wraps most payloads in `{"data": ...}` but some deployments return
/// the payload bare; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}
