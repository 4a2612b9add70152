//! `reqwest` implementation of the collaborator traits against the REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::tour::{RemoteAck, StoredTour, TourPayload};
use crate::domain::types::TourId;
use crate::forms::auth::SignInForm;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AuthGateway, TourReader, TourWriter};
use crate::session::SessionContext;

/// Response wrapper used by every endpoint of the API.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: String,
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(alias = "responseData")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn is_success(&self) -> bool {
        self.status == "success"
    }

    fn ack(&self) -> RemoteAck {
        RemoteAck {
            status: self.status.clone(),
            code: self.code,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: Option<String>,
}

/// Decodes each listed tour on its own so one malformed entry does not hide the rest.
fn decode_tours(entries: Vec<serde_json::Value>) -> Vec<StoredTour> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            serde_json::from_value::<StoredTour>(entry)
                .map_err(|err| log::warn!("Skipping listed tour at position {position}: {err}"))
                .ok()
        })
        .collect()
}

/// Extracts the API's error message from a failed response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[derive(Clone)]
pub struct RemoteApi {
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for RemoteApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RemoteApi {
    /// Builds a client for `{api_url}/{api_version}`.
    pub fn new(api_url: &str, api_version: &str, timeout: Duration) -> RepositoryResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: format!(
                "{}/{}",
                api_url.trim_end_matches('/'),
                api_version.trim_matches('/')
            ),
            http,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, session: &SessionContext) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(path));
        match session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> RepositoryResult<Envelope<T>> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::from_status(
                status.as_u16(),
                error_message(&body),
            ));
        }
        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| RepositoryError::DecodeError(e.to_string()))
    }
}

#[async_trait]
impl TourReader for RemoteApi {
    async fn list_tours(&self, session: &SessionContext) -> RepositoryResult<Vec<StoredTour>> {
        let envelope: Envelope<Vec<serde_json::Value>> = self
            .send(self.request(Method::GET, "tour/all", session))
            .await?;
        if !envelope.is_success() {
            let message = if envelope.message.is_empty() {
                "Failed to fetch tours".to_string()
            } else {
                envelope.message
            };
            return Err(RepositoryError::Rejected {
                code: envelope.code,
                message,
            });
        }
        Ok(decode_tours(envelope.data.unwrap_or_default()))
    }

    async fn get_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
    ) -> RepositoryResult<Option<StoredTour>> {
        let path = format!("tour/get/{tour_id}");
        match self
            .send::<StoredTour>(self.request(Method::GET, &path, session))
            .await
        {
            Ok(envelope) => Ok(envelope.data),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl TourWriter for RemoteApi {
    async fn create_tour(
        &self,
        session: &SessionContext,
        payload: &TourPayload,
    ) -> RepositoryResult<RemoteAck> {
        let envelope: Envelope<serde_json::Value> = self
            .send(self.request(Method::POST, "tour/create", session).json(payload))
            .await?;
        Ok(envelope.ack())
    }

    async fn update_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
        payload: &TourPayload,
    ) -> RepositoryResult<RemoteAck> {
        let path = format!("tour/update/{tour_id}");
        let envelope: Envelope<serde_json::Value> = self
            .send(self.request(Method::PUT, &path, session).json(payload))
            .await?;
        Ok(envelope.ack())
    }

    async fn delete_tour(
        &self,
        session: &SessionContext,
        tour_id: &TourId,
    ) -> RepositoryResult<RemoteAck> {
        let path = format!("tour/delete/{tour_id}");
        let envelope: Envelope<serde_json::Value> = self
            .send(self.request(Method::DELETE, &path, session))
            .await?;
        Ok(envelope.ack())
    }
}

#[async_trait]
impl AuthGateway for RemoteApi {
    async fn sign_in(&self, credentials: &SignInForm) -> RepositoryResult<String> {
        let builder = self
            .request(Method::POST, "auth/signin", &SessionContext::anonymous())
            .json(credentials);
        let envelope: Envelope<TokenData> = self.send(builder).await?;
        envelope
            .data
            .and_then(|data| data.token)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                RepositoryError::DecodeError("Access token not found in response".to_string())
            })
    }
}
