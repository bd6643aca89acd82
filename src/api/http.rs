//! A thin REST client for the remote transactions API.

use async_trait::async_trait;
use hyper::{Body, Client, Method, Request, client::HttpConnector, header::CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    Error,
    transaction::{NewTransaction, PersistedTransaction, TransactionId},
};

use super::{ListQuery, TransactionApi, TransactionsResponse};

/// Consumes the remote transactions API over HTTP.
///
/// The client is deliberately thin: it maps the trait operations onto the
/// API's REST surface and translates transport and status failures into
/// [Error] values. Timeouts and retries are the remote side's concern.
#[derive(Debug, Clone)]
pub struct HttpTransactionApi {
    client: Client<HttpConnector>,
    base_url: String,
}

impl HttpTransactionApi {
    /// Create a client for the API at `base_url`, e.g.
    /// "http://localhost:5000/api". A trailing slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    fn item_url(&self, id: TransactionId) -> String {
        format!("{}/transactions/{id}", self.base_url)
    }

    fn list_url(&self, query: &ListQuery) -> Result<String, Error> {
        let query_string = serde_urlencoded::to_string(query)
            .map_err(|error| Error::InvalidRequest(error.to_string()))?;

        Ok(format!("{}?{query_string}", self.collection_url()))
    }

    async fn send(&self, request: Request<Body>) -> Result<Vec<u8>, Error> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|error| Error::ApiUnreachable(error.to_string()))?;

        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body())
            .await
            .map_err(|error| Error::ApiUnreachable(error.to_string()))?;

        if !status.is_success() {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Body::empty())
            .map_err(|error| Error::InvalidRequest(error.to_string()))?;

        let body = self.send(request).await?;

        serde_json::from_slice(&body).map_err(|error| Error::InvalidResponse(error.to_string()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        payload: &impl Serialize,
    ) -> Result<T, Error> {
        let body = serde_json::to_vec(payload)
            .map_err(|error| Error::InvalidRequest(error.to_string()))?;

        let request = Request::builder()
            .method(method)
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|error| Error::InvalidRequest(error.to_string()))?;

        let body = self.send(request).await?;

        serde_json::from_slice(&body).map_err(|error| Error::InvalidResponse(error.to_string()))
    }
}

#[async_trait]
impl TransactionApi for HttpTransactionApi {
    async fn list_transactions(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<PersistedTransaction>, Error> {
        let url = self.list_url(query)?;
        let response: TransactionsResponse = self.get_json(&url).await?;

        Ok(response.transactions)
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<PersistedTransaction, Error> {
        self.get_json(&self.item_url(id)).await
    }

    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error> {
        self.send_json(Method::POST, &self.collection_url(), payload)
            .await
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &NewTransaction,
    ) -> Result<PersistedTransaction, Error> {
        self.send_json(Method::PUT, &self.item_url(id), payload)
            .await
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(self.item_url(id))
            .body(Body::empty())
            .map_err(|error| Error::InvalidRequest(error.to_string()))?;

        self.send(request).await?;

        Ok(())
    }
}
