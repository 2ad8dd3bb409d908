//! The HTTP client for the transactions API.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::CONTENT_TYPE,
    multipart::{Form, Part},
};

use crate::{
    FilterCriteria, MessageBody, Receipt, ServerErrorBody, Transaction, TransactionId,
    ValidationErrorBody,
    client::{ClientError, TransactionApi, TransactionDraft},
    endpoints::{self, format_endpoint},
};

/// Settings for the client and the widget built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The scheme, host and port of the server, e.g. "http://127.0.0.1:3000".
    pub base_url: String,
    /// How long the search criteria must stay unchanged before a search is sent.
    pub search_debounce: Duration,
    /// How long after the list is replaced the widget scrolls back to the top.
    pub scroll_reset_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_owned(),
            search_debounce: Duration::from_millis(500),
            scroll_reset_delay: Duration::from_millis(100),
        }
    }
}

/// Calls the transactions REST API over HTTP.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    http: Client,
    base_url: String,
}

impl TransactionClient {
    /// Create a client for the server at `config.base_url`.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl TransactionApi for TransactionClient {
    async fn list(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.http.get(self.url(endpoints::TRANSACTIONS)).send().await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn filter(&self, criteria: FilterCriteria) -> Result<Vec<Transaction>, ClientError> {
        let query = criteria.to_query_string()?;
        let mut url = self.url(endpoints::FILTER_TRANSACTIONS);
        if !query.is_empty() {
            url = format!("{url}?{query}");
        }

        let response = self.http.get(url).send().await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn get(&self, id: TransactionId) -> Result<Transaction, ClientError> {
        let response = self
            .http
            .get(self.url(&format_endpoint(endpoints::TRANSACTION, id)))
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn create(&self, draft: TransactionDraft) -> Result<Transaction, ClientError> {
        let response = self
            .http
            .post(self.url(endpoints::TRANSACTIONS))
            .multipart(build_form(draft)?)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn update(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
        replace_receipt: bool,
    ) -> Result<(), ClientError> {
        let form = build_form(draft)?.text("replace_receipt", replace_receipt.to_string());

        let response = self
            .http
            .put(self.url(&format_endpoint(endpoints::TRANSACTION, id)))
            .multipart(form)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: TransactionId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format_endpoint(endpoints::TRANSACTION, id)))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn receipt(&self, id: TransactionId) -> Result<Receipt, ClientError> {
        let response = self
            .http
            .get(self.url(&format_endpoint(endpoints::TRANSACTION_RECEIPT, id)))
            .send()
            .await?;
        let response = check_status(response).await?;

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let data = response.bytes().await?;

        Ok(Receipt::new(data.to_vec(), mime_type.as_deref()))
    }
}

fn build_form(draft: TransactionDraft) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("description", draft.description)
        .text("amount", draft.amount)
        .text("currency", draft.currency)
        .text("category", draft.category)
        .text("kind", draft.kind);

    if let Some(timestamp) = draft.timestamp {
        form = form.text("timestamp", timestamp);
    }

    if let Some(receipt) = draft.receipt {
        let part = Part::bytes(receipt.data)
            .file_name(receipt.file_name)
            .mime_str(&receipt.mime_type)?;
        form = form.part("receipt", part);
    }

    Ok(form)
}

/// Turn an unsuccessful response into the matching [ClientError].
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let body = response.text().await?;

    if status.is_server_error() {
        return Err(match serde_json::from_str::<ServerErrorBody>(&body) {
            Ok(ServerErrorBody { message, detail }) => ClientError::Server { message, detail },
            Err(_) => ClientError::Server {
                message: status.to_string(),
                detail: body,
            },
        });
    }

    if let Ok(ValidationErrorBody { title, errors }) = serde_json::from_str(&body) {
        return Err(ClientError::Validation { title, errors });
    }

    if let Ok(MessageBody { message }) = serde_json::from_str(&body) {
        return Err(ClientError::Rejected(message));
    }

    Err(ClientError::Rejected(body))
}
