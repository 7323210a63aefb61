//! HTTP implementation of `FinanceApi` over `reqwest` (fetch on wasm32).

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::FinanceApi;
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    BudgetSummary, Category, NewTransaction, RecurringPayload, RecurringRule, RuleId, Transaction,
    Wallet,
};

/// Longest server error text carried into `ApiError::Status`
const MAX_ERROR_LEN: usize = 200;

#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// List endpoints answer either with a bare array or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw).map_err(|e| ApiError::Url(format!("{}: {}", raw, e)))?;
        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn fetch_body(builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let body = Self::fetch_body(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_list<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<Vec<T>> {
        Ok(Self::fetch::<Listing<T>>(builder).await?.into_vec())
    }
}

/// Pull a readable message out of an error body
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|value| {
        ["detail", "message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(String::from))
    });
    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    if message.chars().count() > MAX_ERROR_LEN {
        message.chars().take(MAX_ERROR_LEN).collect::<String>() + "…"
    } else {
        message
    }
}

#[async_trait(?Send)]
impl FinanceApi for HttpApi {
    async fn list_recurring(&self, active_only: bool) -> ApiResult<Vec<RecurringRule>> {
        let mut builder = self.request(Method::GET, "/recurring-transactions")?;
        if active_only {
            builder = builder.query(&[("active", "true")]);
        }
        Self::fetch_list(builder).await
    }

    async fn create_recurring(&self, payload: &RecurringPayload) -> ApiResult<RecurringRule> {
        Self::fetch(self.request(Method::POST, "/recurring-transactions")?.json(payload)).await
    }

    async fn update_recurring(&self, id: RuleId, payload: &RecurringPayload) -> ApiResult<RecurringRule> {
        let path = format!("/recurring-transactions/{}", id);
        Self::fetch(self.request(Method::PATCH, &path)?.json(payload)).await
    }

    async fn delete_recurring(&self, id: RuleId) -> ApiResult<()> {
        let path = format!("/recurring-transactions/{}", id);
        match Self::fetch_body(self.request(Method::DELETE, &path)?).await {
            Ok(_) => Ok(()),
            Err(e) if e.status() == Some(404) => {
                log::debug!("recurring rule {} already deleted", id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Self::fetch_list(self.request(Method::GET, "/categories")?).await
    }

    async fn list_wallets(&self) -> ApiResult<Vec<Wallet>> {
        Self::fetch_list(self.request(Method::GET, "/wallets")?).await
    }

    async fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        Self::fetch_list(self.request(Method::GET, "/transactions")?).await
    }

    async fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<Transaction> {
        Self::fetch(self.request(Method::POST, "/transactions")?.json(txn)).await
    }

    async fn list_budgets(&self) -> ApiResult<Vec<BudgetSummary>> {
        Self::fetch_list(self.request(Method::GET, "/budgets")?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_detail() {
        assert_eq!(error_message(r#"{"detail": "Wallet not found"}"#), "Wallet not found");
        assert_eq!(error_message(r#"{"message": "nope", "code": 3}"#), "nope");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_error_message_truncates() {
        let long = "x".repeat(500);
        let message = error_message(&long);
        assert_eq!(message.chars().count(), MAX_ERROR_LEN + 1);
        assert!(message.ends_with('…'));
    }

    #[test]
    fn test_request_rejects_relative_base() {
        let api = HttpApi::new(&AppConfig::from_parts("/api", None, 4000, "info"));
        match api.request(Method::GET, "/wallets") {
            Err(ApiError::Url(message)) => assert!(message.starts_with("/api/wallets")),
            other => panic!("expected url error, got {:?}", other.map(|_| ())),
        }
        assert!(HttpApi::new(&AppConfig::from_parts("http://localhost:8000/api", Some("t"), 4000, "info"))
            .request(Method::GET, "/wallets")
            .is_ok());
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let bare: Listing<Category> =
            serde_json::from_str(r#"[{"id": 1, "name": "Food"}]"#).unwrap();
        let wrapped: Listing<Category> =
            serde_json::from_str(r#"{"data": [{"id": 1, "name": "Food"}, {"id": 2, "name": "Rent"}]}"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);
        assert_eq!(wrapped.into_vec().len(), 2);
    }
}
