//! HTTP client for the expense tracker API.

use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ClientError, ClientResult};
use crate::{
    auth::dto::{AuthResponse, Credentials},
    categories::Category,
    error::Field,
    expenses::{CreateExpenseRequest, Expense},
};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(req.header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Sends the request; non-2xx answers become `ClientError::Api` carrying
    /// the server's `error` message.
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res.json().await?);
        }
        let body: Value = res.json().await.unwrap_or(Value::Null);
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Something went wrong")
            .to_owned();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = Credentials {
            email: Field::Present(email.to_owned()),
            password: Field::Present(password.to_owned()),
        };
        self.send(self.http.post(self.url("/auth/register")).json(&body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = Credentials {
            email: Field::Present(email.to_owned()),
            password: Field::Present(password.to_owned()),
        };
        self.send(self.http.post(self.url("/auth/login")).json(&body))
            .await
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.send(self.http.get(self.url("/categories"))).await
    }

    pub async fn expenses(&self) -> ClientResult<Vec<Expense>> {
        let req = self.authorized(self.http.get(self.url("/expenses")))?;
        self.send(req).await
    }

    pub async fn create_expense(&self, body: &CreateExpenseRequest) -> ClientResult<Expense> {
        let req = self.authorized(self.http.post(self.url("/expenses")).json(body))?;
        self.send(req).await
    }
}
