//! REST client for the Construxis economy backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{
    currency::CurrencyTable,
    domain::{StockQuote, UserData},
    error::BackendError,
    protocol::{
        AccountOperationRequest, BurnRequest, EntityPayRequest, EntityReceiveRequest,
        HistoryResponse, MarketResponse, PendingActionRequest, PendingResponse,
        PortfolioResponse, TradeOutcome, TradeRequest, TransactionOutcome, TransactionRequest,
    },
};

mod cache;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

pub use cache::CurrencyCache;

pub type Result<T> = std::result::Result<T, BackendError>;

/// One method per consumed backend endpoint. Handlers depend on this trait
/// so tests can count and fake backend calls.
#[async_trait]
pub trait EconomyBackend: Send + Sync {
    async fn currencies(&self) -> Result<CurrencyTable>;
    async fn user(&self, username: &str) -> Result<UserData>;
    async fn history(&self, username: &str, limit: i64) -> Result<HistoryResponse>;
    async fn create_transaction(&self, req: &TransactionRequest) -> Result<TransactionOutcome>;
    async fn account_operation(&self, req: &AccountOperationRequest) -> Result<()>;
    async fn entity_pay(&self, req: &EntityPayRequest) -> Result<()>;
    async fn entity_receive(&self, req: &EntityReceiveRequest) -> Result<()>;
    async fn burn(&self, req: &BurnRequest) -> Result<()>;
    async fn pending(&self) -> Result<PendingResponse>;
    async fn pending_action(&self, req: &PendingActionRequest) -> Result<()>;
    async fn stock(&self, ticker: &str) -> Result<StockQuote>;
    async fn trade(&self, req: &TradeRequest) -> Result<TradeOutcome>;
    async fn portfolio(&self, username: &str) -> Result<PortfolioResponse>;
    async fn stocks(&self) -> Result<MarketResponse>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct HttpEconomyClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpEconomyClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(format!("{}{path}", self.base_url)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.post(format!("{}{path}", self.base_url)))
    }

    // The backend sits behind an ngrok tunnel; the bypass header skips its
    // browser interstitial.
    fn decorate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("api-key", &self.api_key)
            .header("ngrok-skip-browser-warning", "true")
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| BackendError::Decode(error.to_string()))
    }

    async fn read_ok(response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // Error bodies carry {"detail": "..."}; surface it verbatim when
        // present, otherwise fall back to the status line.
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => format!("backend returned {status}"),
        };
        Err(BackendError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

fn transport(error: reqwest::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

#[async_trait]
impl EconomyBackend for HttpEconomyClient {
    async fn currencies(&self) -> Result<CurrencyTable> {
        // The currencies endpoint is unauthenticated; only the tunnel
        // bypass header goes out.
        let res = self
            .http
            .get(format!("{}/currencies", self.base_url))
            .header("ngrok-skip-browser-warning", "true")
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn user(&self, username: &str) -> Result<UserData> {
        let res = self
            .get(&format!("/user/{username}"))
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn history(&self, username: &str, limit: i64) -> Result<HistoryResponse> {
        let res = self
            .get(&format!("/user/{username}/history"))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn create_transaction(&self, req: &TransactionRequest) -> Result<TransactionOutcome> {
        let res = self
            .post("/transaction")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn account_operation(&self, req: &AccountOperationRequest) -> Result<()> {
        let res = self
            .post("/account/operation")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_ok(res).await
    }

    async fn entity_pay(&self, req: &EntityPayRequest) -> Result<()> {
        let res = self
            .post("/entity/pay")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_ok(res).await
    }

    async fn entity_receive(&self, req: &EntityReceiveRequest) -> Result<()> {
        let res = self
            .post("/entity/receive")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_ok(res).await
    }

    async fn burn(&self, req: &BurnRequest) -> Result<()> {
        let res = self
            .post("/burn")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_ok(res).await
    }

    async fn pending(&self) -> Result<PendingResponse> {
        let res = self.get("/pending").send().await.map_err(transport)?;
        Self::read_json(res).await
    }

    async fn pending_action(&self, req: &PendingActionRequest) -> Result<()> {
        let res = self
            .post("/pending/action")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_ok(res).await
    }

    async fn stock(&self, ticker: &str) -> Result<StockQuote> {
        let res = self
            .get(&format!("/stock/{ticker}"))
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn trade(&self, req: &TradeRequest) -> Result<TradeOutcome> {
        let res = self
            .post("/stock/trade")
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn portfolio(&self, username: &str) -> Result<PortfolioResponse> {
        let res = self
            .get(&format!("/stock/portfolio/{username}"))
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(res).await
    }

    async fn stocks(&self) -> Result<MarketResponse> {
        let res = self.get("/stocks").send().await.map_err(transport)?;
        Self::read_json(res).await
    }
}
