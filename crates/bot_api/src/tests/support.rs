//! Call-recording mock backend and a file-backed test context.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use economy_client::{CurrencyCache, EconomyBackend};
use shared::{
    currency::CurrencyTable,
    domain::{BankAccount, StockQuote, UserData, Wallet},
    error::BackendError,
    protocol::{
        AccountOperationRequest, BurnRequest, EntityPayRequest, EntityReceiveRequest,
        HistoryResponse, MarketResponse, PendingAction, PendingActionRequest, PendingResponse,
        PortfolioResponse, TradeAction, TradeOutcome, TradeRequest, TransactionOutcome,
        TransactionRequest,
    },
};
use tempfile::TempDir;

use crate::dispatch::BotContext;
use crate::links::LinkStore;
use crate::notify::{Notifier, NullNotifier};
use crate::perms::PermStore;
use crate::reply::Reply;

type Result<T> = std::result::Result<T, BackendError>;

pub struct MockBackend {
    pub calls: Mutex<Vec<String>>,
    pub user: UserData,
    pub transaction_outcome: TransactionOutcome,
    pub pending: PendingResponse,
    pub history: std::result::Result<HistoryResponse, BackendError>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            user: UserData::default(),
            transaction_outcome: TransactionOutcome {
                status: "completed".into(),
                transaction_id: None,
            },
            pending: PendingResponse::default(),
            history: Ok(HistoryResponse::default()),
        }
    }
}

impl MockBackend {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl EconomyBackend for MockBackend {
    async fn currencies(&self) -> Result<CurrencyTable> {
        self.record("currencies");
        Ok(CurrencyTable::new())
    }

    async fn user(&self, username: &str) -> Result<UserData> {
        self.record(format!("user:{username}"));
        Ok(self.user.clone())
    }

    async fn history(&self, username: &str, limit: i64) -> Result<HistoryResponse> {
        self.record(format!("history:{username}:{limit}"));
        self.history.clone()
    }

    async fn create_transaction(&self, req: &TransactionRequest) -> Result<TransactionOutcome> {
        self.record(format!("transaction:{}->{}", req.from_wallet, req.to_wallet));
        Ok(self.transaction_outcome.clone())
    }

    async fn account_operation(&self, req: &AccountOperationRequest) -> Result<()> {
        self.record(format!("account_operation:{:?}:{}", req.action, req.account_id));
        Ok(())
    }

    async fn entity_pay(&self, req: &EntityPayRequest) -> Result<()> {
        self.record(format!("entity_pay:{}", req.entity_name));
        Ok(())
    }

    async fn entity_receive(&self, req: &EntityReceiveRequest) -> Result<()> {
        self.record(format!("entity_receive:{}", req.entity_name));
        Ok(())
    }

    async fn burn(&self, req: &BurnRequest) -> Result<()> {
        self.record(format!("burn:{}", req.wallet_id));
        Ok(())
    }

    async fn pending(&self) -> Result<PendingResponse> {
        self.record("pending");
        Ok(self.pending.clone())
    }

    async fn pending_action(&self, req: &PendingActionRequest) -> Result<()> {
        let action = match req.action {
            PendingAction::Approve => "approve",
            PendingAction::Decline => "decline",
        };
        self.record(format!("pending_action:{action}:{}", req.transaction_id));
        Ok(())
    }

    async fn stock(&self, ticker: &str) -> Result<StockQuote> {
        self.record(format!("stock:{ticker}"));
        Ok(StockQuote {
            name: "Test Corp".into(),
            price: 10.0,
            currency: "USD".into(),
            volume_24h: 100.0,
            shareholders: 3,
            outstanding_shares: 1000,
        })
    }

    async fn trade(&self, req: &TradeRequest) -> Result<TradeOutcome> {
        let action = match req.action {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        };
        self.record(format!("trade:{action}:{}", req.ticker));
        Ok(TradeOutcome {
            price: 10.0,
            total: 10.0 * req.shares as f64,
            new_price: 11.0,
            currency: None,
        })
    }

    async fn portfolio(&self, username: &str) -> Result<PortfolioResponse> {
        self.record(format!("portfolio:{username}"));
        Ok(PortfolioResponse::default())
    }

    async fn stocks(&self) -> Result<MarketResponse> {
        self.record("stocks");
        Ok(MarketResponse::default())
    }
}

/// Notifier that always fails; used to show the primary flow is
/// unaffected by notification failure.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _discord_id: &str, _reply: Reply) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("dm channel closed"))
    }
}

pub struct Harness {
    pub ctx: BotContext,
    pub backend: Arc<MockBackend>,
    tmp: TempDir,
}

impl Harness {
    pub fn write_links(&self, json: serde_json::Value) {
        std::fs::write(
            self.tmp.path().join("discord_users.json"),
            json.to_string(),
        )
        .expect("write links");
    }

    pub fn write_perms(&self, json: serde_json::Value) {
        std::fs::write(
            self.tmp.path().join("entities_permissions.json"),
            json.to_string(),
        )
        .expect("write perms");
    }
}

pub fn harness(backend: MockBackend) -> Harness {
    harness_with_notifier(backend, Arc::new(NullNotifier))
}

pub fn harness_with_notifier(backend: MockBackend, notifier: Arc<dyn Notifier>) -> Harness {
    let tmp = TempDir::new().expect("tempdir");
    let backend = Arc::new(backend);
    let ctx = BotContext {
        backend: backend.clone(),
        currencies: Arc::new(CurrencyCache::new()),
        links: LinkStore::new(tmp.path().join("discord_users.json")),
        perms: PermStore::new(tmp.path().join("entities_permissions.json")),
        notifier,
    };
    Harness { ctx, backend, tmp }
}

pub fn wallet(id: &str, currency: &str, balance: f64) -> Wallet {
    Wallet {
        id: id.into(),
        currency: currency.into(),
        balance,
    }
}

pub fn account(id: &str, currency: &str, balance: f64) -> BankAccount {
    BankAccount {
        account_id: id.into(),
        currency: currency.into(),
        balance,
        frozen: false,
    }
}
