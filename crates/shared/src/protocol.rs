use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Holding, PendingTransaction, StockListing, Transaction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from_wallet: String,
    pub to_wallet: String,
    pub amount: f64,
    pub currency: String,
    pub note: String,
    pub is_physical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOperationRequest {
    pub account_id: String,
    pub amount: f64,
    pub currency: String,
    pub action: AccountAction,
}

/// Exactly one of `to_username` / `to_wallet` is set; the handler
/// validates that before building the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPayRequest {
    pub entity_name: String,
    pub amount: f64,
    pub currency: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_wallet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityReceiveRequest {
    pub entity_name: String,
    pub from_account: String,
    pub amount: f64,
    pub currency: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnRequest {
    pub wallet_id: String,
    pub amount: f64,
    pub currency: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    Approve,
    Decline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingActionRequest {
    pub transaction_id: String,
    pub action: PendingAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub ticker: String,
    pub shares: i64,
    pub action: TradeAction,
    pub wallet_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Keyed by transaction id; a BTreeMap so "the first pending transaction"
/// is deterministic (lowest id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingResponse {
    #[serde(default)]
    pub pending_transactions: BTreeMap<String, PendingTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub price: f64,
    pub total: f64,
    pub new_price: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioResponse {
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketResponse {
    #[serde(default)]
    pub stocks: Vec<StockListing>,
}
