use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a currency symbol goes relative to the amount. Anything the
/// backend sends that is not `before` renders after the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPlacement {
    Before,
    #[serde(other)]
    After,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_placement: Option<SymbolPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subunit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subunit_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// A cash-like balance holder scoped to a currency, owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub currency: String,
    pub balance: f64,
}

/// Backend bank accounts come back in camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub currency: String,
    pub balance: f64,
    #[serde(default)]
    pub frozen: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default, rename = "bankAccounts")]
    pub bank_accounts: Vec<BankAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub currency: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub note: Option<String>,
    pub date: DateTime<Utc>,
}

/// A backend-held transfer awaiting approval or decline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub amount: f64,
    pub currency: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub is_physical: bool,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub volume_24h: f64,
    pub shareholders: u64,
    pub outstanding_shares: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListing {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub volume_24h: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub shares: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub currency: String,
}
