use crate::core::types::CredentialTier;
use rust_decimal::Decimal;

pub const DEFAULT_BASE_URL: &str = "https://coincheck.com";

// Public
pub const TICKER: &str = "/api/ticker";
pub const TRADES: &str = "/api/trades";
pub const ORDER_BOOKS: &str = "/api/order_books";
pub const ORDERS_RATE: &str = "/api/exchange/orders/rate";
pub const RATE: &str = "/api/rate";

// Order (trade tier for writes, query tier for reads)
pub const ORDERS: &str = "/api/exchange/orders";
pub const ORDERS_OPENS: &str = "/api/exchange/orders/opens";
pub const ORDERS_CANCEL_STATUS: &str = "/api/exchange/orders/cancel_status";
pub const ORDERS_TRANSACTIONS: &str = "/api/exchange/orders/transactions";

// Account (query tier)
pub const ACCOUNTS_BALANCE: &str = "/api/accounts/balance";
pub const ACCOUNTS: &str = "/api/accounts";

// Withdraw tier
pub const BANK_ACCOUNTS: &str = "/api/bank_accounts";
pub const WITHDRAWS: &str = "/api/withdraws";

/// Smallest BTC order Coincheck accepts.
pub fn minimum_order_amount(_pair: &str) -> Decimal {
    Decimal::new(5, 3) // 0.005
}

/// One row of the endpoint catalog, used by the generic `query`/`execute`
/// passthrough. Typed operations reference the path constants directly.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    pub method: &'static str,
    pub path: &'static str,
    pub tier: Option<CredentialTier>,
}

const CATALOG: &[(&str, EndpointSpec)] = &[
    ("ticker", EndpointSpec { method: "GET", path: TICKER, tier: None }),
    ("trades", EndpointSpec { method: "GET", path: TRADES, tier: None }),
    ("order_books", EndpointSpec { method: "GET", path: ORDER_BOOKS, tier: None }),
    ("orders/rate", EndpointSpec { method: "GET", path: ORDERS_RATE, tier: None }),
    ("rate", EndpointSpec { method: "GET", path: RATE, tier: None }),
    ("orders", EndpointSpec { method: "POST", path: ORDERS, tier: Some(CredentialTier::Trade) }),
    ("orders/opens", EndpointSpec { method: "GET", path: ORDERS_OPENS, tier: Some(CredentialTier::Query) }),
    ("orders/cancel_status", EndpointSpec { method: "GET", path: ORDERS_CANCEL_STATUS, tier: Some(CredentialTier::Query) }),
    ("orders/transactions", EndpointSpec { method: "GET", path: ORDERS_TRANSACTIONS, tier: Some(CredentialTier::Query) }),
    ("accounts/balance", EndpointSpec { method: "GET", path: ACCOUNTS_BALANCE, tier: Some(CredentialTier::Query) }),
    ("accounts", EndpointSpec { method: "GET", path: ACCOUNTS, tier: Some(CredentialTier::Query) }),
    ("bank_accounts", EndpointSpec { method: "GET", path: BANK_ACCOUNTS, tier: Some(CredentialTier::Withdraw) }),
    ("bank_accounts/add", EndpointSpec { method: "POST", path: BANK_ACCOUNTS, tier: Some(CredentialTier::Withdraw) }),
    ("withdraws", EndpointSpec { method: "GET", path: WITHDRAWS, tier: Some(CredentialTier::Withdraw) }),
    ("withdraws/request", EndpointSpec { method: "POST", path: WITHDRAWS, tier: Some(CredentialTier::Withdraw) }),
];

/// Resolve a command name to its catalog entry, checking the HTTP method.
pub fn lookup(method: &str, command: &str) -> Option<EndpointSpec> {
    CATALOG
        .iter()
        .find(|(name, spec)| *name == command && spec.method.eq_ignore_ascii_case(method))
        .map(|(_, spec)| *spec)
}
