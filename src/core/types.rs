use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential privilege tier. Operations request the lowest tier that can
/// perform them; the store never substitutes a higher tier for a missing
/// lower one (or the other way around).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialTier {
    Query,
    Trade,
    Withdraw,
}

impl fmt::Display for CredentialTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Trade => write!(f, "trade"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Sort order for paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Asc => "asc",
        }
    }
}

/// Cursor-style pagination, appended to query strings per exchange
/// convention. Pure data.
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    pub limit: Option<u32>,
    pub order: SortOrder,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
}

impl PaginationParams {
    pub fn new(limit: u32, order: SortOrder) -> Self {
        Self {
            limit: Some(limit),
            order,
            ..Self::default()
        }
    }

    pub fn starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.starting_after = Some(cursor.into());
        self
    }

    pub fn ending_before(mut self, cursor: impl Into<String>) -> Self {
        self.ending_before = Some(cursor.into());
        self
    }

    /// Key/value pairs in the order Coincheck documents them.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params.push(("order".to_string(), self.order.as_str().to_string()));
        if let Some(cursor) = &self.starting_after {
            params.push(("starting_after".to_string(), cursor.clone()));
        }
        if let Some(cursor) = &self.ending_before {
            params.push(("ending_before".to_string(), cursor.clone()));
        }
        params
    }
}

/// Order side for limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order kinds understood by the agencies. Market orders carry one leg
/// only: `MarketBuy` spends quote currency, `MarketSell` sells base
/// currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Limit(OrderSide),
    MarketBuy,
    MarketSell,
}

impl OrderKind {
    /// Wire name used by Coincheck's `order_type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limit(OrderSide::Buy) => "buy",
            Self::Limit(OrderSide::Sell) => "sell",
            Self::MarketBuy => "market_buy",
            Self::MarketSell => "market_sell",
        }
    }
}

/// A new-order request as the caller states it. Validation against the
/// exchange minimum happens in the agency before any network call.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub pair: String,
    pub kind: OrderKind,
    /// Limit price, or the quote-currency amount for `MarketBuy`.
    pub rate: Option<Decimal>,
    /// Base-currency amount. Unused by `MarketBuy`.
    pub amount: Option<Decimal>,
}

impl OrderRequest {
    pub fn limit(pair: impl Into<String>, side: OrderSide, rate: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            kind: OrderKind::Limit(side),
            rate: Some(rate),
            amount: Some(amount),
        }
    }

    pub fn market_buy(pair: impl Into<String>, quote_amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            kind: OrderKind::MarketBuy,
            rate: Some(quote_amount),
            amount: None,
        }
    }

    pub fn market_sell(pair: impl Into<String>, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            kind: OrderKind::MarketSell,
            rate: None,
            amount: Some(amount),
        }
    }
}
