use crate::core::types::CredentialTier;
use rust_decimal::Decimal;

pub const DEFAULT_BASE_URL: &str = "https://api.zaif.jp";

/// Single private endpoint; the operation is selected by the `method`
/// field inside the signed POST body.
pub const TAPI: &str = "/tapi";

/// Public API resources under `/api/1/{resource}/{argument}`.
pub const PUBLIC_RESOURCES: &[&str] = &[
    "currencies",
    "currency_pairs",
    "last_price",
    "ticker",
    "trades",
    "depth",
];

pub fn is_public_resource(resource: &str) -> bool {
    PUBLIC_RESOURCES.contains(&resource)
}

pub fn public_path(resource: &str, argument: &str) -> String {
    format!("/api/1/{resource}/{argument}")
}

/// Private tapi methods and the credential tier each runs on.
pub const PRIVATE_METHODS: &[(&str, CredentialTier)] = &[
    ("get_info", CredentialTier::Query),
    ("get_info2", CredentialTier::Query),
    ("get_personal_info", CredentialTier::Query),
    ("get_id_info", CredentialTier::Query),
    ("trade_history", CredentialTier::Query),
    ("active_orders", CredentialTier::Query),
    ("trade", CredentialTier::Trade),
    ("cancel_order", CredentialTier::Trade),
];

pub fn private_tier(method: &str) -> Option<CredentialTier> {
    PRIVATE_METHODS
        .iter()
        .find(|(name, _)| *name == method)
        .map(|(_, tier)| *tier)
}

/// Smallest base-currency order Zaif accepts for btc_jpy.
pub fn minimum_order_amount(_pair: &str) -> Decimal {
    Decimal::new(1, 4) // 0.0001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_are_versioned() {
        assert_eq!(public_path("ticker", "btc_jpy"), "/api/1/ticker/btc_jpy");
        assert_eq!(public_path("currencies", "all"), "/api/1/currencies/all");
        assert!(is_public_resource("depth"));
        assert!(!is_public_resource("tapi"));
    }

    #[test]
    fn trade_methods_need_the_trade_tier() {
        assert_eq!(private_tier("trade"), Some(CredentialTier::Trade));
        assert_eq!(private_tier("cancel_order"), Some(CredentialTier::Trade));
        assert_eq!(private_tier("get_info"), Some(CredentialTier::Query));
        assert_eq!(private_tier("active_orders"), Some(CredentialTier::Query));
        assert_eq!(private_tier("withdraw"), None);
    }

    #[test]
    fn btc_minimum_is_one_ten_thousandth() {
        assert_eq!(minimum_order_amount("btc_jpy").to_string(), "0.0001");
    }
}
