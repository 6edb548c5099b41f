use clap::{Parser, Subcommand, ValueEnum};
use koinx::core::config::AppConfig;
use koinx::core::errors::AgencyError;
use koinx::core::traits::TradingAgency;
use koinx::core::types::{OrderRequest, OrderSide, PaginationParams, SortOrder};
use koinx::utils::factory::create_agency;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "koinx-cli", version, about = "Coincheck/Zaif trading terminal")]
struct Cli {
    /// Application config file
    #[arg(short, long, default_value = "koinx.json")]
    config: PathBuf,

    /// Exchange name as declared in the config (e.g. coincheck, zaif::trade)
    #[arg(short, long)]
    exchange: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Current ticker
    Ticker {
        #[arg(default_value = "btc_jpy")]
        pair: String,
    },
    /// Recent public trades
    Trades {
        #[arg(default_value = "btc_jpy")]
        pair: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// Order book snapshot
    OrderBook {
        #[arg(default_value = "btc_jpy")]
        pair: String,
    },
    /// Current buy rate / last price
    Rate {
        #[arg(default_value = "btc_jpy")]
        pair: String,
    },
    /// Account balance
    Balance,
    /// Open orders
    OpenOrders {
        #[arg(long)]
        pair: Option<String>,
    },
    /// Past order executions
    History {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// Place a btc_jpy limit buy
    BtcBuy { rate: Decimal, amount: Decimal },
    /// Place a btc_jpy limit sell
    BtcSell { rate: Decimal, amount: Decimal },
    /// Cancel an open order
    CancelOrder { id: String },
    /// Cancellation status of an order (Coincheck)
    CancelStatus { id: String },
    /// Raw catalog call: GET commands go unsigned, POST commands signed
    Raw {
        method: String,
        command: String,
        /// Parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn pagination(limit: Option<u32>, order: Option<OrderArg>) -> Option<PaginationParams> {
    if limit.is_none() && order.is_none() {
        return None;
    }
    Some(PaginationParams {
        limit,
        order: order.map(SortOrder::from).unwrap_or_default(),
        ..PaginationParams::default()
    })
}

async fn run(cli: Cli) -> Result<Value, AgencyError> {
    let app = AppConfig::load(&cli.config)?;
    let entry = app.find_agency(&cli.exchange).ok_or_else(|| {
        AgencyError::InvalidParameters(format!(
            "exchange {} is not declared in {}",
            cli.exchange,
            cli.config.display()
        ))
    })?;
    let agency = create_agency(entry)?;

    match cli.command {
        Command::Ticker { pair } => agency.get_ticker(&pair).await,
        Command::Trades { pair, limit, order } => {
            agency
                .get_trades(&pair, pagination(limit, order).as_ref())
                .await
        }
        Command::OrderBook { pair } => agency.get_order_book(&pair).await,
        Command::Rate { pair } => match agency.exchange_name() {
            "zaif" => {
                agency
                    .query("GET", "last_price", &json!({ "pair": pair }))
                    .await
            }
            _ => agency.query("GET", "rate", &json!({ "pair": pair })).await,
        },
        Command::Balance => agency.get_balance().await,
        Command::OpenOrders { pair } => agency.get_open_orders(pair.as_deref()).await,
        Command::History { limit, order } => {
            agency
                .get_order_history(pagination(limit, order).as_ref())
                .await
        }
        Command::BtcBuy { rate, amount } => {
            let order = OrderRequest::limit("btc_jpy", OrderSide::Buy, rate, amount);
            agency.new_order(&order).await
        }
        Command::BtcSell { rate, amount } => {
            let order = OrderRequest::limit("btc_jpy", OrderSide::Sell, rate, amount);
            agency.new_order(&order).await
        }
        Command::CancelOrder { id } => agency.cancel_order(&id).await,
        Command::CancelStatus { id } => {
            agency
                .execute("GET", "orders/cancel_status", &json!({ "id": id }))
                .await
        }
        Command::Raw {
            method,
            command,
            params,
        } => {
            let params: Value = serde_json::from_str(&params).map_err(|e| {
                AgencyError::InvalidParameters(format!("--params is not valid JSON: {e}"))
            })?;
            if method.eq_ignore_ascii_case("GET") {
                agency.query(&method, &command, &params).await
            } else {
                agency.execute(&method, &command, &params).await
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(value) => {
            // Raw JSON to stdout; scripts pipe this through jq.
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{value}"),
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
