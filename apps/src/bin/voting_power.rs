use std::str::FromStr;

use alloy::transports::http::reqwest::Url;
use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;
use community_apps::http_reader;
use community_strategies::{evaluate, BaseArgs, Networks, StrategyName};
use tracing_subscriber::EnvFilter;

/// Arguments of the voting power CLI.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Node endpoint of the chain the strategy reads from.
    #[clap(long, env, required_unless_present = "list_strategies")]
    rpc_url: Option<String>,

    /// Ethereum mainnet endpoint. Defaults to `--rpc-url`.
    #[clap(long, env)]
    mainnet_rpc_url: Option<String>,

    /// Strategy to evaluate, e.g. balanceOfErc20.
    #[clap(long, required_unless_present = "list_strategies")]
    strategy: Option<String>,

    /// Account whose voting power is computed.
    #[clap(long, required_unless_present = "list_strategies")]
    account: Option<Address>,

    /// Strategy parameters as a JSON object.
    #[clap(long, default_value = "{}")]
    params: String,

    /// Print the known strategy names and exit.
    #[clap(long)]
    list_strategies: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing. In order to view logs, run `RUST_LOG=info cargo run`
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.list_strategies {
        for name in StrategyName::ALL {
            println!("{name}");
        }
        return Ok(());
    }

    let rpc_url = args.rpc_url.context("--rpc-url is required")?;
    let strategy = args.strategy.context("--strategy is required")?;
    let account = args.account.context("--account is required")?;
    let params = serde_json::from_str(&args.params).context("--params is not valid JSON")?;

    let provider = http_reader(Url::from_str(&rpc_url).context("invalid --rpc-url")?);
    let mainnet = match args.mainnet_rpc_url {
        Some(url) => http_reader(Url::from_str(&url).context("invalid --mainnet-rpc-url")?),
        None => provider.clone(),
    };
    log::debug!("evaluating {strategy} for {account}");

    let score = evaluate(
        &strategy,
        params,
        BaseArgs::new(account, provider),
        &Networks { mainnet },
    )
    .await
    .with_context(|| format!("failed to evaluate {strategy} for {account}"))?;

    println!("Voting power: {score}");

    Ok(())
}
