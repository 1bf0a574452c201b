mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::Value;

use btcrpc_core::{amount, Bitcoin, RpcConfig};

use cli::{AmountOp, Cli, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    match &args.command {
        Command::Amount { op } => run_amount(op),
        Command::Info => {
            let bitcoin = connect(&args)?;
            let info = bitcoin
                .chain()
                .get_chain_info()
                .await
                .map_err(|err| {
                    eyre!(format_connect_error(&err.to_string()))
                        .wrap_err("while attempting to connect to Bitcoin Core RPC")
                })?;

            tracing::info!(
                chain = %info.chain,
                blocks = info.blocks,
                headers = info.headers,
                "connected to Bitcoin Core"
            );
            if info.initial_block_download {
                tracing::warn!("node is still in initial block download");
            }
            if info.pruned {
                tracing::warn!("node is pruned; old blocks may be unavailable");
            }
            print_json(&serde_json::to_value(&info).context("encode chain info")?)
        }
        Command::Call {
            method,
            params,
            wallet,
        } => {
            let bitcoin = connect(&args)?;
            let params: Vec<Value> = params.iter().map(|p| parse_param(p)).collect();
            let result = bitcoin
                .call(method, params, wallet.as_deref(), None)
                .await
                .wrap_err_with(|| format!("call `{method}` failed"))?;
            print_json(&result)
        }
    }
}

fn connect(args: &Cli) -> eyre::Result<Bitcoin> {
    let config = RpcConfig {
        endpoint: args.rpc_url.clone(),
        user: args.rpc_user.clone(),
        password: args.rpc_pass.clone(),
        cookie_file: args.rpc_cookie_file.clone(),
        default_timeout: Duration::from_secs(args.timeout),
    };
    Bitcoin::connect(config).context("configure RPC client")
}

fn run_amount(op: &AmountOp) -> eyre::Result<()> {
    let converted = match op {
        AmountOp::Encode { amount, decimals } => {
            amount::encode(amount.as_str(), *decimals).context("encode amount")?
        }
        AmountOp::Decode {
            base_units,
            decimals,
        } => amount::decode(base_units.as_str(), *decimals).context("decode amount")?,
    };
    println!("{converted}");
    Ok(())
}

/// A command-line param is JSON when it parses as JSON, otherwise a string.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn print_json(value: &Value) -> eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render result")?;
    println!("{rendered}");
    Ok(())
}

fn format_connect_error(source_error: &str) -> String {
    let mut lines = vec![format!("RPC error: {source_error}")];

    if source_error.contains("dns error") {
        lines.push("hint: hostname resolution failed; verify the endpoint hostname".into());
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push(
            "hint: authentication failed; check --rpc-user/--rpc-pass or --rpc-cookie-file".into(),
        );
    } else if source_error.contains("error sending request") {
        lines.push("hint: node unreachable; check that bitcoind is running with -server".into());
    }

    lines.join("\n")
}
