use std::path::PathBuf;

use clap::{Parser, Subcommand};

use btcrpc_core::amount::BTC_DECIMALS;
use btcrpc_core::rpc::ENDPOINT_ENV;

/// btcrpc: call a Bitcoin Core node over JSON-RPC.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Bitcoin Core RPC URL. Defaults to http://127.0.0.1:8332.
    #[arg(long, env = ENDPOINT_ENV, global = true)]
    pub rpc_url: Option<String>,

    /// RPC username.
    #[arg(long, env = "BTCRPC_USER", global = true)]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "BTCRPC_PASS", global = true, hide_env_values = true)]
    pub rpc_pass: Option<String>,

    /// Path to the node's `.cookie` file, used when no user/password is given.
    #[arg(long, env = "BTCRPC_COOKIE_FILE", global = true)]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Per-call timeout in seconds.
    #[arg(long, default_value = "10", global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Call any RPC method and print its result.
    Call {
        /// Method name, e.g. `getblockhash`.
        method: String,

        /// Positional params. Each is parsed as JSON, or sent as a string
        /// when it is not valid JSON.
        params: Vec<String>,

        /// Route the call to this wallet.
        #[arg(long)]
        wallet: Option<String>,
    },

    /// Connect and report the node's chain and height.
    Info,

    /// Convert amounts between decimal and base-unit strings.
    Amount {
        #[command(subcommand)]
        op: AmountOp,
    },
}

#[derive(Subcommand)]
pub enum AmountOp {
    /// Decimal amount to base units, e.g. `1.5` -> `150000000`.
    Encode {
        amount: String,

        #[arg(long, default_value_t = BTC_DECIMALS)]
        decimals: usize,
    },

    /// Base units to a decimal amount, e.g. `150000000` -> `1.5`.
    Decode {
        base_units: String,

        #[arg(long, default_value_t = BTC_DECIMALS)]
        decimals: usize,
    },
}
