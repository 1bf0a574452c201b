//! Bitcoin Core RPC method names.
//!
//! See <https://developer.bitcoin.org/reference/rpc/>.

// ==============================================================================
// Blockchain
// ==============================================================================

pub const GET_BEST_BLOCK_HASH: &str = "getbestblockhash";
pub const GET_BLOCK: &str = "getblock";
pub const GET_BLOCKCHAIN_INFO: &str = "getblockchaininfo";
pub const GET_BLOCK_COUNT: &str = "getblockcount";
pub const GET_BLOCK_HASH: &str = "getblockhash";
pub const GET_BLOCK_STATS: &str = "getblockstats";
pub const GET_CHAIN_TIPS: &str = "getchaintips";
pub const GET_CHAIN_TX_STATS: &str = "getchaintxstats";
pub const GET_DIFFICULTY: &str = "getdifficulty";
pub const GET_MEMPOOL_ANCESTORS: &str = "getmempoolancestors";
pub const GET_MEMPOOL_DESCENDANTS: &str = "getmempooldescendants";
pub const GET_MEMPOOL_ENTRY: &str = "getmempoolentry";
pub const GET_MEMPOOL_INFO: &str = "getmempoolinfo";
pub const GET_RAW_MEMPOOL: &str = "getrawmempool";
pub const GET_TX_OUT: &str = "gettxout";
pub const GET_TX_OUT_PROOF: &str = "gettxoutproof";
pub const GET_TX_OUT_SET_INFO: &str = "gettxoutsetinfo";
pub const PRECIOUS_BLOCK: &str = "preciousblock";
pub const PRUNE_BLOCKCHAIN: &str = "pruneblockchain";
pub const VERIFY_CHAIN: &str = "verifychain";
pub const VERIFY_TX_OUT_PROOF: &str = "verifytxoutproof";

// ==============================================================================
// Raw Transactions and PSBT
// ==============================================================================

pub const ANALYZE_PSBT: &str = "analyzepsbt";
pub const COMBINE_PSBT: &str = "combinepsbt";
pub const COMBINE_RAW_TRANSACTION: &str = "combinerawtransaction";
pub const CONVERT_TO_PSBT: &str = "converttopsbt";
pub const CREATE_PSBT: &str = "createpsbt";
pub const CREATE_RAW_TRANSACTION: &str = "createrawtransaction";
pub const DECODE_PSBT: &str = "decodepsbt";
pub const DECODE_RAW_TRANSACTION: &str = "decoderawtransaction";
pub const FINALIZE_PSBT: &str = "finalizepsbt";
pub const FUND_RAW_TRANSACTION: &str = "fundrawtransaction";
pub const GET_RAW_TRANSACTION: &str = "getrawtransaction";
pub const JOIN_PSBTS: &str = "joinpsbts";
pub const SEND_RAW_TRANSACTION: &str = "sendrawtransaction";
pub const SIGN_RAW_TRANSACTION_WITH_KEY: &str = "signrawtransactionwithkey";
pub const UTXO_UPDATE_PSBT: &str = "utxoupdatepsbt";

// ==============================================================================
// Wallet
// ==============================================================================

pub const ABANDON_TRANSACTION: &str = "abandontransaction";
pub const ABORT_RESCAN: &str = "abortrescan";
pub const ADD_MULTISIG_ADDRESS: &str = "addmultisigaddress";
pub const BACKUP_WALLET: &str = "backupwallet";
pub const BUMP_FEE: &str = "bumpfee";
pub const CREATE_WALLET: &str = "createwallet";
pub const DUMP_PRIV_KEY: &str = "dumpprivkey";
pub const DUMP_WALLET: &str = "dumpwallet";
pub const ENCRYPT_WALLET: &str = "encryptwallet";
pub const GET_ADDRESSES_BY_LABEL: &str = "getaddressesbylabel";
pub const GET_ADDRESS_INFO: &str = "getaddressinfo";
pub const GET_BALANCE: &str = "getbalance";
pub const GET_NEW_ADDRESS: &str = "getnewaddress";
pub const GET_RAW_CHANGE_ADDRESS: &str = "getrawchangeaddress";
pub const GET_RECEIVED_BY_ADDRESS: &str = "getreceivedbyaddress";
pub const GET_RECEIVED_BY_LABEL: &str = "getreceivedbylabel";
pub const GET_TRANSACTION: &str = "gettransaction";
pub const GET_WALLET_INFO: &str = "getwalletinfo";
pub const IMPORT_ADDRESS: &str = "importaddress";
pub const IMPORT_MULTI: &str = "importmulti";
pub const IMPORT_PRIV_KEY: &str = "importprivkey";
pub const IMPORT_PRUNED_FUNDS: &str = "importprunedfunds";
pub const IMPORT_PUBKEY: &str = "importpubkey";
pub const IMPORT_WALLET: &str = "importwallet";
pub const KEYPOOL_REFILL: &str = "keypoolrefill";
pub const LIST_ADDRESS_GROUPINGS: &str = "listaddressgroupings";
pub const LIST_LABELS: &str = "listlabels";
pub const LIST_RECEIVED_BY_ADDRESS: &str = "listreceivedbyaddress";
pub const LIST_RECEIVED_BY_LABEL: &str = "listreceivedbylabel";
pub const LIST_SINCE_BLOCK: &str = "listsinceblock";
pub const LIST_TRANSACTIONS: &str = "listtransactions";
pub const LIST_UNSPENT: &str = "listunspent";
pub const LIST_WALLET_DIR: &str = "listwalletdir";
pub const LIST_WALLETS: &str = "listwallets";
pub const LOAD_WALLET: &str = "loadwallet";
pub const LOCK_UNSPENT: &str = "lockunspent";
pub const REMOVE_PRUNED_FUNDS: &str = "removeprunedfunds";
pub const RESCAN_BLOCKCHAIN: &str = "rescanblockchain";
pub const SEND_MANY: &str = "sendmany";
pub const SEND_TO_ADDRESS: &str = "sendtoaddress";
pub const SET_LABEL: &str = "setlabel";
pub const SET_TX_FEE: &str = "settxfee";
pub const SIGN_MESSAGE: &str = "signmessage";
pub const SIGN_RAW_TRANSACTION_WITH_WALLET: &str = "signrawtransactionwithwallet";
pub const UNLOAD_WALLET: &str = "unloadwallet";
pub const WALLET_CREATE_FUNDED_PSBT: &str = "walletcreatefundedpsbt";
pub const WALLET_LOCK: &str = "walletlock";
pub const WALLET_PASSPHRASE: &str = "walletpassphrase";
pub const WALLET_PASSPHRASE_CHANGE: &str = "walletpassphrasechange";
pub const WALLET_PROCESS_PSBT: &str = "walletprocesspsbt";

// ==============================================================================
// Util
// ==============================================================================

pub const VALIDATE_ADDRESS: &str = "validateaddress";
