//! SavingsVault Deployment Binary
//!
//! One-shot deploy of the pre-compiled SavingsVault TEAL contract.
//!
//! Run modes:
//!   vault-deploy run       - Deploy the contract
//!   vault-deploy check     - Validate the environment without deploying
//!   vault-deploy address   - Show the deployer address
//!   vault-deploy fund      - Request Testnet faucet funds

use std::env;
use std::path::PathBuf;
use std::process;

use vault_deploy::account::DeployerAccount;
use vault_deploy::algod::AlgodClient;
use vault_deploy::artifacts::{self, TealArtifacts};
use vault_deploy::config::DeployConfig;
use vault_deploy::deploy::{self, DeployOutcome};
use vault_deploy::dispenser::DispenserClient;
use vault_deploy::logging::init_from_config;
use vault_deploy::repo::find_repo_root;
use vault_deploy::units;
use vault_deploy::{Result, VaultError};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]).await,
        "check" => cmd_check().await,
        "address" => cmd_address(),
        "fund" => cmd_fund().await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        fail(e);
    }
}

fn print_usage() {
    println!("SavingsVault Deployment Tool");
    println!();
    println!("Usage:");
    println!("  vault-deploy run [--contracts-dir <path>] [--wait-rounds <n>] [--json]");
    println!("                          Deploy the contract and print the new App ID");
    println!("  vault-deploy check      Validate environment and artifacts, no transaction");
    println!("  vault-deploy address    Show the deployer address for the mnemonic");
    println!("  vault-deploy fund       Request Testnet faucet funds for the deployer");
    println!();
    println!("Environment Variables:");
    println!("  DEPLOYER_MNEMONIC    25-word deployer account mnemonic (required)");
    println!("  VAULT_NETWORK        mainnet | testnet | localnet (default: testnet)");
    println!("  VAULT_ALGOD_URL      algod endpoint override");
    println!("  VAULT_ALGOD_TOKEN    algod API token override");
    println!("  VAULT_CONTRACTS_DIR  TEAL artifact directory (default: <repo-root>/contracts)");
    println!("  VAULT_WAIT_ROUNDS    confirmation wait bound in rounds (default: 4)");
    println!("  VAULT_LOG_LEVEL      debug | info | warn | error (default: info)");
    println!();
    println!("The App ID is printed once and not persisted; record it with the");
    println!("contract documentation after a successful deploy.");
}

/// Print a terminal error and exit non-zero
fn fail(err: VaultError) -> ! {
    eprintln!("ERROR [{}]: {}", err.error_code(), err);
    process::exit(1);
}

fn load_config() -> Result<DeployConfig> {
    let config = DeployConfig::from_env()?;
    init_from_config(&config)?;
    Ok(config)
}

/// Resolve the TEAL artifact directory: explicit override, or
/// `<repo-root>/contracts` found from the working directory.
fn resolve_contracts_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd)?;
    Ok(root.join(artifacts::CONTRACTS_DIR))
}

async fn cmd_run(args: &[String]) -> Result<()> {
    let config = load_config()?;

    let mut contracts_dir = config.contracts_dir.clone();
    let mut wait_rounds = config.wait_rounds;
    let mut json_output = false;

    // Parse arguments
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--contracts-dir" if i + 1 < args.len() => {
                contracts_dir = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--wait-rounds" if i + 1 < args.len() => {
                wait_rounds = args[i + 1].parse().unwrap_or(deploy::DEFAULT_WAIT_ROUNDS);
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    let contracts_dir = resolve_contracts_dir(contracts_dir)?;

    // Artifacts and credentials are checked before any network call
    let artifacts = TealArtifacts::load(&contracts_dir)?;
    let account = DeployerAccount::from_env()?;
    let node = AlgodClient::from_config(&config)?;

    if !json_output {
        println!("=== SavingsVault Deploy ===");
        println!();
        println!("Network  : {:?}", config.network);
        println!("Node     : {}", node.url());
        println!("Contracts: {}", contracts_dir.display());
        println!("Deployer : {}", account.address());
        println!();
    }

    let address = account.address();
    let balance = deploy::check_funding(&node, &address).await?;
    if !json_output {
        println!("Deployer balance: {}", units::format_microalgos(balance));
    }

    let tx_id = deploy::submit_app_create(&node, &account, &artifacts).await?;
    if !json_output {
        println!("Transaction submitted: {}", tx_id);
        println!("Waiting up to {} rounds for confirmation...", wait_rounds);
    }

    let confirmed =
        deploy::wait_for_confirmation(&node, &tx_id, wait_rounds, config.network).await?;
    let outcome = DeployOutcome::from_confirmation(&tx_id, &confirmed, config.network)?;

    if json_output {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Warning: could not serialize outcome: {}", e),
        }
        return Ok(());
    }

    println!();
    println!("SavingsVault deployed successfully!");
    println!("  App ID   : {}", outcome.app_id);
    println!("  Confirmed: round {}", outcome.confirmed_round);
    println!("  Tx       : {}", outcome.tx_url);
    println!("  App      : {}", outcome.app_url);
    println!();
    println!("Record the App ID with the contract documentation; nothing is persisted here.");
    Ok(())
}

async fn cmd_check() -> Result<()> {
    let config = load_config()?;

    println!("=== Deploy Preflight ===");
    println!();
    config.print_summary();
    println!();

    let contracts_dir = resolve_contracts_dir(config.contracts_dir.clone())?;
    let teal = TealArtifacts::load(&contracts_dir)?;
    println!(
        "TEAL artifacts: ok ({} + {} bytes of source in {})",
        teal.approval_source.len(),
        teal.clear_source.len(),
        contracts_dir.display()
    );

    let account = DeployerAccount::from_env()?;
    println!("Deployer: {}", account.address());

    let node = AlgodClient::from_config(&config)?;
    node.health().await?;
    println!("Node: {} reachable", node.url());

    let address = account.address();
    let balance = deploy::check_funding(&node, &address).await?;
    println!("Balance: {}", units::format_microalgos(balance));

    println!();
    println!("All preflight checks passed.");
    Ok(())
}

fn cmd_address() -> Result<()> {
    let account = DeployerAccount::from_env()?;
    println!("{}", account.address());
    Ok(())
}

async fn cmd_fund() -> Result<()> {
    let config = load_config()?;

    let dispenser_url = match config.network.dispenser_url() {
        Some(url) => url,
        None => {
            eprintln!(
                "No public faucet for {:?}; fund the deployer account manually.",
                config.network
            );
            process::exit(1);
        }
    };

    let account = DeployerAccount::from_env()?;

    let dispenser = DispenserClient::new(dispenser_url);
    println!("Requesting Testnet funds for {}...", account.address());
    dispenser
        .request_funds(&account.address().to_string())
        .await?;

    println!("Funding request sent; the balance updates once the faucet");
    println!("transaction confirms. Re-run 'vault-deploy check' to verify.");
    Ok(())
}
