use anyhow::{anyhow, Context, Result};
use chain_client::{DryRunClient, RemoteTransact};
use clap::{Args as ClapArgs, Parser, Subcommand};
use private_transfer::{
    asset_id_to_number, parse_amount, AssetClass, AssetId, Network, PipelineConfig,
    ProvingService, ShieldedAddress, SubmissionPolicy, SubmissionReport, TransferIntent,
    TransferPipeline,
};
use std::path::PathBuf;
use tracing::{error, info};

mod config;
mod signer;

use crate::{config::CliConfig, signer::HttpSigner};

#[derive(Parser, Debug)]
#[command(name = "shielded-pay")]
#[command(about = "shielded transfers: sign, submit or export relay payloads", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(long, env = "SHIELDED_PAY_CONFIG")]
    config: Option<PathBuf>,

    /// Dolphin, Calamari or Manta
    #[arg(long)]
    network: Option<Network>,

    /// signer daemon url
    #[arg(long, env = "SHIELDED_PAY_SIGNER_URL")]
    signer_url: Option<String>,

    /// public account that signs submitted batches
    #[arg(long, env = "SHIELDED_PAY_SIGNER")]
    signer: Option<String>,

    /// submit every call in a single batch_all
    #[arg(long)]
    atomic: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// asset number -> 32-byte ledger asset id
    EncodeId { number: String },
    /// 32-byte ledger asset id (hex) -> asset number
    DecodeId { id: String },
    /// shielded address of the signer's wallet and its digest
    Address,
    /// version of the running signer daemon
    SignerVersion,
    /// public balance into the shielded pool
    ToPrivate(TransferArgs),
    /// shielded to shielded
    PrivateTransfer {
        #[command(flatten)]
        transfer: TransferArgs,
        /// destination shielded address
        #[arg(long)]
        to: String,
    },
    /// shielded balance back to public
    ToPublic(TransferArgs),
    /// public to public, no proof
    PublicTransfer {
        #[command(flatten)]
        transfer: TransferArgs,
        /// destination account id (hex)
        #[arg(long)]
        to: String,
    },
}

#[derive(ClapArgs, Debug)]
struct TransferArgs {
    /// decimal asset id
    #[arg(long)]
    asset: String,

    /// amount in the asset's smallest unit; ignored for nft/sbt
    #[arg(long, default_value = "1")]
    amount: String,

    /// ft, nft or sbt
    #[arg(long, default_value = "ft")]
    class: AssetClass,

    /// print the signed posts without submitting
    #[arg(long)]
    only_sign: bool,

    /// print a remote transact payload instead of submitting
    #[arg(long, conflicts_with = "only_sign")]
    relay: bool,
}

impl TransferArgs {
    fn asset_id(&self) -> Result<AssetId> {
        self.asset
            .parse()
            .with_context(|| format!("invalid asset id: {}", self.asset))
    }

    fn amount(&self) -> Result<u128> {
        parse_amount(&self.amount).with_context(|| format!("invalid amount: {}", self.amount))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shielded_pay=info,private_transfer=info,chain_client=info".into()
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(network) = args.network {
        config.network = network;
    }
    if let Some(url) = args.signer_url {
        config.signer_url = url;
    }
    if let Some(signer) = args.signer {
        config.signer = signer;
    }
    if args.atomic {
        config.policy = SubmissionPolicy::Atomic;
    }

    match args.command {
        Command::EncodeId { number } => {
            let id: AssetId = number.parse()?;
            println!("0x{}", hex::encode(id.as_bytes()));
        }
        Command::DecodeId { id } => {
            let bytes = hex::decode(id.trim_start_matches("0x")).context("asset id is not hex")?;
            let bytes: [u8; 32] = bytes
                .try_into()
                .map_err(|b: Vec<u8>| anyhow!("asset id is {} bytes, expected 32", b.len()))?;
            println!("{}", asset_id_to_number(&AssetId::from(bytes)));
        }
        Command::Address => {
            let address = HttpSigner::new(&config.signer_url)
                .address(config.network)
                .await?;
            println!("{}", address.as_str());
            println!("digest: 0x{}", hex::encode(address.digest().0));
        }
        Command::SignerVersion => {
            let version = HttpSigner::new(&config.signer_url).version().await?;
            println!("{}", version.0);
        }
        Command::ToPrivate(transfer) => {
            let intent = TransferIntent::ToPrivate {
                asset_id: transfer.asset_id()?,
                amount: transfer.amount()?,
            };
            run_transfer(&config, intent, &transfer).await?;
        }
        Command::PrivateTransfer { transfer, to } => {
            let intent = TransferIntent::PrivateTransfer {
                asset_id: transfer.asset_id()?,
                amount: transfer.amount()?,
                destination: ShieldedAddress::parse(&to)?,
            };
            run_transfer(&config, intent, &transfer).await?;
        }
        Command::ToPublic(transfer) => {
            let intent = TransferIntent::ToPublic {
                asset_id: transfer.asset_id()?,
                amount: transfer.amount()?,
            };
            run_transfer(&config, intent, &transfer).await?;
        }
        Command::PublicTransfer { transfer, to } => {
            anyhow::ensure!(
                !config.signer.is_empty(),
                "no signing account, set --signer or `signer` in the config"
            );
            let destination: [u8; 32] = hex::decode(to.trim_start_matches("0x"))
                .context("destination is not hex")?
                .try_into()
                .map_err(|b: Vec<u8>| anyhow!("destination is {} bytes, expected 32", b.len()))?;
            let pipeline = pipeline(&config).await?;
            let report = pipeline
                .public_transfer(
                    transfer.asset_id()?,
                    transfer.amount()?,
                    transfer.class,
                    destination,
                )
                .await;
            print_report(&report)?;
        }
    }

    Ok(())
}

async fn pipeline(config: &CliConfig) -> Result<TransferPipeline<HttpSigner, DryRunClient>> {
    let chain = DryRunClient::connect_to(config.chain()).await?;
    for entry in &config.assets {
        chain
            .register_asset(entry.asset_id()?, entry.registered.clone())
            .await;
    }

    let pipeline_config =
        PipelineConfig::new(config.network, config.signer.clone()).with_policy(config.policy);
    Ok(TransferPipeline::new(
        HttpSigner::new(&config.signer_url),
        chain,
        pipeline_config,
    ))
}

async fn run_transfer(
    config: &CliConfig,
    intent: TransferIntent,
    transfer: &TransferArgs,
) -> Result<()> {
    let pipeline = pipeline(config).await?;
    info!("network: {}", config.network);
    info!("signer daemon: {}", config.signer_url);

    if transfer.only_sign {
        let prepared = pipeline.prepare(intent, transfer.class).await?;
        info!(
            "{} calls in {} batches",
            prepared.call_count(),
            prepared.batches.len()
        );
        println!("{}", serde_json::to_string_pretty(&prepared.posts)?);
        return Ok(());
    }

    if transfer.relay {
        let para_id = pipeline
            .chain()
            .chain()
            .para_id
            .context("chain has no para id to relay to")?;
        let payload = pipeline.transfer_payload(intent, transfer.class).await?;
        let remote = RemoteTransact::new(para_id, &payload, config.relay)?;
        println!("{}", serde_json::to_string_pretty(&remote)?);
        return Ok(());
    }

    anyhow::ensure!(
        !config.signer.is_empty(),
        "no signing account, set --signer or `signer` in the config"
    );
    let report = pipeline.transfer(intent, transfer.class).await?;
    print_report(&report)
}

fn print_report(report: &SubmissionReport) -> Result<()> {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(status) => println!(
                "batch {}: {} calls, tx 0x{}",
                outcome.index + 1,
                outcome.calls,
                hex::encode(status.tx_hash())
            ),
            Err(e) => error!("batch {}: {} calls failed: {}", outcome.index + 1, outcome.calls, e),
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{} of {} batches failed", failed, report.outcomes.len());
    }
    Ok(())
}
