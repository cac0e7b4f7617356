//! # DCFS Node
//!
//! `serve` runs the middleware, `store` runs an in-memory block store for
//! development, `genesis` seeds a fresh pair of store snapshots.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dcfs_crypto::PrivateSigningKey;
use dcfs_node::genesis::{build_genesis, write_snapshots, GenesisInputs};
use dcfs_node::logging::init_tracing;
use dcfs_node::runtime::{run_middleware, run_store, shutdown_signal};
use dcfs_node::NodeConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// Trust-enforcing middleware for the DCFS block stores
#[derive(Parser, Debug)]
#[command(name = "dcfs-node")]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the middleware
    Serve {
        /// JSON configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Refuse to start with crypto disabled
        #[arg(long)]
        production: bool,
    },

    /// Run an in-memory block store
    Store {
        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1:50051")]
        listen: SocketAddr,

        /// Snapshot written by `genesis`
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        #[arg(long, default_value = "info")]
        log_level: String,
    },

    /// Create root blocks for both stores
    Genesis {
        /// Client PKCS#8 private key
        #[arg(long)]
        client_key: PathBuf,

        /// Client SPKI public key
        #[arg(long)]
        client_pub: PathBuf,

        /// Client user id
        #[arg(long, default_value = "1000")]
        uid: String,

        /// Inode store signing key
        #[arg(long)]
        inode_key: PathBuf,

        /// Data store signing key
        #[arg(long)]
        data_key: PathBuf,

        /// Output directory for the snapshots
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Serve { config, production } => {
            let mut config = NodeConfig::load(&config)
                .with_context(|| format!("cannot load {}", config.display()))?;
            config.apply_env_overrides()?;
            init_tracing(&config.log_level)?;

            info!(
                address = %config.address,
                port = config.port,
                crypto = config.is_crypto_enabled,
                "Starting DCFS middleware"
            );
            run_middleware(config, production, shutdown_signal()).await
        }

        Command::Store {
            listen,
            snapshot,
            log_level,
        } => {
            init_tracing(&log_level)?;
            info!(%listen, "Starting in-memory block store");
            run_store(listen, snapshot.as_deref(), shutdown_signal()).await
        }

        Command::Genesis {
            client_key,
            client_pub,
            uid,
            inode_key,
            data_key,
            out,
        } => {
            let inputs = GenesisInputs {
                client_key: PrivateSigningKey::read_pkcs8_pem_file(&client_key)
                    .with_context(|| format!("cannot load {}", client_key.display()))?,
                client_public_pem: std::fs::read(&client_pub)
                    .with_context(|| format!("cannot read {}", client_pub.display()))?,
                uid: uid.into_bytes(),
                inode_key: PrivateSigningKey::read_pkcs8_pem_file(&inode_key)
                    .with_context(|| format!("cannot load {}", inode_key.display()))?,
                data_key: PrivateSigningKey::read_pkcs8_pem_file(&data_key)
                    .with_context(|| format!("cannot load {}", data_key.display()))?,
            };

            let output = build_genesis(&inputs)?;
            let [inode_path, data_path] = write_snapshots(&output, &out)?;

            println!("inode root: {}", output.inode_root);
            println!("data root:  {}", output.data_root);
            println!("wrote {} and {}", inode_path.display(), data_path.display());
            Ok(())
        }
    }
}
