pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = mpc_cli::VERSION,
	rename_all = "kebab",
	styles = mpc_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = mpc_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr: SocketAddr = config.service.http_bind.parse()?;

	for source in &config.sources {
		tracing::info!(
			id = source.id,
			key = %source.key,
			name = %source.name,
			"Source registered."
		);
	}

	let state = AppState::new(&config)?;

	if !state.service.ping().await {
		tracing::warn!(url = %config.index.url, "Search index is not reachable yet.");
	}

	let app = routes::router(state);
	let http_listener = TcpListener::bind(http_addr).await?;

	tracing::info!(
		%http_addr,
		collection = %config.index.collection,
		sources = config.sources.len(),
		"HTTP server listening."
	);

	axum::serve(http_listener, app).await?;

	Ok(())
}

fn init_tracing(config: &mpc_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
