use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mpc_api::Args::parse();

	mpc_api::run(args).await
}
