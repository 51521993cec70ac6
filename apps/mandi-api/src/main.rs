use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = mandi_api::Args::parse();
	mandi_api::run(args).await
}
