use clap::Parser;
use cli::{Args, shell::Shell, transport::HttpTransport};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let transport = HttpTransport::new(args.proxy.as_deref())?;
    let meta = args.media_meta();

    info!("Looking for captions of {}", args.imdb_id);

    Shell::new(transport, args.language, args.output)
        .run(meta)
        .await
}
