use std::io::{self, Read};

use clap::Parser;
use color_eyre::Result;

use clipwire::clipboard::SystemClipboard;
use clipwire::config::{self, ConfigResult};
use clipwire::sender::{Sender, validate_payload};
use clipwire::{Endpoint, logging};

/// Copy stdin to the local clipboard and forward it to a clip-server
#[derive(Parser, Debug)]
#[command(version, about = "Copy stdin to the clipboard and send it to a remote clip-server")]
struct Args {
    /// Host to send to (default from config, else localhost)
    #[arg(long)]
    host: Option<String>,

    /// Port to send to (default from config, else 9997)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init();

    let ConfigResult { config, warning } = config::load_config();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    validate_payload(&input)?;

    let clipboard = SystemClipboard::from_config(&config.clipboard)?;

    let target = Endpoint::new(
        args.host.unwrap_or(config.sender.host.clone()),
        args.port.unwrap_or(config.sender.port),
    );
    let sender = Sender::new(target, clipboard)
        .with_chunk_size(config.sender.chunk_size)
        .with_connect_timeout(config.sender.connect_timeout());

    sender.send(&input)?;
    Ok(())
}
