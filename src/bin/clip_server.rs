use clap::Parser;
use color_eyre::Result;

use clipwire::clipboard::{SerializedSink, SystemClipboard};
use clipwire::config::{self, ConfigResult};
use clipwire::{Endpoint, Listener, ListenerOptions, logging};

/// Receive clipboard frames and apply them to the local clipboard
#[derive(Parser, Debug)]
#[command(version, about = "Listen for clipboard text and apply it to the local clipboard")]
struct Args {
    /// Address to bind (default from config, else 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default from config, else 9999)
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

    let clipboard = SystemClipboard::from_config(&config.clipboard)?;

    let endpoint = Endpoint::new(
        args.host.unwrap_or(config.listener.host.clone()),
        args.port.unwrap_or(config.listener.port),
    );
    let options = ListenerOptions {
        max_frame_len: config.listener.max_frame_len(),
        read_timeout: config.listener.read_timeout(),
    };

    let listener = Listener::bind(&endpoint, options, SerializedSink::new(clipboard))?;
    if config.listener.concurrent {
        listener.serve_concurrent()
    } else {
        listener.serve()
    }
}
