//! Logger setup shared by both binaries
//!
//! Diagnostics go to stdout at `info` unless `RUST_LOG` says otherwise.

use std::io::Write;
use std::time::SystemTime;

use env_logger::{Env, Target};

/// Install the global logger; later calls are ignored
pub fn init() {
    let _ = builder().try_init();
}

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout).format(|buf, record| {
        let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
        writeln!(
            buf,
            "[{}] [{}] {}",
            datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });
    builder
}
