use env_logger::{Builder, Env};
use std::io::Write;

/// Leveled logging to stderr, `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
