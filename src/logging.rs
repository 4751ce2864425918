// src/logging.rs
use tracing_subscriber::EnvFilter;

/// stderr にログを出す subscriber を初期化する。
/// `RUST_LOG` があればそれを優先し、なければ `-v` の回数でレベルを決める
/// (0: warn, 1: info, 2: debug, 3 以上: trace)。
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cms_menu_router={default_level}")));

    // 二重初期化 (テストなど) は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
