use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `-v` の回数からログレベルを決める
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// ログ出力を初期化する（RUST_LOG があればそちらを優先）
///
/// stdout は結果出力に使うため、ログは stderr に書く。
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).to_string().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
