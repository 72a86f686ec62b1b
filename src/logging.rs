// ==========================================
// ログ初期化
// ==========================================
// tracing / tracing-subscriber を使用
// 環境変数でログレベルを制御する
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// ログの初期化
///
/// # 環境変数
/// - RUST_LOG: ログレベルフィルタ (既定: info)
///   例: RUST_LOG=debug / RUST_LOG=orgchange_batch=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// テスト用のログ初期化
///
/// 詳細レベルで出力し、テストランナのキャプチャに乗せる
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
