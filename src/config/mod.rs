// ==========================================
// 組織変更反映バッチ - 設定層
// ==========================================

pub mod pipeline_config;

pub use pipeline_config::{PipelineConfig, RequestFileEntry};
