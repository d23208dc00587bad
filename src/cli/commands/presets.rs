use crate::services::{DefaultPipelineConfig, PRESET_NAMES};
use anyhow::Result;

/// presetsコマンドの実行
pub fn execute_presets() -> Result<()> {
    println!("⚙️  利用可能なプリセット:");
    for name in PRESET_NAMES {
        let description = DefaultPipelineConfig::preset_description(name).unwrap_or_default();
        println!("   - {name}: {description}");
    }
    Ok(())
}
