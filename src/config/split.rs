use crate::metrics::{DEFAULT_ALPHA_RATIO_THRESHOLD, DEFAULT_ALPHA_VALUE_THRESHOLD};
use crate::splitter::SplitParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SplitToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub params: SplitParams,
    #[serde(default)]
    pub transparency: TransparencyConfig,
    pub output: SplitOutputConfig,
}

/// Thresholds for the "does this sheet already have alpha" check.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TransparencyConfig {
    /// Minimum share of pixels below `alpha_value_threshold`.
    pub alpha_ratio_threshold: f64,
    pub alpha_value_threshold: u8,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            alpha_ratio_threshold: DEFAULT_ALPHA_RATIO_THRESHOLD,
            alpha_value_threshold: DEFAULT_ALPHA_VALUE_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SplitOutputConfig {
    pub frames_dir: PathBuf,
    /// Frame file prefix; defaults to the input file stem.
    #[serde(default)]
    pub frame_prefix: Option<String>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl SplitToolConfig {
    /// Prefix used for frame file names.
    pub fn frame_prefix(&self) -> String {
        self.output.frame_prefix.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame".to_string())
        })
    }
}

pub fn load_config(path: &Path) -> Result<SplitToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
