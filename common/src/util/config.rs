use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Fill tunables. All distances are millimetres, the board's native unit.
#[derive(Debug, Clone, Deserialize)]
pub struct FillConfig {
    /// Target net. Falls back to "/GND" then "GND" when unset.
    #[serde(default)]
    pub net_name: Option<String>,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_via_size")]
    pub via_size: f64,
    #[serde(default = "default_drill")]
    pub drill: f64,
    #[serde(default = "default_clearance")]
    pub clearance: f64,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_max_grid_cells")]
    pub max_grid_cells: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            net_name: None,
            step: default_step(),
            via_size: default_via_size(),
            drill: default_drill(),
            clearance: default_clearance(),
            debug: false,
            max_grid_cells: default_max_grid_cells(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_board_file")]
    pub board_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_image_file")]
    pub image_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            board_file: default_board_file(),
            output_file: default_output_file(),
            image_file: default_image_file(),
        }
    }
}

pub(crate) fn default_step() -> f64 {
    1.27
}

pub(crate) fn default_via_size() -> f64 {
    0.3
}

pub(crate) fn default_drill() -> f64 {
    0.21
}

pub(crate) fn default_clearance() -> f64 {
    0.2
}

pub(crate) fn default_max_grid_cells() -> u64 {
    50_000_000
}

fn default_board_file() -> String {
    "inputs/board.toml".to_string()
}

fn default_output_file() -> String {
    "output/vias.txt".to_string()
}

fn default_image_file() -> String {
    "output/fill.png".to_string()
}
