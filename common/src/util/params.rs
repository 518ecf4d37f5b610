//! Validated fill parameters.

use crate::db::core::Board;
use crate::db::indices::NetId;
use crate::error::ConfigError;
use crate::util::config::{self, FillConfig};

/// Nets tried, in order, when no net name is configured.
pub const DEFAULT_NET_NAMES: [&str; 2] = ["/GND", "GND"];

/// Immutable, validated parameters for one fill run.
#[derive(Clone, Debug, PartialEq)]
pub struct FillParams {
    net: NetId,
    net_name: String,
    step: f64,
    via_size: f64,
    drill: f64,
    clearance: f64,
    debug: bool,
    max_grid_cells: u64,
}

impl FillParams {
    pub fn builder() -> FillParamsBuilder {
        FillParamsBuilder::default()
    }

    pub fn net(&self) -> NetId {
        self.net
    }
    pub fn net_name(&self) -> &str {
        &self.net_name
    }
    pub fn step(&self) -> f64 {
        self.step
    }
    pub fn via_size(&self) -> f64 {
        self.via_size
    }
    pub fn drill(&self) -> f64 {
        self.drill
    }
    pub fn clearance(&self) -> f64 {
        self.clearance
    }
    pub fn debug(&self) -> bool {
        self.debug
    }
    pub fn max_grid_cells(&self) -> u64 {
        self.max_grid_cells
    }

    /// Exclusion distance around a via-sized feature: `2 * clearance + via_size`.
    #[inline]
    pub fn inter(&self) -> f64 {
        2.0 * self.clearance + self.via_size
    }
}

#[derive(Clone, Debug)]
pub struct FillParamsBuilder {
    net_name: Option<String>,
    step: f64,
    via_size: f64,
    drill: f64,
    clearance: f64,
    debug: bool,
    max_grid_cells: u64,
}

impl Default for FillParamsBuilder {
    fn default() -> Self {
        Self {
            net_name: None,
            step: config::default_step(),
            via_size: config::default_via_size(),
            drill: config::default_drill(),
            clearance: config::default_clearance(),
            debug: false,
            max_grid_cells: config::default_max_grid_cells(),
        }
    }
}

impl From<&FillConfig> for FillParamsBuilder {
    fn from(c: &FillConfig) -> Self {
        Self {
            net_name: c.net_name.clone(),
            step: c.step,
            via_size: c.via_size,
            drill: c.drill,
            clearance: c.clearance,
            debug: c.debug,
            max_grid_cells: c.max_grid_cells,
        }
    }
}

impl FillParamsBuilder {
    pub fn net_name(mut self, name: impl Into<String>) -> Self {
        self.net_name = Some(name.into());
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn via_size(mut self, size: f64) -> Self {
        self.via_size = size;
        self
    }

    pub fn drill(mut self, drill: f64) -> Self {
        self.drill = drill;
        self
    }

    pub fn clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn max_grid_cells(mut self, cells: u64) -> Self {
        self.max_grid_cells = cells;
        self
    }

    /// Checks the distances without looking at a board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if !(self.drill.is_finite() && self.drill > 0.0) {
            return Err(ConfigError::InvalidDrill(self.drill));
        }
        if !(self.via_size.is_finite() && self.via_size > self.drill) {
            return Err(ConfigError::InvalidViaSize {
                size: self.via_size,
                drill: self.drill,
            });
        }
        if !(self.clearance.is_finite() && self.clearance >= 0.0) {
            return Err(ConfigError::InvalidClearance(self.clearance));
        }
        if self.max_grid_cells == 0 {
            return Err(ConfigError::InvalidCellLimit);
        }
        Ok(())
    }

    /// Validates and resolves the target net against `board`.
    pub fn build(self, board: &Board) -> Result<FillParams, ConfigError> {
        self.validate()?;
        let (net, net_name) = resolve_net(board, self.net_name.as_deref())?;
        log::debug!("Target net resolved to '{}' ({:?})", net_name, net);

        Ok(FillParams {
            net,
            net_name,
            step: self.step,
            via_size: self.via_size,
            drill: self.drill,
            clearance: self.clearance,
            debug: self.debug,
            max_grid_cells: self.max_grid_cells,
        })
    }
}

fn resolve_net(board: &Board, requested: Option<&str>) -> Result<(NetId, String), ConfigError> {
    match requested {
        Some(name) => board
            .find_net(name)
            .map(|id| (id, name.to_string()))
            .ok_or_else(|| ConfigError::UnknownNet(name.to_string())),
        None => DEFAULT_NET_NAMES
            .iter()
            .find_map(|&name| board.find_net(name).map(|id| (id, name.to_string())))
            .ok_or(ConfigError::NoDefaultNet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(nets: &[&str]) -> Board {
        let mut board = Board::new();
        for n in nets {
            board.add_net(*n);
        }
        board
    }

    #[test]
    fn defaults_are_valid() {
        let board = board_with(&["GND"]);
        let params = FillParams::builder().build(&board).unwrap();
        assert_eq!(params.net_name(), "GND");
        assert!((params.inter() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn slash_gnd_preferred() {
        let board = board_with(&["GND", "/GND"]);
        let params = FillParams::builder().build(&board).unwrap();
        assert_eq!(params.net_name(), "/GND");
        assert_eq!(Some(params.net()), board.find_net("/GND"));
    }

    #[test]
    fn explicit_net_must_exist() {
        let board = board_with(&["GND"]);
        let err = FillParams::builder()
            .net_name("VCC")
            .build(&board)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownNet("VCC".to_string()));
    }

    #[test]
    fn missing_default_net_fails() {
        let board = board_with(&["VCC"]);
        assert_eq!(
            FillParams::builder().build(&board).unwrap_err(),
            ConfigError::NoDefaultNet
        );
    }

    #[test]
    fn rejects_bad_distances() {
        let board = board_with(&["GND"]);
        assert!(matches!(
            FillParams::builder().step(0.0).build(&board),
            Err(ConfigError::InvalidStep(_))
        ));
        assert!(matches!(
            FillParams::builder().step(f64::NAN).build(&board),
            Err(ConfigError::InvalidStep(_))
        ));
        assert!(matches!(
            FillParams::builder().drill(0.0).build(&board),
            Err(ConfigError::InvalidDrill(_))
        ));
        assert!(matches!(
            FillParams::builder().via_size(0.3).drill(0.3).build(&board),
            Err(ConfigError::InvalidViaSize { .. })
        ));
        assert!(matches!(
            FillParams::builder().clearance(-0.1).build(&board),
            Err(ConfigError::InvalidClearance(_))
        ));
        assert!(matches!(
            FillParams::builder().max_grid_cells(0).build(&board),
            Err(ConfigError::InvalidCellLimit)
        ));
    }

    #[test]
    fn config_section_feeds_builder() {
        let board = board_with(&["GND", "PWR"]);
        let section = FillConfig {
            net_name: Some("PWR".to_string()),
            step: 2.0,
            ..FillConfig::default()
        };
        let params = FillParamsBuilder::from(&section).build(&board).unwrap();
        assert_eq!(params.net_name(), "PWR");
        assert_eq!(params.step(), 2.0);
    }
}
