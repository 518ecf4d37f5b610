//! Per-cell fill state.
//!
//! Eligibility is decided by [`ZoneState`] alone; [`Obstructions`] records which
//! later passes touched a cell and doubles as diagnostics.

pub mod dense;

pub use dense::FillGrid;

/// Outcome of the zone/keepout pass for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoneState {
    /// Not covered by any target-net zone yet.
    #[default]
    Outside,
    /// All four samples inside a target-net zone.
    Allowed,
    /// At least one sample inside a keepout.
    Denied,
}

/// Additive obstruction marks. Never cleared once set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Obstructions(u8);

impl Obstructions {
    pub const NONE: Self = Self(0);
    pub const PAD: Self = Self(1 << 0);
    pub const TRACK: Self = Self(1 << 1);
    pub const TEXT: Self = Self(1 << 2);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Obstructions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// Debug status codes: 0 means "via goes here".
const CODE_KEEPOUT: u8 = 0x01;
const CODE_PAD: u8 = 0x02;
const CODE_TRACK: u8 = 0x04;
const CODE_OUTSIDE: u8 = 0x08;
const CODE_TEXT: u8 = 0x10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub zone: ZoneState,
    pub obstructions: Obstructions,
}

impl Cell {
    #[inline]
    pub fn is_fill_eligible(&self) -> bool {
        self.zone == ZoneState::Allowed && self.obstructions.is_empty()
    }

    pub fn status_code(&self) -> u8 {
        let mut code = match self.zone {
            ZoneState::Allowed => 0,
            ZoneState::Outside => CODE_OUTSIDE,
            ZoneState::Denied => CODE_KEEPOUT,
        };
        if self.obstructions.contains(Obstructions::PAD) {
            code |= CODE_PAD;
        }
        if self.obstructions.contains(Obstructions::TRACK) {
            code |= CODE_TRACK;
        }
        if self.obstructions.contains(Obstructions::TEXT) {
            code |= CODE_TEXT;
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pristine_cell_is_outside() {
        let cell = Cell::default();
        assert_eq!(cell.zone, ZoneState::Outside);
        assert!(!cell.is_fill_eligible());
        assert_eq!(cell.status_code(), 0x08);
    }

    #[test]
    fn any_obstruction_blocks_allowed_cell() {
        let mut cell = Cell {
            zone: ZoneState::Allowed,
            obstructions: Obstructions::NONE,
        };
        assert!(cell.is_fill_eligible());
        assert_eq!(cell.status_code(), 0);

        cell.obstructions.insert(Obstructions::TRACK);
        assert!(!cell.is_fill_eligible());
        cell.obstructions.insert(Obstructions::TEXT);
        assert_eq!(cell.status_code(), 0x14);
        assert!(cell.obstructions.contains(Obstructions::TRACK | Obstructions::TEXT));
        assert!(!cell.obstructions.contains(Obstructions::PAD));
    }

    #[test]
    fn denied_code() {
        let cell = Cell {
            zone: ZoneState::Denied,
            obstructions: Obstructions::PAD,
        };
        assert_eq!(cell.status_code(), 0x03);
    }
}
