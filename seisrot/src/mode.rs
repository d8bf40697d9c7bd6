//! Rotation mode strings.
//!
//! A rotation mode names the components on each side of the rotation and
//! the direction of the transform:
//!
//! - `XYZ->NEZ` rotates Cartesian seismograms into the geographic frame
//! - `XYZ<-NEZ` rotates geographic seismograms back to Cartesian
//!
//! A `0` stands for a component that is neither read nor written, so
//! `XYZ->00Z` produces only the vertical component.
//!
//! # Example
//!
//! ```
//! use seisrot::{Direction, RotationMode};
//!
//! let mode: RotationMode = "XYZ->00Z".parse().unwrap();
//! assert_eq!(mode.direction(), Direction::Forward);
//! assert_eq!(mode.source().to_string(), "XYZ");
//! assert_eq!(mode.target().to_string(), "00Z");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Placeholder label for an absent component.
pub const PLACEHOLDER: char = '0';

/// Direction of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Cartesian to geographic: `A · Rᵗ`.
    Forward,
    /// Geographic to Cartesian: `A · R`.
    Inverse,
}

impl Direction {
    /// Arrow used for this direction in mode strings.
    pub const fn arrow(self) -> &'static str {
        match self {
            Direction::Forward => "->",
            Direction::Inverse => "<-",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Inverse => f.write_str("inverse"),
        }
    }
}

/// Three component labels, any of which may be absent.
///
/// Slot `i` corresponds to column `i` of the amplitude matrix: X, Y, Z on
/// the Cartesian side and N, E, Z on the geographic side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentSet([Option<char>; 3]);

impl ComponentSet {
    /// Parse a three-character group such as `NEZ` or `00Z`.
    fn parse(group: &[char], mode: &str) -> Result<Self> {
        let mut slots = [None; 3];
        for (slot, &c) in slots.iter_mut().zip(group) {
            if c.is_whitespace() || c == '$' {
                return Err(Error::invalid_mode(
                    mode,
                    "component labels must be visible characters other than '$'",
                ));
            }
            *slot = (c != PLACEHOLDER).then_some(c);
        }
        Ok(ComponentSet(slots))
    }

    /// Label in slot `index`, or `None` for a placeholder.
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied().flatten()
    }

    /// Iterate over present components as `(column, label)` pairs.
    pub fn present(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }

    /// Number of present (non-placeholder) components.
    pub fn count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Check whether every slot is a placeholder.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl fmt::Display for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            write!(f, "{}", slot.unwrap_or(PLACEHOLDER))?;
        }
        Ok(())
    }
}

/// A parsed rotation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationMode {
    direction: Direction,
    cartesian: ComponentSet,
    geographic: ComponentSet,
}

impl RotationMode {
    /// Direction of the transform.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Components read from storage.
    pub fn source(&self) -> ComponentSet {
        match self.direction {
            Direction::Forward => self.cartesian,
            Direction::Inverse => self.geographic,
        }
    }

    /// Components written to the output directory.
    pub fn target(&self) -> ComponentSet {
        match self.direction {
            Direction::Forward => self.geographic,
            Direction::Inverse => self.cartesian,
        }
    }
}

impl FromStr for RotationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 8 {
            return Err(Error::invalid_mode(s, "expected 8 characters like 'XYZ->NEZ'"));
        }

        let arrow: String = chars[3..5].iter().collect();
        let direction = match arrow.as_str() {
            "->" => Direction::Forward,
            "<-" => Direction::Inverse,
            _ => return Err(Error::invalid_mode(s, "arrow must be '->' or '<-'")),
        };

        let mode = RotationMode {
            direction,
            cartesian: ComponentSet::parse(&chars[0..3], s)?,
            geographic: ComponentSet::parse(&chars[5..8], s)?,
        };

        if mode.source().is_empty() {
            return Err(Error::invalid_mode(s, "no source component selected"));
        }
        if mode.target().is_empty() {
            return Err(Error::invalid_mode(s, "no target component selected"));
        }

        Ok(mode)
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.cartesian, self.direction.arrow(), self.geographic)
    }
}
