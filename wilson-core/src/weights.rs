//! Edge weight classes and their validated configuration.

use std::fmt;

use crate::{LatticeError, Result};

/// Weight class of a lattice edge.
///
/// Interior edges are weighted by axis; edges joining coordinate `0` to
/// `L - 1` are wrapping edges regardless of axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeClass {
    /// Interior edge along the x axis.
    Horizontal,
    /// Interior edge along the y axis.
    Vertical,
    /// Edge realising the periodic wrap-around connection.
    Wrapping,
}

impl EdgeClass {
    /// Returns a stable lowercase label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Wrapping => "wrapping",
        }
    }
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated weights for the three edge classes.
///
/// Interior weights must be positive and finite. The wrapping weight may be
/// zero, which removes the wrapping edges from every walk and turns the torus
/// into an open lattice.
///
/// # Examples
/// ```
/// use wilson_core::{EdgeClass, EdgeWeights};
///
/// let weights = EdgeWeights::new(1.0, 2.0, 0.0).expect("weights are valid");
/// assert_eq!(weights.weight(EdgeClass::Vertical), 2.0);
/// assert!(!weights.is_periodic());
///
/// assert!(EdgeWeights::new(0.0, 1.0, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeWeights {
    horizontal: f64,
    vertical: f64,
    wrapping: f64,
}

impl Default for EdgeWeights {
    /// Unit interior weights on an open lattice.
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 1.0,
            wrapping: 0.0,
        }
    }
}

impl EdgeWeights {
    /// Validates and stores the three class weights.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidWeight`] when an interior weight is not
    /// positive, the wrapping weight is negative, or any weight is not finite.
    pub fn new(horizontal: f64, vertical: f64, wrapping: f64) -> Result<Self> {
        check_interior(EdgeClass::Horizontal, horizontal)?;
        check_interior(EdgeClass::Vertical, vertical)?;
        check_finite(EdgeClass::Wrapping, wrapping)?;
        if wrapping < 0.0 {
            return Err(LatticeError::InvalidWeight {
                class: EdgeClass::Wrapping,
                weight: wrapping,
                constraint: "must not be negative",
            });
        }
        Ok(Self {
            horizontal,
            vertical,
            wrapping,
        })
    }

    /// Returns the horizontal interior weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn horizontal(&self) -> f64 { self.horizontal }

    /// Returns the vertical interior weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertical(&self) -> f64 { self.vertical }

    /// Returns the wrapping weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn wrapping(&self) -> f64 { self.wrapping }

    /// Returns the weight assigned to `class`.
    #[must_use]
    pub const fn weight(&self, class: EdgeClass) -> f64 {
        match class {
            EdgeClass::Horizontal => self.horizontal,
            EdgeClass::Vertical => self.vertical,
            EdgeClass::Wrapping => self.wrapping,
        }
    }

    /// Returns `true` when wrapping edges carry weight.
    #[must_use]
    pub fn is_periodic(&self) -> bool {
        self.wrapping > 0.0
    }
}

fn check_finite(class: EdgeClass, weight: f64) -> Result<()> {
    if weight.is_finite() {
        Ok(())
    } else {
        Err(LatticeError::InvalidWeight {
            class,
            weight,
            constraint: "must be finite",
        })
    }
}

fn check_interior(class: EdgeClass, weight: f64) -> Result<()> {
    check_finite(class, weight)?;
    if weight > 0.0 {
        Ok(())
    } else {
        Err(LatticeError::InvalidWeight {
            class,
            weight,
            constraint: "interior weights must be positive",
        })
    }
}
