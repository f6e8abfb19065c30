use crate::error::AtlasError;
use crate::model::{Size, Thickness};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Constraint on admissible atlas dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeRestriction {
    /// Any integer dimensions up to the maximum.
    Any,
    /// Both sides must be powers of two.
    Pow2,
    /// Both sides must be equal powers of two.
    Pow2Square,
}

impl FromStr for SizeRestriction {
    type Err = AtlasError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "pow2" | "poweroftwo" => Ok(Self::Pow2),
            "pow2square" | "pow2sq" => Ok(Self::Pow2Square),
            _ => Err(AtlasError::UnsupportedOption(format!(
                "unknown size restriction: {}",
                s
            ))),
        }
    }
}

/// MaxRects placement heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    BottomLeft,
    ContactPoint,
}

impl FromStr for MaxRectsHeuristic {
    type Err = AtlasError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            _ => Err(AtlasError::UnsupportedOption(format!(
                "unknown maxrects heuristic: {}",
                s
            ))),
        }
    }
}

/// Guillotine free-rect choice heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineChoice {
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    WorstAreaFit,
    WorstShortSideFit,
    WorstLongSideFit,
}

impl FromStr for GuillotineChoice {
    type Err = AtlasError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "waf" | "worstareafit" => Ok(Self::WorstAreaFit),
            "wssf" | "worstshortsidefit" => Ok(Self::WorstShortSideFit),
            "wlsf" | "worstlongsidefit" => Ok(Self::WorstLongSideFit),
            _ => Err(AtlasError::UnsupportedOption(format!(
                "unknown guillotine choice heuristic: {}",
                s
            ))),
        }
    }
}

/// Guillotine split axis heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineSplit {
    SplitShorterLeftoverAxis,
    SplitLongerLeftoverAxis,
    SplitMinimizeArea,
    SplitMaximizeArea,
    SplitShorterAxis,
    SplitLongerAxis,
}

impl FromStr for GuillotineSplit {
    type Err = AtlasError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slas" | "splitshorterleftoveraxis" => Ok(Self::SplitShorterLeftoverAxis),
            "llas" | "splitlongerleftoveraxis" => Ok(Self::SplitLongerLeftoverAxis),
            "minas" | "splitminimizearea" => Ok(Self::SplitMinimizeArea),
            "maxas" | "splitmaximizearea" => Ok(Self::SplitMaximizeArea),
            "sas" | "splitshorteraxis" => Ok(Self::SplitShorterAxis),
            "las" | "splitlongeraxis" => Ok(Self::SplitLongerAxis),
            _ => Err(AtlasError::UnsupportedOption(format!(
                "unknown guillotine split heuristic: {}",
                s
            ))),
        }
    }
}

/// Packing configuration for the atlas planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
    /// Constraint on the atlas dimensions.
    #[serde(default = "default_restriction")]
    pub restriction: SizeRestriction,
    /// Allow 90 degree rotations for placements where beneficial.
    pub allow_rotation: bool,
    /// Reserved margin around the atlas usable area.
    #[serde(default)]
    pub border: Thickness,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_width: 1024,
            max_height: 1024,
            restriction: default_restriction(),
            allow_rotation: true,
            border: Thickness::default(),
        }
    }
}

fn default_restriction() -> SizeRestriction {
    SizeRestriction::Any
}

impl AtlasConfig {
    /// The maximum atlas dimensions as a `Size`.
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if dimensions are zero or the border band leaves no
    /// usable space.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        if self.border.sum_x() >= self.max_width || self.border.sum_y() >= self.max_height {
            return Err(AtlasError::InvalidConfig(format!(
                "border {}+{} x {}+{} leaves no usable space in {}x{}",
                self.border.left,
                self.border.right,
                self.border.top,
                self.border.bottom,
                self.max_width,
                self.max_height
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn restriction(mut self, v: SizeRestriction) -> Self {
        self.cfg.restriction = v;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn border(mut self, v: Thickness) -> Self {
        self.cfg.border = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
