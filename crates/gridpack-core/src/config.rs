use serde::{Deserialize, Serialize};

/// Canvas and placement configuration for a [`GridPacker`](crate::GridPacker).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackerConfig {
    /// Canvas width in units. Fixed for the lifetime of the packer.
    pub max_width: u32,
    /// Canvas height in units. Fixed for the lifetime of the packer.
    pub max_height: u32,
    /// Also try every request rotated by 90°.
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    /// Evaluate candidates in parallel when feature "parallel" is on.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_width: 1024,
            max_height: 1024,
            allow_rotation: default_allow_rotation(),
            parallel: default_parallel(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Either canvas dimension is zero
    /// - A dimension does not fit the signed offsets of `Transform`
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::GridPackError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(GridPackError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }

        // Offsets are reported as i32 in `Transform`.
        if self.max_width > i32::MAX as u32 || self.max_height > i32::MAX as u32 {
            return Err(GridPackError::InvalidConfig(format!(
                "canvas {}x{} exceeds the addressable offset range",
                self.max_width, self.max_height
            )));
        }

        Ok(())
    }
}

fn default_allow_rotation() -> bool {
    true
}
fn default_parallel() -> bool {
    false
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
