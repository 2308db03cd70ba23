// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use anyhow::{ensure, Context};
use serde::Deserialize;

/// USB 2.0 default port current.
pub const DEFAULT_USB_CURRENT_LIMIT_MA: u32 = 500;

/// The current drawn from USB when fast charge is forced on.
pub const FORCED_USB_CURRENT_LIMIT_MA: u32 = 900;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fast_charge: FastChargeConfig,
    pub sysfs: SysfsConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FastChargeConfig {
    /// Value of `force_fast_charge` before the first write.
    pub default_enabled: bool,
    pub default_current_limit_ma: u32,
    pub forced_current_limit_ma: u32,
}

impl Default for FastChargeConfig {
    fn default() -> Self {
        Self {
            default_enabled: false,
            default_current_limit_ma: DEFAULT_USB_CURRENT_LIMIT_MA,
            forced_current_limit_ma: FORCED_USB_CURRENT_LIMIT_MA,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SysfsConfig {
    /// Upper bound on kobjects and attributes in the tree. `None` means unbounded.
    pub max_nodes: Option<usize>,
}

impl Config {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Config =
            serde_json::from_str(json).context("parsing fast charge configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let fast_charge = &self.fast_charge;
        ensure!(
            fast_charge.default_current_limit_ma > 0,
            "default_current_limit_ma must be non-zero"
        );
        ensure!(
            fast_charge.forced_current_limit_ma >= fast_charge.default_current_limit_ma,
            "forced_current_limit_ma ({}) is below default_current_limit_ma ({})",
            fast_charge.forced_current_limit_ma,
            fast_charge.default_current_limit_ma
        );
        Ok(())
    }
}
