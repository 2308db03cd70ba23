// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::config::FastChargeConfig;
use crate::fast_charge::FastChargeFlag;
use crate::sysfs::{AttributeGroup, KObjAttribute, KObjectHandle};
use crate::uapi::errors::Errno;
use crate::vfs::{serialize_u32_file, BytesFileOps};
use crate::{log_error, mode};
use std::borrow::Cow;
use std::sync::Arc;

pub const USB_POWER_SUPPLY: &str = "usb";

/// The USB charger, which raises its input current limit while fast charge is forced on.
pub struct UsbPowerSupply {
    force_fast_charge: Arc<FastChargeFlag>,
    default_current_limit_ma: u32,
    forced_current_limit_ma: u32,
}

impl UsbPowerSupply {
    pub fn new(force_fast_charge: Arc<FastChargeFlag>, config: &FastChargeConfig) -> Arc<Self> {
        Arc::new(Self {
            force_fast_charge,
            default_current_limit_ma: config.default_current_limit_ma,
            forced_current_limit_ma: config.forced_current_limit_ma,
        })
    }

    /// The input current limit to program into the charger right now.
    pub fn input_current_limit_ma(&self) -> u32 {
        if self.force_fast_charge.get() {
            self.forced_current_limit_ma
        } else {
            self.default_current_limit_ma
        }
    }

    /// Creates `usb/current_max` under `parent`.
    pub fn register(self: &Arc<Self>, parent: &KObjectHandle) -> Result<KObjectHandle, Errno> {
        let kobject = parent.create_and_add(USB_POWER_SUPPLY.into())?;
        let group = AttributeGroup::new([KObjAttribute::new(
            "current_max",
            mode!(IFREG, 0o444),
            CurrentMaxFile(self.clone()),
        )]);
        if let Err(e) = kobject.create_group(&group) {
            log_error!("power_supply: failed to attach current_max: {:?}", e);
            kobject.remove();
            return Err(e);
        }
        Ok(kobject)
    }
}

/// Reports the input current limit in µA, as `power_supply` class drivers do.
struct CurrentMaxFile(Arc<UsbPowerSupply>);

impl BytesFileOps for CurrentMaxFile {
    fn read(&self) -> Result<Cow<'_, [u8]>, Errno> {
        let Self(supply) = self;
        Ok(serialize_u32_file(supply.input_current_limit_ma().saturating_mul(1000)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SysfsConfig;
    use crate::fast_charge::fast_charge_init;
    use crate::sysfs::SysFs;
    use crate::uapi::auth::FsCred;
    use crate::uapi::errors::EACCES;
    use crate::vfs::FsStr;

    #[test]
    fn current_limit_follows_flag() {
        let flag = Arc::new(FastChargeFlag::default());
        let supply = UsbPowerSupply::new(flag.clone(), &FastChargeConfig::default());
        assert_eq!(supply.input_current_limit_ma(), 500);
        flag.set(true);
        assert_eq!(supply.input_current_limit_ma(), 900);
    }

    #[test]
    fn current_max_tracks_sysfs_writes() {
        let fs = SysFs::new(&SysfsConfig::default()).expect("sysfs");
        let flag = Arc::new(FastChargeFlag::default());
        let _registration = fast_charge_init(fs.kernel_kobj(), flag.clone()).expect("init");

        let class = fs.root().create_and_add("class".into()).expect("class");
        let power_supply = class.create_and_add("power_supply".into()).expect("power_supply");
        let supply = UsbPowerSupply::new(flag, &FastChargeConfig::default());
        supply.register(&power_supply).expect("register");

        let root = FsCred::root();
        let current_max: &FsStr = "class/power_supply/usb/current_max".into();
        assert_eq!(fs.read(&root, current_max).expect("read"), b"500000\n");

        fs.write(&root, "kernel/fast_charge/force_fast_charge".into(), b"1\n").expect("write");
        assert_eq!(fs.read(&root, current_max).expect("read"), b"900000\n");

        assert_eq!(fs.write(&root, current_max, b"1").unwrap_err(), EACCES);
    }
}
