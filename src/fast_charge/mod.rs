// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Smart charge: a sysfs switch that forces USB fast charge.
//!
//! The module owns a single [`FastChargeFlag`] and publishes it as
//! `/sys/kernel/fast_charge/force_fast_charge`. The USB power supply driver reads the same flag
//! to pick its input current limit.

mod file;
mod flag;

pub use file::*;
pub use flag::*;

use crate::sysfs::{AttributeGroup, KObjectHandle};
use crate::uapi::errors::Errno;
use crate::{errno, log_error, log_info};
use std::sync::Arc;

pub const FAST_CHARGE_DIRECTORY: &str = "fast_charge";

/// Registers the `fast_charge` directory and its attribute under `kernel_kobj`.
///
/// Failing to create the directory is reported as `ENOMEM`. If the attribute cannot be attached,
/// the directory is removed again and the attachment error is returned.
pub fn fast_charge_init(
    kernel_kobj: &KObjectHandle,
    flag: Arc<FastChargeFlag>,
) -> Result<FastChargeRegistration, Errno> {
    let kobject = kernel_kobj.create_and_add(FAST_CHARGE_DIRECTORY.into()).map_err(|e| {
        log_error!("fast_charge: failed to create {} directory: {:?}", FAST_CHARGE_DIRECTORY, e);
        errno!(ENOMEM)
    })?;

    let group = AttributeGroup::new([ForceFastChargeFile::new_attribute(flag.clone())]);
    if let Err(e) = kobject.create_group(&group) {
        log_error!("fast_charge: failed to attach {}: {:?}", FORCE_FAST_CHARGE, e);
        kobject.remove();
        return Err(e);
    }

    log_info!("fast_charge: registered {}", kobject.path());
    Ok(FastChargeRegistration { kobject: Some(kobject), group, flag })
}

/// Keeps `/sys/kernel/fast_charge` registered. Dropping it removes the directory.
#[must_use = "dropping the registration removes the sysfs directory"]
pub struct FastChargeRegistration {
    kobject: Option<KObjectHandle>,
    group: AttributeGroup,
    flag: Arc<FastChargeFlag>,
}

impl FastChargeRegistration {
    pub fn kobject(&self) -> Option<&KObjectHandle> {
        self.kobject.as_ref()
    }

    pub fn flag(&self) -> &Arc<FastChargeFlag> {
        &self.flag
    }

    /// Removes the directory now instead of when the registration is dropped.
    pub fn unregister(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(kobject) = self.kobject.take() {
            kobject.remove_group(&self.group);
            kobject.remove();
            log_info!("fast_charge: unregistered {}", FAST_CHARGE_DIRECTORY);
        }
    }
}

impl Drop for FastChargeRegistration {
    fn drop(&mut self) {
        self.release();
    }
}
