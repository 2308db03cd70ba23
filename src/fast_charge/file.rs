// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::FastChargeFlag;
use crate::sysfs::KObjAttribute;
use crate::uapi::errors::Errno;
use crate::vfs::{parse_i32_file, serialize_bool_file, BytesFileOps};
use crate::{log_info, log_warn, mode};
use std::borrow::Cow;
use std::sync::Arc;

pub const FORCE_FAST_CHARGE: &str = "force_fast_charge";

/// `/sys/kernel/fast_charge/force_fast_charge`
///
/// * Reading returns `1\n` when fast charge is forced on and `0\n` otherwise.
/// * Writing `1` forces fast charge on. Any other integer turns it off. Input that does not start
///   with an integer is rejected with `EINVAL`.
pub struct ForceFastChargeFile {
    flag: Arc<FastChargeFlag>,
}

impl ForceFastChargeFile {
    pub fn new(flag: Arc<FastChargeFlag>) -> Self {
        Self { flag }
    }

    pub fn new_attribute(flag: Arc<FastChargeFlag>) -> KObjAttribute {
        KObjAttribute::new(FORCE_FAST_CHARGE, mode!(IFREG, 0o664), Self::new(flag))
    }
}

impl BytesFileOps for ForceFastChargeFile {
    fn write(&self, data: Vec<u8>) -> Result<(), Errno> {
        let value = parse_i32_file(&data).inspect_err(|_| {
            log_warn!("Invalid force_fast_charge value - must be an integer");
        })?;
        let enabled = value == 1;
        if self.flag.replace(enabled) != enabled {
            log_info!("force_fast_charge: {}", if enabled { "enabled" } else { "disabled" });
        }
        Ok(())
    }

    fn read(&self) -> Result<Cow<'_, [u8]>, Errno> {
        Ok(serialize_bool_file(self.flag.get()).into())
    }
}
