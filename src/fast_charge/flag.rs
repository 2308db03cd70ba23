// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether USB fast charge is forced on.
///
/// Shared between the sysfs attribute that changes it and the power supply driver that reads it.
/// Readers always observe either the value before or after a concurrent write.
#[derive(Debug, Default)]
pub struct FastChargeFlag(AtomicBool);

impl FastChargeFlag {
    pub const fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    pub fn get(&self) -> bool {
        let Self(enabled) = self;
        enabled.load(Ordering::Acquire)
    }

    pub fn set(&self, enabled: bool) {
        let Self(flag) = self;
        flag.store(enabled, Ordering::Release)
    }

    /// Stores `enabled` and returns the previous value.
    pub(super) fn replace(&self, enabled: bool) -> bool {
        let Self(flag) = self;
        flag.swap(enabled, Ordering::AcqRel)
    }
}
