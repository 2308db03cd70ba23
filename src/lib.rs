// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A sysfs switch that forces USB fast charge, and the power supply driver that honors it.

pub mod config;
pub mod fast_charge;
pub mod logging;
pub mod power_supply;
pub mod sysfs;
pub mod uapi;
pub mod vfs;
