// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod attribute;
mod fs;
mod kobject;

pub use attribute::*;
pub use fs::*;
pub use kobject::*;
