// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

pub type uid_t = u32;
pub type gid_t = u32;

/// The filesystem credentials of a caller, or of a node's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FsCred {
    pub uid: uid_t,
    pub gid: gid_t,
}

impl FsCred {
    pub const fn root() -> Self {
        Self { uid: 0, gid: 0 }
    }

    pub const fn is_root(&self) -> bool {
        self.uid == 0
    }
}
