// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::uapi::auth::FsCred;
use crate::uapi::errors::Errno;
use bitflags::bitflags;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    pub const IFMT: FileMode = FileMode(0o170000);
    pub const IFDIR: FileMode = FileMode(0o040000);
    pub const IFREG: FileMode = FileMode(0o100000);

    pub const PERMISSIONS: FileMode = FileMode(0o7777);
    pub const ANY_READ: FileMode = FileMode(0o444);
    pub const ANY_WRITE: FileMode = FileMode(0o222);

    pub const fn from_bits(bits: u32) -> FileMode {
        FileMode(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn file_type(&self) -> FileMode {
        FileMode(self.0 & Self::IFMT.0)
    }

    pub const fn permissions(&self) -> FileMode {
        FileMode(self.0 & Self::PERMISSIONS.0)
    }

    pub const fn intersects(&self, other: FileMode) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_dir(&self) -> bool {
        self.file_type().0 == Self::IFDIR.0
    }

    pub const fn is_reg(&self) -> bool {
        self.file_type().0 == Self::IFREG.0
    }

    pub fn user_access(&self) -> Access {
        Access::from_bits_truncate((self.0 >> 6) & 0o7)
    }

    pub fn group_access(&self) -> Access {
        Access::from_bits_truncate((self.0 >> 3) & 0o7)
    }

    pub fn other_access(&self) -> Access {
        Access::from_bits_truncate(self.0 & 0o7)
    }
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileMode({:#o})", self.0)
    }
}

/// Builds a [`FileMode`] from a file type and permission bits, e.g. `mode!(IFREG, 0o664)`.
#[macro_export]
macro_rules! mode {
    ($type:ident, $mode:expr) => {
        $crate::uapi::file_mode::FileMode::from_bits(
            $crate::uapi::file_mode::FileMode::$type.bits() | $mode,
        )
    };
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u32 {
        const EXEC = 1;
        const WRITE = 2;
        const READ = 4;
    }
}

/// Checks the classic owner/group/other permission bits of `mode` for `cred`.
///
/// The superuser is granted any access.
pub fn check_access(
    mode: FileMode,
    owner: &FsCred,
    cred: &FsCred,
    access: Access,
) -> Result<(), Errno> {
    if cred.is_root() {
        return Ok(());
    }
    let granted = if cred.uid == owner.uid {
        mode.user_access()
    } else if cred.gid == owner.gid {
        mode.group_access()
    } else {
        mode.other_access()
    };
    if granted.contains(access) {
        Ok(())
    } else {
        crate::error!(EACCES)
    }
}
