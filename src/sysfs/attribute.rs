// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::uapi::auth::FsCred;
use crate::uapi::errors::Errno;
use crate::uapi::file_mode::{check_access, Access, FileMode};
use crate::vfs::{BytesFileOps, FsStr, FsString};
use crate::{errno, error};
use std::fmt;
use std::sync::Arc;

/// A named file attached to a kobject, backed by a [`BytesFileOps`] implementation.
#[derive(Clone)]
pub struct KObjAttribute {
    name: FsString,
    mode: FileMode,
    owner: FsCred,
    ops: Arc<dyn BytesFileOps>,
}

impl KObjAttribute {
    pub fn new(name: impl Into<FsString>, mode: FileMode, ops: impl BytesFileOps) -> Self {
        Self { name: name.into(), mode, owner: FsCred::root(), ops: Arc::new(ops) }
    }

    pub fn name(&self) -> &FsStr {
        self.name.as_ref()
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn owner(&self) -> FsCred {
        self.owner
    }

    /// Attributes must be regular files and may only carry permission bits.
    pub(super) fn validate(&self) -> Result<(), Errno> {
        if self.name.is_empty() || self.name.contains(&b'/') {
            return error!(EINVAL);
        }
        if !self.mode.is_reg() || self.mode.permissions().bits() & !0o777 != 0 {
            return error!(EINVAL);
        }
        Ok(())
    }

    /// Returns the attribute's content on behalf of `cred`.
    ///
    /// An attribute with no read bit in any class is unreadable, even for root.
    pub fn show(&self, cred: &FsCred) -> Result<Vec<u8>, Errno> {
        if !self.mode.intersects(FileMode::ANY_READ) {
            return error!(EACCES);
        }
        check_access(self.mode, &self.owner, cred, Access::READ)?;
        Ok(self.ops.read()?.into_owned())
    }

    /// Stores `data` on behalf of `cred` and returns the number of bytes accepted.
    ///
    /// An attribute with no write bit in any class is read-only, even for root.
    pub fn store(&self, cred: &FsCred, data: &[u8]) -> Result<usize, Errno> {
        if !self.mode.intersects(FileMode::ANY_WRITE) {
            return error!(EACCES);
        }
        check_access(self.mode, &self.owner, cred, Access::WRITE)?;
        self.ops.write(data.to_vec())?;
        Ok(data.len())
    }
}

impl fmt::Debug for KObjAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KObjAttribute")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// A set of attributes that is attached to, and removed from, a kobject as a unit.
#[derive(Clone, Debug, Default)]
pub struct AttributeGroup {
    attrs: Vec<KObjAttribute>,
}

impl AttributeGroup {
    pub fn new(attrs: impl IntoIterator<Item = KObjAttribute>) -> Self {
        Self { attrs: attrs.into_iter().collect() }
    }

    pub fn attrs(&self) -> &[KObjAttribute] {
        &self.attrs
    }

    pub(super) fn validate(&self) -> Result<(), Errno> {
        if self.attrs.is_empty() {
            return error!(EINVAL);
        }
        for (i, attr) in self.attrs.iter().enumerate() {
            attr.validate()?;
            if self.attrs[..i].iter().any(|other| other.name == attr.name) {
                return Err(errno!(EEXIST));
            }
        }
        Ok(())
    }
}
