// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::config::SysfsConfig;
use crate::logging::set_current_caller_info;
use crate::sysfs::{KObjAttribute, KObject, KObjectHandle, NodeAllocator};
use crate::uapi::auth::FsCred;
use crate::uapi::errors::Errno;
use crate::vfs::{FsStr, FsString};
use crate::{errno, error, log_debug};
use bstr::ByteSlice;
use std::sync::Arc;

pub const SYSFS_KERNEL: &str = "kernel";

/// What a path in the sysfs tree resolves to.
#[derive(Clone, Debug)]
pub enum SysFsEntry {
    Directory(KObjectHandle),
    Attribute(KObjAttribute),
}

/// A sysfs tree with the well-known top-level kobjects already in place.
pub struct SysFs {
    allocator: Arc<NodeAllocator>,
    root: KObjectHandle,
    kernel: KObjectHandle,
}

impl SysFs {
    pub fn new(config: &SysfsConfig) -> Result<Self, Errno> {
        let allocator = NodeAllocator::new(config.max_nodes);
        let root = KObject::new_root(allocator.clone());
        let kernel = root.create_and_add(SYSFS_KERNEL.into())?;
        Ok(Self { allocator, root, kernel })
    }

    pub fn root(&self) -> &KObjectHandle {
        &self.root
    }

    /// The `/sys/kernel` kobject, parent of module specific directories.
    pub fn kernel_kobj(&self) -> &KObjectHandle {
        &self.kernel
    }

    pub fn allocated_nodes(&self) -> usize {
        self.allocator.allocated()
    }

    /// Resolves a `/`-separated path relative to the root. Empty segments are ignored.
    pub fn lookup(&self, path: &FsStr) -> Result<SysFsEntry, Errno> {
        let mut segments = path.split_str("/").filter(|s| !s.is_empty()).peekable();
        let mut current = self.root.clone();
        while let Some(segment) = segments.next() {
            let name = segment.as_bstr();
            if let Some(child) = current.get_child(name) {
                current = child;
                continue;
            }
            let attr = current.get_attribute(name).ok_or_else(|| errno!(ENOENT))?;
            if segments.peek().is_some() {
                return error!(ENOTDIR);
            }
            return Ok(SysFsEntry::Attribute(attr));
        }
        Ok(SysFsEntry::Directory(current))
    }

    /// Lists the entries of a directory: child kobjects first, then attributes.
    pub fn list(&self, path: &FsStr) -> Result<Vec<FsString>, Errno> {
        match self.lookup(path)? {
            SysFsEntry::Directory(kobject) => {
                let mut names = kobject.get_children_names();
                names.extend(kobject.get_attribute_names());
                Ok(names)
            }
            SysFsEntry::Attribute(_) => error!(ENOTDIR),
        }
    }

    pub fn read(&self, cred: &FsCred, path: &FsStr) -> Result<Vec<u8>, Errno> {
        let _caller = set_current_caller_info(cred);
        match self.lookup(path)? {
            SysFsEntry::Attribute(attr) => attr.show(cred),
            SysFsEntry::Directory(_) => error!(EISDIR),
        }
    }

    /// Writes `data` to the attribute at `path`, returning the number of bytes accepted.
    pub fn write(&self, cred: &FsCred, path: &FsStr, data: &[u8]) -> Result<usize, Errno> {
        let _caller = set_current_caller_info(cred);
        match self.lookup(path)? {
            SysFsEntry::Attribute(attr) => {
                let result = attr.store(cred, data);
                if let Err(e) = &result {
                    log_debug!("sysfs: write to {} failed: {:?}", path, e);
                }
                result
            }
            SysFsEntry::Directory(_) => error!(EISDIR),
        }
    }
}
