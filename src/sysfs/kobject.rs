// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::sysfs::{AttributeGroup, KObjAttribute};
use crate::uapi::errors::Errno;
use crate::vfs::{FsStr, FsString};
use crate::{errno, error, log_debug};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

pub type KObjectHandle = Arc<KObject>;

/// Accounts for the nodes (kobjects and attributes) allocated in one namespace.
///
/// With a limit set, allocations beyond it fail with `ENOMEM`.
#[derive(Debug, Default)]
pub struct NodeAllocator {
    limit: Option<usize>,
    allocated: AtomicUsize,
}

impl NodeAllocator {
    pub fn new(limit: Option<usize>) -> Arc<Self> {
        Arc::new(Self { limit, allocated: AtomicUsize::new(0) })
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    fn allocate(&self, count: usize) -> Result<(), Errno> {
        let Some(limit) = self.limit else {
            self.allocated.fetch_add(count, Ordering::AcqRel);
            return Ok(());
        };
        self.allocated
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_add(count).filter(|total| *total <= limit)
            })
            .map(|_| ())
            .map_err(|_| errno!(ENOMEM))
    }

    fn release(&self, count: usize) {
        self.allocated.fetch_sub(count, Ordering::AcqRel);
    }
}

/// A directory in the sysfs tree. Children and attributes share one name space.
pub struct KObject {
    name: FsString,
    parent: Option<Weak<KObject>>,
    allocator: Arc<NodeAllocator>,
    children: Mutex<BTreeMap<FsString, KObjectHandle>>,
    attributes: Mutex<BTreeMap<FsString, KObjAttribute>>,
    removed: AtomicBool,
}

impl KObject {
    /// Creates the root of a tree. The root itself does not count against the allocator.
    pub fn new_root(allocator: Arc<NodeAllocator>) -> KObjectHandle {
        Arc::new(Self::new(FsString::default(), None, allocator))
    }

    fn new(name: FsString, parent: Option<Weak<KObject>>, allocator: Arc<NodeAllocator>) -> Self {
        Self {
            name,
            parent,
            allocator,
            children: Mutex::new(BTreeMap::new()),
            attributes: Mutex::new(BTreeMap::new()),
            removed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &FsStr {
        self.name.as_ref()
    }

    pub fn parent(&self) -> Option<KObjectHandle> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Whether this kobject has been detached from its tree.
    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }

    /// The path of this kobject relative to the root of its tree.
    pub fn path(&self) -> FsString {
        let mut segments = vec![self.name.clone()];
        let mut current = self.parent();
        while let Some(kobject) = current {
            if kobject.parent.is_none() {
                break;
            }
            segments.push(kobject.name.clone());
            current = kobject.parent();
        }
        segments.reverse();
        bstr::join("/", segments).into()
    }

    /// Creates a new child named `name` and links it under this kobject.
    pub fn create_and_add(self: &KObjectHandle, name: &FsStr) -> Result<KObjectHandle, Errno> {
        if name.is_empty() || name.contains(&b'/') {
            return error!(EINVAL);
        }
        let mut children = self.children.lock();
        if self.is_removed() {
            return error!(ENOENT);
        }
        if children.contains_key(name) || self.attributes.lock().contains_key(name) {
            return error!(EEXIST);
        }
        self.allocator.allocate(1)?;
        let child = Arc::new(KObject::new(
            name.to_owned(),
            Some(Arc::downgrade(self)),
            self.allocator.clone(),
        ));
        children.insert(name.to_owned(), child.clone());
        log_debug!("sysfs: created {}", child.path());
        Ok(child)
    }

    pub fn get_child(&self, name: &FsStr) -> Option<KObjectHandle> {
        self.children.lock().get(name).cloned()
    }

    pub fn get_children_names(&self) -> Vec<FsString> {
        self.children.lock().keys().cloned().collect()
    }

    pub fn get_attribute(&self, name: &FsStr) -> Option<KObjAttribute> {
        self.attributes.lock().get(name).cloned()
    }

    pub fn get_attribute_names(&self) -> Vec<FsString> {
        self.attributes.lock().keys().cloned().collect()
    }

    /// Attaches every attribute of `group`, or none of them.
    pub fn create_group(&self, group: &AttributeGroup) -> Result<(), Errno> {
        group.validate()?;
        let children = self.children.lock();
        let mut attributes = self.attributes.lock();
        if self.is_removed() {
            return error!(ENOENT);
        }
        for attr in group.attrs() {
            if children.contains_key(attr.name()) || attributes.contains_key(attr.name()) {
                return error!(EEXIST);
            }
        }
        self.allocator.allocate(group.attrs().len())?;
        for attr in group.attrs() {
            attributes.insert(attr.name().to_owned(), attr.clone());
        }
        Ok(())
    }

    /// Removes the attributes of `group` that are attached to this kobject.
    pub fn remove_group(&self, group: &AttributeGroup) {
        let mut attributes = self.attributes.lock();
        let removed =
            group.attrs().iter().filter(|attr| attributes.remove(attr.name()).is_some()).count();
        self.allocator.release(removed);
    }

    /// Detaches this kobject, with its attributes and descendants, from the tree.
    ///
    /// Removing a kobject twice has no further effect.
    pub fn remove(&self) {
        if self.removed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(parent) = self.parent() {
            parent.children.lock().remove(self.name());
        }
        self.release_subtree();
        log_debug!("sysfs: removed {}", self.name);
    }

    fn release_subtree(&self) {
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.into_values() {
            if !child.removed.swap(true, Ordering::AcqRel) {
                child.release_subtree();
            }
        }
        let attributes = std::mem::take(&mut *self.attributes.lock()).len();
        let own = usize::from(self.parent.is_some());
        self.allocator.release(attributes + own);
    }
}

impl std::fmt::Debug for KObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KObject").field("path", &self.path()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode;
    use crate::uapi::errors::{EEXIST, EINVAL, ENOENT, ENOMEM};
    use crate::vfs::BytesFileOps;

    struct Empty;
    impl BytesFileOps for Empty {}

    fn group(names: &[&str]) -> AttributeGroup {
        AttributeGroup::new(
            names.iter().map(|name| KObjAttribute::new(*name, mode!(IFREG, 0o444), Empty)),
        )
    }

    #[test]
    fn children_are_linked_by_name() {
        let root = KObject::new_root(NodeAllocator::new(None));
        let kernel = root.create_and_add("kernel".into()).expect("kernel");
        let child = kernel.create_and_add("fast_charge".into()).expect("child");

        assert_eq!(child.path(), "kernel/fast_charge");
        assert_eq!(kernel.get_children_names(), vec![FsString::from("fast_charge")]);
        assert!(Arc::ptr_eq(&child.parent().expect("parent"), &kernel));
        assert_eq!(kernel.create_and_add("fast_charge".into()).unwrap_err(), EEXIST);
        assert_eq!(kernel.create_and_add("a/b".into()).unwrap_err(), EINVAL);
    }

    #[test]
    fn allocator_limit_yields_enomem() {
        let allocator = NodeAllocator::new(Some(1));
        let root = KObject::new_root(allocator.clone());
        root.create_and_add("kernel".into()).expect("kernel");
        assert_eq!(root.create_and_add("other".into()).unwrap_err(), ENOMEM);
        assert_eq!(allocator.allocated(), 1);
    }

    #[test]
    fn create_group_is_all_or_nothing() {
        let allocator = NodeAllocator::new(Some(2));
        let root = KObject::new_root(allocator.clone());
        let dir = root.create_and_add("dir".into()).expect("dir");

        assert_eq!(dir.create_group(&group(&["a", "b"])).unwrap_err(), ENOMEM);
        assert!(dir.get_attribute_names().is_empty());

        dir.create_group(&group(&["a"])).expect("create group");
        assert_eq!(dir.create_group(&group(&["a"])).unwrap_err(), EEXIST);
        assert_eq!(allocator.allocated(), 2);

        dir.remove_group(&group(&["a"]));
        assert!(dir.get_attribute("a".into()).is_none());
        assert_eq!(allocator.allocated(), 1);
    }

    #[test]
    fn attribute_and_child_names_collide() {
        let root = KObject::new_root(NodeAllocator::new(None));
        root.create_group(&group(&["x"])).expect("create group");
        assert_eq!(root.create_and_add("x".into()).unwrap_err(), EEXIST);
        root.create_and_add("y".into()).expect("y");
        assert_eq!(root.create_group(&group(&["y"])).unwrap_err(), EEXIST);
    }

    #[test]
    fn remove_releases_subtree() {
        let allocator = NodeAllocator::new(None);
        let root = KObject::new_root(allocator.clone());
        let dir = root.create_and_add("dir".into()).expect("dir");
        let sub = dir.create_and_add("sub".into()).expect("sub");
        dir.create_group(&group(&["a", "b"])).expect("create group");
        sub.create_group(&group(&["c"])).expect("create group");
        assert_eq!(allocator.allocated(), 5);

        dir.remove();
        assert!(root.get_child("dir".into()).is_none());
        assert!(dir.is_removed());
        assert!(sub.is_removed());
        assert_eq!(allocator.allocated(), 0);

        dir.remove();
        assert_eq!(allocator.allocated(), 0);
        assert_eq!(dir.create_and_add("late".into()).unwrap_err(), ENOENT);
    }
}
