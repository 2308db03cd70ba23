// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::fmt;
use std::panic::Location;

/// A Linux error number, as reported to callers of sysfs operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrnoCode {
    code: u32,
    name: &'static str,
}

impl ErrnoCode {
    pub const fn error_code(&self) -> u32 {
        self.code
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The value a Linux `ssize_t` callback would return for this error.
    pub const fn return_value(&self) -> i64 {
        -(self.code as i64)
    }
}

impl fmt::Debug for ErrnoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.code)
    }
}

impl fmt::Display for ErrnoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

macro_rules! errno_codes {
    ($($name:ident = $code:expr),* $(,)?) => {
        $(pub const $name: ErrnoCode = ErrnoCode { code: $code, name: stringify!($name) };)*
    };
}

errno_codes! {
    ENOENT = 2,
    ENOMEM = 12,
    EACCES = 13,
    EEXIST = 17,
    ENOTDIR = 20,
    EISDIR = 21,
    EINVAL = 22,
    ENOSYS = 38,
}

/// An error code together with the location that produced it.
#[derive(Clone, thiserror::Error)]
#[error("{code} from {location}")]
pub struct Errno {
    pub code: ErrnoCode,
    location: &'static Location<'static>,
}

impl Errno {
    #[track_caller]
    pub fn new(code: ErrnoCode) -> Self {
        Errno { code, location: Location::caller() }
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Debug for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.code, self.location)
    }
}

impl PartialEq for Errno {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl PartialEq<ErrnoCode> for Errno {
    fn eq(&self, other: &ErrnoCode) -> bool {
        self.code == *other
    }
}

impl Eq for Errno {}

/// Builds an [`Errno`] for the named error code, e.g. `errno!(EINVAL)`.
#[macro_export]
macro_rules! errno {
    ($code:ident) => {
        $crate::uapi::errors::Errno::new($crate::uapi::errors::$code)
    };
}

/// Shorthand for `Err(errno!(CODE))`.
#[macro_export]
macro_rules! error {
    ($code:ident) => {
        Err($crate::errno!($code))
    };
}
