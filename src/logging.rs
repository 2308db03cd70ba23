// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::uapi::auth::FsCred;
use std::cell::RefCell;
use std::fmt;

// This needs to be available to the macros in this module without clients having to depend on
// tracing themselves.
#[doc(hidden)]
pub use tracing as __tracing;

/// Describes who triggered the code that is currently logging.
#[derive(Clone, Copy)]
enum CallerDebugInfo {
    /// Module lifecycle code (init, teardown) and anything else not driven by a sysfs access.
    Kernel,
    /// A sysfs read or write issued with these credentials.
    User { uid: u32, gid: u32 },
    /// Logging from the destructor of a thread local variable.
    Unknown,
}

thread_local! {
    static CURRENT_CALLER_INFO: RefCell<CallerDebugInfo> =
        const { RefCell::new(CallerDebugInfo::Kernel) };
}

impl fmt::Display for CallerDebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kernel => write!(f, "kthread"),
            Self::User { uid, gid } => write!(f, "uid={uid},gid={gid}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[inline]
pub const fn logs_enabled() -> bool {
    !cfg!(feature = "disable_logging")
}

#[inline]
pub const fn trace_debug_logs_enabled() -> bool {
    logs_enabled() && cfg!(debug_assertions)
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logging::trace_debug_logs_enabled() {
            $crate::logging::with_current_caller_info(|_caller| {
                $crate::logging::__tracing::debug!(tag = %_caller, $($arg)*);
            });
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if $crate::logging::logs_enabled() {
            $crate::logging::with_current_caller_info(|_caller| {
                $crate::logging::__tracing::info!(tag = %_caller, $($arg)*);
            });
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if $crate::logging::logs_enabled() {
            $crate::logging::with_current_caller_info(|_caller| {
                $crate::logging::__tracing::warn!(tag = %_caller, $($arg)*);
            });
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if $crate::logging::logs_enabled() {
            $crate::logging::with_current_caller_info(|_caller| {
                $crate::logging::__tracing::error!(tag = %_caller, $($arg)*);
            });
        }
    };
}

/// Restores the previous caller context when dropped.
pub struct CallerInfoGuard {
    previous: CallerDebugInfo,
}

impl Drop for CallerInfoGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        let _ = CURRENT_CALLER_INFO.try_with(|info| *info.borrow_mut() = previous);
    }
}

/// Tags log messages from this thread with `cred` until the returned guard is dropped.
#[must_use]
pub fn set_current_caller_info(cred: &FsCred) -> CallerInfoGuard {
    let caller = CallerDebugInfo::User { uid: cred.uid, gid: cred.gid };
    let previous = CURRENT_CALLER_INFO
        .try_with(|info| info.replace(caller))
        .unwrap_or(CallerDebugInfo::Unknown);
    CallerInfoGuard { previous }
}

/// Access this thread's caller info. Intended for use internally by the log macros.
#[doc(hidden)]
pub fn with_current_caller_info<T>(f: impl Fn(&(dyn fmt::Display)) -> T) -> T {
    match CURRENT_CALLER_INFO.try_with(|info| f(&*info.borrow())) {
        Ok(value) => value,
        Err(_) => f(&CallerDebugInfo::Unknown),
    }
}
