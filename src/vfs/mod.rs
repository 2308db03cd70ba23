// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod bytes_file;

pub use bytes_file::*;

pub type FsString = bstr::BString;
pub type FsStr = bstr::BStr;
