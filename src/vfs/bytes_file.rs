// Copyright 2026 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::error;
use crate::uapi::errors::Errno;
use std::borrow::Cow;

/// Operations of a file whose whole content is produced or consumed in one call, the way a
/// sysfs attribute's `show` and `store` callbacks work.
pub trait BytesFileOps: Send + Sync + 'static {
    fn write(&self, _data: Vec<u8>) -> Result<(), Errno> {
        error!(ENOSYS)
    }

    fn read(&self) -> Result<Cow<'_, [u8]>, Errno> {
        error!(ENOSYS)
    }
}

/// Parses a decimal integer the way the kernel's `sscanf(buf, "%d", ...)` does.
///
/// Leading whitespace is skipped, a single `-` sign is accepted and anything after the digits is
/// ignored. The digits accumulate into a wrapping 64-bit value that is then truncated to `i32`,
/// as `simple_strntoll` does, so `4294967297` reads as `1`. Input without digits fails with
/// `EINVAL`.
pub fn parse_i32_file(buf: &[u8]) -> Result<i32, Errno> {
    let start = buf.iter().position(|c| !c.is_ascii_whitespace()).unwrap_or(buf.len());
    let rest = &buf[start..];
    let (negative, digits) = match rest.split_first() {
        Some((b'-', tail)) => (true, tail),
        _ => (false, rest),
    };
    let len = digits.iter().take_while(|c| c.is_ascii_digit()).count();
    if len == 0 {
        return error!(EINVAL);
    }
    let magnitude = digits[..len].iter().fold(0u64, |acc, c| {
        acc.wrapping_mul(10).wrapping_add(u64::from(c - b'0'))
    });
    let value = if negative { magnitude.wrapping_neg() } else { magnitude };
    Ok(value as i32)
}

pub fn serialize_bool_file(value: bool) -> Vec<u8> {
    format!("{}\n", u32::from(value)).into_bytes()
}

pub fn serialize_u32_file(value: u32) -> Vec<u8> {
    format!("{value}\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uapi::errors::EINVAL;
    use test_case::test_case;

    #[test_case(b"1", 1; "bare digit")]
    #[test_case(b"1\n", 1; "trailing newline")]
    #[test_case(b"  \t42", 42; "leading whitespace")]
    #[test_case(b"-7", -7; "negative")]
    #[test_case(b"12abc", 12; "trailing garbage ignored")]
    #[test_case(b"0010", 10; "leading zeros")]
    #[test_case(b"2147483648", i32::MIN; "wraps past i32 max")]
    #[test_case(b"4294967296", 0; "wraps to zero")]
    #[test_case(b"4294967297", 1; "wraps to one")]
    #[test_case(b"-4294967297", -1; "negative wraps")]
    #[test_case(b"18446744073709551617", 1; "wraps past u64")]
    fn parses_leading_integer(input: &[u8], expected: i32) {
        assert_eq!(parse_i32_file(input), Ok(expected));
    }

    #[test_case(b""; "empty")]
    #[test_case(b"\n"; "only newline")]
    #[test_case(b"abc"; "letters")]
    #[test_case(b"-"; "lone sign")]
    #[test_case(b"+1"; "plus sign is not accepted")]
    #[test_case(b"- 1"; "space after sign")]
    fn rejects_input_without_digits(input: &[u8]) {
        assert_eq!(parse_i32_file(input).unwrap_err(), EINVAL);
    }

    #[test]
    fn serializes_bool_as_decimal_line() {
        assert_eq!(serialize_bool_file(true), b"1\n");
        assert_eq!(serialize_bool_file(false), b"0\n");
    }

    struct ReadOnly;
    impl BytesFileOps for ReadOnly {}

    #[test]
    fn default_ops_are_unsupported() {
        assert_eq!(ReadOnly.write(b"1".to_vec()).unwrap_err(), crate::uapi::errors::ENOSYS);
        assert!(ReadOnly.read().is_err());
    }
}
