// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! NUL-terminated UTF-16 text stored in fixed [`Char16`] arrays.

use crate::ser::Char16;

/// Decode units up to the first NUL; invalid sequences become U+FFFD.
pub fn string_from_chars(chars: &[Char16]) -> String {
    let end = chars.iter().position(|c| c.is_nul()).unwrap_or(chars.len());
    let units: Vec<u16> = chars[..end].iter().map(|c| c.0).collect();
    String::from_utf16_lossy(&units)
}

/// Store `text` as UTF-16 in `target`, zero-filling the rest.
///
/// At least one trailing NUL is always kept and surrogate pairs are never
/// split. Returns the number of units written.
pub fn copy_str_to_chars(text: &str, target: &mut [Char16]) -> usize {
    let capacity = target.len().saturating_sub(1);
    let mut written = 0;
    let mut buf = [0u16; 2];
    for c in text.chars() {
        let units = c.encode_utf16(&mut buf);
        if written + units.len() > capacity {
            break;
        }
        for unit in units.iter() {
            target[written] = Char16(*unit);
            written += 1;
        }
    }
    target[written..].fill(Char16::NUL);
    written
}

/// Encode `text` into a new array of `N` units.
pub fn chars_from_str<const N: usize>(text: &str) -> [Char16; N] {
    let mut chars = [Char16::NUL; N];
    copy_str_to_chars(text, &mut chars);
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_stops_at_nul() {
        let chars = [Char16(0x48), Char16(0x69), Char16::NUL, Char16(0x21)];
        assert_eq!(string_from_chars(&chars), "Hi");
    }

    #[test]
    fn test_string_without_nul_uses_whole_array() {
        let chars: [Char16; 3] = [Char16(0x61), Char16(0x62), Char16(0x63)];
        assert_eq!(string_from_chars(&chars), "abc");
    }

    #[test]
    fn test_copy_truncates_and_keeps_terminator() {
        let mut chars = [Char16(0xFFFF); 4];
        assert_eq!(copy_str_to_chars("hello", &mut chars), 3);
        assert_eq!(string_from_chars(&chars), "hel");
        assert!(chars[3].is_nul());
    }

    #[test]
    fn test_copy_zero_fills_remainder() {
        let mut chars = [Char16(0xFFFF); 6];
        assert_eq!(copy_str_to_chars("ok", &mut chars), 2);
        assert!(chars[2..].iter().all(|c| c.is_nul()));
    }

    #[test]
    fn test_surrogate_pair_not_split() {
        let mut chars = [Char16::NUL; 3];
        assert_eq!(copy_str_to_chars("a\u{1F600}", &mut chars), 1);
        let chars: [Char16; 4] = chars_from_str("a\u{1F600}");
        assert_eq!(string_from_chars(&chars), "a\u{1F600}");
    }

    #[test]
    fn test_empty_target() {
        let mut chars: [Char16; 0] = [];
        assert_eq!(copy_str_to_chars("x", &mut chars), 0);
    }
}
