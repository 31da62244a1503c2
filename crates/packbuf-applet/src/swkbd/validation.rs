// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Input rules derived from a keyboard configuration.
//!
//! Lengths are counted in UTF-16 code units, as the guest counts them.

use super::{KeyboardMode, SoftwareKeyboardConfig};

/// Characters allowed when input is restricted to download codes.
pub const DOWNLOAD_CODE_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J',
    'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
];

/// Characters a Mii nickname may not contain.
pub const OUTSIDE_OF_MII_NICKNAME_CHARS: &[char] = &[
    '@', '%', '\\', '\u{014D}', '\u{014C}', '\u{20BD}', '\u{20A9}', '\u{2665}', '\u{2661}',
];

/// Unicode space separators (categories Zs, Zl and Zp).
pub fn is_space_char(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x0020 | 0x00A0 | 0x1680 | 0x2000..=0x200A | 0x2028 | 0x2029 | 0x202F | 0x205F | 0x3000
    )
}

fn is_digit(codepoint: u32) -> bool {
    (u32::from('0')..=u32::from('9')).contains(&codepoint)
}

fn in_set(set: &[char], codepoint: u32) -> bool {
    set.iter().any(|&c| u32::from(c) == codepoint)
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Upper-case mapping of `c` when it is a single character, else `c` itself.
fn single_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(mapped), None) => mapped,
        _ => c,
    }
}

impl SoftwareKeyboardConfig {
    /// Whether the guest accepts `codepoint` in the input text.
    pub fn is_valid_codepoint(&self, codepoint: u32) -> bool {
        match self.keyboard_mode {
            KeyboardMode::NUMERIC => {
                let symbol = codepoint == u32::from(self.left_optional_symbol_key.0)
                    || codepoint == u32::from(self.right_optional_symbol_key.0);
                if !is_digit(codepoint) && !symbol {
                    return false;
                }
            }
            KeyboardMode::ASCII => {
                if codepoint > 0x7F {
                    return false;
                }
            }
            _ => {}
        }

        let flags = &self.invalid_chars_flags;
        if flags.space() && is_space_char(codepoint) {
            return false;
        }
        if flags.at_mark() && codepoint == u32::from('@') {
            return false;
        }
        if flags.percent() && codepoint == u32::from('%') {
            return false;
        }
        if flags.slash() && codepoint == u32::from('/') {
            return false;
        }
        if flags.backslash() && codepoint == u32::from('\\') {
            return false;
        }
        if flags.numeric() && is_digit(codepoint) {
            return false;
        }
        if flags.outside_of_download_code() && !in_set(DOWNLOAD_CODE_CHARS, codepoint) {
            return false;
        }
        if flags.outside_of_mii_nickname() && in_set(OUTSIDE_OF_MII_NICKNAME_CHARS, codepoint) {
            return false;
        }
        if !self.is_use_new_line && codepoint == u32::from('\n') {
            return false;
        }
        true
    }

    /// Whether `text` can be submitted: length within
    /// `[text_min_length, text_max_length]` and every character valid.
    pub fn is_valid_text(&self, text: &str) -> bool {
        let len = utf16_len(text);
        let min = self.text_min_length as usize;
        let max = self.text_max_length as usize;
        if len < min || len > max {
            return false;
        }
        text.chars().all(|c| self.is_valid_codepoint(u32::from(c)))
    }

    /// Filter `input` being inserted into a text of `current_len` units.
    ///
    /// Invalid characters are dropped and insertion stops at
    /// `text_max_length`. Download-code input is upper-cased first.
    pub fn filter_input(&self, current_len: usize, input: &str) -> String {
        let max = self.text_max_length as usize;
        let upper = self.invalid_chars_flags.outside_of_download_code();
        let mut filtered = String::with_capacity(input.len());
        let mut len = current_len;
        for c in input.chars() {
            let c = if upper { single_uppercase(c) } else { c };
            if !self.is_valid_codepoint(u32::from(c)) {
                continue;
            }
            if len + c.len_utf16() > max {
                break;
            }
            len += c.len_utf16();
            filtered.push(c);
        }
        if filtered.len() != input.len() {
            log::trace!(
                "[packbuf_applet::swkbd] filtered {:?} to {:?}",
                input,
                filtered
            );
        }
        filtered
    }
}
