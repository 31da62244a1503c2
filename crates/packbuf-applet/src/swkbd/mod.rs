// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Software keyboard applet configuration.
//!
//! [`SoftwareKeyboardConfig`] mirrors the native `KeyboardConfigVB` block
//! (0x4C8 bytes) the guest hands to the keyboard applet. The small wrapper
//! structs mirror the native enums and flag words, which are stored as
//! plain integers.

mod validation;

pub use validation::{is_space_char, DOWNLOAD_CODE_CHARS, OUTSIDE_OF_MII_NICKNAME_CHARS};

use packbuf::{Char16, Composite, Padding};

/// Wire size of [`SoftwareKeyboardConfig`].
pub const KEYBOARD_CONFIG_SIZE: usize = 0x4C8;

/// Entries of [`SoftwareKeyboardConfig::customized_dic_info_list`].
pub const CUSTOMIZED_DICTIONARY_COUNT: usize = 0x18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct KeyboardMode {
    pub mode: u32,
}

impl KeyboardMode {
    pub const FULL: Self = Self { mode: 0 };
    pub const NUMERIC: Self = Self { mode: 1 };
    pub const ASCII: Self = Self { mode: 2 };
    pub const FULL_LATIN: Self = Self { mode: 3 };
    pub const ALPHABET: Self = Self { mode: 4 };
    pub const SIMPLIFIED_CHINESE: Self = Self { mode: 5 };
    pub const TRADITIONAL_CHINESE: Self = Self { mode: 6 };
    pub const KOREAN: Self = Self { mode: 7 };
    pub const LANGUAGE_SET2: Self = Self { mode: 8 };
    pub const LANGUAGE_SET2_LATIN: Self = Self { mode: 9 };
}

/// Characters the guest forbids, one bit per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct InvalidCharFlags {
    pub flags: u32,
}

macro_rules! flag_accessors {
    ($($get:ident, $set:ident, $bit:expr;)*) => {
        $(
            pub fn $get(&self) -> bool {
                self.flags & (1 << $bit) != 0
            }

            pub fn $set(&mut self, value: bool) {
                if value {
                    self.flags |= 1 << $bit;
                } else {
                    self.flags &= !(1 << $bit);
                }
            }
        )*
    };
}

impl InvalidCharFlags {
    flag_accessors! {
        space, set_space, 1;
        at_mark, set_at_mark, 2;
        percent, set_percent, 3;
        slash, set_slash, 4;
        backslash, set_backslash, 5;
        numeric, set_numeric, 6;
        outside_of_download_code, set_outside_of_download_code, 7;
        outside_of_mii_nickname, set_outside_of_mii_nickname, 8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct InitialCursorPos {
    pub pos: u32,
}

impl InitialCursorPos {
    pub const FIRST: Self = Self { pos: 0 };
    pub const LAST: Self = Self { pos: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct PasswordMode {
    pub mode: u32,
}

impl PasswordMode {
    pub const SHOW: Self = Self { mode: 0 };
    pub const HIDE: Self = Self { mode: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct InputFormMode {
    pub mode: u32,
}

impl InputFormMode {
    pub const ONE_LINE: Self = Self { mode: 0 };
    pub const MULTI_LINE: Self = Self { mode: 1 };
    pub const SEPARATE: Self = Self { mode: 2 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct DictionaryLanguage {
    pub lang: u16,
}

/// Location of one customized dictionary in guest memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Composite)]
pub struct DictionaryInfo {
    pub offset: u32,
    pub size: u16,
    pub dictionary_lang: DictionaryLanguage,
}

/// Native `KeyboardConfigVB`.
///
/// Text fields are NUL-terminated UTF-16; see [`packbuf::text`] for
/// conversions.
#[derive(Debug, Clone, PartialEq, Composite)]
#[packbuf(name = "KeyboardConfigVB")]
pub struct SoftwareKeyboardConfig {
    pub keyboard_mode: KeyboardMode,
    pub ok_text: [Char16; 0x9],
    pub left_optional_symbol_key: Char16,
    pub right_optional_symbol_key: Char16,
    pub is_prediction_enabled: bool,
    #[packbuf(padding = 0x1)]
    pub _pad0: Padding,
    pub invalid_chars_flags: InvalidCharFlags,
    pub initial_cursor_pos: InitialCursorPos,
    pub header_text: [Char16; 0x41],
    pub sub_text: [Char16; 0x81],
    pub guide_text: [Char16; 0x101],
    #[packbuf(padding = 0x2)]
    pub _pad2: Padding,
    pub text_max_length: u32,
    pub text_min_length: u32,
    pub password_mode: PasswordMode,
    pub input_form_mode: InputFormMode,
    pub is_use_new_line: bool,
    pub is_use_utf8: bool,
    pub is_use_blur_background: bool,
    #[packbuf(padding = 0x1)]
    pub _pad3: Padding,
    pub initial_string_offset: u32,
    pub initial_string_length: u32,
    pub user_dictionary_offset: u32,
    pub user_dictionary_num: u32,
    pub is_use_text_check: bool,
    #[packbuf(padding = 0x3)]
    pub _reserved0: Padding,
    pub separate_text_pos: [u32; 0x8],
    pub customized_dic_info_list: [DictionaryInfo; CUSTOMIZED_DICTIONARY_COUNT],
    pub customized_dic_count: u8,
    pub is_cancel_button_disabled: bool,
    #[packbuf(padding = 0xD)]
    pub _reserved1: Padding,
    pub trigger: u8,
    #[packbuf(padding = 0x4)]
    pub _reserved2: Padding,
}

impl Default for SoftwareKeyboardConfig {
    fn default() -> Self {
        Self {
            keyboard_mode: KeyboardMode::FULL,
            ok_text: [Char16::NUL; 0x9],
            left_optional_symbol_key: Char16::NUL,
            right_optional_symbol_key: Char16::NUL,
            is_prediction_enabled: false,
            _pad0: Padding,
            invalid_chars_flags: InvalidCharFlags::default(),
            initial_cursor_pos: InitialCursorPos::FIRST,
            header_text: [Char16::NUL; 0x41],
            sub_text: [Char16::NUL; 0x81],
            guide_text: [Char16::NUL; 0x101],
            _pad2: Padding,
            text_max_length: 0,
            text_min_length: 0,
            password_mode: PasswordMode::SHOW,
            input_form_mode: InputFormMode::ONE_LINE,
            is_use_new_line: false,
            is_use_utf8: false,
            is_use_blur_background: false,
            _pad3: Padding,
            initial_string_offset: 0,
            initial_string_length: 0,
            user_dictionary_offset: 0,
            user_dictionary_num: 0,
            is_use_text_check: false,
            _reserved0: Padding,
            separate_text_pos: [0; 0x8],
            customized_dic_info_list: [DictionaryInfo::default(); CUSTOMIZED_DICTIONARY_COUNT],
            customized_dic_count: 0,
            is_cancel_button_disabled: false,
            _reserved1: Padding,
            trigger: 0,
            _reserved2: Padding,
        }
    }
}

impl SoftwareKeyboardConfig {
    pub fn ok_text(&self) -> String {
        packbuf::text::string_from_chars(&self.ok_text)
    }

    pub fn header_text(&self) -> String {
        packbuf::text::string_from_chars(&self.header_text)
    }

    pub fn sub_text(&self) -> String {
        packbuf::text::string_from_chars(&self.sub_text)
    }

    pub fn guide_text(&self) -> String {
        packbuf::text::string_from_chars(&self.guide_text)
    }
}
