//! Style flags.
//!
//! A style is an ordered, duplicate-free list of small integer codes. Codes
//! are shared across control families, so `LEFT` and `TOP` are the same
//! value (both are the implicit default placement).

use std::fmt;

use crate::error::{Error, Result};

/// A single integer-coded style flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleFlag(u8);

impl StyleFlag {
    // Generic control styles
    pub const TABSTOP: Self = Self(1);

    // Frame styles
    pub const ETCHED_HORZ: Self = Self(2);
    pub const ETCHED_VERT: Self = Self(3);
    pub const ETCHED_FRAME: Self = Self(4);
    pub const SUNKEN: Self = Self(5);

    // Text styles
    pub const LEFT: Self = Self(0);
    pub const TOP: Self = Self(0);
    pub const HCENTER: Self = Self(6);
    pub const RIGHT: Self = Self(7);
    pub const VCENTER: Self = Self(8);
    pub const BOTTOM: Self = Self(9);
    pub const MULTILINE: Self = Self(10);
    pub const LEFT_NO_WORDWRAP: Self = Self(11);
    pub const LEFT_TEXT: Self = Self(12);
    pub const NO_PREFIX: Self = Self(13);
    pub const EDIT_CONTROL: Self = Self(14);
    pub const END_ELLIPSIS: Self = Self(15);
    pub const PATH_ELLIPSIS: Self = Self(16);
    pub const WORD_ELLIPSIS: Self = Self(17);

    // Image styles
    pub const ICON: Self = Self(18);
    pub const BITMAP: Self = Self(19);
    pub const RIGHT_JUST: Self = Self(20);
    pub const HCENTER_IMAGE: Self = Self(21);
    pub const REAL_SIZE_IMAGE: Self = Self(22);
    pub const REAL_SIZE_CONTROL: Self = Self(23);
    pub const VCENTER_IMAGE: Self = Self(38);

    // Button styles
    pub const PUSH_BUTTON: Self = Self(24);
    pub const DEF_PUSH_BUTTON: Self = Self(25);
    pub const CHECKBOX: Self = Self(26);
    pub const AUTO_CHECKBOX: Self = Self(27);
    pub const RADIO_BUTTON: Self = Self(28);
    pub const AUTO_RADIO_BUTTON: Self = Self(29);
    pub const GROUP_BOX: Self = Self(30);
    pub const THREE_STATE: Self = Self(31);
    pub const AUTO_THREE_STATE: Self = Self(32);
    pub const COMMAND_LINK: Self = Self(33);
    pub const DEF_COMMAND_LINK: Self = Self(34);
    pub const SPLIT_BUTTON: Self = Self(35);
    pub const DEF_SPLIT_BUTTON: Self = Self(36);
    pub const PUSH_LIKE: Self = Self(37);

    const MAX_CODE: i32 = 38;

    /// Validate an integer code.
    pub fn from_code(code: i32) -> Result<Self> {
        if (0..=Self::MAX_CODE).contains(&code) {
            Ok(Self(code as u8))
        } else {
            Err(Error::InvalidStyleCode(code))
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    fn name(self) -> &'static str {
        match self.0 {
            0 => "LEFT|TOP",
            1 => "TABSTOP",
            2 => "ETCHED_HORZ",
            3 => "ETCHED_VERT",
            4 => "ETCHED_FRAME",
            5 => "SUNKEN",
            6 => "HCENTER",
            7 => "RIGHT",
            8 => "VCENTER",
            9 => "BOTTOM",
            10 => "MULTILINE",
            11 => "LEFT_NO_WORDWRAP",
            12 => "LEFT_TEXT",
            13 => "NO_PREFIX",
            14 => "EDIT_CONTROL",
            15 => "END_ELLIPSIS",
            16 => "PATH_ELLIPSIS",
            17 => "WORD_ELLIPSIS",
            18 => "ICON",
            19 => "BITMAP",
            20 => "RIGHT_JUST",
            21 => "HCENTER_IMAGE",
            22 => "REAL_SIZE_IMAGE",
            23 => "REAL_SIZE_CONTROL",
            24..=37 => "BUTTON",
            38 => "VCENTER_IMAGE",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Debug for StyleFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

impl TryFrom<i32> for StyleFlag {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

/// Ordered set of style flags. Duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleFlagSet {
    flags: Vec<StyleFlag>,
}

impl StyleFlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw integer codes, rejecting unknown codes.
    pub fn from_codes(codes: &[i32]) -> Result<Self> {
        codes
            .iter()
            .map(|&code| StyleFlag::from_code(code))
            .collect::<Result<Vec<_>>>()
            .map(Self::from_iter)
    }

    /// Append a flag unless it is already present.
    pub fn insert(&mut self, flag: StyleFlag) -> bool {
        if self.flags.contains(&flag) {
            return false;
        }
        self.flags.push(flag);
        true
    }

    /// Remove a flag, keeping the order of the rest.
    pub fn remove(&mut self, flag: StyleFlag) -> bool {
        let before = self.flags.len();
        self.flags.retain(|f| *f != flag);
        before != self.flags.len()
    }

    #[inline]
    pub fn contains(&self, flag: StyleFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleFlag> + '_ {
        self.flags.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Normalize a requested style for a widget.
    ///
    /// An empty request yields `defaults`; `forced` flags are always
    /// appended; the result is deduplicated in first-seen order.
    pub fn normalized(
        requested: &StyleFlagSet,
        defaults: &[StyleFlag],
        forced: &[StyleFlag],
    ) -> Self {
        let base: Vec<StyleFlag> = if requested.is_empty() {
            defaults.to_vec()
        } else {
            requested.flags.clone()
        };
        base.into_iter().chain(forced.iter().copied()).collect()
    }

    // Effective text behavior. LEFT_NO_WORDWRAP wins over MULTILINE.

    #[inline]
    pub fn word_wrap_disabled(&self) -> bool {
        self.contains(StyleFlag::LEFT_NO_WORDWRAP)
    }

    #[inline]
    pub fn is_multiline(&self) -> bool {
        self.contains(StyleFlag::MULTILINE)
    }

    #[inline]
    pub fn accelerators_enabled(&self) -> bool {
        !self.contains(StyleFlag::NO_PREFIX)
    }
}

impl FromIterator<StyleFlag> for StyleFlagSet {
    fn from_iter<I: IntoIterator<Item = StyleFlag>>(iter: I) -> Self {
        let mut set = StyleFlagSet::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl<const N: usize> From<[StyleFlag; N]> for StyleFlagSet {
    fn from(flags: [StyleFlag; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl From<StyleFlag> for StyleFlagSet {
    fn from(flag: StyleFlag) -> Self {
        [flag].into()
    }
}
