//! Accelerator (mnemonic) markers.
//!
//! An `&` marks the character after it for underlining. Markers are never
//! displayed; every `&` in the text is a marker unless the widget carries
//! `NO_PREFIX`.

pub const MARKER: char = '&';

/// Remove every marker from `line`.
///
/// Returns the displayed characters and, for each marker, the offset of
/// the displayed character it decorates.
pub fn strip(line: &[char]) -> (Vec<char>, Vec<usize>) {
    let mut shown = Vec::with_capacity(line.len());
    let mut offsets = Vec::new();
    for &c in line {
        if c == MARKER {
            offsets.push(shown.len());
        } else {
            shown.push(c);
        }
    }
    (shown, offsets)
}

/// Put markers back in front of the characters they decorate.
pub fn restore(shown: &[char], offsets: &[usize]) -> Vec<char> {
    let mut line = shown.to_vec();
    for &offset in offsets.iter().rev() {
        line.insert(offset.min(line.len()), MARKER);
    }
    line
}

/// Index just past the first displayed character of a marked line.
pub(crate) fn first_shown_end(line: &[char]) -> usize {
    let leading = line.iter().take_while(|&&c| c == MARKER).count();
    (leading + 1).min(line.len())
}
