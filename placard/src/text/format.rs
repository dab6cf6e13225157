//! Text formatting: raw text to display lines.
//!
//! `format_text` is a pure function of its inputs. It splits on the text's
//! own newlines, then greedily fits each physical line into the rect width,
//! preferring to break after the last space and falling back to breaking
//! between letters.

use super::accelerator::{self, MARKER};
use crate::primitives::BoundingRect;
use crate::style::{StyleFlag, StyleFlagSet};
use crate::surface::MetricsProvider;

/// One display line with its accelerator markers removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedLine {
    text: String,
    /// Char offsets into `text` of the characters to underline.
    accelerators: Vec<usize>,
}

impl FormattedLine {
    fn from_segment(segment: &[char], accelerators_enabled: bool) -> Self {
        if accelerators_enabled {
            let (shown, accelerators) = accelerator::strip(segment);
            Self {
                text: shown.into_iter().collect(),
                accelerators,
            }
        } else {
            Self {
                text: segment.iter().collect(),
                accelerators: Vec::new(),
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn accelerators(&self) -> &[usize] {
        &self.accelerators
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.accelerators.is_empty()
    }

    /// The line as source text, markers restored.
    pub fn marked(&self) -> String {
        let shown: Vec<char> = self.text.chars().collect();
        accelerator::restore(&shown, &self.accelerators)
            .into_iter()
            .collect()
    }
}

/// Ordered display lines produced by [`format_text`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedText {
    lines: Vec<FormattedLine>,
}

impl FormattedText {
    pub fn lines(&self) -> &[FormattedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FormattedLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormattedLine> {
        self.lines.iter()
    }

    /// Displayed text of each line.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(FormattedLine::text).collect()
    }

    /// Newline-joined source text; formatting it again with the same
    /// inputs reproduces these lines.
    pub fn to_source_text(&self) -> String {
        self.lines
            .iter()
            .map(FormattedLine::marked)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Break `text` into display lines that fit `rect.width`.
///
/// With `LEFT_NO_WORDWRAP` every physical line is kept whole and left for
/// the renderer to clip. Otherwise a line that does not fit breaks after
/// its last space; a line with no space breaks between letters when
/// `MULTILINE` is set or `wrap_at_letter` is true, and is kept whole
/// otherwise.
pub fn format_text(
    text: &str,
    metrics: &dyn MetricsProvider,
    rect: BoundingRect,
    flags: &StyleFlagSet,
    wrap_at_letter: bool,
) -> FormattedText {
    if text.is_empty() {
        return FormattedText::default();
    }

    let text: String = text.chars().filter(|&c| c != '\t').collect();

    let mut segments: Vec<Vec<char>> = Vec::new();
    for physical in physical_lines(&text) {
        if physical.is_empty() {
            segments.push(Vec::new());
            continue;
        }

        let mut line: Vec<char> = physical.chars().collect();
        while !line.is_empty() {
            let (segment, rest) = break_line(line, metrics, rect.width, flags, wrap_at_letter);
            segments.push(segment);
            line = rest;
        }
    }

    // A trailing blank line would not survive a newline-join round trip.
    if segments.last().is_some_and(Vec::is_empty) {
        segments.pop();
    }

    let accelerators = flags.accelerators_enabled();
    FormattedText {
        lines: segments
            .iter()
            .map(|segment| FormattedLine::from_segment(segment, accelerators))
            .collect(),
    }
}

/// Split on every line boundary: `\n`, `\r\n`, a lone `\r`, vertical tab,
/// form feed, the file/group/record separators, NEL and the Unicode line
/// and paragraph separators. A final boundary does not open an empty line.
pub(crate) fn physical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, n)| n == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split one wrap step off `line`. Both halves keep their markers.
fn break_line(
    mut line: Vec<char>,
    metrics: &dyn MetricsProvider,
    width: u32,
    flags: &StyleFlagSet,
    wrap_at_letter: bool,
) -> (Vec<char>, Vec<char>) {
    if flags.word_wrap_disabled() {
        return (line, Vec::new());
    }

    let accelerators = flags.accelerators_enabled();
    let (shown, offsets) = if accelerators {
        accelerator::strip(&line)
    } else {
        (line.clone(), Vec::new())
    };

    // Grow the prefix until it overflows or the line runs out.
    let mut fitted = 0;
    let mut prefix = String::new();
    let mut prefix_width = metrics.measure(&prefix);
    while prefix_width <= width && fitted < shown.len() {
        prefix.push(shown[fitted]);
        fitted += 1;
        prefix_width = metrics.measure(&prefix);
    }
    let overflowed = prefix_width > width;

    // Displayed count to marked index. Markers before the cut travel with
    // it; a trailing marker belongs to a line that fits whole.
    let marked_len = line.len();
    let to_marked = |n: usize| {
        if n >= shown.len() {
            marked_len
        } else {
            n + offsets.iter().filter(|&&o| o < n).count()
        }
    };

    let wrap_letters = flags.is_multiline() || wrap_at_letter;
    let mut removed_space = false;
    let mut k = to_marked(fitted);

    if fitted < shown.len() || overflowed {
        let after_space = line[..k]
            .iter()
            .rposition(|&c| c == ' ')
            .map_or(0, |p| p + 1);

        if after_space == 0 {
            if wrap_letters {
                // The overflowing letter moves to the next line.
                if overflowed {
                    k = to_marked(fitted.saturating_sub(1));
                }
            } else {
                k = line.len();
            }
        } else if flags.contains(StyleFlag::WORD_ELLIPSIS) {
            k = after_space - 1;
            line.remove(k);
            removed_space = true;
        } else {
            k = after_space;
        }
    } else if !wrap_letters {
        k = line[k..]
            .iter()
            .position(|&c| c == ' ')
            .map_or(line.len(), |p| k + p);
    }

    // A marker stays with the character it decorates.
    if accelerators {
        while k > 0 && k < line.len() && line[k - 1] == MARKER {
            k -= 1;
        }
    }

    if k == 0 && !removed_space {
        k = if accelerators {
            accelerator::first_shown_end(&line)
        } else {
            1
        };
    }

    let rest = line.split_off(k);
    (line, rest)
}
