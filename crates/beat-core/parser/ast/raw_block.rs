//! Segmenter output: one span of source lines per beat

use crate::taxonomy::BeatType;

/// Single buffered source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line text without the line terminator
    pub text: String,
    /// 1-based line number in the original script
    pub number: usize,
}

/// Ordered span of source lines belonging to one beat
///
/// Created by the segmenter; a list of these is the only hand-off to the
/// beat content parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBeatBlock {
    /// Header text after `## BEAT:`, ordinal included
    pub raw_title: String,
    /// Canonicalized beat type
    pub beat_type: BeatType,
    /// Author-supplied ordinal from a trailing `#N`, default 1
    pub beat_index: u32,
    /// Header line number; `None` for the implicit leading block
    pub header_line: Option<usize>,
    /// Whether an explicit `## BEAT:` header opened this block
    pub header_present: bool,
    /// Buffered content lines in document order
    pub lines: Vec<SourceLine>,
}

impl RawBeatBlock {
    /// Open a block for an explicit header
    #[must_use]
    pub fn with_header(
        raw_title: &str,
        beat_type: BeatType,
        beat_index: u32,
        header_line: usize,
    ) -> Self {
        Self {
            raw_title: raw_title.to_string(),
            beat_type,
            beat_index,
            header_line: Some(header_line),
            header_present: true,
            lines: Vec::new(),
        }
    }

    /// Open the implicit block for content before the first header
    #[must_use]
    pub const fn implicit() -> Self {
        Self {
            raw_title: String::new(),
            beat_type: BeatType::OpeningRitual,
            beat_index: 1,
            header_line: None,
            header_present: false,
            lines: Vec::new(),
        }
    }

    /// Buffer a content line
    pub fn push_line(&mut self, text: &str, number: usize) {
        self.lines.push(SourceLine {
            text: text.to_string(),
            number,
        });
    }

    /// First line covered by this block (header or first content line)
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.header_line
            .or_else(|| self.lines.first().map(|line| line.number))
            .unwrap_or(1)
    }

    /// Last line covered by this block
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.lines
            .last()
            .map_or_else(|| self.start_line(), |line| line.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_span_of_header_block() {
        let mut block = RawBeatBlock::with_header("REVEAL #2", BeatType::Reveal, 2, 4);
        assert_eq!((block.start_line(), block.end_line()), (4, 4));
        block.push_line("Lala: \"Surprise.\"", 5);
        block.push_line("", 6);
        assert_eq!((block.start_line(), block.end_line()), (4, 6));
    }

    #[test]
    fn implicit_block_starts_at_first_line() {
        let mut block = RawBeatBlock::implicit();
        assert!(!block.header_present);
        block.push_line("Some preamble", 3);
        assert_eq!(block.start_line(), 3);
    }
}
