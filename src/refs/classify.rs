//! Line classification
//!
//! Decides per raw line whether it sits in a `////` block comment or is a
//! `//` line comment. Block comments do not nest: every delimiter toggles.

/// Line that opens or closes a block comment
pub const BLOCK_COMMENT_DELIMITER: &str = "////";

/// Prefix of a single-line comment
pub const LINE_COMMENT_MARKER: &str = "//";

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    InBlockComment,
}

/// What the scanner should do with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Process,
    Skip,
}

impl LineState {
    /// Classify `line` given the current state; returns the next state
    pub fn classify(self, line: &str) -> (LineState, LineAction) {
        if line.starts_with(BLOCK_COMMENT_DELIMITER) {
            return (self.toggled(), LineAction::Skip);
        }

        match self {
            LineState::InBlockComment => (self, LineAction::Skip),
            LineState::Normal if line.starts_with(LINE_COMMENT_MARKER) => (self, LineAction::Skip),
            LineState::Normal => (self, LineAction::Process),
        }
    }

    fn toggled(self) -> LineState {
        match self {
            LineState::Normal => LineState::InBlockComment,
            LineState::InBlockComment => LineState::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_processed() {
        let (state, action) = LineState::Normal.classify("Some text <<a>>");
        assert_eq!(state, LineState::Normal);
        assert_eq!(action, LineAction::Process);
    }

    #[test]
    fn test_delimiter_toggles_and_skips() {
        let (state, action) = LineState::Normal.classify("////");
        assert_eq!(state, LineState::InBlockComment);
        assert_eq!(action, LineAction::Skip);

        let (state, action) = state.classify("////");
        assert_eq!(state, LineState::Normal);
        assert_eq!(action, LineAction::Skip);
    }

    #[test]
    fn test_inside_block_skipped() {
        let (state, action) = LineState::InBlockComment.classify("[[hidden]]");
        assert_eq!(state, LineState::InBlockComment);
        assert_eq!(action, LineAction::Skip);
    }

    #[test]
    fn test_line_comment_skipped() {
        let (state, action) = LineState::Normal.classify("// [[commented]]");
        assert_eq!(state, LineState::Normal);
        assert_eq!(action, LineAction::Skip);
    }

    #[test]
    fn test_longer_delimiter_still_toggles() {
        let (state, _) = LineState::Normal.classify("//////");
        assert_eq!(state, LineState::InBlockComment);
    }

    #[test]
    fn test_indented_markers_are_content() {
        let (_, action) = LineState::Normal.classify("  // not a comment");
        assert_eq!(action, LineAction::Process);
        let (state, _) = LineState::Normal.classify(" ////");
        assert_eq!(state, LineState::Normal);
    }
}
