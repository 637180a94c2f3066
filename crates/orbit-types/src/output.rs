//! Terminal output data model.
//!
//! The session transcript is an append-only sequence of [`OutputLine`]s.
//! Each line is either the echo of a submitted command or a response block
//! made of [`TextSegment`]s. Segments carry a display-only [`Emphasis`]
//! classification; mapping it to actual styling is the renderer's job.

/// Display-only classification attached to a segment of response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Regular output text.
    #[default]
    Normal,
    /// Accented text (headings, identities).
    Highlight,
    /// Error text.
    Error,
    /// Positive/confirmation text.
    Success,
}

/// One display line inside a response block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// The text to display.
    pub text: String,
    /// Display emphasis.
    pub emphasis: Emphasis,
    /// Render verbatim (ASCII art) instead of reflowing.
    pub preformatted: bool,
}

impl TextSegment {
    /// A segment with normal emphasis.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Normal,
            preformatted: false,
        }
    }

    /// A segment with highlight emphasis.
    pub fn highlight(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Highlight,
            preformatted: false,
        }
    }

    /// A segment with error emphasis.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Error,
            preformatted: false,
        }
    }

    /// A segment with success emphasis.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Success,
            preformatted: false,
        }
    }

    /// Mark this segment as preformatted (rendered verbatim).
    pub fn preformatted(mut self) -> Self {
        self.preformatted = true;
        self
    }
}

/// A unit of terminal output. Immutable once appended; ordering is
/// append-order and renders top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// The echoed prompt + command text.
    CommandEcho(String),
    /// A block of response segments.
    Response(Vec<TextSegment>),
}

impl OutputLine {
    /// The response segments, if this is a response line.
    pub fn segments(&self) -> Option<&[TextSegment]> {
        match self {
            Self::Response(segs) => Some(segs),
            Self::CommandEcho(_) => None,
        }
    }

    /// Concatenated plain text of the line (echo text or joined segments).
    /// Mostly useful in tests and logs.
    pub fn as_text(&self) -> String {
        match self {
            Self::CommandEcho(text) => text.clone(),
            Self::Response(segs) => segs
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
