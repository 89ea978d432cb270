use serde::{Deserialize, Serialize};

/// Half-open offset range `[pos, end)`.
///
/// Deserialization goes through [`TextRange::new`], so reversed bounds from the wire
/// are swapped like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

#[derive(Deserialize)]
struct RawRange {
    pos: u32,
    end: u32,
}

impl From<RawRange> for TextRange {
    fn from(raw: RawRange) -> Self {
        TextRange::new(raw.pos, raw.end)
    }
}

impl TextRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(pos: u32, end: u32) -> Self {
        if pos <= end {
            Self { pos, end }
        } else {
            Self { pos: end, end: pos }
        }
    }

    pub fn empty(at: u32) -> Self {
        Self { pos: at, end: at }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    pub fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset < self.end
    }

}

/// A span as the host reports edits: start plus length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// `None` when `start + length` does not fit in a `u32`.
    pub fn checked_end(&self) -> Option<u32> {
        self.start.checked_add(self.length)
    }

    /// Exclusive end, saturating at `u32::MAX`.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    pub fn range(&self) -> TextRange {
        TextRange {
            pos: self.start,
            end: self.end(),
        }
    }
}

impl From<TextRange> for TextSpan {
    fn from(r: TextRange) -> Self {
        Self {
            start: r.pos,
            length: r.len(),
        }
    }
}

/// The host addresses refactor requests either by a caret offset or by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionOrRange {
    Position(u32),
    Range(TextRange),
}

impl PositionOrRange {
    /// The offset the request is anchored at: the caret, or the selection start.
    pub fn anchor(&self) -> u32 {
        match self {
            PositionOrRange::Position(p) => *p,
            PositionOrRange::Range(r) => r.pos,
        }
    }
}

impl From<u32> for PositionOrRange {
    fn from(p: u32) -> Self {
        PositionOrRange::Position(p)
    }
}

impl From<TextRange> for PositionOrRange {
    fn from(r: TextRange) -> Self {
        PositionOrRange::Range(r)
    }
}
