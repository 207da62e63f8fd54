//! # Zettel Identifiers
//!
//! Notes are addressed by a dotted identifier in the spirit of Luhmann's slip box:
//! `1`, `1.a`, `1.a.2`, `1.b`. Each dot-delimited piece is a [`Segment`], and the
//! kind of segment (numeric or alphabetic) alternates from one generation to the next.
//!
//! ## Parsing Is Tolerant
//!
//! Identifiers come from hand-edited frontmatter, so [`ZettelId::parse`] never rejects
//! input:
//! - The whole string and every piece are trimmed.
//! - Empty pieces are dropped, so `".1..a."` parses as `1.a`.
//! - A piece made only of ASCII digits is [`SegmentKind::Numeric`]; anything else is
//!   [`SegmentKind::Alphabetic`].
//!
//! A mixed token such as `1a` is therefore a *single alphabetic segment*. It is not
//! split into `1` and `a`. This is intentional: splitting would change ordering and
//! allocation for every identifier that already contains such tokens.
//!
//! ## Ordering
//!
//! Identifiers compare segment by segment:
//! - A strict prefix sorts first (`1` < `1.a`).
//! - Numeric segments compare by value, not by text (`9` < `10`, `007` == `7`).
//!   Values have no width limit; comparison works on the digit strings.
//! - Alphabetic segments compare case-insensitively (`a` < `B`).
//! - At the same position, numeric always sorts before alphabetic (`2` < `a`).
//!
//! Equality and hashing follow the same rules, so `1.A` and `1.a` name the same node.
//! Descending display is obtained through [`SortOrder::apply`]; the identifiers
//! themselves only know the ascending order.
//!
//! ## Incrementing
//!
//! [`Segment::increment`] yields the next segment of the same kind:
//! - Numeric: decimal value plus one (`99` → `100`, `007` → `8`).
//! - Alphabetic: spreadsheet-column style base-26 over `a..z` with carry
//!   (`z` → `aa`, `az` → `ba`, `zz` → `aaa`). The result is upper-case only when the
//!   input had letters and none of them were lower-case (`Z` → `AA`).
//!
//! Both run on strings of arbitrary length and never overflow.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Separator between segments in the rendered form.
pub const SEPARATOR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    // Declaration order matters: numeric sorts before alphabetic.
    Numeric,
    Alphabetic,
}

/// One dot-delimited component of an identifier.
///
/// The original text is kept verbatim (case, leading zeros) for display; comparison,
/// equality and hashing use the normalized form.
#[derive(Debug, Clone)]
pub struct Segment {
    text: String,
    kind: SegmentKind,
}

impl Segment {
    /// Parses a single piece. Returns `None` when the trimmed piece is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let kind = if text.bytes().all(|b| b.is_ascii_digit()) {
            SegmentKind::Numeric
        } else {
            SegmentKind::Alphabetic
        };
        Some(Self {
            text: text.to_string(),
            kind,
        })
    }

    /// The first segment of the given kind: `1` or `a`.
    pub fn first(kind: SegmentKind) -> Self {
        let text = match kind {
            SegmentKind::Numeric => "1",
            SegmentKind::Alphabetic => "a",
        };
        Self {
            text: text.to_string(),
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == SegmentKind::Numeric
    }

    /// Returns the next segment of the same kind.
    pub fn increment(&self) -> Self {
        let text = match self.kind {
            SegmentKind::Numeric => increment_decimal(&self.text),
            SegmentKind::Alphabetic => increment_alphabetic(&self.text),
        };
        Self {
            text,
            kind: self.kind,
        }
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars().flat_map(char::to_lowercase)
    }
}

/// Strips leading zeros, keeping a single `0` for an all-zero value.
fn significant_digits(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<u8> = significant_digits(digits).bytes().collect();
    let mut pos = out.len();
    loop {
        if pos == 0 {
            out.insert(0, b'1');
            break;
        }
        pos -= 1;
        if out[pos] == b'9' {
            out[pos] = b'0';
        } else {
            out[pos] += 1;
            break;
        }
    }
    out.into_iter().map(char::from).collect()
}

fn increment_alphabetic(text: &str) -> String {
    let upper = text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase);
    let mut chars: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();

    // Carry runs over the trailing ASCII letters; any other character stops it and the
    // overflow digit is inserted right after that character.
    let mut pos = chars.len();
    let mut carry = true;
    while carry && pos > 0 {
        match chars[pos - 1] {
            'z' => {
                chars[pos - 1] = 'a';
                pos -= 1;
            }
            c @ 'a'..='y' => {
                chars[pos - 1] = char::from(c as u8 + 1);
                carry = false;
            }
            _ => break,
        }
    }
    if carry {
        chars.insert(pos, 'a');
    }

    let out: String = chars.into_iter().collect();
    if upper {
        out.to_uppercase()
    } else {
        out
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.kind, other.kind) {
            (SegmentKind::Numeric, SegmentKind::Numeric) => {
                let a = significant_digits(&self.text);
                let b = significant_digits(&other.text);
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (SegmentKind::Alphabetic, SegmentKind::Alphabetic) => self.folded().cmp(other.folded()),
            (a, b) => a.cmp(&b),
        }
    }
}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        match self.kind {
            SegmentKind::Numeric => significant_digits(&self.text).hash(state),
            SegmentKind::Alphabetic => {
                for c in self.folded() {
                    c.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A dotted sequence of segments. The empty identifier denotes the tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZettelId {
    segments: Vec<Segment>,
}

impl ZettelId {
    /// Tolerant parse; never fails. Blank input yields the root identifier.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text.trim().split(SEPARATOR).filter_map(Segment::parse).collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The identifier one level up, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// This identifier extended by one trailing segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Segment-wise prefix test. Every identifier starts with itself and with the root.
    pub fn starts_with(&self, prefix: &ZettelId) -> bool {
        prefix.len() <= self.len() && self.segments[..prefix.len()] == prefix.segments[..]
    }

    /// True when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &ZettelId) -> bool {
        self.len() > ancestor.len() && self.starts_with(ancestor)
    }

    /// Every non-empty prefix, shortest first, ending with `self`.
    pub fn prefixes(&self) -> impl Iterator<Item = ZettelId> + '_ {
        (1..=self.segments.len()).map(move |n| Self {
            segments: self.segments[..n].to_vec(),
        })
    }
}

impl fmt::Display for ZettelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for ZettelId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for ZettelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ascending comparison of two identifiers.
pub fn compare(a: &ZettelId, b: &ZettelId) -> Ordering {
    a.cmp(b)
}

/// Display direction for sibling ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
