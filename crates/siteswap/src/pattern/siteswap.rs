//! The `Siteswap` value type: heights plus the layout they are read in.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::params::{HandRole, Layout};

/// One element of a siteswap. `role` is only tagged in sync mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Throw {
    pub height: u32,
    pub role: Option<HandRole>,
}

/// Periodic throw sequence in global notation. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Siteswap {
    heights: Vec<u32>,
    layout: Layout,
}

impl Siteswap {
    /// Wrap heights without checking validity (see `crate::pattern::is_valid`).
    pub fn new(heights: Vec<u32>, layout: Layout) -> Self {
        Self { heights, layout }
    }

    /// Single juggler, asynchronous.
    pub fn solo(heights: Vec<u32>) -> Self {
        Self::new(heights, Layout::SOLO)
    }

    /// Parse `text` and read it in `layout`.
    pub fn parse_with(text: &str, layout: Layout) -> Result<Self, SiteswapParseError> {
        Ok(Self::new(parse_heights(text)?, layout))
    }

    #[inline]
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    #[inline]
    pub fn period(&self) -> usize {
        self.heights.len()
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn height_at(&self, position: usize) -> u32 {
        self.heights[position % self.heights.len()]
    }

    pub fn throws(&self) -> impl Iterator<Item = Throw> + '_ {
        let layout = self.layout;
        self.heights.iter().enumerate().map(move |(i, &height)| Throw {
            height,
            role: layout.is_sync().then(|| layout.hand_role(i, height)),
        })
    }

    pub fn sum(&self) -> u64 {
        self.heights.iter().map(|&h| u64::from(h)).sum()
    }

    /// Objects implied by the average theorem, if the average is integral.
    pub fn number_of_objects(&self) -> Option<u32> {
        let n = self.period() as u64;
        let sum = self.sum();
        if n == 0 || sum % n != 0 {
            return None;
        }
        u32::try_from(sum / n).ok()
    }

    pub fn contains(&self, height: u32) -> bool {
        self.heights.contains(&height)
    }

    /// Rotate left by `offset` positions.
    pub fn rotated(&self, offset: usize) -> Self {
        let mut heights = self.heights.clone();
        if !heights.is_empty() {
            heights.rotate_left(offset % self.heights.len());
        }
        Self::new(heights, self.layout)
    }

    /// Lexicographically smallest rotation by whole beats; the pattern's identity.
    pub fn canonical(&self) -> Self {
        self.rotated(canonical_offset(&self.heights, self.layout.hands_per_beat))
    }

    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.heights, self.layout.hands_per_beat)
    }

    /// True if both describe the same pattern up to rotation.
    pub fn is_rotation_of(&self, other: &Self) -> bool {
        self.layout == other.layout
            && self.period() == other.period()
            && self.canonical().heights == other.canonical().heights
    }

    pub fn is_valid(&self, objects: u32) -> bool {
        super::is_valid(
            &self.heights,
            objects,
            self.layout.jugglers,
            self.layout.is_sync(),
        )
    }
}

/// Compare the rotations starting at `a` and `b`.
fn rotation_cmp(heights: &[u32], a: usize, b: usize) -> Ordering {
    let n = heights.len();
    for i in 0..n {
        match heights[(a + i) % n].cmp(&heights[(b + i) % n]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Offset of the smallest rotation among rotations by multiples of `step`.
pub(crate) fn canonical_offset(heights: &[u32], step: usize) -> usize {
    let step = step.max(1);
    let mut best = 0;
    for k in (step..heights.len()).step_by(step) {
        if rotation_cmp(heights, k, best) == Ordering::Less {
            best = k;
        }
    }
    best
}

pub(crate) fn is_canonical(heights: &[u32], step: usize) -> bool {
    (step.max(1)..heights.len())
        .step_by(step.max(1))
        .all(|k| rotation_cmp(heights, k, 0) != Ordering::Less)
}

fn height_char(h: u32) -> Option<char> {
    char::from_digit(h, 36)
}

impl fmt::Display for Siteswap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.heights.iter().all(|&h| height_char(h).is_some());
        if self.layout.is_sync() {
            for beat in self.heights.chunks(self.layout.hands_per_beat) {
                f.write_str("(")?;
                for (i, h) in beat.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{h}")?;
                }
                f.write_str(")")?;
            }
            return Ok(());
        }
        if compact {
            for &h in &self.heights {
                if let Some(c) = height_char(h) {
                    write!(f, "{c}")?;
                }
            }
            Ok(())
        } else {
            let parts: Vec<String> = self.heights.iter().map(|h| h.to_string()).collect();
            f.write_str(&parts.join(","))
        }
    }
}

/// Text could not be read as a throw sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteswapParseError {
    Empty,
    InvalidThrow { token: String },
}

impl fmt::Display for SiteswapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty siteswap"),
            Self::InvalidThrow { token } => write!(f, "invalid throw `{token}`"),
        }
    }
}

impl std::error::Error for SiteswapParseError {}

/// `"86277"`, `"a,b,3"`, `"9 7 5"` and `"(4,4)(6,2)"` are accepted.
/// Without separators every character is one throw (`a` = 10, ...).
fn parse_heights(text: &str) -> Result<Vec<u32>, SiteswapParseError> {
    let is_sep = |c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace();
    let heights: Vec<u32> = if text.chars().any(is_sep) {
        text.split(is_sep)
            .filter(|t| !t.is_empty())
            .map(parse_token)
            .collect::<Result<_, _>>()?
    } else {
        text.chars()
            .map(|c| {
                c.to_digit(36).ok_or_else(|| SiteswapParseError::InvalidThrow {
                    token: c.to_string(),
                })
            })
            .collect::<Result<_, _>>()?
    };
    if heights.is_empty() {
        return Err(SiteswapParseError::Empty);
    }
    Ok(heights)
}

fn parse_token(token: &str) -> Result<u32, SiteswapParseError> {
    if let Ok(h) = token.parse::<u32>() {
        return Ok(h);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_digit(36),
        _ => None,
    }
    .ok_or_else(|| SiteswapParseError::InvalidThrow {
        token: token.to_string(),
    })
}

impl FromStr for Siteswap {
    type Err = SiteswapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, Layout::SOLO)
    }
}
