//! Filters over ordered sub-sequences of one juggler's throws.

use std::fmt;

use super::Polarity;
use crate::params::Layout;
use crate::pattern::Siteswap;

/// One element of a sub-sequence pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternToken {
    Height(u32),
    /// `*`: any throw.
    Any,
    /// `p`: any pass.
    Pass,
    /// `s`: any non-zero self throw.
    SelfThrow,
}

impl PatternToken {
    #[inline]
    fn matches(self, layout: Layout, height: u32) -> bool {
        match self {
            Self::Height(h) => height == h,
            Self::Any => true,
            Self::Pass => layout.is_pass(height),
            Self::SelfThrow => height > 0 && !layout.is_pass(height),
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height(h) => write!(f, "{h}"),
            Self::Any => f.write_str("*"),
            Self::Pass => f.write_str("p"),
            Self::SelfThrow => f.write_str("s"),
        }
    }
}

/// Pattern text could not be tokenized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternParseError {
    Empty,
    InvalidToken { token: String },
}

impl fmt::Display for PatternParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty pattern"),
            Self::InvalidToken { token } => write!(f, "invalid pattern token `{token}`"),
        }
    }
}

impl std::error::Error for PatternParseError {}

/// Matches `tokens` against the cyclic stream of a juggler's own throws
/// (positions `j, j + J, j + 2J, ...`). With `juggler == None` any juggler
/// may contain the match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternFilter {
    pub tokens: Vec<PatternToken>,
    pub polarity: Polarity,
    pub jugglers: usize,
    pub juggler: Option<usize>,
}

impl PatternFilter {
    pub fn new(tokens: Vec<PatternToken>, polarity: Polarity, jugglers: usize) -> Self {
        Self {
            tokens,
            polarity,
            jugglers: jugglers.max(1),
            juggler: None,
        }
    }

    /// Tokens separated by whitespace or commas (`"3 p *"`), or one token per
    /// character without separators (`"3p*"`).
    pub fn parse(
        text: &str,
        polarity: Polarity,
        jugglers: usize,
    ) -> Result<Self, PatternParseError> {
        let is_sep = |c: char| c == ',' || c.is_whitespace();
        let tokens: Vec<PatternToken> = if text.chars().any(is_sep) {
            text.split(is_sep)
                .filter(|t| !t.is_empty())
                .map(parse_token)
                .collect::<Result<_, _>>()?
        } else {
            text.chars()
                .map(|c| parse_token(c.encode_utf8(&mut [0u8; 4])))
                .collect::<Result<_, _>>()?
        };
        if tokens.is_empty() {
            return Err(PatternParseError::Empty);
        }
        Ok(Self::new(tokens, polarity, jugglers))
    }

    pub fn for_juggler(mut self, juggler: usize) -> Self {
        self.juggler = Some(juggler);
        self
    }

    /// True if the pattern occurs (cyclically) in a juggler's stream.
    pub fn matches(&self, siteswap: &Siteswap) -> bool {
        let n = siteswap.period();
        if n == 0 {
            return false;
        }
        if self.tokens.is_empty() {
            return true;
        }
        let jugglers = self.jugglers.max(1);
        let layout = Layout::new(jugglers, false);
        let stream_len = n / gcd(n, jugglers);
        let mut candidates = match self.juggler {
            Some(j) => j..j + 1,
            None => 0..jugglers.min(n),
        };
        candidates.any(|j| {
            (0..stream_len).any(|start| {
                self.tokens.iter().enumerate().all(|(m, token)| {
                    let position = (j + (start + m) * jugglers) % n;
                    token.matches(layout, siteswap.height_at(position))
                })
            })
        })
    }

    pub fn accepts(&self, siteswap: &Siteswap) -> bool {
        self.polarity.verdict(self.matches(siteswap))
    }
}

fn parse_token(token: &str) -> Result<PatternToken, PatternParseError> {
    match token {
        "*" => return Ok(PatternToken::Any),
        "p" | "P" => return Ok(PatternToken::Pass),
        "s" | "S" => return Ok(PatternToken::SelfThrow),
        _ => {}
    }
    if let Ok(h) = token.parse::<u32>() {
        return Ok(PatternToken::Height(h));
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_digit(36).map(PatternToken::Height),
        _ => None,
    }
    .ok_or_else(|| PatternParseError::InvalidToken {
        token: token.to_string(),
    })
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl fmt::Display for PatternFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pattern", self.polarity)?;
        for t in &self.tokens {
            write!(f, " {t}")?;
        }
        if let Some(j) = self.juggler {
            write!(f, " for juggler {j}")?;
        }
        Ok(())
    }
}
