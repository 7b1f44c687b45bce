use crate::error::{KinetypeError, KinetypeResult};
use crate::rng::Rng64;

/// Default scramble alphabet.
pub const DEFAULT_GLYPHS: &str = "!<>-_\\/[]{}—=+*^?#";

/// Non-empty set of candidate glyphs shown while a position is resolving.
///
/// Serializes as a plain string, one glyph per `char`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlyphSet {
    chars: Vec<char>,
}

impl GlyphSet {
    /// Create a validated glyph set from a string of candidate glyphs.
    pub fn new(glyphs: &str) -> KinetypeResult<Self> {
        let chars: Vec<char> = glyphs.chars().collect();
        if chars.is_empty() {
            return Err(KinetypeError::validation("GlyphSet must not be empty"));
        }
        Ok(Self { chars })
    }

    /// Number of glyphs in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Draw one glyph uniformly.
    pub fn pick(&self, rng: &mut Rng64) -> char {
        let idx = rng.next_below(self.chars.len() as u64) as usize;
        self.chars[idx]
    }

    /// Return `true` when `c` is a member of the set.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_GLYPHS.chars().collect(),
        }
    }
}

impl TryFrom<String> for GlyphSet {
    type Error = KinetypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<GlyphSet> for String {
    fn from(value: GlyphSet) -> Self {
        value.chars.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert!(GlyphSet::new("").is_err());
    }

    #[test]
    fn default_set_matches_constant() {
        let set = GlyphSet::default();
        assert_eq!(String::from(set.clone()), DEFAULT_GLYPHS);
        assert!(set.contains('—'));
        assert!(set.contains('#'));
    }

    #[test]
    fn picks_stay_inside_the_set() {
        let set = GlyphSet::new("ab#").unwrap();
        let mut rng = Rng64::new(42);
        for _ in 0..200 {
            assert!(set.contains(set.pick(&mut rng)));
        }
    }

    #[test]
    fn serde_round_trips_as_string() {
        let set = GlyphSet::new("<>?").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"<>?\"");
        let back: GlyphSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<GlyphSet>("\"\"").is_err());
    }
}
