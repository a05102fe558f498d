use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entries::Entry;

/// Fill color of one wheel segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SegmentColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// `#RRGGBB`, uppercase, as accepted by canvas fill styles.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for SegmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One random color per entry, positionally paired. Neighbours may collide.
pub fn assign_colors<R: Rng + ?Sized>(entries: &[Entry], rng: &mut R) -> Vec<SegmentColor> {
    entries.iter().map(|_| SegmentColor::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::regenerate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_to_hex() {
        assert_eq!(SegmentColor::new(0, 0x0a, 0xff).to_hex(), "#000AFF");
        assert_eq!(SegmentColor::new(0xab, 0xcd, 0xef).to_string(), "#ABCDEF");
    }

    #[test]
    fn test_assign_colors_one_per_entry() {
        let mut rng = StdRng::seed_from_u64(7);
        let entries = regenerate("a\nb\nc\nd").unwrap();
        let colors = assign_colors(&entries, &mut rng);
        assert_eq!(colors.len(), entries.len());
        for color in &colors {
            let hex = color.to_hex();
            assert_eq!(hex.len(), 7);
            assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
