//! Price display.

use serde::{Deserialize, Serialize};

use archiv_core::ValueObject;

/// Digit group separator used by ru-RU number formatting (no-break space).
const GROUP_SEPARATOR: char = '\u{a0}';

/// An amount in whole rubles, displayed like `15 000 ₽`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rubles(pub u64);

impl Rubles {
    pub fn amount(self) -> u64 {
        self.0
    }

    /// Digits grouped by thousands, without the currency sign.
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(ch);
        }
        out
    }
}

impl ValueObject for Rubles {}

impl core::fmt::Display for Rubles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ₽", self.grouped())
    }
}

impl From<u64> for Rubles {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(Rubles(15_000).to_string(), "15\u{a0}000 ₽");
        assert_eq!(Rubles(1_234_567).grouped(), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(Rubles(0).to_string(), "0 ₽");
        assert_eq!(Rubles(999).grouped(), "999");
        assert_eq!(Rubles(1_000).grouped(), "1\u{a0}000");
    }
}
