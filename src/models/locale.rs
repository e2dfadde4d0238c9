//! Digit rendering for display labels.

/// Digit set used when rendering center numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitLocale {
    /// ASCII digits `0-9`
    Latin,
    /// Bengali digits `০-৯`
    #[default]
    Bengali,
}

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

impl DigitLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigitLocale::Latin => "latin",
            DigitLocale::Bengali => "bengali",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latin" | "en" | "ascii" => Some(DigitLocale::Latin),
            "bengali" | "bn" => Some(DigitLocale::Bengali),
            _ => None,
        }
    }

    /// Replace every ASCII digit in `text` with this locale's digit.
    pub fn render(&self, text: &str) -> String {
        match self {
            DigitLocale::Latin => text.to_string(),
            DigitLocale::Bengali => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) if c.is_ascii_digit() => BENGALI_DIGITS[d as usize],
                    _ => c,
                })
                .collect(),
        }
    }

    /// Label for the center at the 0-based `index`: 1-based, padded to two digits.
    pub fn center_number(&self, index: usize) -> String {
        self.render(&format!("{:02}", index + 1))
    }
}
