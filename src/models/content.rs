#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Pixels(u32),
    Percent(u8),
}

impl Length {
    /// Resolves the length against the space offered by the container.
    #[must_use]
    pub const fn resolve(self, available: u32) -> u32 {
        match self {
            Self::Pixels(pixels) => pixels,
            Self::Percent(percent) => available * percent as u32 / 100,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pixels(pixels) => write!(formatter, "{pixels}px"),
            Self::Percent(percent) => write!(formatter, "{percent}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub height: Length,
    pub width: Length,
}

impl DisplaySize {
    pub const SEASONAL_IMAGE: Self = Self {
        height: Length::Pixels(2000),
        width: Length::Percent(90),
    };

    pub const MAP_DOCUMENT: Self = Self {
        height: Length::Pixels(750),
        width: Length::Percent(100),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_lengths_scale_with_the_container() {
        assert_eq!(Length::Percent(90).resolve(1000), 900);
        assert_eq!(Length::Percent(100).resolve(733), 733);
        assert_eq!(Length::Pixels(750).resolve(10), 750);
    }

    #[test]
    fn lengths_format_like_css() {
        assert_eq!(DisplaySize::SEASONAL_IMAGE.height.to_string(), "2000px");
        assert_eq!(DisplaySize::SEASONAL_IMAGE.width.to_string(), "90%");
    }
}
