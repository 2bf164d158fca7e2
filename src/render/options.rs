//! Composition options and configuration.

use chrono::{Local, NaiveDate};

/// Options for composing documents.
///
/// Two compositions with equal options and equal data produce
/// byte-identical output. The render date is captured here rather than read
/// from the clock inside generators.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    /// Screen or print layout semantics for the stylesheet
    pub layout: Layout,

    /// Date used for "today" fallbacks and generated document numbers
    pub today: NaiveDate,

    /// Currency symbol placed before formatted amounts
    pub currency_symbol: String,

    /// How dates are written in the output
    pub date_style: DateStyle,

    /// Prepend the shared stylesheet block
    pub include_stylesheet: bool,

    /// Generate sections on the rayon thread pool
    pub parallel: bool,

    /// Scan the output for unresolved interpolation syntax and log hits
    pub lint: bool,
}

impl ComposeOptions {
    /// Create new compose options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Use print layout semantics.
    pub fn for_print(mut self) -> Self {
        self.layout = Layout::Print;
        self
    }

    /// Pin the render date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Set the currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Set the date style.
    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.date_style = style;
        self
    }

    /// Enable or disable the stylesheet block.
    pub fn with_stylesheet(mut self, include: bool) -> Self {
        self.include_stylesheet = include;
        self
    }

    /// Disable parallel section generation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable the output lint.
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Screen,
            today: Local::now().date_naive(),
            currency_symbol: "$".to_string(),
            date_style: DateStyle::Long,
            include_stylesheet: true,
            parallel: true,
            lint: false,
        }
    }
}

/// Layout semantics of the shared stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Pages stacked on screen with spacing and shadows
    #[default]
    Screen,
    /// Fixed page size with hard page breaks
    Print,
}

/// Date rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `October 19, 2026`
    #[default]
    Long,
    /// `10/19/2026`
    Short,
    /// `2026-10-19`
    Iso,
}

impl DateStyle {
    /// Format a date in this style.
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateStyle::Long => date.format("%B %-d, %Y").to_string(),
            DateStyle::Short => date.format("%m/%d/%Y").to_string(),
            DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_options_builder() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let options = ComposeOptions::new()
            .for_print()
            .with_today(today)
            .with_currency_symbol("€")
            .sequential();

        assert_eq!(options.layout, Layout::Print);
        assert_eq!(options.today, today);
        assert_eq!(options.currency_symbol, "€");
        assert!(!options.parallel);
        assert!(options.include_stylesheet);
    }

    #[test]
    fn test_date_styles() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(DateStyle::Long.format(date), "March 7, 2026");
        assert_eq!(DateStyle::Short.format(date), "03/07/2026");
        assert_eq!(DateStyle::Iso.format(date), "2026-03-07");
    }
}
