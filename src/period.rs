/// A reporting period: one month of daily bulletins on the listing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: &'static str,
    pub year: i32,
}

impl Period {
    pub const fn new(month: &'static str, year: i32) -> Self {
        Self { month, year }
    }

    /// The human-readable title the listing filter matches on, e.g.
    /// "August 2025". Link text on the results page uses the same form.
    pub fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_month_then_year() {
        assert_eq!(Period::new("August", 2025).title(), "August 2025");
    }
}
