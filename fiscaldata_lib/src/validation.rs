use crate::error::FiscalDataError;

/// First calendar year the fixed-history datasets cover.
pub const YEAR_COVERAGE_FROM: i32 = 2001;
/// Most recent calendar year the fixed-history datasets cover.
pub const YEAR_COVERAGE_TO: i32 = 2023;

/// Validate an inclusive year range against the dataset coverage window.
///
/// Runs before any network call so a bad range fails fast instead of
/// silently producing an empty table. Returns the validated pair.
pub fn validate_year_range(from: i32, to: i32) -> Result<(i32, i32), FiscalDataError> {
    if !(YEAR_COVERAGE_FROM..=YEAR_COVERAGE_TO).contains(&from) {
        return Err(FiscalDataError::Range {
            from,
            to,
            reason: format!(
                "year_from must be within {}..={}",
                YEAR_COVERAGE_FROM, YEAR_COVERAGE_TO
            ),
        });
    }
    if !(YEAR_COVERAGE_FROM..=YEAR_COVERAGE_TO).contains(&to) {
        return Err(FiscalDataError::Range {
            from,
            to,
            reason: format!(
                "year_to must be within {}..={}",
                YEAR_COVERAGE_FROM, YEAR_COVERAGE_TO
            ),
        });
    }
    if from > to {
        return Err(FiscalDataError::Range {
            from,
            to,
            reason: "year_from is after year_to".to_string(),
        });
    }
    Ok((from, to))
}

/// A categorical filter argument with the reserved `"all"` sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassFilter {
    /// Identity filter: no rows removed.
    All,
    /// Exact match against one categorical value.
    Only(String),
}

impl ClassFilter {
    /// Parse a caller-supplied filter string. `"all"` (ASCII
    /// case-insensitive, whitespace-trimmed) is the sentinel for "no
    /// filter"; anything else matches by exact string equality.
    pub fn parse(input: &str) -> ClassFilter {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            ClassFilter::All
        } else {
            ClassFilter::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(wanted) => wanted == value,
        }
    }
}

impl Default for ClassFilter {
    fn default() -> Self {
        ClassFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Year range validation --

    #[test]
    fn year_range_full_window() {
        assert_eq!(
            validate_year_range(YEAR_COVERAGE_FROM, YEAR_COVERAGE_TO).unwrap(),
            (2001, 2023)
        );
    }

    #[test]
    fn year_range_inner_window() {
        assert!(validate_year_range(2002, 2012).is_ok());
    }

    #[test]
    fn year_range_single_year() {
        assert!(validate_year_range(2005, 2005).is_ok());
    }

    #[test]
    fn year_range_from_before_coverage() {
        let err = validate_year_range(1999, 2023).unwrap_err();
        match err {
            FiscalDataError::Range { from, to, .. } => {
                assert_eq!(from, 1999);
                assert_eq!(to, 2023);
            }
            other => panic!("expected Range, got {:?}", other),
        }
    }

    #[test]
    fn year_range_to_after_coverage() {
        assert!(matches!(
            validate_year_range(2001, 2024).unwrap_err(),
            FiscalDataError::Range { .. }
        ));
    }

    #[test]
    fn year_range_inverted() {
        assert!(matches!(
            validate_year_range(2010, 2005).unwrap_err(),
            FiscalDataError::Range { .. }
        ));
    }

    // -- Class filter --

    #[test]
    fn class_filter_all_sentinel() {
        assert_eq!(ClassFilter::parse("all"), ClassFilter::All);
        assert_eq!(ClassFilter::parse("All"), ClassFilter::All);
        assert_eq!(ClassFilter::parse("ALL"), ClassFilter::All);
        assert_eq!(ClassFilter::parse("  all  "), ClassFilter::All);
    }

    #[test]
    fn class_filter_specific_value() {
        assert_eq!(
            ClassFilter::parse("Treasury Bonds"),
            ClassFilter::Only("Treasury Bonds".to_string())
        );
    }

    #[test]
    fn class_filter_all_matches_everything() {
        assert!(ClassFilter::All.matches("Treasury Bonds"));
        assert!(ClassFilter::All.matches(""));
    }

    #[test]
    fn class_filter_only_matches_exactly() {
        let filter = ClassFilter::parse("Marketable");
        assert!(filter.matches("Marketable"));
        assert!(!filter.matches("Nonmarketable"));
        // Categorical values are matched case-sensitively.
        assert!(!filter.matches("marketable"));
    }

    #[test]
    fn class_filter_default_is_all() {
        assert_eq!(ClassFilter::default(), ClassFilter::All);
    }
}
