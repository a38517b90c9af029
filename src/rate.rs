use regex::Regex;
use std::sync::LazyLock;

// Matches strings that open with an optional currency symbol then digits.
// Anything else ("DOE", "Competitive", digits buried mid-sentence) is
// rejected outright.
static LEADING_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[£$]?\d").unwrap());

/// Best-effort numeric extraction from a free-text compensation string.
///
/// Thousands separators are dropped, then the first contiguous digit run
/// is parsed: "£900-£1,400/day" yields 900, "£1,400/day" yields 1400,
/// "£120k" yields 120 (no suffix expansion - interpretation is the
/// caller's problem). Returns None rather than guessing when the string
/// does not lead with an amount.
pub fn parse_rate(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    if !LEADING_AMOUNT.is_match(raw) {
        return None;
    }
    let cleaned = raw.replace(',', "");
    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_rate_range_takes_leading_value() {
        assert_eq!(parse_rate(Some("£900-£1,400/day")), Some(900));
    }

    #[test]
    fn test_parse_single_rate_with_separator() {
        assert_eq!(parse_rate(Some("£1,400/day")), Some(1400));
        assert_eq!(parse_rate(Some("$1,200 per day")), Some(1200));
    }

    #[test]
    fn test_parse_salary_shorthand() {
        // "k" is not expanded; the engine only promises a numeric run
        assert_eq!(parse_rate(Some("£120k")), Some(120));
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_rate(Some("950")), Some(950));
        assert_eq!(parse_rate(Some("  850/day")), Some(850));
    }

    #[test]
    fn test_parse_rejects_non_numeric_text() {
        assert_eq!(parse_rate(Some("DOE")), None);
        assert_eq!(parse_rate(Some("Competitive")), None);
        assert_eq!(parse_rate(Some("")), None);
    }

    #[test]
    fn test_parse_rejects_mid_sentence_digits() {
        assert_eq!(parse_rate(Some("Up to £900 per day")), None);
        assert_eq!(parse_rate(Some("circa 1000")), None);
    }

    #[test]
    fn test_parse_null_input() {
        assert_eq!(parse_rate(None), None);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = Some("£900-£1,400/day");
        assert_eq!(parse_rate(input), parse_rate(input));
    }
}
