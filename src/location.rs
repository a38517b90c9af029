use serde::Serialize;

/// Tokens that mark a location string as UK. Deliberately permissive:
/// substring matching means "London, Ontario" counts as UK. That is a
/// known limitation of the source data, and downstream counts depend on
/// it staying this way.
const UK_TOKENS: [&str; 12] = [
    "uk",
    "united kingdom",
    "london",
    "manchester",
    "edinburgh",
    "birmingham",
    "bristol",
    "leeds",
    "glasgow",
    "england",
    "scotland",
    "wales",
];

/// Cities the board groups listings under.
const CITY_TOKENS: [(&str, CityBucket); 5] = [
    ("london", CityBucket::London),
    ("manchester", CityBucket::Manchester),
    ("birmingham", CityBucket::Birmingham),
    ("bristol", CityBucket::Bristol),
    ("edinburgh", CityBucket::Edinburgh),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CityBucket {
    London,
    Manchester,
    Birmingham,
    Bristol,
    Edinburgh,
    Remote,
    Other,
}

impl CityBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::London => "London",
            Self::Manchester => "Manchester",
            Self::Birmingham => "Birmingham",
            Self::Bristol => "Bristol",
            Self::Edinburgh => "Edinburgh",
            Self::Remote => "Remote",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationClass {
    pub is_uk: bool,
    pub city: CityBucket,
}

/// Classify a raw location/country pair into the UK / non-UK partition and
/// a city bucket. Pure string heuristics, no geocoding, no errors: absent
/// input is non-UK / Other.
pub fn classify(location: Option<&str>, country: Option<&str>, is_remote: bool) -> LocationClass {
    let combined = format!(
        "{} {}",
        location.unwrap_or_default(),
        country.unwrap_or_default()
    )
    .to_lowercase();

    // A bare "Remote" location is surfaced on every country view
    let bare_remote = location
        .map(|l| l.trim().eq_ignore_ascii_case("remote"))
        .unwrap_or(false);

    let is_uk = bare_remote || UK_TOKENS.iter().any(|token| combined.contains(token));

    // City bucket is whichever known city appears first in the text
    let city = CITY_TOKENS
        .iter()
        .filter_map(|(token, bucket)| combined.find(token).map(|pos| (pos, *bucket)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, bucket)| bucket)
        .unwrap_or(if is_remote {
            CityBucket::Remote
        } else {
            CityBucket::Other
        });

    LocationClass { is_uk, city }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_empty_input_is_non_uk_other() {
        let class = classify(None, None, false);
        assert!(!class.is_uk);
        assert_eq!(class.city, CityBucket::Other);

        let class = classify(Some(""), None, false);
        assert!(!class.is_uk);
        assert_eq!(class.city, CityBucket::Other);
    }

    #[test]
    fn test_classify_multi_token_string() {
        let class = classify(Some("Remote, London, UK"), None, false);
        assert!(class.is_uk);
        assert_eq!(class.city, CityBucket::London);
    }

    #[test]
    fn test_classify_uses_country_field() {
        let class = classify(Some("Canary Wharf"), Some("United Kingdom"), false);
        assert!(class.is_uk);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert!(classify(Some("MANCHESTER"), None, false).is_uk);
        assert_eq!(
            classify(Some("MANCHESTER"), None, false).city,
            CityBucket::Manchester
        );
    }

    #[test]
    fn test_classify_non_uk_city() {
        let class = classify(Some("Berlin"), Some("Germany"), false);
        assert!(!class.is_uk);
        assert_eq!(class.city, CityBucket::Other);
    }

    #[test]
    fn test_classify_bare_remote_counts_as_uk_available() {
        let class = classify(Some("Remote"), None, true);
        assert!(class.is_uk);
        assert_eq!(class.city, CityBucket::Remote);
    }

    #[test]
    fn test_classify_remote_flag_sets_bucket_without_city() {
        let class = classify(Some("Anywhere, UK"), None, true);
        assert!(class.is_uk);
        assert_eq!(class.city, CityBucket::Remote);
    }

    #[test]
    fn test_classify_earliest_city_wins() {
        let class = classify(Some("Bristol or Edinburgh"), None, false);
        assert_eq!(class.city, CityBucket::Bristol);
    }

    #[test]
    fn test_classify_accepts_known_false_positives() {
        // Permissive by design: a Canadian London still matches
        let class = classify(Some("London, Ontario"), Some("Canada"), false);
        assert!(class.is_uk);
        assert_eq!(class.city, CityBucket::London);
    }
}
