use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::roles::RoleCategory;

/// Default page window, matching the public search endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Hard cap on a single result window.
pub const MAX_PAGE_SIZE: usize = 50;

/// Workplace arrangement as advertised on the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkplaceType {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkplaceType {
    /// Source feeds spell on-site three different ways; anything else is
    /// treated as unset.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("remote") {
            Some(Self::Remote)
        } else if s.eq_ignore_ascii_case("hybrid") {
            Some(Self::Hybrid)
        } else if s.eq_ignore_ascii_case("onsite")
            || s.eq_ignore_ascii_case("on-site")
            || s.eq_ignore_ascii_case("on site")
        {
            Some(Self::Onsite)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::Onsite => "Onsite",
        }
    }
}

/// Request-side work-arrangement filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "true" => Some(Self::Remote),
            "hybrid" => Some(Self::Hybrid),
            "onsite" | "on-site" => Some(Self::Onsite),
            _ => None,
        }
    }
}

/// A single job record as held by the store. All free-text fields come
/// from external postings and are not trusted to be well-formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(
        default,
        deserialize_with = "de_workplace_type",
        serialize_with = "ser_workplace_type"
    )]
    pub workplace_type: Option<WorkplaceType>,
    #[serde(default)]
    pub compensation: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_role_category",
        serialize_with = "ser_role_category"
    )]
    pub role_category: Option<RoleCategory>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub hours_per_week: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_fractional: bool,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

fn de_workplace_type<'de, D>(deserializer: D) -> Result<Option<WorkplaceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WorkplaceType::parse))
}

fn ser_workplace_type<S>(value: &Option<WorkplaceType>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(wt) => serializer.serialize_some(wt.as_str()),
        None => serializer.serialize_none(),
    }
}

fn de_role_category<'de, D>(deserializer: D) -> Result<Option<RoleCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(RoleCategory::parse))
}

fn ser_role_category<S>(value: &Option<RoleCategory>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(cat) => serializer.serialize_some(cat.as_str()),
        None => serializer.serialize_none(),
    }
}

/// What a search request asks for. One shape shared by every caller so
/// the server-rendered and client-fetched paths cannot drift apart.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub role_category: Option<RoleCategory>,
    pub location_query: Option<String>,
    pub work_type: Option<WorkType>,
    /// The product is UK-only; every browse surface scopes to UK unless it
    /// explicitly opts out. Named here rather than buried in query strings.
    pub scope_to_uk: bool,
    /// Interim roles are a separate product category; role-specific browse
    /// views set this.
    pub exclude_interim: bool,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            role_category: None,
            location_query: None,
            work_type: None,
            scope_to_uk: true,
            exclude_interim: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterCriteria {
    /// Requested page, clamped to at least 1.
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Requested window size, clamped to 1..=MAX_PAGE_SIZE.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of results plus the paging metadata the board widgets need.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub items: Vec<Listing>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Aggregates over the full filtered set, never just the visible page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStats {
    pub total: usize,
    /// Mean of the listings whose compensation parses; None when nothing
    /// parses. Never zero-as-sentinel and never NaN.
    pub average_compensation: Option<f64>,
    pub remote_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub result: SearchResult,
    /// None only when the store could not be read.
    pub stats: Option<MarketStats>,
}

impl SearchResponse {
    /// Neutral empty-state returned when the store is unreachable. Callers
    /// render it as an empty board, never a crash.
    pub fn unavailable(criteria: &FilterCriteria) -> Self {
        Self {
            result: SearchResult {
                items: Vec::new(),
                total_count: 0,
                page: criteria.effective_page(),
                page_size: criteria.effective_page_size(),
                total_pages: 1,
            },
            stats: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workplace_type_spelling_tolerance() {
        assert_eq!(WorkplaceType::parse("Remote"), Some(WorkplaceType::Remote));
        assert_eq!(WorkplaceType::parse("On-site"), Some(WorkplaceType::Onsite));
        assert_eq!(WorkplaceType::parse("Onsite"), Some(WorkplaceType::Onsite));
        assert_eq!(WorkplaceType::parse("on site"), Some(WorkplaceType::Onsite));
        assert_eq!(WorkplaceType::parse("hybrid"), Some(WorkplaceType::Hybrid));
        assert_eq!(WorkplaceType::parse("flexible"), None);
    }

    #[test]
    fn test_listing_deserializes_with_minimal_fields() {
        let json = r#"{"id": "j1", "title": "Fractional CTO"}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "j1");
        assert!(listing.is_active);
        assert!(listing.is_fractional);
        assert!(listing.slug.is_none());
        assert!(listing.posted_date.is_none());
        assert!(listing.skills_required.is_empty());
    }

    #[test]
    fn test_listing_parses_messy_enum_fields() {
        let json = r#"{
            "id": "j2",
            "title": "Fractional COO",
            "workplace_type": "on-site",
            "role_category": "Technology"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.workplace_type, Some(WorkplaceType::Onsite));
        assert_eq!(
            listing.role_category,
            Some(crate::roles::RoleCategory::Engineering)
        );
    }

    #[test]
    fn test_listing_unknown_enum_values_degrade_to_unset() {
        let json = r#"{
            "id": "j3",
            "title": "Fractional CFO",
            "workplace_type": "4-day week",
            "role_category": "Wizardry"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.workplace_type, None);
        assert_eq!(listing.role_category, None);
    }

    #[test]
    fn test_criteria_clamps_page_and_page_size() {
        let criteria = FilterCriteria {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(criteria.effective_page(), 1);
        assert_eq!(criteria.effective_page_size(), 1);

        let criteria = FilterCriteria {
            page_size: 500,
            ..Default::default()
        };
        assert_eq!(criteria.effective_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_uk_scoping_is_the_default() {
        let criteria = FilterCriteria::default();
        assert!(criteria.scope_to_uk);
        assert!(!criteria.exclude_interim);
    }

    #[test]
    fn test_unavailable_response_shape() {
        let resp = SearchResponse::unavailable(&FilterCriteria::default());
        assert!(resp.result.items.is_empty());
        assert_eq!(resp.result.total_count, 0);
        assert_eq!(resp.result.total_pages, 1);
        assert!(resp.stats.is_none());
    }
}
