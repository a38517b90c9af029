use std::cmp::Ordering;

use crate::location::classify;
use crate::models::{
    FilterCriteria, Listing, MarketStats, SearchResponse, SearchResult, WorkType, WorkplaceType,
};
use crate::rate::parse_rate;

/// The "remote" predicate shared by the work-type filter and the stats
/// remote count.
pub fn is_remote_role(listing: &Listing) -> bool {
    listing.is_remote || listing.workplace_type == Some(WorkplaceType::Remote)
}

fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    // Inactive and non-fractional listings never appear, on any surface
    if !listing.is_active || !listing.is_fractional {
        return false;
    }

    if criteria.scope_to_uk {
        let class = classify(
            listing.location.as_deref(),
            listing.country.as_deref(),
            listing.is_remote,
        );
        if !class.is_uk {
            return false;
        }
    }

    if let Some(role) = criteria.role_category {
        if listing.role_category != Some(role) {
            return false;
        }
    }

    if let Some(query) = criteria.location_query.as_deref() {
        let query = query.to_lowercase();
        let location = listing
            .location
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        if !location.contains(&query) {
            return false;
        }
    }

    if let Some(work) = criteria.work_type {
        let ok = match work {
            WorkType::Remote => is_remote_role(listing),
            WorkType::Hybrid => listing.workplace_type == Some(WorkplaceType::Hybrid),
            WorkType::Onsite => listing.workplace_type == Some(WorkplaceType::Onsite),
        };
        if !ok {
            return false;
        }
    }

    if criteria.exclude_interim && listing.title.to_lowercase().contains("interim") {
        return false;
    }

    true
}

/// Apply the full predicate conjunction. The store may have pushed some of
/// these down already; correctness never depends on that.
pub fn filter(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches(l, criteria))
        .cloned()
        .collect()
}

/// Recency order: newest first, undated listings last, ties broken by id
/// so repeated queries never reorder.
pub fn sort_by_recency(listings: &mut [Listing]) {
    listings.sort_by(|a, b| {
        let by_date = match (&a.posted_date, &b.posted_date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    });
}

/// Market stats over a filtered set. Must be fed the full filtered set,
/// not a page window.
pub fn aggregate(listings: &[Listing]) -> MarketStats {
    let rates: Vec<i64> = listings
        .iter()
        .filter_map(|l| parse_rate(l.compensation.as_deref()))
        .collect();

    let average_compensation = if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<i64>() as f64 / rates.len() as f64)
    };

    MarketStats {
        total: listings.len(),
        average_compensation,
        remote_count: listings.iter().filter(|l| is_remote_role(l)).count(),
    }
}

/// Slice out one page of an already-sorted set. A page past the end is an
/// empty window, not an error. total_pages is at least 1 so the UI can
/// always say "Page 1 of 1".
pub fn paginate(listings: &[Listing], page: usize, page_size: usize) -> (Vec<Listing>, usize) {
    let total_pages = listings.len().div_ceil(page_size).max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = if start >= listings.len() {
        Vec::new()
    } else {
        listings[start..(start + page_size).min(listings.len())].to_vec()
    };
    (items, total_pages)
}

/// The one entry point for both the server-rendered and the client-fetched
/// paths: filter, sort, aggregate over the whole filtered set, then window
/// it. Pure function of its inputs, so both call sites always agree.
pub fn search(listings: &[Listing], criteria: &FilterCriteria) -> SearchResponse {
    let mut matched = filter(listings, criteria);
    sort_by_recency(&mut matched);

    let stats = aggregate(&matched);
    let page = criteria.effective_page();
    let page_size = criteria.effective_page_size();
    let (items, total_pages) = paginate(&matched, page, page_size);

    SearchResponse {
        result: SearchResult {
            items,
            total_count: matched.len(),
            page,
            page_size,
            total_pages,
        },
        stats: Some(stats),
    }
}

/// Listings fit for a line-list render. A listing without a slug has no
/// stable link target and is silently dropped rather than rendered broken.
pub fn line_items(listings: &[Listing]) -> Vec<&Listing> {
    listings.iter().filter(|l| l.slug.is_some()).collect()
}
