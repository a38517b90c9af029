mod db;
mod location;
mod models;
mod rate;
mod roles;
mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use db::Database;
use models::{FilterCriteria, SearchResponse, WorkType};
use roles::{ExecRole, RoleCategory};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fracboard")]
#[command(about = "UK fractional executive job board - search listings, market stats, day rates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import listings from a JSON file
    Import {
        /// Path to a JSON array of listings
        file: PathBuf,

        /// Wipe existing listings first
        #[arg(long)]
        replace: bool,
    },

    /// Search listings
    Search {
        /// Role category (Engineering, Finance, Marketing, ...)
        #[arg(short, long)]
        role: Option<String>,

        /// Location substring (e.g. london)
        #[arg(short, long)]
        location: Option<String>,

        /// Work arrangement (remote, hybrid, onsite)
        #[arg(short, long)]
        work: Option<String>,

        /// Include non-UK listings
        #[arg(long)]
        international: bool,

        /// Exclude interim roles (role-specific browse views)
        #[arg(long)]
        exclude_interim: bool,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Results per page (max 50)
        #[arg(long, default_value = "20")]
        page_size: usize,

        /// Emit the JSON response shape instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Market stats for a filtered view
    Stats {
        /// Role category (Engineering, Finance, Marketing, ...)
        #[arg(short, long)]
        role: Option<String>,

        /// Location substring (e.g. london)
        #[arg(short, long)]
        location: Option<String>,

        /// Work arrangement (remote, hybrid, onsite)
        #[arg(short, long)]
        work: Option<String>,

        /// Include non-UK listings
        #[arg(long)]
        international: bool,

        /// Exclude interim roles
        #[arg(long)]
        exclude_interim: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one listing by slug
    Show {
        /// Listing slug
        slug: String,
    },

    /// Day-rate defaults for executive roles
    Rates {
        /// Limit to one role (ceo, cfo, cto, ...)
        role: Option<String>,
    },
}

/// Build criteria from CLI args. An unknown role or work type degrades to
/// a query that matches nothing rather than erroring, mirroring the
/// permissive-parsing policy of the engine itself.
struct ParsedFilters {
    criteria: FilterCriteria,
    /// Set when an arg failed to parse; the query should return no matches.
    dead_filter: Option<String>,
}

fn parse_filters(
    role: Option<&str>,
    location: Option<&str>,
    work: Option<&str>,
    international: bool,
    exclude_interim: bool,
    page: usize,
    page_size: usize,
) -> ParsedFilters {
    let mut dead_filter = None;

    let role_category = match role {
        Some(raw) => match RoleCategory::parse(raw) {
            Some(cat) => Some(cat),
            None => {
                dead_filter = Some(format!("unknown role category '{raw}'"));
                None
            }
        },
        None => None,
    };

    let work_type = match work {
        Some(raw) => match WorkType::parse(raw) {
            Some(wt) => Some(wt),
            None => {
                dead_filter = Some(format!("unknown work type '{raw}'"));
                None
            }
        },
        None => None,
    };

    ParsedFilters {
        criteria: FilterCriteria {
            role_category,
            location_query: location.map(|s| s.to_string()),
            work_type,
            scope_to_uk: !international,
            exclude_interim,
            page,
            page_size,
        },
        dead_filter,
    }
}

/// Run the facade against the store. A store fault degrades to the typed
/// unavailable response so callers always have something to render.
fn run_search(db: &Database, parsed: &ParsedFilters) -> SearchResponse {
    if let Some(reason) = &parsed.dead_filter {
        eprintln!("Note: {reason}, no listings will match.");
        return search::search(&[], &parsed.criteria);
    }

    // Push down what the store can handle; the engine re-applies everything
    match db.fetch_active(
        parsed.criteria.role_category,
        parsed.criteria.location_query.as_deref(),
    ) {
        Ok(listings) => search::search(&listings, &parsed.criteria),
        Err(e) => {
            eprintln!("Warning: listings store unavailable: {e:#}");
            SearchResponse::unavailable(&parsed.criteria)
        }
    }
}

fn print_search_table(resp: &SearchResponse) {
    let visible = search::line_items(&resp.result.items);
    if visible.is_empty() {
        println!("No listings found.");
    } else {
        println!(
            "{:<28} {:<30} {:<20} {:<22} {:>16}",
            "SLUG", "TITLE", "COMPANY", "LOCATION", "COMPENSATION"
        );
        println!("{}", "-".repeat(120));
        for listing in &visible {
            println!(
                "{:<28} {:<30} {:<20} {:<22} {:>16}",
                truncate(listing.slug.as_deref().unwrap_or_default(), 26),
                truncate(&listing.title, 28),
                truncate(&listing.company_name, 18),
                truncate(listing.location.as_deref().unwrap_or("Location TBD"), 20),
                truncate(listing.compensation.as_deref().unwrap_or("-"), 16),
            );
        }
    }
    println!(
        "\nPage {} of {} ({} listings)",
        resp.result.page, resp.result.total_pages, resp.result.total_count
    );
}

fn print_stats_table(resp: &SearchResponse, role: Option<RoleCategory>) {
    match &resp.stats {
        Some(stats) => {
            println!("Open roles:   {}", stats.total);
            match stats.average_compensation {
                Some(avg) => println!("Avg day rate: £{}", avg.round() as i64),
                None => {
                    // Nothing parseable in this set; fall back to the
                    // published market rate for the role where we have one
                    let fallback = role
                        .and_then(ExecRole::for_category)
                        .map(|r| r.defaults().avg_day_rate);
                    match fallback {
                        Some(rate) => println!("Avg day rate: £{rate} (market default)"),
                        None => println!("Avg day rate: n/a"),
                    }
                }
            }
            println!("Remote roles: {}", stats.remote_count);
        }
        None => println!("Stats unavailable."),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let db = Database::open()?;
            db.init()?;
            println!("Database initialized at {}", db.path().display());
        }

        Commands::Import { file, replace } => {
            let mut db = Database::open()?;
            db.ensure_initialized()?;
            let count = db.import(&file, replace)?;
            println!("Imported {} listing(s) from {}", count, file.display());
            println!("Store now holds {} listing(s)", db.count()?);
        }

        Commands::Search {
            role,
            location,
            work,
            international,
            exclude_interim,
            page,
            page_size,
            json,
        } => {
            let db = Database::open()?;
            db.ensure_initialized()?;
            let parsed = parse_filters(
                role.as_deref(),
                location.as_deref(),
                work.as_deref(),
                international,
                exclude_interim,
                page,
                page_size,
            );
            let resp = run_search(&db, &parsed);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp).context("Failed to encode response")?
                );
            } else {
                print_search_table(&resp);
            }
        }

        Commands::Stats {
            role,
            location,
            work,
            international,
            exclude_interim,
            json,
        } => {
            let db = Database::open()?;
            db.ensure_initialized()?;
            // Stats always run over the full filtered set; the page args
            // are irrelevant here by construction
            let parsed = parse_filters(
                role.as_deref(),
                location.as_deref(),
                work.as_deref(),
                international,
                exclude_interim,
                1,
                models::DEFAULT_PAGE_SIZE,
            );
            let resp = run_search(&db, &parsed);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp.stats)
                        .context("Failed to encode stats")?
                );
            } else {
                print_stats_table(&resp, parsed.criteria.role_category);
            }
        }

        Commands::Show { slug } => {
            let db = Database::open()?;
            db.ensure_initialized()?;
            match db.get_by_slug(&slug)? {
                Some(listing) => {
                    let class = location::classify(
                        listing.location.as_deref(),
                        listing.country.as_deref(),
                        listing.is_remote,
                    );
                    println!("{}", listing.title);
                    println!("Company: {}", listing.company_name);
                    println!(
                        "Location: {} ({})",
                        listing.location.as_deref().unwrap_or("Location TBD"),
                        class.city.as_str(),
                    );
                    if !class.is_uk {
                        println!("Note: outside the UK board's default scope");
                    }
                    if let Some(wt) = listing.workplace_type {
                        println!("Workplace: {}", wt.as_str());
                    } else if listing.is_remote {
                        println!("Workplace: Remote");
                    }
                    if let Some(comp) = &listing.compensation {
                        println!("Compensation: {comp}");
                    }
                    if let Some(cat) = listing.role_category {
                        println!("Category: {}", cat.as_str());
                    }
                    if let Some(hours) = listing.hours_per_week {
                        println!("Hours/week: {hours}");
                    }
                    if !listing.skills_required.is_empty() {
                        println!("Skills: {}", listing.skills_required.join(", "));
                    }
                    if let Some(posted) = listing.posted_date {
                        println!("Posted: {}", posted.format("%Y-%m-%d"));
                    }
                }
                None => {
                    println!("Listing '{slug}' not found.");
                }
            }
        }

        Commands::Rates { role } => {
            let selected = match role.as_deref() {
                Some(raw) => match ExecRole::parse(raw) {
                    Some(r) => vec![r],
                    None => {
                        println!("Unknown role '{raw}'. Known roles: ceo, cfo, cto, cmo, coo, chro, cpo, ciso, cco");
                        return Ok(());
                    }
                },
                None => ExecRole::ALL.to_vec(),
            };

            println!(
                "{:<8} {:>10} {:>10} {:>10} {:>14}",
                "ROLE", "MIN/DAY", "AVG/DAY", "MAX/DAY", "AVG SALARY"
            );
            println!("{}", "-".repeat(56));
            for exec in selected {
                let d = exec.defaults();
                println!(
                    "{:<8} {:>10} {:>10} {:>10} {:>14}",
                    d.label,
                    format!("£{}", d.min_day_rate),
                    format!("£{}", d.avg_day_rate),
                    format!("£{}", d.max_day_rate),
                    format!("£{}", d.avg_salary),
                );
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_defaults_to_uk_scope() {
        let parsed = parse_filters(None, None, None, false, false, 1, 20);
        assert!(parsed.criteria.scope_to_uk);
        assert!(parsed.dead_filter.is_none());
    }

    #[test]
    fn test_parse_filters_international_opt_out() {
        let parsed = parse_filters(None, None, None, true, false, 1, 20);
        assert!(!parsed.criteria.scope_to_uk);
    }

    #[test]
    fn test_parse_filters_unknown_role_is_dead_filter() {
        let parsed = parse_filters(Some("Wizardry"), None, None, false, false, 1, 20);
        assert!(parsed.dead_filter.is_some());
        assert!(parsed.criteria.role_category.is_none());
    }

    #[test]
    fn test_parse_filters_role_alias() {
        let parsed = parse_filters(Some("Technology"), None, None, false, false, 1, 20);
        assert_eq!(
            parsed.criteria.role_category,
            Some(RoleCategory::Engineering)
        );
        assert!(parsed.dead_filter.is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long listing title here", 10), "a long ...");
    }
}
