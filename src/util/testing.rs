//! Shared test setup and fixtures.

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{OrgTierRecord, Owner};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

pub fn record(id: &str, parent_id: Option<&str>) -> OrgTierRecord {
    OrgTierRecord::new(
        id,
        format!("Tier {id}"),
        Owner::new("Owner", id),
        parent_id,
    )
}

/// Small company:
///
/// ```text
/// 1 Board
/// ├── 2 Engineering
/// │   ├── 4 Platform
/// │   │   └── 7 (account)
/// │   ├── 5 (account)
/// │   └── 6 (account)
/// ├── 3 Sales
/// │   └── 8 (account)
/// └── 9 (account)
/// ```
pub fn sample_records() -> Vec<OrgTierRecord> {
    vec![
        OrgTierRecord::new(
            "1",
            "Board",
            Owner::new("Ada", "Lovelace").with_titles(["CEO"]),
            None,
        )
        .with_tier_level(0),
        OrgTierRecord::new(
            "2",
            "Engineering",
            Owner::new("Grace", "Hopper").with_titles(["CTO"]),
            Some("1"),
        )
        .with_tier_level(1),
        OrgTierRecord::new("3", "Sales", Owner::new("Mary", "Jackson"), Some("1"))
            .with_tier_level(1),
        OrgTierRecord::new("4", "Platform", Owner::new("Alan", "Turing"), Some("2"))
            .with_tier_level(2),
        OrgTierRecord::new("5", "Compilers", Owner::new("John", "Backus"), Some("2"))
            .with_tier_level(2),
        OrgTierRecord::new("6", "Databases", Owner::new("Edgar", "Codd"), Some("2"))
            .with_tier_level(2),
        OrgTierRecord::new("7", "Runtime", Owner::new("Barbara", "Liskov"), Some("4"))
            .with_tier_level(3),
        OrgTierRecord::new("8", "Accounts", Owner::new("Katherine", "Johnson"), Some("3"))
            .with_tier_level(2),
        OrgTierRecord::new("9", "Office", Owner::new("Margaret", "Hamilton"), Some("1"))
            .with_tier_level(1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_sample_records_then_exactly_one_root() {
        assert_eq!(sample_records().iter().filter(|r| r.is_root()).count(), 1);
    }
}
