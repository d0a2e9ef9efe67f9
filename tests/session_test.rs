//! Tests for ChartSession and ServiceContainer wiring

use std::path::PathBuf;
use std::sync::Arc;

use orgchart::application::{
    ChartSession, ControllerOptions, FetchState, SessionStatus,
};
use orgchart::config::Settings;
use orgchart::domain::OrgTierRecord;
use orgchart::infrastructure::di::ServiceContainer;
use orgchart::infrastructure::traits::{RecordSource, ScrollBehavior, Viewport};
use orgchart::infrastructure::{InfraError, InfraResult};
use orgchart::util::testing::{init_test_setup, record, sample_records};

/// Source serving a fixed record set, or failing.
struct StaticSource {
    records: Option<Vec<OrgTierRecord>>,
}

impl StaticSource {
    fn serving(records: Vec<OrgTierRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Some(records),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            records: None,
        })
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self) -> InfraResult<Vec<OrgTierRecord>> {
        self.records.clone().ok_or_else(|| {
            InfraError::io(
                "fetch records",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "backend down"),
            )
        })
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[test]
fn given_new_session_then_loading_and_nothing_renders() {
    let session = ChartSession::new(ControllerOptions::default());
    assert_eq!(session.status(), &SessionStatus::Loading);
    assert!(session.render().is_none());
    assert!(session.controller().is_none());
}

#[test]
fn given_ready_records_when_fetched_then_session_renders() {
    init_test_setup();
    let mut session = ChartSession::new(ControllerOptions::default());

    session.on_fetch(FetchState::Loading).unwrap();
    session.on_fetch(FetchState::Ready(sample_records())).unwrap();

    assert_eq!(session.status(), &SessionStatus::Ready);
    assert_eq!(
        session.render().unwrap().rendered_ids(),
        vec!["1", "9", "2", "3"]
    );
}

#[test]
fn given_failed_fetch_when_fed_then_error_state_without_build() {
    let mut session = ChartSession::new(ControllerOptions::default());

    session
        .on_fetch(FetchState::Failed("timeout".to_string()))
        .unwrap();

    assert_eq!(session.status(), &SessionStatus::Error("timeout".to_string()));
    assert!(session.render().is_none());
}

#[test]
fn given_malformed_records_when_fetched_then_error_state_and_no_render() {
    let mut session = ChartSession::new(ControllerOptions::default());

    let err = session
        .on_fetch(FetchState::Ready(vec![record("1", None), record("2", Some("99"))]))
        .unwrap_err();

    assert!(err.malformed_hierarchy().is_some());
    assert!(matches!(session.status(), SessionStatus::Error(_)));
    assert!(session.render().is_none());
}

#[test]
fn given_ready_session_when_refetched_then_state_is_merged_by_id() {
    let mut session = ChartSession::new(ControllerOptions::default());
    session.on_fetch(FetchState::Ready(sample_records())).unwrap();
    session.controller_mut().unwrap().toggle("2").unwrap();

    let mut refreshed = sample_records();
    refreshed.push(record("10", Some("3")));
    session.on_fetch(FetchState::Ready(refreshed)).unwrap();

    let controller = session.controller().unwrap();
    assert_eq!(controller.is_collapsed("2"), Some(false));
    assert_eq!(controller.is_collapsed("10"), Some(true));
    assert_eq!(controller.tree().len(), 10);
}

#[test]
fn given_refetch_in_progress_when_loading_then_hides_chart_until_ready() {
    let mut session = ChartSession::new(ControllerOptions::default());
    session.on_fetch(FetchState::Ready(sample_records())).unwrap();
    session.controller_mut().unwrap().toggle("3").unwrap();

    session.on_fetch(FetchState::Loading).unwrap();
    assert!(session.render().is_none());

    session.on_fetch(FetchState::Ready(sample_records())).unwrap();
    assert_eq!(session.controller().unwrap().is_collapsed("3"), Some(false));
}

#[test]
fn given_container_with_source_when_opening_session_then_ready() {
    let container = ServiceContainer::with_deps(
        Settings::default(),
        StaticSource::serving(sample_records()),
    );

    let session = container.open_session().unwrap();

    assert_eq!(session.status(), &SessionStatus::Ready);
    assert_eq!(container.source.describe(), "static");
}

#[test]
fn given_failing_source_when_opening_session_then_returns_fetch_error() {
    let container = ServiceContainer::with_deps(Settings::default(), StaticSource::failing());

    let err = container.open_session().err().unwrap();

    assert!(err.to_string().contains("fetch records"));
}

#[test]
fn given_instant_scroll_setting_when_building_options_then_instant() {
    let mut settings = Settings::default();
    settings.viewport.smooth_scroll = false;
    settings.viewport.width = 640.0;
    let container = ServiceContainer::with_deps(settings, StaticSource::serving(sample_records()));

    assert_eq!(
        container.controller_options().scroll_behavior,
        ScrollBehavior::Instant
    );
    assert_eq!(container.viewport().size(), (640.0, 800.0));
}

#[test]
fn given_file_container_when_opening_controller_then_reads_records() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/records.json");
    let container = ServiceContainer::new(Settings::default(), &path);

    let controller = container.open_controller().unwrap();

    assert_eq!(controller.tree().len(), 3);
    assert!(controller.tree().find("3").unwrap().is_account());
}
