//! Integration tests for dockbump
//!
//! These tests run full resolution cycles over temporary definition trees
//! with in-memory catalogs:
//! - Staleness resolution and template regeneration
//! - Missing-flavor policies and security expedition
//! - Dry-run, refresh and failure handling
//! - End-of-life majors from the release schedule

use async_trait::async_trait;
use dockbump::catalog::{BuildIndex, ReleaseCatalog, SupportSchedule, ToolVersionSource};
use dockbump::config::{MissingFlavorPolicy, RunConfig};
use dockbump::domain::{
    CatalogEntry, DeferReason, MajorOutcome, ReleaseVersion, RunReport, SkipReason,
    SupportWindow, UpdateScope,
};
use dockbump::error::{AppError, CatalogError};
use dockbump::orchestrator::Orchestrator;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const MUSL: &str = "linux-x64-musl";

const ALPINE_TEMPLATE: &str = r#"FROM alpine:0.0

ENV NODE_VERSION 0.0.0

RUN apk add --no-cache --virtual .build-deps \
        ${PYTHON_VERSION} \
    && case "${ARCH}" in \
        x86_64) \
          CHECKSUM=CHECKSUM_x64 \
          ;; \
      esac \
    && for key in \
      "${NODE_KEYS[@]}"
    ; do \
      gpg --batch --recv-keys "$key" ; \
    done

ENV YARN_VERSION 0.0.0
"#;

const DEBIAN_TEMPLATE: &str = r#"FROM buildpack-deps:name

ENV NODE_VERSION 0.0.0

RUN for key in \
    "${NODE_KEYS[@]}"
  ; do \
    gpg --batch --recv-keys "$key" ; \
  done

ENV YARN_VERSION 0.0.0

RUN for key in \
    "${YARN_KEYS[@]}"
  ; do \
    gpg --batch --recv-keys "$key" ; \
  done
"#;

const SLIM_TEMPLATE: &str = r#"FROM debian:name-slim

ENV NODE_VERSION 0.0.0

RUN for key in \
    "${NODE_KEYS[@]}"
  ; do \
    gpg --batch --recv-keys "$key" ; \
  done

ENV YARN_VERSION 0.0.0
"#;

fn v(s: &str) -> ReleaseVersion {
    s.parse().unwrap()
}

/// Definition tree with templates and key lists
struct Tree {
    dir: TempDir,
}

impl Tree {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let root = dir.path();
        fs::write(root.join("Dockerfile-alpine.template"), ALPINE_TEMPLATE).unwrap();
        fs::write(root.join("Dockerfile-debian.template"), DEBIAN_TEMPLATE).unwrap();
        fs::write(root.join("Dockerfile-slim.template"), SLIM_TEMPLATE).unwrap();
        fs::create_dir_all(root.join("keys")).unwrap();
        fs::write(root.join("keys/node.keys"), "4ED778F539E3634C779C87C6D7062848A1AB005C\n").unwrap();
        fs::write(root.join("keys/yarn.keys"), "6A010C5166006599AA17F08146C2130DFD2497F5\n").unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn pin(self, major: u64, variant: &str, version: &str) -> Self {
        let dir = self.root().join(major.to_string()).join(variant);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("Dockerfile"),
            format!("FROM placeholder\n\nENV NODE_VERSION {}\n", version),
        )
        .unwrap();
        self
    }

    fn write_raw(self, major: u64, variant: &str, content: &str) -> Self {
        let dir = self.root().join(major.to_string()).join(variant);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Dockerfile"), content).unwrap();
        self
    }

    fn read(&self, major: u64, variant: &str) -> String {
        fs::read_to_string(self.root().join(major.to_string()).join(variant).join("Dockerfile"))
            .unwrap()
    }

    fn snapshot(&self, entries: &[(u64, &str)]) -> Vec<String> {
        entries.iter().map(|(m, n)| self.read(*m, n)).collect()
    }

    fn config(&self) -> RunConfig {
        RunConfig::defaults(self.root())
    }
}

struct FakeReleases {
    entries: Vec<CatalogEntry>,
    fail: bool,
}

#[async_trait]
impl ReleaseCatalog for FakeReleases {
    fn name(&self) -> &'static str {
        "fake release index"
    }

    async fn fetch_releases(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        if self.fail {
            return Err(CatalogError::unavailable(self.name(), "connection refused"));
        }
        Ok(self.entries.clone())
    }
}

struct FakeBuilds {
    entries: Vec<CatalogEntry>,
    checksums: HashMap<ReleaseVersion, String>,
}

#[async_trait]
impl BuildIndex for FakeBuilds {
    fn name(&self) -> &'static str {
        "fake build index"
    }

    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.entries.clone())
    }

    async fn fetch_checksum(
        &self,
        version: &ReleaseVersion,
        _flavor: &str,
    ) -> Result<Option<String>, CatalogError> {
        Ok(self.checksums.get(version).cloned())
    }
}

struct FakeTool;

#[async_trait]
impl ToolVersionSource for FakeTool {
    async fn fetch_tool_version(&self) -> Result<String, CatalogError> {
        Ok("1.22.22".to_string())
    }
}

struct FakeSchedule {
    windows: Vec<SupportWindow>,
    fail: bool,
}

#[async_trait]
impl SupportSchedule for FakeSchedule {
    fn name(&self) -> &'static str {
        "fake release schedule"
    }

    async fn fetch_schedule(&self) -> Result<Vec<SupportWindow>, CatalogError> {
        if self.fail {
            return Err(CatalogError::unavailable(self.name(), "HTTP 503"));
        }
        Ok(self.windows.clone())
    }
}

/// Catalog builder: every release, plus which ones carry the alternate flavor
#[derive(Default)]
struct Catalog {
    releases: Vec<CatalogEntry>,
    builds: Vec<CatalogEntry>,
    checksums: HashMap<ReleaseVersion, String>,
    fail_releases: bool,
}

impl Catalog {
    fn release(mut self, version: &str) -> Self {
        self.releases.push(CatalogEntry::new(v(version)));
        self
    }

    /// Published in the build index with the alternate flavor and a checksum
    fn build(mut self, version: &str) -> Self {
        self.builds
            .push(CatalogEntry::new(v(version)).with_flavors([MUSL, "linux-x64-glibc-217"]));
        self.checksums.insert(v(version), format!("sha-{}", version));
        self
    }

    /// Listed in the build index without the alternate flavor
    fn build_without_flavor(mut self, version: &str, security: bool) -> Self {
        self.builds.push(
            CatalogEntry::new(v(version))
                .with_security(security)
                .with_flavors(["linux-x64-glibc-217"]),
        );
        self
    }

    fn without_checksum(mut self, version: &str) -> Self {
        self.checksums.remove(&v(version));
        self
    }

    fn failing(mut self) -> Self {
        self.fail_releases = true;
        self
    }

    fn orchestrator(self, config: RunConfig) -> Orchestrator {
        Orchestrator::with_sources(
            config,
            Arc::new(FakeReleases {
                entries: self.releases,
                fail: self.fail_releases,
            }),
            Arc::new(FakeBuilds {
                entries: self.builds,
                checksums: self.checksums,
            }),
            Arc::new(FakeTool),
        )
    }
}

fn outcome(report: &RunReport, major: u64) -> &MajorOutcome {
    report
        .outcomes
        .iter()
        .find(|o| o.major() == major)
        .unwrap_or_else(|| panic!("no outcome for major {}", major))
}

fn scenario_tree() -> Tree {
    Tree::new()
        .pin(16, "bullseye", "16.14.0")
        .pin(16, "alpine3.16", "16.13.0")
        .pin(18, "bookworm", "18.9.0")
        .pin(18, "bookworm-slim", "18.9.0")
        .pin(18, "alpine3.20", "18.9.0")
}

fn scenario_catalog() -> Catalog {
    Catalog::default()
        .release("18.10.0")
        .release("16.16.0")
        .release("16.14.0")
        .build("18.10.0")
        .build("16.16.0")
        .build("16.14.0")
}

mod resolution_cycle {
    use super::*;

    /// Two stale majors, one with a lagging alternate pin that a newer release supersedes
    #[tokio::test]
    async fn test_full_updates_for_stale_majors() {
        let tree = scenario_tree();
        let report = scenario_catalog().orchestrator(tree.config()).run().await.unwrap();

        assert!(report.should_update);
        let versions: Vec<String> = report.updated_versions().iter().map(|v| v.to_string()).collect();
        assert_eq!(versions, vec!["16.16.0", "18.10.0"]);

        match outcome(&report, 16) {
            MajorOutcome::Updated { scope, from, to, variants, deferred, .. } => {
                assert_eq!(*scope, UpdateScope::Full);
                assert_eq!(*from, v("16.14.0"));
                assert_eq!(*to, v("16.16.0"));
                assert_eq!(variants.len(), 2);
                assert!(deferred.is_none());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(
            outcome(&report, 18),
            MajorOutcome::Updated { scope: UpdateScope::Full, variants, .. } if variants.len() == 3
        ));

        let alpine = tree.read(16, "alpine3.16");
        assert!(alpine.starts_with("FROM alpine:3.16\n"));
        assert!(alpine.contains("ENV NODE_VERSION 16.16.0\n"));
        assert!(alpine.contains("CHECKSUM=\"sha-16.16.0\""));
        assert!(alpine.contains("        python3 \\\n"));
        assert!(alpine.contains("ENV YARN_VERSION 1.22.22\n"));

        let debian = tree.read(18, "bookworm");
        assert!(debian.starts_with("FROM buildpack-deps:bookworm\n"));
        assert!(debian.contains("ENV NODE_VERSION 18.10.0\n"));
        assert!(debian.contains("    4ED778F539E3634C779C87C6D7062848A1AB005C \\\n"));
        assert!(debian.contains("    6A010C5166006599AA17F08146C2130DFD2497F5 \\\n"));

        let slim = tree.read(18, "bookworm-slim");
        assert!(slim.starts_with("FROM debian:bookworm-slim\n"));
        assert!(slim.contains("ENV NODE_VERSION 18.10.0\n"));
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let tree = scenario_tree();
        scenario_catalog().orchestrator(tree.config()).run().await.unwrap();
        let entries = [(16, "bullseye"), (16, "alpine3.16"), (18, "bookworm"), (18, "alpine3.20")];
        let before = tree.snapshot(&entries);

        let report = scenario_catalog().orchestrator(tree.config()).run().await.unwrap();

        assert!(!report.should_update);
        assert!(report.updated_versions().is_empty());
        assert_eq!(report.files_changed(), 0);
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o, MajorOutcome::UpToDate { .. })));
        assert_eq!(tree.snapshot(&entries), before);
    }

    #[tokio::test]
    async fn test_alternate_catch_up_leaves_primary_untouched() {
        let tree = Tree::new()
            .pin(20, "bookworm", "20.2.0")
            .pin(20, "alpine3.20", "20.1.0");
        let primary_before = tree.read(20, "bookworm");

        let report = Catalog::default()
            .release("20.2.0")
            .release("20.1.0")
            .build("20.2.0")
            .orchestrator(tree.config())
            .run()
            .await
            .unwrap();

        assert!(report.should_update);
        match outcome(&report, 20) {
            MajorOutcome::Updated { scope, from, to, variants, .. } => {
                assert_eq!(*scope, UpdateScope::AlternateOnly);
                assert_eq!(*from, v("20.1.0"));
                assert_eq!(*to, v("20.2.0"));
                assert_eq!(variants.len(), 1);
                assert_eq!(variants[0].name, "alpine3.20");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(tree.read(20, "bookworm"), primary_before);
        assert!(tree.read(20, "alpine3.20").contains("ENV NODE_VERSION 20.2.0\n"));
    }

    #[tokio::test]
    async fn test_major_filter() {
        let tree = scenario_tree();
        let mut config = tree.config();
        config.majors = dockbump::resolve::MajorFilter::new().with_only(vec![18]);
        let before_16 = tree.read(16, "bullseye");

        let report = scenario_catalog().orchestrator(config).run().await.unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].major(), 18);
        assert_eq!(tree.read(16, "bullseye"), before_16);
    }

    #[tokio::test]
    async fn test_release_age_filter_ignores_fresh_releases() {
        let tree = Tree::new()
            .pin(22, "bookworm", "22.1.0")
            .pin(22, "alpine3.20", "22.1.0");
        let mut config = tree.config();
        config.min_age = Some(std::time::Duration::from_secs(14 * 24 * 60 * 60));

        let today = chrono::Utc::now().date_naive();
        let mut catalog = Catalog::default().build("22.2.0");
        catalog
            .releases
            .push(CatalogEntry::new(v("22.2.0")).with_release_date(today));

        let report = catalog.orchestrator(config).run().await.unwrap();
        assert!(!report.should_update);
        assert!(matches!(outcome(&report, 22), MajorOutcome::UpToDate { .. }));
    }
}

mod missing_flavor {
    use super::*;

    fn tree() -> Tree {
        Tree::new()
            .pin(18, "bookworm", "18.9.0")
            .pin(18, "alpine3.20", "18.9.0")
    }

    fn catalog(security: bool) -> Catalog {
        Catalog::default()
            .release("18.10.0")
            .build_without_flavor("18.10.0", security)
    }

    fn config(tree: &Tree, policy: MissingFlavorPolicy) -> RunConfig {
        let mut config = tree.config();
        config.missing_flavor = policy;
        config
    }

    #[tokio::test]
    async fn test_narrow_renders_primary_only() {
        let tree = tree();
        let alternate_before = tree.read(18, "alpine3.20");

        let report = catalog(false)
            .orchestrator(config(&tree, MissingFlavorPolicy::Narrow))
            .run()
            .await
            .unwrap();

        match outcome(&report, 18) {
            MajorOutcome::Updated { scope, expedited, deferred, .. } => {
                assert_eq!(*scope, UpdateScope::PrimaryOnly);
                assert!(!expedited);
                assert_eq!(
                    *deferred,
                    Some(DeferReason::MissingFlavor { flavor: MUSL.to_string() })
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(tree.read(18, "bookworm").contains("ENV NODE_VERSION 18.10.0\n"));
        assert_eq!(tree.read(18, "alpine3.20"), alternate_before);
    }

    #[tokio::test]
    async fn test_skip_defers_whole_major() {
        let tree = tree();
        let before = tree.snapshot(&[(18, "bookworm"), (18, "alpine3.20")]);

        let report = catalog(false)
            .orchestrator(config(&tree, MissingFlavorPolicy::Skip))
            .run()
            .await
            .unwrap();

        assert!(matches!(
            outcome(&report, 18),
            MajorOutcome::Deferred { target, .. } if *target == v("18.10.0")
        ));
        assert!(report.updated_versions().is_empty());
        assert_eq!(tree.snapshot(&[(18, "bookworm"), (18, "alpine3.20")]), before);
    }

    #[tokio::test]
    async fn test_abort_writes_nothing() {
        let tree = tree().pin(20, "bookworm", "20.1.0").pin(20, "alpine3.20", "20.1.0");
        let entries = [(18, "bookworm"), (18, "alpine3.20"), (20, "bookworm")];
        let before = tree.snapshot(&entries);

        let result = catalog(false)
            .release("20.2.0")
            .build("20.2.0")
            .orchestrator(config(&tree, MissingFlavorPolicy::Abort))
            .run()
            .await;

        assert!(matches!(result, Err(AppError::MissingFlavor { .. })));
        assert_eq!(tree.snapshot(&entries), before);
    }

    #[tokio::test]
    async fn test_security_release_is_expedited() {
        for policy in [MissingFlavorPolicy::Skip, MissingFlavorPolicy::Abort] {
            let tree = tree();
            let report = catalog(true)
                .orchestrator(config(&tree, policy))
                .run()
                .await
                .unwrap();

            assert!(matches!(
                outcome(&report, 18),
                MajorOutcome::Updated { scope: UpdateScope::PrimaryOnly, expedited: true, .. }
            ));
            assert!(tree.read(18, "bookworm").contains("ENV NODE_VERSION 18.10.0\n"));
            assert!(tree.read(18, "alpine3.20").contains("ENV NODE_VERSION 18.9.0\n"));
        }
    }

    #[tokio::test]
    async fn test_missing_checksum_narrows_update() {
        let tree = tree();
        let report = Catalog::default()
            .release("18.10.0")
            .build("18.10.0")
            .without_checksum("18.10.0")
            .orchestrator(tree.config())
            .run()
            .await
            .unwrap();

        match outcome(&report, 18) {
            MajorOutcome::Updated { scope, deferred, .. } => {
                assert_eq!(*scope, UpdateScope::PrimaryOnly);
                assert_eq!(
                    *deferred,
                    Some(DeferReason::MissingChecksum { flavor: MUSL.to_string() })
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(tree.read(18, "alpine3.20").contains("ENV NODE_VERSION 18.9.0\n"));
    }
}

mod run_modes {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let tree = scenario_tree();
        let entries = [(16, "bullseye"), (16, "alpine3.16"), (18, "bookworm"), (18, "alpine3.20")];
        let before = tree.snapshot(&entries);
        let mut config = tree.config();
        config.dry_run = true;

        let report = scenario_catalog().orchestrator(config).run().await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.updated_versions().len(), 2);
        assert!(report.files_changed() > 0);
        assert_eq!(tree.snapshot(&entries), before);
    }

    #[tokio::test]
    async fn test_refresh_all_rerenders_current_majors() {
        let tree = Tree::new()
            .pin(20, "bookworm", "20.2.0")
            .pin(20, "alpine3.20", "20.2.0");
        let mut config = tree.config();
        config.refresh_all = true;

        let report = Catalog::default()
            .release("20.2.0")
            .build("20.2.0")
            .orchestrator(config)
            .run()
            .await
            .unwrap();

        assert!(!report.should_update);
        match outcome(&report, 20) {
            MajorOutcome::Refreshed { variants, .. } => assert_eq!(variants.len(), 2),
            other => panic!("unexpected outcome {:?}", other),
        }
        let alpine = tree.read(20, "alpine3.20");
        assert!(alpine.contains("ENV NODE_VERSION 20.2.0\n"));
        assert!(alpine.contains("CHECKSUM=\"sha-20.2.0\""));
    }

    #[tokio::test]
    async fn test_fixed_tool_version() {
        let tree = Tree::new()
            .pin(20, "bookworm", "20.1.0")
            .pin(20, "alpine3.20", "20.1.0");
        let mut config = tree.config();
        config.tool_version = Some("1.22.19".to_string());

        Catalog::default()
            .release("20.2.0")
            .build("20.2.0")
            .orchestrator(config)
            .run()
            .await
            .unwrap();

        assert!(tree.read(20, "bookworm").contains("ENV YARN_VERSION 1.22.19\n"));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_malformed_definition_skips_major() {
        let tree = scenario_tree()
            .write_raw(14, "bullseye", "FROM node\nENV NODE_VERSION latest\n")
            .pin(14, "alpine3.16", "14.21.3");

        let report = scenario_catalog().orchestrator(tree.config()).run().await.unwrap();

        assert!(matches!(
            outcome(&report, 14),
            MajorOutcome::Skipped { reason: SkipReason::MalformedDefinition(_), .. }
        ));
        assert!(outcome(&report, 16).is_update());
        assert!(outcome(&report, 18).is_update());
    }

    #[tokio::test]
    async fn test_missing_family_skips_major() {
        let tree = scenario_tree().pin(22, "bookworm", "22.1.0");

        let report = scenario_catalog().orchestrator(tree.config()).run().await.unwrap();

        assert!(matches!(
            outcome(&report, 22),
            MajorOutcome::Skipped { reason: SkipReason::MissingFamily(_), .. }
        ));
    }

    #[tokio::test]
    async fn test_catalog_failure_writes_nothing() {
        let tree = scenario_tree();
        let entries = [(16, "bullseye"), (16, "alpine3.16"), (18, "bookworm"), (18, "alpine3.20")];
        let before = tree.snapshot(&entries);

        let result = scenario_catalog()
            .failing()
            .orchestrator(tree.config())
            .run()
            .await;

        assert!(matches!(result, Err(AppError::Catalog(_))));
        assert_eq!(tree.snapshot(&entries), before);
    }

    #[tokio::test]
    async fn test_missing_template_fails_before_writing() {
        let tree = scenario_tree();
        fs::remove_file(tree.root().join("Dockerfile-slim.template")).unwrap();
        let before = tree.read(16, "bullseye");

        let result = scenario_catalog().orchestrator(tree.config()).run().await;

        assert!(matches!(result, Err(AppError::Definition(_))));
        assert_eq!(tree.read(16, "bullseye"), before);
    }

    #[tokio::test]
    async fn test_empty_root() {
        let tree = Tree::new();
        let report = scenario_catalog().orchestrator(tree.config()).run().await.unwrap();
        assert!(report.outcomes.is_empty());
        assert!(!report.should_update);
    }
}

mod end_of_life {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 16 ended in 2023; 18 is supported far into the future
    fn schedule() -> FakeSchedule {
        FakeSchedule {
            windows: vec![
                SupportWindow::new(16, day(2021, 4, 20), day(2023, 9, 11)),
                SupportWindow::new(18, day(2022, 4, 19), day(2099, 4, 30)),
            ],
            fail: false,
        }
    }

    #[tokio::test]
    async fn test_end_of_life_major_is_reported_and_untouched() {
        let tree = scenario_tree();
        let before = tree.snapshot(&[(16, "bullseye"), (16, "alpine3.16")]);

        let report = scenario_catalog()
            .orchestrator(tree.config())
            .with_schedule(Arc::new(schedule()))
            .run()
            .await
            .unwrap();

        assert_eq!(
            outcome(&report, 16),
            &MajorOutcome::Skipped {
                major: 16,
                reason: SkipReason::EndOfLife { end: day(2023, 9, 11) },
            }
        );
        assert!(outcome(&report, 18).is_update());
        let versions: Vec<String> = report.updated_versions().iter().map(|v| v.to_string()).collect();
        assert_eq!(versions, vec!["18.10.0"]);

        assert_eq!(tree.snapshot(&[(16, "bullseye"), (16, "alpine3.16")]), before);
        assert!(tree.root().join("16").join("bullseye").is_dir());
    }

    #[tokio::test]
    async fn test_refresh_all_skips_end_of_life_major() {
        let tree = scenario_tree();
        let before = tree.snapshot(&[(16, "bullseye"), (16, "alpine3.16")]);
        let mut config = tree.config();
        config.refresh_all = true;

        let report = scenario_catalog()
            .orchestrator(config)
            .with_schedule(Arc::new(schedule()))
            .run()
            .await
            .unwrap();

        assert!(matches!(
            outcome(&report, 16),
            MajorOutcome::Skipped { reason: SkipReason::EndOfLife { .. }, .. }
        ));
        assert_eq!(tree.snapshot(&[(16, "bullseye"), (16, "alpine3.16")]), before);
    }

    #[tokio::test]
    async fn test_schedule_failure_writes_nothing() {
        let tree = scenario_tree();
        let entries = [(16, "bullseye"), (18, "bookworm"), (18, "alpine3.20")];
        let before = tree.snapshot(&entries);

        let err = scenario_catalog()
            .orchestrator(tree.config())
            .with_schedule(Arc::new(FakeSchedule {
                windows: Vec::new(),
                fail: true,
            }))
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Catalog(ref e) if e.is_unavailable()));
        assert_eq!(tree.snapshot(&entries), before);
    }
}
