//! Update orchestrator for one resolution cycle
//!
//! This module provides:
//! - Workflow coordination: scan → fetch → resolve → plan → render → write
//! - Concurrent catalog and checksum fetches, sequential writes
//! - Dry-run mode support
//! - Per-major continuation: only catalog failures abort the run
//! - End-of-life majors skipped when a release schedule is configured

use crate::catalog::{
    BuildIndex, HttpClient, NodeReleaseIndex, NodeReleaseSchedule, ReleaseCatalog,
    SupportSchedule, ToolVersionSource, UnofficialBuildIndex, YarnVersionSource,
};
use crate::config::RunConfig;
use crate::definition::{scan, DefinitionWriter, FsDefinitionStore};
use crate::domain::{
    DeferReason, MajorOutcome, ReleaseVersion, RenderedVariant, RunReport, SkipReason,
    SkippedVariant, SupportWindow, TemplateKind, TrackedVersion, UpdateScope, Variant,
    VariantFamily,
};
use crate::error::{AppError, CatalogError, DefinitionError};
use crate::progress::Progress;
use crate::resolve::{
    availability, plan, PlanOutcome, ReleaseAgeFilter, RenderPlan, StalenessResolver, SupportFilter,
};
use crate::template::{render, KeyRing, RenderContext, TemplateSet};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

type Checksums = BTreeMap<ReleaseVersion, Option<String>>;

/// Drives one resolution cycle over a definition root
pub struct Orchestrator {
    config: RunConfig,
    releases: Arc<dyn ReleaseCatalog>,
    builds: Arc<dyn BuildIndex>,
    tool: Arc<dyn ToolVersionSource>,
    schedule: Option<Arc<dyn SupportSchedule>>,
    show_progress: bool,
}

/// What to render for one tracked major
#[derive(Debug)]
struct RenderJob<'a> {
    tracked: &'a TrackedVersion,
    kind: JobKind,
    /// Refresh without a checksum for the alternate pin
    alternate_dropped: bool,
}

#[derive(Debug)]
enum JobKind {
    Update(RenderPlan),
    /// Re-render at the pinned versions
    Refresh,
}

impl<'a> RenderJob<'a> {
    fn update(tracked: &'a TrackedVersion, plan: RenderPlan) -> Self {
        Self {
            tracked,
            kind: JobKind::Update(plan),
            alternate_dropped: false,
        }
    }

    fn refresh(tracked: &'a TrackedVersion) -> Self {
        Self {
            tracked,
            kind: JobKind::Refresh,
            alternate_dropped: false,
        }
    }

    /// Version the alternate family is rendered at, if it is rendered
    fn alternate_version(&self) -> Option<&ReleaseVersion> {
        match &self.kind {
            JobKind::Update(p) if p.scope.includes(VariantFamily::Alternate) => Some(&p.target),
            JobKind::Update(_) => None,
            JobKind::Refresh if self.alternate_dropped => None,
            JobKind::Refresh => Some(&self.tracked.alternate.pinned),
        }
    }

    /// Stop rendering the alternate family
    fn drop_alternate(&mut self, reason: DeferReason) {
        match &mut self.kind {
            JobKind::Update(p) => {
                p.scope = UpdateScope::PrimaryOnly;
                p.deferred = Some(reason);
            }
            JobKind::Refresh => self.alternate_dropped = true,
        }
    }

    /// Variants to render, each with the version it is rendered at
    fn targets(&self) -> Vec<(&'a Variant, ReleaseVersion)> {
        let tracked = self.tracked;
        tracked
            .variants
            .iter()
            .filter_map(|v| match &self.kind {
                JobKind::Update(p) => p.scope.includes(v.family).then(|| (v, p.target.clone())),
                JobKind::Refresh => (v.family == VariantFamily::Primary || !self.alternate_dropped)
                    .then(|| (v, tracked.state(v.family).pinned.clone())),
            })
            .collect()
    }

    fn outcome(&self, variants: Vec<RenderedVariant>) -> MajorOutcome {
        let major = self.tracked.major;
        match &self.kind {
            JobKind::Update(p) => {
                let from_family = if p.scope == UpdateScope::AlternateOnly {
                    VariantFamily::Alternate
                } else {
                    VariantFamily::Primary
                };
                MajorOutcome::Updated {
                    major,
                    scope: p.scope,
                    from: self.tracked.state(from_family).pinned.clone(),
                    to: p.target.clone(),
                    expedited: p.expedited,
                    variants,
                    deferred: p.deferred.clone(),
                }
            }
            JobKind::Refresh => MajorOutcome::Refreshed { major, variants },
        }
    }
}

impl Orchestrator {
    /// Create an orchestrator talking to the configured upstream catalogs
    pub fn new(config: RunConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let releases = Arc::new(NodeReleaseIndex::new(
            client.clone(),
            &config.catalog.releases_url,
        ));
        let builds = Arc::new(UnofficialBuildIndex::new(
            client.clone(),
            &config.catalog.builds_url,
        ));
        let tool = Arc::new(YarnVersionSource::new(
            client.clone(),
            &config.catalog.tool_version_url,
        ));
        let schedule = config
            .catalog
            .schedule_url
            .as_deref()
            .map(|url| Arc::new(NodeReleaseSchedule::new(client, url)) as Arc<dyn SupportSchedule>);

        let orchestrator = Self::with_sources(config, releases, builds, tool);
        Ok(match schedule {
            Some(schedule) => orchestrator.with_schedule(schedule),
            None => orchestrator,
        })
    }

    /// Create an orchestrator over custom catalog sources (for testing)
    pub fn with_sources(
        config: RunConfig,
        releases: Arc<dyn ReleaseCatalog>,
        builds: Arc<dyn BuildIndex>,
        tool: Arc<dyn ToolVersionSource>,
    ) -> Self {
        Self {
            config,
            releases,
            builds,
            tool,
            schedule: None,
            show_progress: false,
        }
    }

    /// Skip majors the schedule lists as past their end of life
    pub fn with_schedule(mut self, schedule: Arc<dyn SupportSchedule>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run one resolution cycle
    ///
    /// Nothing is written unless every catalog fetch succeeded and no major
    /// aborted under the missing-flavor policy.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let config = &self.config;
        let flavor = config.definitions.alternate_flavor.as_str();
        let mut progress = Progress::new(self.show_progress);
        let mut report = RunReport::new(config.dry_run);
        let store = FsDefinitionStore::new(&config.root, &config.definitions.file_name);

        // Step 1: Read the definition tree
        progress.scanning();
        let scanned = scan(&store, &config.definitions, &config.majors);
        progress.clear();
        let scanned = scanned?;

        for (major, reason) in &scanned.skipped {
            report.add_outcome(MajorOutcome::Skipped {
                major: *major,
                reason: reason.clone(),
            });
        }
        report.skipped_variants.extend(scanned.skipped_variants.iter().cloned());
        if scanned.tracked.is_empty() {
            info!(root = %config.root.display(), "no tracked major versions");
            return Ok(report);
        }

        // Step 2: One snapshot of every catalog
        let mut sources = vec![self.releases.name(), self.builds.name()];
        sources.extend(self.schedule.as_ref().map(|s| s.name()));
        progress.fetching(&sources);
        let fetched = tokio::try_join!(
            self.releases.fetch_releases(),
            self.builds.fetch_index(),
            self.support_windows()
        );
        progress.clear();
        let (releases, builds, windows) = fetched?;
        debug!(
            releases = releases.len(),
            builds = builds.len(),
            windows = windows.len(),
            "catalog snapshot"
        );

        // Step 3: Drop end-of-life majors, then resolve, annotate and plan
        // the rest before touching disk
        let support = SupportFilter::new(windows);
        let mut supported = Vec::with_capacity(scanned.tracked.len());
        for tracked in scanned.tracked {
            match support.end_of_life(tracked.major) {
                Some(end) => {
                    warn!(major = tracked.major, %end, "skipping end-of-life major");
                    report.add_outcome(MajorOutcome::Skipped {
                        major: tracked.major,
                        reason: SkipReason::EndOfLife { end },
                    });
                }
                None => supported.push(tracked),
            }
        }
        if supported.is_empty() {
            return Ok(report);
        }

        let resolver = StalenessResolver::new(ReleaseAgeFilter::new(config.min_age));
        let resolution = resolver.resolve(&supported, &releases);
        report.should_update = resolution.should_update;
        let decisions = availability::annotate(resolution.decisions, &builds, flavor);

        let mut jobs = Vec::new();
        for tracked in &supported {
            let decision = decisions.iter().find(|d| d.major == tracked.major);
            match decision.map(|d| (d, plan(d, config.missing_flavor, flavor))) {
                Some((_, PlanOutcome::Render(p))) => {
                    if p.expedited {
                        info!(major = p.major, version = %p.target, "expedited security release");
                    }
                    if let Some(reason) = &p.deferred {
                        warn!(major = p.major, version = %p.target, %reason, "holding back alternate variants");
                    }
                    jobs.push(RenderJob::update(tracked, p));
                }
                Some((d, PlanOutcome::Defer(reason))) => {
                    warn!(major = d.major, version = %d.target_version, %reason, "deferring update");
                    report.add_outcome(MajorOutcome::Deferred {
                        major: d.major,
                        target: d.target_version.clone(),
                        reason,
                    });
                }
                Some((d, PlanOutcome::Abort)) => {
                    return Err(AppError::MissingFlavor {
                        version: d.target_version.to_string(),
                        flavor: flavor.to_string(),
                    });
                }
                Some((_, PlanOutcome::Idle)) | None if config.refresh_all => {
                    jobs.push(RenderJob::refresh(tracked));
                }
                _ => report.add_outcome(MajorOutcome::UpToDate {
                    major: tracked.major,
                }),
            }
        }
        if jobs.is_empty() {
            return Ok(report);
        }

        // Step 4: Remote render inputs
        let versions: BTreeSet<ReleaseVersion> =
            jobs.iter().filter_map(|j| j.alternate_version().cloned()).collect();
        let mut sources = vec!["checksum manifests"];
        if config.tool_version.is_none() {
            sources.push("tool version");
        }
        progress.fetching(&sources);
        let inputs = tokio::try_join!(self.tool_version(), self.fetch_checksums(versions));
        progress.clear();
        let (tool_version, checksums) = inputs?;

        let mut ready = Vec::with_capacity(jobs.len());
        for mut job in jobs {
            let missing = job
                .alternate_version()
                .is_some_and(|v| checksums.get(v).map_or(true, Option::is_none));
            if !missing {
                ready.push(job);
                continue;
            }

            let reason = DeferReason::MissingChecksum {
                flavor: flavor.to_string(),
            };
            let major = job.tracked.major;
            match &job.kind {
                JobKind::Update(p) if p.scope == UpdateScope::AlternateOnly => {
                    warn!(major, version = %p.target, %reason, "deferring update");
                    report.add_outcome(MajorOutcome::Deferred {
                        major,
                        target: p.target.clone(),
                        reason,
                    });
                    continue;
                }
                JobKind::Update(p) => {
                    warn!(major, version = %p.target, %reason, "holding back alternate variants");
                }
                JobKind::Refresh => {
                    for variant in job.tracked.variants_in(VariantFamily::Alternate) {
                        report.skipped_variants.push(SkippedVariant {
                            major,
                            variant: variant.name.clone(),
                            reason: reason.to_string(),
                        });
                    }
                }
            }
            job.drop_alternate(reason);
            ready.push(job);
        }

        // Step 5: Local render inputs
        let kinds: BTreeSet<TemplateKind> = ready
            .iter()
            .flat_map(|j| j.targets())
            .map(|(v, _)| v.template)
            .collect();
        let templates = TemplateSet::load(&config.root, &config.templates, kinds)?;
        let keys = KeyRing::load(&config.root, &config.keys)?;

        // Step 6: Render and write, one file at a time
        let total: usize = ready.iter().map(|j| j.targets().len()).sum();
        progress.rendering(total);
        let writer = DefinitionWriter::new(config.dry_run);

        for job in &ready {
            let major = job.tracked.major;
            let mut rendered = Vec::new();

            for (variant, version) in job.targets() {
                progress.variant(major, &variant.name);
                let content =
                    match self.render_variant(&templates, &keys, &tool_version, &checksums, variant, &version) {
                        Ok(content) => content,
                        Err(e) => {
                            warn!(major, variant = %variant.name, error = %e, "skipping variant");
                            report.skipped_variants.push(SkippedVariant {
                                major,
                                variant: variant.name.clone(),
                                reason: e.to_string(),
                            });
                            progress.variant_done();
                            continue;
                        }
                    };

                match writer.write(&store, major, &variant.name, &content) {
                    Ok(result) => {
                        debug!(path = %result.path.display(), changed = result.changed, "rendered");
                        rendered.push(RenderedVariant {
                            name: variant.name.clone(),
                            version,
                            changed: result.changed,
                        });
                    }
                    Err(e) => {
                        warn!(major, variant = %variant.name, error = %e, "write failed");
                        report.errors.push(e.to_string());
                    }
                }
                progress.variant_done();
            }

            let outcome = job.outcome(rendered);
            if let MajorOutcome::Updated { scope, to, .. } = &outcome {
                info!(major, version = %to, %scope, "updated");
            }
            report.add_outcome(outcome);
        }
        progress.clear();

        Ok(report)
    }

    async fn support_windows(&self) -> Result<Vec<SupportWindow>, CatalogError> {
        match &self.schedule {
            Some(schedule) => schedule.fetch_schedule().await,
            None => Ok(Vec::new()),
        }
    }

    async fn tool_version(&self) -> Result<String, CatalogError> {
        match &self.config.tool_version {
            Some(version) => Ok(version.clone()),
            None => self.tool.fetch_tool_version().await,
        }
    }

    /// Fetch the alternate-flavor checksum of every version concurrently
    async fn fetch_checksums(&self, versions: BTreeSet<ReleaseVersion>) -> Result<Checksums, CatalogError> {
        let mut tasks = JoinSet::new();
        for version in versions {
            let builds = Arc::clone(&self.builds);
            let flavor = self.config.definitions.alternate_flavor.clone();
            tasks.spawn(async move {
                let checksum = builds.fetch_checksum(&version, &flavor).await;
                (version, checksum)
            });
        }

        let mut checksums = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (version, checksum) =
                joined.map_err(|e| CatalogError::unavailable("checksum manifest", e.to_string()))?;
            checksums.insert(version, checksum?);
        }
        Ok(checksums)
    }

    fn render_variant(
        &self,
        templates: &TemplateSet,
        keys: &KeyRing,
        tool_version: &str,
        checksums: &Checksums,
        variant: &Variant,
        version: &ReleaseVersion,
    ) -> Result<String, DefinitionError> {
        let defs = &self.config.definitions;
        let template = templates.get(variant.template).ok_or_else(|| {
            DefinitionError::malformed(&self.config.root, format!("no template loaded for {}", variant.name))
        })?;
        let base_image = defs.naming.base_image(&variant.name);
        let checksum = match variant.template {
            TemplateKind::Alternate => checksums.get(version).and_then(|c| c.as_deref()),
            _ => None,
        };

        let ctx = RenderContext {
            template_path: &template.path,
            kind: variant.template,
            version,
            base_image: &base_image,
            version_token: &defs.version_token,
            tool_version_token: &defs.tool_version_token,
            tool_version,
            keys,
            checksum,
        };
        render(&template.text, &ctx)
    }
}
