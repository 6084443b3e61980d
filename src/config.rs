//! Run configuration
//!
//! Settings are merged once per run, in increasing priority:
//! - built-in defaults
//! - `dockbump.toml` in the definition root (or `--config <FILE>`)
//! - CLI flags
//!
//! The resulting `RunConfig` is an immutable snapshot shared by reference
//! with every stage of the cycle.

use crate::cli::CliArgs;
use crate::domain::VariantNaming;
use crate::error::ConfigError;
use crate::resolve::MajorFilter;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the definition root
pub const CONFIG_FILE_NAME: &str = "dockbump.toml";

const DEFAULT_RELEASES_URL: &str = "https://nodejs.org/dist/index.json";
const DEFAULT_BUILDS_URL: &str = "https://unofficial-builds.nodejs.org/download/release";
const DEFAULT_TOOL_VERSION_URL: &str = "https://classic.yarnpkg.com/latest-version";

/// What to do when an update needs an alternate build that is not published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingFlavorPolicy {
    /// Render the other families, hold back the alternate family
    #[default]
    Narrow,
    /// Hold back the whole major version
    Skip,
    /// Fail the run before writing anything
    Abort,
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Parse duration string in format: Nd (days), Nw (weeks), Nm (months)
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        value: s.to_string(),
    };
    let trimmed = s.trim();

    let (num_str, unit) = if let Some(n) = trimmed.strip_suffix('d') {
        (n, 'd')
    } else if let Some(n) = trimmed.strip_suffix('w') {
        (n, 'w')
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 'm')
    } else {
        return Err(invalid());
    };

    let num: u64 = num_str.parse().map_err(|_| invalid())?;

    let days_per_unit: u64 = match unit {
        'd' => 1,
        'w' => 7,
        _ => 30, // months (30 days)
    };
    let seconds = num
        .checked_mul(days_per_unit * SECONDS_PER_DAY)
        .ok_or_else(invalid)?;

    Ok(Duration::from_secs(seconds))
}

/// Upstream sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub releases_url: String,
    /// Base URL; `/index.json` and `/v{version}/SHASUMS256.txt` hang off it
    pub builds_url: String,
    pub tool_version_url: String,
    /// Support schedule; majors past their end of life are skipped when set
    pub schedule_url: Option<String>,
}

/// How build definitions are laid out and annotated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSettings {
    /// Definition file name inside each variant directory
    pub file_name: String,
    /// Line-anchored declaration carrying the pinned version
    pub version_token: String,
    /// Line-anchored declaration carrying the secondary-tool version
    pub tool_version_token: String,
    pub naming: VariantNaming,
    /// Build index file identifier the alternate family depends on
    pub alternate_flavor: String,
}

/// Template file names, relative to the definition root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFiles {
    pub alternate: PathBuf,
    pub slim: PathBuf,
    pub default: PathBuf,
}

/// Key list file names, relative to the definition root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFiles {
    pub runtime: PathBuf,
    pub tool: PathBuf,
}

/// Immutable configuration snapshot for one resolution cycle
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root: PathBuf,
    pub dry_run: bool,
    /// Re-render majors without a decision at their pinned versions
    pub refresh_all: bool,
    pub catalog: CatalogSettings,
    pub definitions: DefinitionSettings,
    pub templates: TemplateFiles,
    pub keys: KeyFiles,
    pub missing_flavor: MissingFlavorPolicy,
    pub min_age: Option<Duration>,
    /// Fixed secondary-tool version; fetched when absent
    pub tool_version: Option<String>,
    pub majors: MajorFilter,
}

impl RunConfig {
    /// Defaults for a definition root, without reading any file
    pub fn defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            refresh_all: false,
            catalog: CatalogSettings {
                releases_url: DEFAULT_RELEASES_URL.to_string(),
                builds_url: DEFAULT_BUILDS_URL.to_string(),
                tool_version_url: DEFAULT_TOOL_VERSION_URL.to_string(),
                schedule_url: None,
            },
            definitions: DefinitionSettings {
                file_name: "Dockerfile".to_string(),
                version_token: "ENV NODE_VERSION".to_string(),
                tool_version_token: "ENV YARN_VERSION".to_string(),
                naming: VariantNaming::default(),
                alternate_flavor: "linux-x64-musl".to_string(),
            },
            templates: TemplateFiles {
                alternate: PathBuf::from("Dockerfile-alpine.template"),
                slim: PathBuf::from("Dockerfile-slim.template"),
                default: PathBuf::from("Dockerfile-debian.template"),
            },
            keys: KeyFiles {
                runtime: PathBuf::from("keys/node.keys"),
                tool: PathBuf::from("keys/yarn.keys"),
            },
            missing_flavor: MissingFlavorPolicy::default(),
            min_age: None,
            tool_version: None,
            majors: MajorFilter::default(),
        }
    }

    /// Build the snapshot from CLI arguments and the optional config file
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.quiet && args.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        if args.json && args.summary {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --summary cannot be used together".to_string(),
            });
        }
        if !args.path.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: args.path.clone(),
                message: "not a directory".to_string(),
            });
        }

        let mut config = Self::defaults(&args.path);

        let config_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => {
                let candidate = args.path.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };
        if let Some(path) = config_path {
            let file = ConfigFile::read(&path)?;
            config.apply_file(file)?;
        }

        config.apply_cli(args);
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        let catalog = file.catalog;
        override_with(&mut self.catalog.releases_url, catalog.releases_url);
        override_with(&mut self.catalog.builds_url, catalog.builds_url);
        override_with(&mut self.catalog.tool_version_url, catalog.tool_version_url);
        if catalog.schedule_url.is_some() {
            self.catalog.schedule_url = catalog.schedule_url;
        }

        let defs = file.definitions;
        override_with(&mut self.definitions.file_name, defs.file_name);
        override_with(&mut self.definitions.version_token, defs.version_token);
        override_with(&mut self.definitions.tool_version_token, defs.tool_version_token);
        override_with(&mut self.definitions.naming.alternate_prefix, defs.alternate_prefix);
        override_with(&mut self.definitions.naming.slim_suffix, defs.slim_suffix);
        override_with(&mut self.definitions.alternate_flavor, defs.alternate_flavor);

        override_with(&mut self.templates.alternate, file.templates.alternate);
        override_with(&mut self.templates.slim, file.templates.slim);
        override_with(&mut self.templates.default, file.templates.default);

        override_with(&mut self.keys.runtime, file.keys.runtime);
        override_with(&mut self.keys.tool, file.keys.tool);

        override_with(&mut self.missing_flavor, file.policy.missing_flavor);
        if let Some(age) = file.policy.min_age {
            self.min_age = Some(parse_duration(&age)?);
        }

        Ok(())
    }

    fn apply_cli(&mut self, args: &CliArgs) {
        self.dry_run = args.dry_run;
        self.refresh_all = args.all;

        override_with(&mut self.catalog.releases_url, args.releases_url.clone());
        override_with(&mut self.catalog.builds_url, args.builds_url.clone());
        override_with(&mut self.catalog.tool_version_url, args.tool_version_url.clone());
        if args.schedule_url.is_some() {
            self.catalog.schedule_url = args.schedule_url.clone();
        }
        override_with(&mut self.missing_flavor, args.missing_flavor);

        // Priority: CLI --age > policy.min_age
        if args.age.is_some() {
            self.min_age = args.age;
        }
        if args.tool_version.is_some() {
            self.tool_version = args.tool_version.clone();
        }
        if args.has_major_filter() {
            self.majors = MajorFilter::new()
                .with_only(args.only.clone())
                .with_exclude(args.exclude.clone());
        }
    }

}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// On-disk configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    catalog: CatalogSection,
    definitions: DefinitionsSection,
    templates: TemplatesSection,
    keys: KeysSection,
    policy: PolicySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogSection {
    releases_url: Option<String>,
    builds_url: Option<String>,
    tool_version_url: Option<String>,
    schedule_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DefinitionsSection {
    file_name: Option<String>,
    version_token: Option<String>,
    tool_version_token: Option<String>,
    alternate_prefix: Option<String>,
    slim_suffix: Option<String>,
    alternate_flavor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TemplatesSection {
    alternate: Option<PathBuf>,
    slim: Option<PathBuf>,
    default: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct KeysSection {
    runtime: Option<PathBuf>,
    tool: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PolicySection {
    missing_flavor: Option<MissingFlavorPolicy>,
    min_age: Option<String>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
