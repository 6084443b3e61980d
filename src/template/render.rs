//! Template rendering
//!
//! Substitution points, all line-anchored:
//! - `FROM ...`: base image (required)
//! - `<version token> ...`: runtime version (required)
//! - `<tool version token> ...`: secondary-tool version
//! - `"${NODE_KEYS[@]}"`: runtime key list (required)
//! - `"${YARN_KEYS[@]}"`: secondary-tool key list
//!
//! Alternate templates additionally carry `${PYTHON_VERSION}` and
//! `CHECKSUM=CHECKSUM_x64`.

use crate::domain::{ReleaseVersion, TemplateKind};
use crate::error::DefinitionError;
use crate::template::KeyRing;
use regex::{Captures, NoExpand, Regex};
use std::path::Path;
use std::sync::LazyLock;

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^FROM[ \t].*$").unwrap());

static RUNTIME_KEYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^([ \t]*)"\$\{NODE_KEYS\[@\]\}".*$"#).unwrap());

static TOOL_KEYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^([ \t]*)"\$\{YARN_KEYS\[@\]\}".*$"#).unwrap());

const PYTHON_PLACEHOLDER: &str = "${PYTHON_VERSION}";
const CHECKSUM_PLACEHOLDER: &str = "CHECKSUM=CHECKSUM_x64";

/// First major built against python3 in the alternate image
const PYTHON3_SINCE_MAJOR: u64 = 14;

/// Everything a template needs to become a definition
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Template file, for error messages
    pub template_path: &'a Path,
    pub kind: TemplateKind,
    pub version: &'a ReleaseVersion,
    pub base_image: &'a str,
    pub version_token: &'a str,
    pub tool_version_token: &'a str,
    pub tool_version: &'a str,
    pub keys: &'a KeyRing,
    /// Alternate-flavor artifact checksum; alternate templates only
    pub checksum: Option<&'a str>,
}

/// Render a template; pure and deterministic
pub fn render(template: &str, ctx: &RenderContext<'_>) -> Result<String, DefinitionError> {
    let missing = |placeholder: &str| DefinitionError::missing_placeholder(ctx.template_path, placeholder);

    let text = replace_required(&FROM_RE, template, &format!("FROM {}", ctx.base_image))
        .ok_or_else(|| missing("FROM"))?;

    let version_re = declaration_regex(ctx.template_path, ctx.version_token)?;
    let text = replace_required(&version_re, &text, &format!("{} {}", ctx.version_token, ctx.version))
        .ok_or_else(|| missing(ctx.version_token))?;

    let tool_re = declaration_regex(ctx.template_path, ctx.tool_version_token)?;
    let text = tool_re
        .replace(&text, NoExpand(&format!("{} {}", ctx.tool_version_token, ctx.tool_version)))
        .into_owned();

    let text = replace_keys(&RUNTIME_KEYS_RE, &text, &ctx.keys.runtime)
        .ok_or_else(|| missing("\"${NODE_KEYS[@]}\""))?;
    let text = replace_keys(&TOOL_KEYS_RE, &text, &ctx.keys.tool).unwrap_or(text);

    if ctx.kind != TemplateKind::Alternate {
        return Ok(text);
    }

    let python = if ctx.version.major() < PYTHON3_SINCE_MAJOR {
        "python2"
    } else {
        "python3"
    };
    let text = text.replace(PYTHON_PLACEHOLDER, python);

    if !text.contains(CHECKSUM_PLACEHOLDER) {
        return Ok(text);
    }
    let checksum = ctx.checksum.ok_or_else(|| {
        DefinitionError::malformed(
            ctx.template_path,
            format!("no checksum available for {}", ctx.version),
        )
    })?;
    Ok(text.replacen(CHECKSUM_PLACEHOLDER, &format!("CHECKSUM=\"{}\"", checksum), 1))
}

/// `<token> <anything>` at the start of a line
fn declaration_regex(path: &Path, token: &str) -> Result<Regex, DefinitionError> {
    Regex::new(&format!(r"(?m)^{}[ \t=].*$", regex::escape(token)))
        .map_err(|e| DefinitionError::malformed(path, e.to_string()))
}

fn replace_required(re: &Regex, text: &str, line: &str) -> Option<String> {
    re.is_match(text)
        .then(|| re.replace(text, NoExpand(line)).into_owned())
}

/// Expand a key-list line into one `<indent><key> \` line per key
fn replace_keys(re: &Regex, text: &str, keys: &[String]) -> Option<String> {
    if !re.is_match(text) {
        return None;
    }
    let replaced = re.replace(text, |caps: &Captures| {
        let indent = &caps[1];
        keys.iter()
            .map(|key| format!("{}{} \\", indent, key))
            .collect::<Vec<_>>()
            .join("\n")
    });
    Some(replaced.into_owned())
}
