//! Per-language recognizers for outbound service calls and source imports.
//!
//! Each language contributes a table of [`PatternRule`]s; the scanning loop
//! is shared. Adding a language means adding a `Language` variant, a module
//! with its rule table, and one arm in [`rules_for`].

pub mod go;
pub mod python;
pub mod resolve;
pub mod ruby;
pub mod typescript;

use crate::walk::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Outbound HTTP/API call; `target` is a URL, path, or API name.
    Call,
    /// Module import; `target` is relative when it starts with `.`.
    Import,
    /// Import that is always relative to the importing file's directory.
    RelativeImport,
}

/// A recognizer: `pattern` must define a `target` capture group.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub pattern: &'static str,
}

#[derive(Debug)]
pub struct CompiledRule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub regex: Regex,
}

#[derive(Debug)]
pub struct RuleSet {
    pub language: Language,
    pub line_comments: &'static [&'static str],
    pub rules: Vec<CompiledRule>,
}

impl RuleSet {
    fn compile(
        language: Language,
        line_comments: &'static [&'static str],
        rules: &'static [PatternRule],
    ) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CompiledRule {
                name: rule.name,
                kind: rule.kind,
                regex: Regex::new(rule.pattern)
                    .unwrap_or_else(|e| panic!("invalid pattern for rule {}: {e}", rule.name)),
            })
            .collect();
        Self {
            language,
            line_comments,
            rules,
        }
    }
}

static TYPESCRIPT: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile(
        Language::TypeScript,
        typescript::LINE_COMMENTS,
        typescript::RULES,
    )
});
static PYTHON: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(Language::Python, python::LINE_COMMENTS, python::RULES));
static GO: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(Language::Go, go::LINE_COMMENTS, go::RULES));
static RUBY: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(Language::Ruby, ruby::LINE_COMMENTS, ruby::RULES));

/// Compiled rule table for a language.
pub fn rules_for(language: Language) -> &'static RuleSet {
    match language {
        Language::TypeScript => &TYPESCRIPT,
        Language::Python => &PYTHON,
        Language::Go => &GO,
        Language::Ruby => &RUBY,
    }
}

/// One outbound call recognized in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiCallSite {
    pub source_file: PathBuf,
    pub line_number: usize,
    /// The literal fragment the rule captured.
    pub raw_target: String,
    pub rule: &'static str,
    /// Provided-API name the target resolved to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_api: Option<String>,
    /// Service providing `matched_api`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// One import statement recognized in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    pub source_file: PathBuf,
    pub line_number: usize,
    pub raw_target: String,
    pub kind: RuleKind,
}

struct RawMatch {
    line_number: usize,
    column: usize,
    target: String,
    rule: &'static CompiledRule,
}

/// Scan `contents` with the language's call rules. Returned call sites are
/// unresolved; see [`resolve::resolve_call`].
pub fn extract_calls(language: Language, contents: &str, file_path: &Path) -> Vec<ApiCallSite> {
    scan(rules_for(language), contents, |kind| kind == RuleKind::Call)
        .into_iter()
        .map(|m| ApiCallSite {
            source_file: file_path.to_path_buf(),
            line_number: m.line_number,
            raw_target: m.target,
            rule: m.rule.name,
            matched_api: None,
            provider: None,
        })
        .collect()
}

/// Scan `contents` with the language's import rules.
pub fn extract_imports(language: Language, contents: &str, file_path: &Path) -> Vec<ImportRef> {
    scan(rules_for(language), contents, |kind| kind != RuleKind::Call)
        .into_iter()
        .map(|m| ImportRef {
            source_file: file_path.to_path_buf(),
            line_number: m.line_number,
            raw_target: m.target,
            kind: m.rule.kind,
        })
        .collect()
}

fn scan(
    rule_set: &'static RuleSet,
    contents: &str,
    wanted: impl Fn(RuleKind) -> bool,
) -> Vec<RawMatch> {
    let mut matches = Vec::new();

    for (line_idx, line) in contents.lines().enumerate() {
        let trimmed = line.trim_start();
        if rule_set
            .line_comments
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        {
            continue;
        }

        // Byte spans of targets already taken on this line. Rules are ordered
        // most specific first, so a later rule never re-reports the same
        // literal (e.g. a base-URL template inside a fetch call).
        let mut taken: Vec<(usize, usize)> = Vec::new();

        for rule in rule_set.rules.iter().filter(|r| wanted(r.kind)) {
            for caps in rule.regex.captures_iter(line) {
                let Some(target) = caps.name("target") else {
                    continue;
                };
                let span = (target.start(), target.end());
                if taken.iter().any(|&(s, e)| span.0 < e && s < span.1) {
                    continue;
                }
                if !has_literal_segment(target.as_str()) {
                    continue;
                }
                taken.push(span);
                matches.push(RawMatch {
                    line_number: line_idx + 1,
                    column: target.start(),
                    target: target.as_str().to_string(),
                    rule,
                });
            }
        }
    }

    // Rules run in table order per line; report in source order.
    matches.sort_by_key(|m| (m.line_number, m.column));
    matches
}

/// A target made only of placeholders (`${x}`, `{x}`, `#{x}`, `%s`) names
/// nothing we can resolve.
fn has_literal_segment(target: &str) -> bool {
    target
        .split('/')
        .map(str::trim)
        .any(|seg| !seg.is_empty() && !resolve::is_placeholder(seg))
}
