//! Python recognizers.
//!
//! Calls: `requests`/`httpx`/`aiohttp` verbs, `session`/`client` objects and
//! `self.<...client/session/http/api...>` attributes, `urljoin(base, "...")`,
//! f-strings starting from a base placeholder, and `BASE_URL + "/path"`.
//! Imports: `import a.b` and `from a.b import c` including relative dots.

use super::{PatternRule, RuleKind};

pub const LINE_COMMENTS: &[&str] = &["#"];

pub const RULES: &[PatternRule] = &[
    PatternRule {
        name: "py-http-verb",
        kind: RuleKind::Call,
        pattern: r#"\b(?:requests|httpx|aiohttp|session|client|self\.\w*(?:client|session|http|api)\w*)\.(?:get|post|put|patch|delete|head|request)\s*\(\s*(?:['"][A-Za-z]+['"]\s*,\s*)?(?:url\s*=\s*)?[rfb]?['"](?P<target>[^'"]+)['"]"#,
    },
    PatternRule {
        name: "py-urljoin",
        kind: RuleKind::Call,
        pattern: r#"\burljoin\s*\([^,]+,\s*[rf]?['"](?P<target>[^'"]+)['"]"#,
    },
    PatternRule {
        name: "py-base-url-fstring",
        kind: RuleKind::Call,
        pattern: r#"\bf['"]\{[\w.]+\}(?P<target>/[^'"]*)['"]"#,
    },
    PatternRule {
        name: "py-base-url-concat",
        kind: RuleKind::Call,
        pattern: r#"\b\w*(?:URL|Url|url|BASE|Base|base)\w*\s*\+\s*['"](?P<target>/[^'"]*)['"]"#,
    },
    PatternRule {
        name: "py-from-import",
        kind: RuleKind::Import,
        pattern: r#"^\s*from\s+(?P<target>\.+[\w.]*|[\w.]+)\s+import\b"#,
    },
    PatternRule {
        name: "py-import",
        kind: RuleKind::Import,
        pattern: r#"^\s*import\s+(?P<target>[\w.]+)"#,
    },
];
