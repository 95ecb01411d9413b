//! TypeScript / JavaScript recognizers.
//!
//! Calls: `fetch(...)`, `axios.<verb>(...)`, `<x>http/client/api<y>.<verb>(...)`
//! (Angular `HttpClient`, generated API clients), template literals that
//! start from a base-URL placeholder, and `BASE_URL + '/path'` concatenation.
//! Only the first string argument is inspected; URLs built in a variable on
//! another line are missed.

use super::{PatternRule, RuleKind};

pub const LINE_COMMENTS: &[&str] = &["//", "/*", "*"];

pub const RULES: &[PatternRule] = &[
    PatternRule {
        name: "ts-fetch",
        kind: RuleKind::Call,
        pattern: r#"\bfetch\s*\(\s*[`'"](?P<target>[^`'"]+)[`'"]"#,
    },
    PatternRule {
        name: "ts-axios",
        kind: RuleKind::Call,
        pattern: r#"\baxios(?:\.(?:get|post|put|patch|delete|head|options|request))?\s*(?:<[^>()]*>)?\s*\(\s*[`'"](?P<target>[^`'"]+)[`'"]"#,
    },
    PatternRule {
        name: "ts-http-client",
        kind: RuleKind::Call,
        pattern: r#"\b\w*(?:[Hh]ttp|[Cc]lient|[Aa]pi)\w*\.(?:get|post|put|patch|delete)\s*(?:<[^>()]*>)?\s*\(\s*[`'"](?P<target>[^`'"]+)[`'"]"#,
    },
    PatternRule {
        name: "ts-base-url-template",
        kind: RuleKind::Call,
        pattern: r#"`\$\{[\w.]+\}(?P<target>/[^`]*)`"#,
    },
    PatternRule {
        name: "ts-base-url-concat",
        kind: RuleKind::Call,
        pattern: r#"\b\w*(?:URL|Url|url|BASE|Base|base)\w*\s*\+\s*[`'"](?P<target>/[^`'"]*)[`'"]"#,
    },
    PatternRule {
        name: "ts-import",
        kind: RuleKind::Import,
        pattern: r#"\bimport\s+(?:[\w*{}\s,]+\s+from\s+)?['"](?P<target>[^'"]+)['"]"#,
    },
    PatternRule {
        name: "ts-import-from",
        kind: RuleKind::Import,
        pattern: r#"\bfrom\s+['"](?P<target>[^'"]+)['"]"#,
    },
    PatternRule {
        name: "ts-require",
        kind: RuleKind::Import,
        pattern: r#"\brequire\s*\(\s*['"](?P<target>[^'"]+)['"]\s*\)"#,
    },
];
