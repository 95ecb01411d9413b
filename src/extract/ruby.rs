//! Ruby recognizers.
//!
//! Calls: `HTTParty`/`Faraday`/`RestClient`/`Typhoeus`/`HTTP` verbs,
//! `Net::HTTP.get(URI("..."))`, Faraday-style connection objects, and string
//! interpolation starting from a base placeholder.

use super::{PatternRule, RuleKind};

pub const LINE_COMMENTS: &[&str] = &["#"];

pub const RULES: &[PatternRule] = &[
    PatternRule {
        name: "rb-http-library",
        kind: RuleKind::Call,
        pattern: r#"\b(?:HTTParty|Faraday|RestClient|Typhoeus|HTTP)\.(?:get|post|put|patch|delete|head)\s*\(?\s*["'](?P<target>[^"']+)["']"#,
    },
    PatternRule {
        name: "rb-net-http",
        kind: RuleKind::Call,
        pattern: r#"\bNet::HTTP\.(?:get|post|get_response)\s*\(\s*URI\s*\(?\s*["'](?P<target>[^"']+)["']"#,
    },
    PatternRule {
        name: "rb-connection",
        kind: RuleKind::Call,
        pattern: r#"\b(?:conn|connection|client|http)\.(?:get|post|put|patch|delete)\s*\(?\s*["'](?P<target>[^"']+)["']"#,
    },
    PatternRule {
        name: "rb-base-url-interpolation",
        kind: RuleKind::Call,
        pattern: r##""#\{[^}]+\}(?P<target>/[^"]*)""##,
    },
    PatternRule {
        name: "rb-require-relative",
        kind: RuleKind::RelativeImport,
        pattern: r#"^\s*require_relative\s*\(?\s*["'](?P<target>[^"']+)["']"#,
    },
    PatternRule {
        name: "rb-require",
        kind: RuleKind::Import,
        pattern: r#"^\s*require\s*\(?\s*["'](?P<target>[^"']+)["']"#,
    },
];
