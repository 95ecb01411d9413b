//! Go recognizers.
//!
//! Calls: `http.Get/Post/Head/PostForm`, `http.NewRequest[WithContext]`,
//! `<...client/http...>.Get/Post/Head`, `fmt.Sprintf("%s/path", base)` and
//! `base + "/path"` concatenation. Imports: single-line `import` statements
//! and entries of parenthesised import blocks.

use super::{PatternRule, RuleKind};

pub const LINE_COMMENTS: &[&str] = &["//", "/*", "*"];

pub const RULES: &[PatternRule] = &[
    PatternRule {
        name: "go-http-func",
        kind: RuleKind::Call,
        pattern: r#"\bhttp\.(?:Get|Post|Head|PostForm)\s*\(\s*"(?P<target>[^"]+)""#,
    },
    PatternRule {
        name: "go-new-request",
        kind: RuleKind::Call,
        pattern: r#"\bhttp\.NewRequest(?:WithContext)?\s*\((?:[^,"]+,\s*)?(?:"[A-Za-z]+"|http\.Method\w+)\s*,\s*"(?P<target>[^"]+)""#,
    },
    PatternRule {
        name: "go-client-method",
        kind: RuleKind::Call,
        pattern: r#"\b\w*(?:[Cc]lient|[Hh]ttp)\w*\.(?:Get|Post|Head)\s*\(\s*"(?P<target>[^"]+)""#,
    },
    PatternRule {
        name: "go-sprintf-base",
        kind: RuleKind::Call,
        pattern: r#"\bfmt\.Sprintf\s*\(\s*"%s(?P<target>/[^"]*)""#,
    },
    PatternRule {
        name: "go-base-url-concat",
        kind: RuleKind::Call,
        pattern: r#"\+\s*"(?P<target>/[^"]*)""#,
    },
    PatternRule {
        name: "go-import",
        kind: RuleKind::Import,
        pattern: r#"^\s*import\s+(?:[\w.]+\s+)?"(?P<target>[^"]+)""#,
    },
    PatternRule {
        name: "go-import-block-entry",
        kind: RuleKind::Import,
        pattern: r#"^\s*(?:[\w.]+\s+)?"(?P<target>[\w./-]+)"\s*$"#,
    },
];
