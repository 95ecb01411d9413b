use super::ApiCallSite;
use crate::registry::{ServiceDefinition, ServiceRegistry};

/// A call target resolved to the service providing it.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub provider: &'a ServiceDefinition,
    pub api: &'a str,
}

/// Normalize a URL, path, or API name for matching.
///
/// Strips `scheme://host[:port]`, the query string, a fragment, and
/// leading/trailing slashes. Case is preserved.
pub fn normalize_path(raw: &str) -> String {
    let mut s = raw.trim();

    if let Some(idx) = s.find("://") {
        let rest = &s[idx + 3..];
        s = match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "",
        };
    }
    if let Some(idx) = s.find('?') {
        s = &s[..idx];
    }
    // `#{...}` is Ruby interpolation, not a fragment.
    if let Some(idx) = s
        .char_indices()
        .find(|&(i, c)| c == '#' && !s[i + 1..].starts_with('{'))
        .map(|(i, _)| i)
    {
        s = &s[..idx];
    }

    s.trim_matches('/').to_string()
}

/// Template placeholders as they appear in the supported languages:
/// `${x}`, `#{x}`, `{x}`, `%d`, `:id`.
pub fn is_placeholder(segment: &str) -> bool {
    segment.starts_with("${")
        || segment.starts_with("#{")
        || (segment.starts_with('{') && segment.ends_with('}'))
        || segment.starts_with('%')
        || segment.starts_with(':')
}

pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether `needle` occurs as a contiguous run inside `haystack`.
pub fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Resolve a raw call target against every provided API in the registry.
///
/// The longest matching API name wins; ties go to the earliest registered
/// service, then to the earlier entry in its `provides` list.
pub fn resolve_target<'a>(raw: &str, registry: &'a ServiceRegistry) -> Option<Resolution<'a>> {
    let normalized = normalize_path(raw);
    let target = path_segments(&normalized);
    if target.is_empty() {
        return None;
    }

    let mut best: Option<(usize, Resolution<'a>)> = None;

    for svc in registry.all_services() {
        for api in &svc.provided_apis {
            let api_normalized = normalize_path(api);
            let needle = path_segments(&api_normalized);
            if !contains_run(&target, &needle) {
                continue;
            }
            let len = api_normalized.chars().count();
            if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
                best = Some((
                    len,
                    Resolution {
                        provider: svc,
                        api: api.as_str(),
                    },
                ));
            }
        }
    }

    best.map(|(_, resolution)| resolution)
}

/// Fill `matched_api` and `provider` on a call site.
pub fn resolve_call(mut call: ApiCallSite, registry: &ServiceRegistry) -> ApiCallSite {
    match resolve_target(&call.raw_target, registry) {
        Some(resolution) => {
            call.matched_api = Some(resolution.api.to_string());
            call.provider = Some(resolution.provider.name.clone());
        }
        None => {
            call.matched_api = None;
            call.provider = None;
        }
    }
    call
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::registry_from_toml;
    use std::path::Path;

    const REGISTRY: &str = r#"
[[services]]
name = "api"
language = "typescript"
root = "services/api"
provides = ["test-cases", "workflows"]

[[services]]
name = "catalog"
language = "go"
root = "services/catalog"
provides = ["test-cases/detail", "workflows"]

[[services]]
name = "orchestrator"
language = "python"
root = "services/orchestrator"
provides = ["jobs", "/api/v2/Reports/"]
"#;

    fn registry() -> ServiceRegistry {
        registry_from_toml(Path::new("/repo"), REGISTRY).unwrap()
    }

    fn resolve(raw: &str) -> Option<(String, String)> {
        let reg = registry();
        resolve_target(raw, &reg).map(|r| (r.provider.name.clone(), r.api.to_string()))
    }

    #[test]
    fn normalization() {
        assert_eq!(
            normalize_path("https://api.internal:8443/api/test-cases/?page=2"),
            "api/test-cases"
        );
        assert_eq!(normalize_path("http://orchestrator"), "");
        assert_eq!(normalize_path("/jobs#section"), "jobs");
        assert_eq!(normalize_path("#{BASE}/jobs/#{id}"), "#{BASE}/jobs/#{id}");
        assert_eq!(normalize_path("Workflows/"), "Workflows");
    }

    #[test]
    fn longest_match_wins() {
        assert_eq!(
            resolve("/api/test-cases/detail/42"),
            Some(("catalog".to_string(), "test-cases/detail".to_string()))
        );
        assert_eq!(
            resolve("${API_URL}/test-cases/42"),
            Some(("api".to_string(), "test-cases".to_string()))
        );
    }

    #[test]
    fn ties_go_to_first_registered_service() {
        // Both `api` and `catalog` provide "workflows".
        for _ in 0..5 {
            assert_eq!(
                resolve("http://gateway/workflows/run"),
                Some(("api".to_string(), "workflows".to_string()))
            );
        }
    }

    #[test]
    fn matching_is_segment_aligned_and_case_preserving() {
        assert_eq!(resolve("/my-test-cases"), None);
        assert_eq!(resolve("/Jobs"), None);
        assert_eq!(
            resolve("/api/v2/Reports/daily"),
            Some(("orchestrator".to_string(), "/api/v2/Reports/".to_string()))
        );
        assert_eq!(resolve("http://orchestrator"), None);
    }

    #[test]
    fn length_is_counted_in_characters() {
        let reg = registry_from_toml(
            Path::new("/repo"),
            r#"
[[services]]
name = "accents"
language = "ruby"
root = "accents"
provides = ["ééé"]

[[services]]
name = "letters"
language = "go"
root = "letters"
provides = ["abcde"]
"#,
        )
        .unwrap();

        let resolution = resolve_target("/ééé/abcde", &reg).unwrap();
        assert_eq!(resolution.provider.name, "letters");
        assert_eq!(resolution.api, "abcde");
    }

    #[test]
    fn resolve_call_sets_fields() {
        let reg = registry();
        let call = ApiCallSite {
            source_file: "a.py".into(),
            line_number: 3,
            raw_target: "/jobs/7".to_string(),
            rule: "py-http-verb",
            matched_api: None,
            provider: None,
        };
        let resolved = resolve_call(call.clone(), &reg);
        assert_eq!(resolved.matched_api.as_deref(), Some("jobs"));
        assert_eq!(resolved.provider.as_deref(), Some("orchestrator"));

        let unknown = resolve_call(
            ApiCallSite {
                raw_target: "/metrics".to_string(),
                ..call
            },
            &reg,
        );
        assert!(unknown.matched_api.is_none());
        assert!(unknown.provider.is_none());
    }
}
