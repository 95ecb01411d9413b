use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Implementation language of a service. Selects the extractor and the file
/// extensions that belong to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Python,
    Go,
    Ruby,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::TypeScript,
        Language::Python,
        Language::Go,
        Language::Ruby,
    ];

    /// File extensions for this language.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::TypeScript => &["ts", "tsx", "js", "jsx", "mjs", "cjs"],
            Language::Python => &["py"],
            Language::Go => &["go"],
            Language::Ruby => &["rb"],
        }
    }

    /// File-name globs for test sources, excluded unless tests are included.
    pub fn default_excludes(&self) -> &[&str] {
        match self {
            Language::TypeScript => &["*.test.ts", "*.spec.ts", "*.test.js", "*.spec.js"],
            Language::Python => &["test_*.py", "*_test.py"],
            Language::Go => &["*_test.go"],
            Language::Ruby => &["*_spec.rb"],
        }
    }

    /// Language owning a file extension, if any.
    pub fn from_extension(ext: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" | "javascript" | "js" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            "go" | "golang" => Ok(Language::Go),
            "ruby" | "rb" => Ok(Language::Ruby),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::TypeScript => write!(f, "typescript"),
            Language::Python => write!(f, "python"),
            Language::Go => write!(f, "go"),
            Language::Ruby => write!(f, "ruby"),
        }
    }
}

/// Build a GlobSet from patterns; `None` when there are no patterns.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}

/// Discover source files under `root` for the given language.
///
/// - Respects `.gitignore`
/// - `include`/`exclude` globs are matched against the path relative to `root`
/// - Excludes the language's test files unless `include_tests` is set
/// - Returns sorted paths for deterministic output
pub fn discover_files(
    root: &Path,
    lang: Language,
    include: Option<&GlobSet>,
    exclude: Option<&GlobSet>,
    include_tests: bool,
) -> Result<Vec<PathBuf>> {
    let extensions = lang.extensions();

    let test_excludes = if include_tests {
        None
    } else {
        let patterns: Vec<String> = lang
            .default_excludes()
            .iter()
            .map(|p| p.to_string())
            .collect();
        build_globset(&patterns)?
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if !ext_match {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude.is_some_and(|set| set.is_match(relative)) {
            continue;
        }
        if let (Some(tests), Some(fname)) = (&test_excludes, path.file_name()) {
            if tests.is_match(Path::new(fname)) {
                continue;
            }
        }
        if include.is_some_and(|set| !set.is_match(relative)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}

/// Count source files per supported language under `root`.
pub fn count_by_language(root: &Path) -> BTreeMap<Language, usize> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut counts = BTreeMap::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(lang) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
        {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }
    counts
}
