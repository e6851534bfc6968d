use glob::{MatchOptions, Pattern};
use std::path::Path;
use tokcount_core::{FilterConfigError, ScanFilter};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude globs, matched against base names
#[derive(Debug, Clone)]
pub struct FilterEngine {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FilterEngine {
    /// Compile a scan filter. Any malformed pattern fails the whole filter.
    pub fn new(filter: &ScanFilter) -> Result<Self, FilterConfigError> {
        Ok(Self {
            include: compile(&filter.include)?,
            exclude: compile(&filter.exclude)?,
        })
    }

    /// Decide whether a file should be counted.
    ///
    /// Exclude is checked first so it always wins over include.
    pub fn should_process(&self, path: &Path) -> bool {
        let Some(name) = base_name(path) else {
            return false;
        };

        if matches_any(&self.exclude, &name) {
            return false;
        }

        self.include.is_empty() || matches_any(&self.include, &name)
    }

    /// Whether a directory name matches an exclude pattern (used for pruning)
    pub fn is_dir_excluded(&self, path: &Path) -> bool {
        base_name(path)
            .map(|name| matches_any(&self.exclude, &name))
            .unwrap_or(false)
    }

    /// First exclude pattern matching the path (for log messages)
    pub fn matching_exclude(&self, path: &Path) -> Option<&str> {
        let name = base_name(path)?;
        self.exclude
            .iter()
            .find(|p| p.matches_with(&name, MATCH_OPTIONS))
            .map(|p| p.as_str())
    }
}

/// Split a comma-separated pattern list, trimming whitespace and dropping
/// empty entries
pub fn parse_pattern_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, FilterConfigError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| FilterConfigError::InvalidPattern {
                pattern: p.clone(),
                message: e.msg.to_string(),
            })
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches_with(name, MATCH_OPTIONS))
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(include: &[&str], exclude: &[&str]) -> FilterEngine {
        let filter = ScanFilter::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
        );
        FilterEngine::new(&filter).unwrap()
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = engine(&[], &[]);
        assert!(filter.should_process(Path::new("README.md")));
        assert!(filter.should_process(Path::new("src/deep/file.rs")));
    }

    #[test]
    fn test_include_patterns() {
        let filter = engine(&["*.py", "*.js"], &[]);
        assert!(filter.should_process(Path::new("app/main.py")));
        assert!(filter.should_process(Path::new("web/index.js")));
        assert!(!filter.should_process(Path::new("README.md")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = engine(&["*.py"], &["test_*.py"]);
        assert!(!filter.should_process(Path::new("test_foo.py")));
        assert!(!filter.should_process(Path::new("pkg/test_bar.py")));
        assert!(filter.should_process(Path::new("pkg/foo.py")));
    }

    #[test]
    fn test_matches_base_name_only() {
        // the directory part never takes part in matching
        let filter = engine(&[], &["src*"]);
        assert!(filter.should_process(Path::new("src/lib.rs")));
        assert!(!filter.should_process(Path::new("lib/src_gen.rs")));
    }

    #[test]
    fn test_question_mark_wildcard() {
        let filter = engine(&["?.txt"], &[]);
        assert!(filter.should_process(Path::new("a.txt")));
        assert!(!filter.should_process(Path::new("ab.txt")));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = engine(&["*.md"], &[]);
        assert!(filter.should_process(Path::new("notes.md")));
        assert!(!filter.should_process(Path::new("NOTES.MD")));
    }

    #[test]
    fn test_star_matches_leading_dot() {
        let filter = engine(&[], &["*.env"]);
        assert!(!filter.should_process(Path::new(".env")));
    }

    #[test]
    fn test_malformed_pattern() {
        let filter = ScanFilter::new(vec!["[abc".to_string()], Vec::new());
        let err = FilterEngine::new(&filter).unwrap_err();
        assert!(matches!(
            err,
            FilterConfigError::InvalidPattern { ref pattern, .. } if pattern == "[abc"
        ));
    }

    #[test]
    fn test_dir_exclusion() {
        let filter = engine(&["*.js"], &["node_modules", "*.log"]);
        assert!(filter.is_dir_excluded(Path::new("web/node_modules")));
        assert!(!filter.is_dir_excluded(Path::new("web/src")));
        assert_eq!(
            filter.matching_exclude(Path::new("debug.log")),
            Some("*.log")
        );
        assert_eq!(filter.matching_exclude(Path::new("app.js")), None);
    }

    #[test]
    fn test_parse_pattern_list() {
        assert_eq!(
            parse_pattern_list("*.py, *.js ,,*.rs"),
            vec!["*.py".to_string(), "*.js".to_string(), "*.rs".to_string()]
        );
        assert!(parse_pattern_list("").is_empty());
        assert!(parse_pattern_list(" , ").is_empty());
    }
}
