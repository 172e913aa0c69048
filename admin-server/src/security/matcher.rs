//! Ant-style URL pattern matching
//!
//! The authenticated/unauthenticated URL lists are ant patterns:
//! `*` matches exactly one path segment, `**` matches any number of
//! segments (including none). Everything else is a literal segment.

/// A compiled set of ant-style path patterns
#[derive(Debug, Clone)]
pub struct PathMatcher {
    patterns: Vec<Vec<Segment>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Star,
    DoubleStar,
}

impl PathMatcher {
    /// Compile a list of patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| compile(p.as_ref())).collect(),
        }
    }

    /// Whether any pattern matches the given request path
    pub fn matches(&self, path: &str) -> bool {
        let segments: Vec<&str> = split(path);
        self.patterns
            .iter()
            .any(|pattern| matches_segments(pattern, &segments))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn compile(pattern: &str) -> Vec<Segment> {
    split(pattern)
        .into_iter()
        .map(|seg| match seg {
            "*" => Segment::Star,
            "**" => Segment::DoubleStar,
            lit => Segment::Literal(lit.to_string()),
        })
        .collect()
}

fn matches_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.first() {
        None => path.is_empty(),
        Some(Segment::DoubleStar) => {
            // `**` absorbs zero or more segments
            if matches_segments(&pattern[1..], path) {
                return true;
            }
            !path.is_empty() && matches_segments(pattern, &path[1..])
        }
        Some(first) => {
            let Some(head) = path.first() else {
                return false;
            };
            let matched = match first {
                Segment::Literal(lit) => lit == head,
                Segment::Star => true,
                Segment::DoubleStar => unreachable!(),
            };
            matched && matches_segments(&pattern[1..], &path[1..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let m = PathMatcher::new(&["/admin/login.html"]);
        assert!(m.matches("/admin/login.html"));
        assert!(!m.matches("/admin/login"));
        assert!(!m.matches("/admin/login.html/extra"));
    }

    #[test]
    fn test_double_star_tail() {
        let m = PathMatcher::new(&["/admin/api/**"]);
        assert!(m.matches("/admin/api/adminNotice/list"));
        assert!(m.matches("/admin/api/adminNotice/delete/3"));
        // zero segments after the prefix also match
        assert!(m.matches("/admin/api"));
        assert!(!m.matches("/system/api/sysJob/list"));
    }

    #[test]
    fn test_single_star_is_one_segment() {
        let m = PathMatcher::new(&["/admin/api/*/list"]);
        assert!(m.matches("/admin/api/adminRole/list"));
        assert!(!m.matches("/admin/api/adminRole/sub/list"));
        assert!(!m.matches("/admin/api/list"));
    }

    #[test]
    fn test_double_star_in_the_middle() {
        let m = PathMatcher::new(&["/admin/**/list"]);
        assert!(m.matches("/admin/api/adminNotice/list"));
        assert!(m.matches("/admin/list"));
        assert!(!m.matches("/admin/api/adminNotice/detail"));
    }

    #[test]
    fn test_multiple_patterns() {
        let m = PathMatcher::new(&["/admin/api/**", "/system/api/**"]);
        assert!(m.matches("/system/api/sysJob/list"));
        assert!(m.matches("/admin/api/adminRole/1"));
        assert!(!m.matches("/public/health"));
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let m = PathMatcher::new(&["/admin/api/**"]);
        assert!(m.matches("/admin/api/"));
    }
}
