//! Rule patterns
//!
//! A rule's `regexp` is a template: `{{.Org}}` and `{{.Repo}}` are bound to the
//! repository the rule is activated for, then the result is compiled once.
//!
//! Patterns may declare a capture group named [`ISSUE_NUMBER_GROUP`]. Its
//! captured values are issue numbers that must resolve to real issues. When
//! that group sits inside a repeated group, e.g. `^(\[TI-(?P<issue_number>\d+)\])+`,
//! a regex only reports the last iteration, so the repeated body is compiled
//! separately to recover every iteration.
//!
//! # Examples
//!
//! ```
//! use formatcheck::core::models::{PatternTemplate, RepoId};
//!
//! let template = PatternTemplate::new(r"{{.Org}}/{{.Repo}}#(?P<issue_number>\d+)");
//! let rendered = template.render(&RepoId::new("my.org", "repo"));
//! assert_eq!(rendered, r"my\.org/repo#(?P<issue_number>\d+)");
//! ```

use regex::Regex;

use super::RepoId;

/// Name of the capture group holding an issue number
pub const ISSUE_NUMBER_GROUP: &str = "issue_number";

/// An uncompiled pattern with repository placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    source: String,
}

impl PatternTemplate {
    /// Wrap a pattern source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The raw template text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Bind the placeholders to a repository
    ///
    /// Substituted values are regex-escaped. Unknown `{{...}}` sequences are
    /// left as written.
    #[must_use]
    pub fn render(&self, repo: &RepoId) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };
            match placeholder(&after[..end]) {
                Some(Placeholder::Org) => out.push_str(&regex::escape(&repo.org)),
                Some(Placeholder::Repo) => out.push_str(&regex::escape(&repo.name)),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

#[derive(Clone, Copy)]
enum Placeholder {
    Org,
    Repo,
}

fn placeholder(inner: &str) -> Option<Placeholder> {
    match inner.trim() {
        ".Org" => Some(Placeholder::Org),
        ".Repo" => Some(Placeholder::Repo),
        _ => None,
    }
}

/// A compiled rule pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    references: Option<ReferenceCapture>,
}

/// How issue-number captures are collected from a match
#[derive(Debug, Clone)]
pub(crate) struct ReferenceCapture {
    /// Repeated group body containing the issue number group
    pub(crate) repeated: Option<RepeatedGroup>,
}

/// Capture group wrapping every iteration of the repeated group
pub(crate) const REPEATED_SPAN_GROUP: &str = "formatcheck_repeated";

#[derive(Debug, Clone)]
pub(crate) struct RepeatedGroup {
    /// The repeated body compiled on its own
    pub(crate) body: Regex,
    /// The full pattern with the repeated group and its quantifier wrapped in
    /// [`REPEATED_SPAN_GROUP`]
    pub(crate) span: Regex,
}

impl CompiledPattern {
    /// Compile an already-rendered pattern
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(source)?;
        let has_reference = regex.capture_names().flatten().any(|name| name == ISSUE_NUMBER_GROUP);

        let references = has_reference.then(|| ReferenceCapture {
            repeated: repeated_group(source),
        });

        Ok(Self { regex, references })
    }

    /// The compiled regex
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The rendered pattern text
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern captures issue numbers
    #[must_use]
    pub const fn captures_references(&self) -> bool {
        self.references.is_some()
    }

    pub(crate) const fn reference_capture(&self) -> Option<&ReferenceCapture> {
        self.references.as_ref()
    }
}

/// A parenthesised group found in a pattern source
#[derive(Debug)]
struct GroupSpan {
    open: usize,
    close: usize,
    body_start: usize,
    name: Option<String>,
}

/// Find the innermost repeated group around the issue number group
fn repeated_group(source: &str) -> Option<RepeatedGroup> {
    let (groups, flags) = scan_groups(source);
    let target = groups.iter().find(|g| g.name.as_deref() == Some(ISSUE_NUMBER_GROUP))?;

    let mut enclosing: Vec<&GroupSpan> = groups
        .iter()
        .filter(|g| g.open < target.open && g.close > target.close)
        .collect();
    enclosing.sort_by(|a, b| b.open.cmp(&a.open));

    let (group, quantifier_end) = enclosing
        .into_iter()
        .find_map(|g| quantifier_end(source, g.close + 1).map(|end| (g, end)))?;

    let body = Regex::new(&format!("{flags}{}", &source[group.body_start..group.close])).ok()?;
    let span = Regex::new(&format!(
        "{}(?P<{REPEATED_SPAN_GROUP}>{}){}",
        &source[..group.open],
        &source[group.open..quantifier_end],
        &source[quantifier_end..],
    ))
    .ok()?;

    Some(RepeatedGroup { body, span })
}

/// End of a repeating quantifier (`+`, `*` or `{n,m}`) starting at `at`
fn quantifier_end(source: &str, at: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let end = match bytes.get(at)? {
        b'+' | b'*' => at + 1,
        b'{' => at + source[at..].find('}')? + 1,
        _ => return None,
    };
    // lazy suffix
    Some(if bytes.get(end) == Some(&b'?') { end + 1 } else { end })
}

/// Scan a pattern for groups; also returns the top-level flag directives
fn scan_groups(source: &str) -> (Vec<GroupSpan>, String) {
    let bytes = source.as_bytes();
    let mut groups = Vec::new();
    let mut stack: Vec<GroupSpan> = Vec::new();
    let mut flags = String::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            },
            b'[' => {
                i = skip_class(bytes, i);
                continue;
            },
            b'(' => {
                let rest = &source[i..];
                if let Some(named) = rest.strip_prefix("(?P<").or_else(|| rest.strip_prefix("(?<")) {
                    let Some(end) = named.find('>') else {
                        break;
                    };
                    let prefix_len = rest.len() - named.len();
                    stack.push(GroupSpan {
                        open: i,
                        close: 0,
                        body_start: i + prefix_len + end + 1,
                        name: Some(named[..end].to_string()),
                    });
                } else if rest.starts_with("(?") {
                    let Some(end) = rest.find([':', ')']) else {
                        break;
                    };
                    if rest.as_bytes()[end] == b')' {
                        if stack.is_empty() {
                            flags.push_str(&rest[..=end]);
                        }
                        i += end + 1;
                        continue;
                    }
                    stack.push(GroupSpan {
                        open: i,
                        close: 0,
                        body_start: i + end + 1,
                        name: None,
                    });
                } else {
                    stack.push(GroupSpan {
                        open: i,
                        close: 0,
                        body_start: i + 1,
                        name: None,
                    });
                }
            },
            b')' => {
                if let Some(mut group) = stack.pop() {
                    group.close = i;
                    groups.push(group);
                }
            },
            _ => {},
        }
        i += 1;
    }

    (groups, flags)
}

/// Skip a character class starting at `start`, returning the index after it
fn skip_class(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    if bytes.get(i) == Some(&b'^') {
        i += 1;
    }
    // a leading ']' is a literal
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }

    let mut depth = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            },
            _ => {},
        }
        i += 1;
    }
    i
}
