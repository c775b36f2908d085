//! Tests for rule files and rule book compilation

use std::fs;

use formatcheck::adapters::toml::{load_rulebook, parse_str};
use formatcheck::config::ConfigAgent;
use formatcheck::core::models::{ConfigError, RepoId, RuleBook, RuleSet, RuleSpec};
use formatcheck::paths::{LOCAL_RULES_FILE, resolve_rules};
use tempfile::TempDir;

use crate::common::fixtures::{ISSUE_NUMBER_LINE_REGEX, at, pr_rule};

const FULL: &str = r#"
[[format_checker]]
repos = ["org/repo", "org/other"]

[[format_checker.required_match_rules]]
pull_request = true
title = true
regexp = '^(\[TI-(?P<issue_number>[1-9]\d*)\])+.+: .{10,160}$'
missing_label = "do-not-merge/invalid-title"
missing_message = "Please follow the title format."
skip_label = "skip-issue"
start_time = "2021-11-01T12:00:00Z"
branches = ["main"]
trusted_users = ["bot"]

[[format_checker.required_match_rules]]
pull_request = true
issue = true
body = true
commit_message = true
regexp = '(?im)^Issue Number:\s*close {{.Org}}/{{.Repo}}#(?P<issue_number>\d+)'
missing_label = "do-not-merge/needs-linked-issue"

[[format_checker]]
repos = ["org/repo"]

[[format_checker.required_match_rules]]
issue = true
title = true
regexp = ".+"
missing_label = "needs-title"
"#;

fn rules(sets: Vec<RuleSet>) -> Result<RuleBook, ConfigError> {
    RuleBook::compile(&sets)
}

fn one_set(spec: RuleSpec) -> Vec<RuleSet> {
    vec![RuleSet {
        repos: vec!["org/repo".to_string()],
        required_match_rules: vec![spec],
    }]
}

// =============================================================================
// Rule file schema
// =============================================================================

#[test]
fn test_full_schema() {
    let file = parse_str(FULL).unwrap();
    assert_eq!(file.format_checker.len(), 2);

    let first = &file.format_checker[0].required_match_rules[0];
    assert!(first.pull_request);
    assert!(!first.issue);
    assert_eq!(first.missing_message.as_deref(), Some("Please follow the title format."));
    assert_eq!(first.skip_label.as_deref(), Some("skip-issue"));
    assert_eq!(first.start_time, Some(at("2021-11-01T12:00:00Z")));
    assert_eq!(first.branches, vec!["main"]);
    assert_eq!(first.trusted_users, vec!["bot"]);

    let book = file.compile().unwrap();
    assert_eq!(book.rule_count(), 5);
    assert_eq!(book.rules_for(&RepoId::new("org", "repo")).len(), 3);
    assert_eq!(book.rules_for(&RepoId::new("org", "other")).len(), 2);
}

#[test]
fn test_templates_render_per_repository() {
    let book = parse_str(FULL).unwrap().compile().unwrap();

    let repo = &book.rules_for(&RepoId::new("org", "repo"))[1];
    let other = &book.rules_for(&RepoId::new("org", "other"))[1];

    assert!(repo.pattern().as_str().contains("org/repo#"));
    assert!(other.pattern().as_str().contains("org/other#"));
}

#[test]
fn test_rules_keep_file_order() {
    let book = parse_str(FULL).unwrap().compile().unwrap();
    let labels: Vec<&str> = book
        .rules_for(&RepoId::new("org", "repo"))
        .iter()
        .map(|rule| rule.missing_label())
        .collect();
    assert_eq!(
        labels,
        vec!["do-not-merge/invalid-title", "do-not-merge/needs-linked-issue", "needs-title"]
    );
}

#[test]
fn test_unknown_repository_has_no_rules() {
    let book = parse_str(FULL).unwrap().compile().unwrap();
    assert!(book.rules_for(&RepoId::new("someone", "else")).is_empty());
}

#[test]
fn test_malformed_toml_is_rejected() {
    assert!(parse_str("[[format_checker]\nrepos = 1").is_err());
}

#[test]
fn test_bad_start_time_is_rejected() {
    let content = FULL.replace("2021-11-01T12:00:00Z", "last tuesday");
    assert!(parse_str(&content).is_err());
}

// =============================================================================
// Compilation errors
// =============================================================================

#[test]
fn test_invalid_repo() {
    let sets = vec![RuleSet {
        repos: vec!["no-slash".to_string()],
        required_match_rules: vec![pr_rule(true, false, false, ".+", "label")],
    }];
    assert!(matches!(rules(sets), Err(ConfigError::InvalidRepo { set: 0, .. })));
}

#[test]
fn test_invalid_pattern() {
    let spec = pr_rule(true, false, false, "(unclosed", "label");
    assert!(matches!(
        rules(one_set(spec)),
        Err(ConfigError::InvalidPattern { index: 0, .. })
    ));
}

#[test]
fn test_rule_without_target() {
    let spec = RuleSpec {
        pull_request: false,
        ..pr_rule(true, false, false, ".+", "label")
    };
    assert!(matches!(rules(one_set(spec)), Err(ConfigError::NoTarget { .. })));
}

#[test]
fn test_rule_without_corpus() {
    let spec = pr_rule(false, false, false, ".+", "label");
    assert!(matches!(rules(one_set(spec)), Err(ConfigError::NoCorpus { .. })));
}

#[test]
fn test_rule_without_label() {
    let spec = pr_rule(true, false, false, ".+", "  ");
    assert!(matches!(rules(one_set(spec)), Err(ConfigError::MissingLabel { .. })));
}

#[test]
fn test_skip_label_equal_to_missing_label() {
    let spec = RuleSpec {
        skip_label: Some("label".to_string()),
        ..pr_rule(true, false, false, ".+", "label")
    };
    assert!(matches!(
        rules(one_set(spec)),
        Err(ConfigError::SkipLabelIsMissingLabel { .. })
    ));
}

#[test]
fn test_duplicate_label_across_sets() {
    let spec = pr_rule(true, false, false, ".+", "label");
    let mut sets = one_set(spec.clone());
    sets.extend(one_set(spec));
    assert!(matches!(
        rules(sets),
        Err(ConfigError::DuplicateMissingLabel { ref label, .. }) if label == "label"
    ));
}

#[test]
fn test_error_names_the_repository() {
    let spec = pr_rule(false, true, false, &ISSUE_NUMBER_LINE_REGEX.replace(')', ""), "label");
    let err = rules(one_set(spec)).unwrap_err();
    assert!(err.to_string().starts_with("org/repo rule 0"));
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_rulebook_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(LOCAL_RULES_FILE);
    fs::write(&path, FULL.replace("needs-title", "do-not-merge/invalid-title")).unwrap();

    let err = load_rulebook(&path).unwrap_err();
    assert!(format!("{err:#}").contains(&path.display().to_string()));
    assert!(err.downcast_ref::<ConfigError>().is_some());
}

#[test]
fn test_agent_keeps_last_good_book() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(LOCAL_RULES_FILE);
    fs::write(&path, FULL).unwrap();

    let agent = ConfigAgent::default();
    assert_eq!(agent.reload(&path).unwrap().rule_count(), 5);

    fs::write(&path, "not toml at all [").unwrap();
    assert!(agent.reload(&path).is_err());
    assert_eq!(agent.snapshot().rule_count(), 5);
}

#[test]
fn test_resolve_prefers_flag_then_env_then_local() {
    let temp = TempDir::new().unwrap();
    let flag = temp.path().join("flag.toml");
    let local = temp.path().join(LOCAL_RULES_FILE);
    fs::write(&local, "").unwrap();

    assert_eq!(resolve_rules(Some(flag.as_path()), Some("/env.toml"), temp.path()), flag);
    assert_eq!(
        resolve_rules(None, Some("/env.toml"), temp.path()),
        std::path::PathBuf::from("/env.toml")
    );
    assert_eq!(resolve_rules(None, None, temp.path()), local);
}
