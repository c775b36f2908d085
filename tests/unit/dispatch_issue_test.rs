//! Issue events through the dispatcher

use formatcheck::core::models::{Event, EventAction, LabelPlan, RuleSpec};
use formatcheck::core::services::Dispatcher;
use test_case::test_case;

use crate::common::fixtures::{
    EARLIER, ISSUE_NUMBER_LINE_REGEX, IssueBuilder, LATER, START_TIME, TEST_TASK_CHECKED_REGEX, at,
    book, formatted, issue_rule, pr_rule, strings,
};
use crate::common::mocks::FakeTracker;

const ISSUE_TITLE_REGEX: &str = r"^[\w/.,-]+( [\w/.,-]+)*: .{5,}$";
const INVALID_TITLE: &str = "do-not-merge/invalid-title";
const NEEDS_TEST_TASKS: &str = "do-not-merge/needs-finish-test-tasks";
const SKIP_CHECK: &str = "skip-check";

const GOOD_TITLE: &str = "executor: panic on empty input";
const BAD_TITLE: &str = "it panics";

fn handle(tracker: &FakeTracker, event: &Event, rules: Vec<RuleSpec>) -> LabelPlan {
    Dispatcher::new(tracker).handle(event, &book(rules)).unwrap()
}

fn title_rule() -> RuleSpec {
    issue_rule(true, false, ISSUE_TITLE_REGEX, INVALID_TITLE)
}

fn tasks_body(tasks: &str) -> String {
    format!(
        "### Check List\n\nTests <!-- At least one of them must be included. -->\n\n{tasks}\n### Side effects\n"
    )
}

#[test]
fn valid_title_changes_nothing() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened).title(GOOD_TITLE).build();

    let plan = handle(&tracker, &event, vec![title_rule()]);

    assert!(plan.is_empty());
}

#[test]
fn invalid_title_adds_label() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened).title(BAD_TITLE).build();

    handle(&tracker, &event, vec![title_rule()]);

    assert_eq!(tracker.added(), vec![formatted(INVALID_TITLE)]);
}

#[test]
fn fixed_title_removes_label() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Edited)
        .title(GOOD_TITLE)
        .labels(&[INVALID_TITLE])
        .build();

    handle(&tracker, &event, vec![title_rule()]);

    assert_eq!(tracker.removed(), vec![formatted(INVALID_TITLE)]);
}

#[test_case("- [ ] Unit test\n- [ ] Integration test\n- [ ] Manual test\n", true ; "nothing checked")]
#[test_case("- [ ] Unit test\n- [x] Integration test\n- [ ] Manual test\n", false ; "one task checked")]
#[test_case("- [X] Unit test\n", false ; "upper case mark")]
#[test_case("", true ; "no task list")]
fn test_tasks(tasks: &str, expect_label: bool) {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened)
        .title(GOOD_TITLE)
        .body(&tasks_body(tasks))
        .build();
    let rule = issue_rule(false, true, TEST_TASK_CHECKED_REGEX, NEEDS_TEST_TASKS);

    handle(&tracker, &event, vec![rule]);

    assert_eq!(!tracker.added().is_empty(), expect_label);
}

#[test_case("Issue Number: close #12345", false ; "issue reference")]
#[test_case("Issue Number: close #1234", true ; "pull request reference")]
#[test_case("Issue Number: close org2/repo2#12345", true ; "other repository")]
fn linked_issue_line(line: &str, expect_label: bool) {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened)
        .title(GOOD_TITLE)
        .body(line)
        .build();
    let rule = issue_rule(false, true, ISSUE_NUMBER_LINE_REGEX, "needs-linked-issue");

    handle(&tracker, &event, vec![rule]);

    assert_eq!(!tracker.added().is_empty(), expect_label);
}

#[test]
fn commit_flag_is_meaningless_for_issues() {
    let tracker = FakeTracker::new().with_commits(&["close #12345"]);
    let event = IssueBuilder::new(EventAction::Opened).title(GOOD_TITLE).build();
    let rule = RuleSpec {
        issue: true,
        ..pr_rule(false, false, true, r"#\d+", "needs-issue-number")
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(tracker.commit_fetches(), 0);
    assert_eq!(tracker.added(), vec![formatted("needs-issue-number")]);
}

#[test]
fn pull_request_only_rule_ignores_issues() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened).title(BAD_TITLE).build();
    let rule = pr_rule(true, false, false, ISSUE_TITLE_REGEX, INVALID_TITLE);

    let plan = handle(&tracker, &event, vec![rule]);

    assert!(plan.is_empty());
}

#[test_case(EventAction::Synchronize ; "synchronize")]
#[test_case(EventAction::ReadyForReview ; "ready for review")]
#[test_case(EventAction::Other("closed".to_string()) ; "closed")]
fn pull_request_only_actions_are_ignored(action: EventAction) {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(action).title(BAD_TITLE).build();

    let plan = handle(&tracker, &event, vec![title_rule()]);

    assert!(plan.is_empty());
}

#[test]
fn skip_label_bypasses() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Labeled(SKIP_CHECK.to_string()))
        .title(BAD_TITLE)
        .labels(&[INVALID_TITLE, SKIP_CHECK])
        .build();
    let rule = RuleSpec {
        skip_label: Some(SKIP_CHECK.to_string()),
        ..title_rule()
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(tracker.removed(), vec![formatted(INVALID_TITLE)]);
}

#[test]
fn removing_skip_label_rechecks() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Unlabeled(SKIP_CHECK.to_string()))
        .title(BAD_TITLE)
        .build();
    let rule = RuleSpec {
        skip_label: Some(SKIP_CHECK.to_string()),
        ..title_rule()
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(tracker.added(), vec![formatted(INVALID_TITLE)]);
}

#[test_case(EARLIER, false ; "created before start time")]
#[test_case(LATER, true ; "created after start time")]
fn start_time(created_at: &str, expect_label: bool) {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened)
        .title(BAD_TITLE)
        .created_at(created_at)
        .build();
    let rule = RuleSpec {
        start_time: Some(at(START_TIME)),
        ..title_rule()
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(!tracker.added().is_empty(), expect_label);
}

#[test]
fn branch_filter_does_not_apply_to_issues() {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened).title(BAD_TITLE).build();
    let rule = RuleSpec {
        branches: strings(&["release-5.0"]),
        ..title_rule()
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(tracker.added(), vec![formatted(INVALID_TITLE)]);
}

#[test_case(&["zhang-san"], false ; "author trusted")]
#[test_case(&["li-si", "wang-wu"], true ; "author not trusted")]
fn trusted_users(trusted: &[&str], expect_label: bool) {
    let tracker = FakeTracker::new();
    let event = IssueBuilder::new(EventAction::Opened).title(BAD_TITLE).build();
    let rule = RuleSpec {
        trusted_users: strings(trusted),
        ..title_rule()
    };

    handle(&tracker, &event, vec![rule]);

    assert_eq!(!tracker.added().is_empty(), expect_label);
}
