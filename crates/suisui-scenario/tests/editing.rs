//! Behavioural tests for editing scenarios against an exported catalog.

use suisui_patterns::{ArgType, StepKeyword};
use suisui_scenario::{ScenarioStore, Severity, StepCatalog, parse_feature};
use tempfile::TempDir;

const EXPORT: &str = r#"{
    "steps": [
        { "keyword": "Given", "pattern": "I am on the {string} page", "location": "nav.ts:4" },
        {
            "keyword": "Given",
            "pattern": "^I am logged in as (admin|user|guest)$",
            "location": "auth.ts:9"
        },
        { "keyword": "When", "pattern": "I fill <field> with {string}", "location": "form.ts:2" },
        { "keyword": "When", "pattern": "I wait {int} seconds", "location": "time.ts:1" },
        { "keyword": "Then", "pattern": "I see {string}", "location": "assert.ts:7" }
    ],
    "exportedAt": "2026-05-04T08:30:00Z"
}"#;

const FEATURE: &str = "\
Feature: Accounts

  Background:
    Given I am on the \"login\" page

  Scenario Outline: Sign in
    Given I am logged in as <role>
    When I fill <field> with \"secret\"
    Then I see \"<greeting>\"

    Examples:
      | role  | field    | greeting |
      | admin | password | Hi boss  |
";

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn load_catalog() -> (TempDir, StepCatalog) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("steps.json");
    std::fs::write(&path, EXPORT).expect("write export");
    let catalog = StepCatalog::load(&path).expect("load export");
    (dir, catalog)
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn feature_round_trips_through_the_store() {
    let (_dir, catalog) = load_catalog();
    assert_eq!(catalog.len(), 5);

    let mut store = ScenarioStore::default();
    store
        .load_feature_text(FEATURE, 0, &catalog)
        .expect("load scenario");
    let scenario = store.scenario();
    assert_eq!(scenario.name, "Sign in");
    assert_eq!(scenario.background.len(), 1);
    assert!(scenario.is_outline());

    let login = scenario.steps.first().expect("first step");
    assert_eq!(login.pattern, "^I am logged in as (admin|user|guest)$");
    let role = login.args.first().expect("role argument");
    assert_eq!(role.arg_type, ArgType::Enum);
    assert_eq!(role.value, "<role>");
    assert_eq!(role.enum_values, vec!["admin", "user", "guest"]);

    let fill = scenario.steps.get(1).expect("second step");
    let names: Vec<_> = fill.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["field", "arg1"]);

    let text = store.to_feature_text("Accounts");
    let reparsed = parse_feature(&text, &catalog).expect("rendered feature parses");
    let reloaded = reparsed.scenarios.first().expect("scenario");
    let texts = |steps: &[suisui_scenario::ScenarioStep]| {
        steps.iter().map(suisui_scenario::ScenarioStep::text).collect::<Vec<_>>()
    };
    assert_eq!(texts(&reloaded.steps), texts(&store.scenario().steps));
    assert_eq!(reloaded.examples, store.scenario().examples);
    assert_eq!(reparsed.background.len(), 1);
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn editing_flow_validates_against_catalog() {
    let (_dir, catalog) = load_catalog();
    let mut store = ScenarioStore::new("Wait for results");

    let open = catalog
        .for_keyword(StepKeyword::Given)
        .next()
        .expect("given definition");
    let wait = catalog
        .definitions()
        .iter()
        .find(|d| d.pattern == "I wait {int} seconds")
        .expect("wait definition");

    let open_id = store.add_step(open);
    let wait_id = store.add_step(wait);

    let result = store.validate(Some(&catalog));
    assert!(!result.is_valid);
    let errors: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| (i.message.as_str(), i.step_id.as_deref()))
        .collect();
    assert_eq!(
        errors,
        vec![
            ("Missing required argument: arg0", Some(open_id.as_str())),
            ("Missing required argument: arg0", Some(wait_id.as_str())),
        ]
    );

    store
        .update_step_arg(&open_id, "arg0", "search", None)
        .expect("bind page");
    store
        .update_step_arg(&wait_id, "arg0", "soon", None)
        .expect("bind wait");
    let result = store.validate(Some(&catalog));
    let messages: Vec<_> = result.issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Argument \"arg0\" must be an integer",
            "Scenario has no Then step",
        ]
    );

    store
        .update_step_arg(&wait_id, "arg0", "5", None)
        .expect("bind wait");
    store.add_step_text(StepKeyword::Then, "I see \"5 results\"", &catalog);
    store.add_step_text(StepKeyword::And, "the page is quiet", &catalog);
    let result = store.validate(Some(&catalog));
    assert!(result.is_valid);
    let warnings: Vec<_> = result.warnings().map(|i| i.message.as_str()).collect();
    assert_eq!(warnings, vec!["Undefined step: Then the page is quiet"]);

    let quiet = store.scenario().steps.last().map(|s| s.id.clone()).expect("last step");
    store.remove_step(&quiet).expect("remove undefined step");
    let result = store.validate(Some(&catalog));
    assert!(result.is_valid);
    assert!(result.issues.is_empty());
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn unrecognised_step_keeps_brace_and_alternation_text() {
    let feature = "\
Feature: Keys

  Scenario: Shortcuts
    Given I press {enter} then pick (a|b) as <who>
";
    let line = "I press {enter} then pick (a|b) as <who>";
    let mut store = ScenarioStore::new("");
    store
        .load_feature_text(feature, 0, &StepCatalog::empty())
        .expect("load scenario");

    let step = store.scenario().steps.first().expect("step");
    assert_eq!(step.text(), line);
    let names: Vec<_> = step.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["arg0", "arg1", "who"]);

    let result = store.validate(None);
    let errors: Vec<_> = result.errors().map(|i| i.message.as_str()).collect();
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let text = store.to_feature_text("Keys");
    assert!(text.lines().any(|l| l == format!("    Given {line}")), "{text}");
    let mut reloaded = ScenarioStore::new("");
    reloaded
        .load_feature_text(&text, 0, &StepCatalog::empty())
        .expect("reload scenario");
    let again = reloaded.scenario().steps.first().expect("step");
    assert_eq!(again.args, step.args);
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn unfilled_trailing_enum_survives_a_round_trip() {
    let (_dir, catalog) = load_catalog();
    let login = catalog
        .definitions()
        .iter()
        .find(|d| d.pattern.contains("logged in as"))
        .expect("login definition");
    let mut store = ScenarioStore::new("Pending");
    store.add_step(login);

    let text = store.to_feature_text("Accounts");
    assert!(
        text.lines()
            .any(|l| l == "    Given I am logged in as (admin|user|guest)"),
        "{text}"
    );

    let reparsed = parse_feature(&text, &catalog).expect("rendered feature parses");
    let step = reparsed
        .scenarios
        .first()
        .and_then(|s| s.steps.first())
        .expect("step");
    assert_eq!(step.pattern, login.pattern);
    assert_eq!(step.args, login.args);
}
