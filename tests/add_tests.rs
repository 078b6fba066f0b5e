use predicates::prelude::*;
use test_env::TestEnv;

#[test]
fn test_add_writes_record_and_lists() {
    let env = TestEnv::new();
    env.run(&["add", "Buy", "Milk"])
        .success()
        .stdout("   1: [ ] Buy Milk\n");
    assert_eq!(
        env.store_lines(),
        vec![r#"{"state":"new","title":"Buy Milk","modified":"2026-10-16"}"#]
    );
}

#[test]
fn test_add_single_quoted_argument() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk @shop"]).success();
    assert!(env.store().contains(r#""title":"Buy Milk @shop""#));
}

#[test]
fn test_add_extracts_due_tag() {
    let env = TestEnv::new();
    env.run(&["add", "Task", "due:tomorrow"])
        .success()
        .stdout("   1: [ ] Task (tomorrow)\n");
    assert_eq!(
        env.store_lines(),
        vec![r#"{"state":"new","title":"Task","modified":"2026-10-16","due":"2026-10-17"}"#]
    );
}

#[test]
fn test_add_due_tag_in_the_middle() {
    let env = TestEnv::new();
    env.run(&["add", "Call mom due:monday about dinner"]).success();
    assert!(env.store().contains(r#""title":"Call mom about dinner""#));
    assert!(env.store().contains(r#""due":"2026-10-19""#));
}

#[test]
fn test_add_empty_title_fails() {
    let env = TestEnv::new();
    env.run(&["add", "due:today"])
        .failure()
        .code(1)
        .stderr("ERROR: title must not be empty\n");
    assert!(!env.todo_file.exists());
}

#[test]
fn test_add_invalid_due_tag_fails() {
    let env = TestEnv::new();
    env.run(&["add", "Task due:someday"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("someday: invalid date"));
    assert!(!env.todo_file.exists());
}

#[test]
fn test_add_without_text_is_usage_error() {
    let env = TestEnv::new();
    env.run(&["add"])
        .failure()
        .code(1)
        .stderr("ERROR: usage: todo add <text>\n");
}

#[test]
fn test_add_appends_to_existing_store() {
    let env = TestEnv::new();
    env.run(&["add", "first"]).success();
    env.run(&["add", "second"]).success();
    env.run(&["add", "third"]).success();
    let lines = env.store_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains(r#""title":"third""#));
}

#[test]
fn test_add_after_hand_edited_store_without_trailing_newline() {
    let env = TestEnv::new();
    env.write_store(r#"{"state":"new","title":"hand edited","modified":"2026-10-01"}"#);
    env.run(&["add", "Buy Milk"])
        .success()
        .stdout("   1: [ ] hand edited\n   2: [ ] Buy Milk\n");
    assert_eq!(
        env.store_lines(),
        vec![
            r#"{"state":"new","title":"hand edited","modified":"2026-10-01"}"#,
            r#"{"state":"new","title":"Buy Milk","modified":"2026-10-16"}"#,
        ]
    );
    env.run(&["list"]).success();
}

#[test]
fn test_append_and_rename() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk"]).success();
    env.run(&["append", "1", "and", "Bread"])
        .success()
        .stdout("   1: [ ] Buy Milk and Bread\n");
    env.run(&["rename", "1", "Buy Eggs due:2026-11-02"])
        .success()
        .stdout("   1: [ ] Buy Eggs (2026-11-02)\n");
}

#[test]
fn test_append_requires_text() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk"]).success();
    env.run(&["append", "1"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: todo append"));
    env.run(&["rename", "2", "x"])
        .failure()
        .code(1)
        .stderr("ERROR: 2: No such todo\n");
}
