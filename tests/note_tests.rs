use predicates::prelude::*;
use test_env::TestEnv;

fn setup() -> TestEnv {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk"]).success();
    env
}

#[test]
fn test_note_shows_detail() {
    let env = setup();
    env.run(&["note", "1", "two", "liters"])
        .success()
        .stdout("     state: new\n     title: Buy Milk\n  modified: 2026-10-16\n      note: \ntwo liters\n");
    env.run(&["note", "1", "semi-skimmed"]).success();
    assert!(env.store().contains(r#""note":["two liters","semi-skimmed"]"#));
}

#[test]
fn test_show_all_fields() {
    let env = setup();
    env.run(&["prio", "1"]).success();
    env.run(&["due", "1", "tomorrow"]).success();
    env.run(&["show", "1"])
        .success()
        .stdout("     state: new\n     title: Buy Milk\n  modified: 2026-10-16\n  priority: true\n       due: 2026-10-17\n");
}

#[test]
fn test_show_missing_task() {
    let env = setup();
    env.run(&["show", "2"])
        .failure()
        .code(1)
        .stderr("ERROR: 2: No such todo\n");
}

#[test]
fn test_delnote_single_note_removes_key() {
    let env = setup();
    env.run(&["note", "1", "only note"]).success();
    env.run(&["delnote", "1", "1"])
        .success()
        .stdout("     state: new\n     title: Buy Milk\n  modified: 2026-10-16\n");
    assert!(!env.store().contains("note"));
}

#[test]
fn test_delnote_by_index() {
    let env = setup();
    for note in ["first", "second", "third"] {
        env.run(&["note", "1", note]).success();
    }
    env.run(&["delnote", "1", "2"]).success();
    assert!(env.store().contains(r#""note":["first","third"]"#));
}

#[test]
fn test_delnote_all() {
    let env = setup();
    env.run(&["note", "1", "first"]).success();
    env.run(&["note", "1", "second"]).success();
    env.run(&["delnote", "1"]).success();
    assert!(!env.store().contains("note"));
}

#[test]
fn test_delnote_without_notes_fails() {
    let env = setup();
    let before = env.store();
    env.run(&["delnote", "1", "1"])
        .failure()
        .code(1)
        .stderr("ERROR: 1: Note does not exist\n");
    env.run(&["note", "1", "x"]).success();
    env.run(&["delnote", "1", "2"])
        .failure()
        .stderr(predicate::str::contains("2: Note does not exist"));
    assert_ne!(env.store(), before);
}

#[test]
fn test_note_requires_text() {
    let env = setup();
    env.run(&["note", "1"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: todo note"));
}
