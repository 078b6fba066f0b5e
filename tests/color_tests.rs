use predicates::prelude::*;
use test_env::TestEnv;

#[test]
fn test_colored_listing() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Bread @breakfast due:today"]).success();
    env.run(&["prio", "1"]).success();
    env.cmd()
        .env("TODO_COLOR", "always")
        .arg("list")
        .assert()
        .success()
        .stdout("   1:\x1b[31m*\x1b[0m\x1b[37m[ ]\x1b[0m Buy Bread \x1b[36m@breakfast\x1b[0m \x1b[33m(today)\x1b[0m\n");
}

#[test]
fn test_colored_error_marker() {
    let env = TestEnv::new();
    env.cmd()
        .env("TODO_COLOR", "always")
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr("\x1b[31mERROR:\x1b[0m 1: No such todo\n");
}

#[test]
fn test_no_color_env() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk +shop"]).success();
    env.cmd()
        .env_remove("TODO_COLOR")
        .env("NO_COLOR", "1")
        .arg("list")
        .assert()
        .success()
        .stdout("   1: [ ] Buy Milk +shop\n");
}

#[test]
fn test_auto_color_is_off_when_piped() {
    let env = TestEnv::new();
    env.run(&["add", "Buy Milk"]).success();
    env.cmd()
        .env("TODO_COLOR", "auto")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}
