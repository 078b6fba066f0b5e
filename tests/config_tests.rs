use std::fs;
use test_env::TestEnv;

#[test]
fn test_rc_file_data_location() {
    let env = TestEnv::new();
    fs::write(
        env.temp_dir.path().join(".todorc"),
        "# todo settings\ndata.location=lists/work.jsonl\n",
    )
    .unwrap();

    env.cmd()
        .env_remove("TODO_FILE")
        .args(["add", "Write report"])
        .assert()
        .success()
        .stdout("   1: [ ] Write report\n");

    let stored = fs::read_to_string(env.temp_dir.path().join("lists/work.jsonl")).unwrap();
    assert!(stored.contains("Write report"));
    assert!(!env.todo_file.exists());
}

#[test]
fn test_default_location_in_home() {
    let env = TestEnv::new();
    env.cmd()
        .env_remove("TODO_FILE")
        .args(["add", "At home"])
        .assert()
        .success();
    assert!(env.temp_dir.path().join("todo.jsonl").exists());
}

#[test]
fn test_rc_color_setting() {
    let env = TestEnv::new();
    fs::write(env.temp_dir.path().join(".todorc"), "color=always\n").unwrap();
    env.run(&["add", "Buy Milk"]).success();
    env.cmd()
        .env_remove("TODO_COLOR")
        .arg("list")
        .assert()
        .success()
        .stdout("   1: \x1b[37m[ ]\x1b[0m Buy Milk\n");
}
