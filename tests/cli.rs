use std::fs;
use std::path::Path;

use assert_cmd::Command;

const ERROR_MESSAGE: &str = "An error has occurred\n";

fn smash(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("smash").unwrap();
    cmd.env_remove("SMASH_CONFIG")
        .env_remove("SMASH_LOG_LEVEL")
        .env_remove("SMASH_MAX_LOOP_DEPTH")
        .env("SMASH_PROMPT", "")
        .env("HOME", dir)
        .current_dir(dir);
    cmd
}

fn stdout_of(cmd: &mut Command, input: &str) -> (String, String) {
    let output = cmd.write_stdin(input).assert().success().get_output().clone();
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn exit_terminates_with_success() {
    let tmp = tempfile::tempdir().unwrap();
    let (out, err) = stdout_of(&mut smash(tmp.path()), "exit\npwd\n");
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn end_of_input_terminates_with_success() {
    let tmp = tempfile::tempdir().unwrap();
    let (out, _) = stdout_of(&mut smash(tmp.path()), "");
    assert!(out.is_empty());
}

#[test]
fn exit_with_argument_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, err) = stdout_of(&mut smash(tmp.path()), "exit extra\nexit\n");
    assert_eq!(err, ERROR_MESSAGE);
}

#[test]
fn exit_skips_rest_of_line() {
    let tmp = tempfile::tempdir().unwrap();
    let (out, _) = stdout_of(&mut smash(tmp.path()), "exit ; pwd\n");
    assert!(out.is_empty());
}

#[test]
fn pwd_prints_working_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().canonicalize().unwrap();
    let (out, _) = stdout_of(&mut smash(&dir), "pwd\nloop 2 pwd\n");
    assert_eq!(out, format!("{}\n", dir.display()).repeat(3));
}

#[test]
fn builtin_output_precedes_child_output() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().canonicalize().unwrap();
    let (out, _) = stdout_of(&mut smash(&dir), "pwd ; /bin/echo child ; pwd\n");
    let cwd = dir.display();
    assert_eq!(out, format!("{cwd}\nchild\n{cwd}\n"));
}

#[test]
fn arguments_are_reported_once() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, err) = stdout_of(smash(tmp.path()).arg("script.sh"), "exit\n");
    assert_eq!(err, ERROR_MESSAGE);
}

#[test]
fn redirect_and_cd() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    let (_, err) = stdout_of(
        &mut smash(tmp.path()),
        "cd sub ; /bin/echo written > out.txt\n",
    );
    assert!(err.is_empty());
    assert_eq!(
        fs::read_to_string(tmp.path().join("sub/out.txt")).unwrap(),
        "written\n"
    );
}

#[test]
fn prompt_comes_from_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("smash.toml");
    fs::write(&config, "prompt = \"% \"\n").unwrap();

    let mut cmd = smash(tmp.path());
    cmd.env_remove("SMASH_PROMPT").env("SMASH_CONFIG", &config);
    let (out, _) = stdout_of(&mut cmd, "exit\n");
    assert_eq!(out, "% ");
}

#[test]
fn invalid_utf8_line_is_reported_and_session_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().canonicalize().unwrap();
    let output = smash(&dir)
        .write_stdin(&b"/bin/echo \xff\npwd\n"[..])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(String::from_utf8(output.stderr).unwrap(), ERROR_MESSAGE);
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{}\n", dir.display())
    );
}

#[test]
fn failed_first_stage_still_runs_the_rest() {
    let tmp = tempfile::tempdir().unwrap();
    let (out, err) = stdout_of(
        &mut smash(tmp.path()),
        "/no/such/program | /bin/echo downstream\n",
    );
    assert_eq!(out, "downstream\n");
    assert_eq!(err, ERROR_MESSAGE);
}

#[test]
fn environment_overrides_survive_a_broken_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("smash.toml");
    fs::write(&config, "prompt = \n").unwrap();

    let mut cmd = smash(tmp.path());
    cmd.env("SMASH_CONFIG", &config).env("SMASH_PROMPT", "% ");
    let (out, err) = stdout_of(&mut cmd, "exit\n");
    assert_eq!(out, "% ");
    assert!(err.starts_with("smash: "), "stderr: {err}");
}
