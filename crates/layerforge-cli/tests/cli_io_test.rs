use assert_cmd::Command;
use std::io::Write;

const SAMPLE_SGF: &str = "\
t sample 6 6 3
n 0 0 0
n 1 0 1
n 2 1 0
n 3 1 1
n 4 2 0
n 5 2 1
e 0 2
e 0 3
e 1 2
e 1 3
e 2 4
e 3 5
";

#[test]
fn writes_a_result_file_named_per_the_preprocessor_and_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.sgf");
    std::fs::write(&input, SAMPLE_SGF).unwrap();

    let mut cmd = Command::cargo_bin("layerforge").unwrap();
    cmd.current_dir(dir.path())
        .args(["-p", "bfs", "-h", "mcn", "-w", "sample", "sample.sgf"])
        .assert()
        .success();

    let expected = dir.path().join("sample-bfs+mcn-t.sgf");
    assert!(expected.exists(), "expected {expected:?} to exist");
    let written = std::fs::read_to_string(expected).unwrap();
    assert!(written.starts_with("t sample"));
}

#[test]
fn writes_to_stdout_when_o_flag_is_given() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.sgf");
    std::fs::write(&input, SAMPLE_SGF).unwrap();

    let mut cmd = Command::cargo_bin("layerforge").unwrap();
    let output = cmd
        .current_dir(dir.path())
        .args(["-h", "sifting", "-O", "sample.sgf"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("t sample"));
}

#[test]
fn reads_from_stdin_with_the_i_flag() {
    let bin = assert_cmd::cargo::cargo_bin("layerforge");
    let mut child = std::process::Command::new(bin)
        .args(["-I", "-O"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SAMPLE_SGF.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().starts_with("t sample"));
}

#[test]
fn unknown_heuristic_name_exits_with_usage_status() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.sgf");
    std::fs::write(&input, SAMPLE_SGF).unwrap();

    let mut cmd = Command::cargo_bin("layerforge").unwrap();
    cmd.current_dir(dir.path())
        .args(["-h", "not-a-real-heuristic", "sample.sgf"])
        .assert()
        .code(2);
}

#[test]
fn missing_input_file_exits_with_failure_status() {
    let mut cmd = Command::cargo_bin("layerforge").unwrap();
    cmd.args(["-O", "does-not-exist.sgf"]).assert().code(1);
}
