//! 命令行集成测试

use assert_cmd::Command;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/tranzlator.yml");

fn lolspeak() -> Command {
    Command::cargo_bin("lolspeak").unwrap()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_translate_text_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("story.txt");
    std::fs::write(&input, "Hi, I'm a cat!\n").unwrap();

    let stdout = stdout_of(lolspeak().args(["translate", "-d", FIXTURE, "-o", "-", "-i"]).arg(&input));
    assert_eq!(stdout, "oh hai, me a kitteh!\n");
}

#[test]
fn test_translate_xml_to_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.xml");
    std::fs::write(&input, "<p class='hi'>hi <b>cat</b></p>").unwrap();

    lolspeak()
        .args(["-q", "translate", "--upcase", "-d", FIXTURE, "-i"])
        .arg(&input)
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("page_lol.xml")).unwrap();
    assert_eq!(output, "<p class='hi'>OH HAI <b>KITTEH</b></p>");
}

#[test]
fn test_translate_with_heuristics() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("story.txt");
    std::fs::write(&input, "invention looked").unwrap();

    let stdout = stdout_of(
        lolspeak()
            .args(["translate", "--heuristics", "--exclude", "looked", "-d", FIXTURE])
            .args(["-o", "-", "-i"])
            .arg(&input),
    );
    assert_eq!(stdout, "invenshun looked");
}

#[test]
fn test_translate_stats_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("story.txt");
    std::fs::write(&input, "hi cat").unwrap();

    let assert = lolspeak()
        .args(["translate", "--stats", "-d", FIXTURE, "-o", "-", "-i"])
        .arg(&input)
        .assert()
        .success();
    let output = assert.get_output();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "oh hai kitteh");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cat -> kitteh"));
    assert!(stderr.contains("hi -> oh hai"));
}

#[test]
fn test_translate_missing_input_fails() {
    lolspeak()
        .args(["translate", "-i", "/nonexistent/story.txt", "-o", "-"])
        .assert()
        .failure();
}

#[test]
fn test_quiet_failure_still_reports_error() {
    let assert = lolspeak()
        .args(["-q", "translate", "-i", "/nonexistent/story.txt", "-o", "-"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("/nonexistent/story.txt"));
}

#[test]
fn test_translate_malformed_xml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.xml");
    std::fs::write(&input, "<p>hi</b>").unwrap();

    lolspeak()
        .args(["translate", "-d", FIXTURE, "-o", "-", "-i"])
        .arg(&input)
        .assert()
        .failure();
}

#[test]
fn test_sort_dict() {
    let stdout = stdout_of(lolspeak().args(["sort-dict", "-d", FIXTURE]));
    assert_eq!(
        stdout,
        concat!(
            "cat: kitteh\n",
            "cheeseburger: cheezeburger\n",
            "eating: eating\n",
            "foobar: \"f&#^bar\"\n",
            "hi: \"oh hai\"\n",
            "\"i'm\": me\n",
            "your: ur\n",
        )
    );
}

#[test]
fn test_sort_dict_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sorted.yml");

    lolspeak()
        .args(["sort-dict", "-d", FIXTURE, "-o"])
        .arg(&output)
        .assert()
        .success();

    let reloaded = lolspeak::Tranzlator::from_file(&output).unwrap();
    assert_eq!(reloaded.dictionary().len(), 7);
}

#[test]
fn test_dict_xml() {
    let stdout = stdout_of(lolspeak().args(["dict-xml", "-d", FIXTURE]));
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<d:entry id=\"cat\">"));
    assert!(stdout.contains("<p>f&amp;#^bar</p>"));
    assert!(stdout.trim_end().ends_with("</d:dictionary>"));
}
