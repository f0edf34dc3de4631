use assert_cmd::Command;

#[test]
fn test_cli_help() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("voicebridge-cli").unwrap();
    cmd.arg("--help").assert().success();
}

#[test]
fn test_cli_generate_requires_text() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("voicebridge-cli").unwrap();
    cmd.arg("generate").assert().failure();
}

#[test]
fn test_cli_rejects_unknown_subcommand() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("voicebridge-cli").unwrap();
    cmd.arg("transcribe").assert().failure();
}
