use super::*;

#[test]
fn command_display_joins_program_and_args() {
    let cmd = ToolCommand::new("pdflatex")
        .arg("-interaction=nonstopmode")
        .args(["song.tex"]);
    assert_eq!(cmd.to_string(), "pdflatex -interaction=nonstopmode song.tex");
}

#[test]
fn run_status_reports_success_only_for_zero() {
    assert!(RunStatus::from_code(0).success());
    assert!(!RunStatus::from_code(2).success());
    assert!(!RunStatus::terminated().success());
    assert_eq!(RunStatus::from_code(2).to_string(), "exit status 2");
    assert_eq!(RunStatus::terminated().code(), None);
}

#[test]
fn recording_runner_records_and_scripts_failures() {
    let mut runner = RecordingRunner::new().fail_program("convert", 1);
    let dir = Path::new("out");

    let ok = runner
        .run(&ToolCommand::new("pdflatex"), dir, &OutputCapture::Inherit)
        .unwrap();
    let failed = runner
        .run(&ToolCommand::new("convert"), dir, &OutputCapture::Inherit)
        .unwrap();

    assert!(ok.success());
    assert_eq!(failed.code(), Some(1));
    assert_eq!(runner.programs(), ["pdflatex", "convert"]);
    assert_eq!(runner.invocations()[0].working_dir, PathBuf::from("out"));
}

#[cfg(unix)]
#[test]
fn system_runner_reports_exit_codes_and_captures_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.log");
    let mut runner = SystemRunner;

    let status = runner
        .run(
            &ToolCommand::new("sh").args(["-c", "echo typeset; exit 3"]),
            dir.path(),
            &OutputCapture::LogFile(log.clone()),
        )
        .unwrap();

    assert_eq!(status.code(), Some(3));
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "typeset\n");
}

#[test]
fn system_runner_fails_to_spawn_missing_programs() {
    let dir = tempfile::tempdir().unwrap();
    let err = SystemRunner
        .run(
            &ToolCommand::new("lyrdeck-no-such-tool"),
            dir.path(),
            &OutputCapture::Inherit,
        )
        .unwrap_err();
    assert!(err.to_string().contains("lyrdeck-no-such-tool"));
}
