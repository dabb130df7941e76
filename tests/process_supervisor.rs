// tests/process_supervisor.rs

use std::path::PathBuf;
use std::time::{Duration, Instant};

use stagehand::errors::StagehandError;
use stagehand::exec::{OsProcessSupervisor, ProcessRequest, ProcessSupervisor};
use stagehand_test_utils::{init_tracing, with_timeout};
use tempfile::TempDir;

fn sh(script: &str, working_dir: PathBuf, timeout: Duration) -> ProcessRequest {
    ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir,
        timeout,
    }
}

#[tokio::test]
async fn quick_exit_reports_real_exit_code() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let result = OsProcessSupervisor::new()
        .execute(&sh("exit 7", tmp.path().to_path_buf(), Duration::from_secs(10)))
        .await
        .unwrap();

    assert!(result.completed);
    assert_eq!(result.exit_code, Some(7));
}

#[tokio::test]
async fn successful_exit_reports_zero() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let result = OsProcessSupervisor::new()
        .execute(&sh("true", tmp.path().to_path_buf(), Duration::from_secs(10)))
        .await
        .unwrap();

    assert!(result.completed);
    assert_eq!(result.exit_code, Some(0));
}

#[tokio::test]
async fn runs_in_the_requested_working_directory() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let result = OsProcessSupervisor::new()
        .execute(&sh(
            "echo hi > marker.txt",
            tmp.path().to_path_buf(),
            Duration::from_secs(10),
        ))
        .await
        .unwrap();

    assert_eq!(result.exit_code, Some(0));
    assert!(tmp.path().join("marker.txt").is_file());
}

#[tokio::test]
async fn arguments_arrive_as_a_vector_with_quotes_intact() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let request = ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        args: vec![
            "-c".to_string(),
            r#"printf '%s\n' "$@" > args.txt"#.to_string(),
            "sh".to_string(),
            "/key:x".to_string(),
            r#"/name:say "hi""#.to_string(),
            "with space".to_string(),
        ],
        working_dir: tmp.path().to_path_buf(),
        timeout: Duration::from_secs(10),
    };

    let result = OsProcessSupervisor::new().execute(&request).await.unwrap();
    assert_eq!(result.exit_code, Some(0));

    let written = std::fs::read_to_string(tmp.path().join("args.txt")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, vec!["/key:x", r#"/name:say "hi""#, "with space"]);
}

#[tokio::test]
async fn slow_process_is_killed_on_timeout() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let request = sh("sleep 30", tmp.path().to_path_buf(), Duration::from_millis(300));
    let result = with_timeout(OsProcessSupervisor::new().execute(&request))
        .await
        .unwrap();

    assert!(!result.completed);
    assert_eq!(result.exit_code, None);
}

#[tokio::test]
async fn timeout_kill_reaches_grandchildren() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    // The shell starts a background sleep, records its pid and waits on it.
    let request = sh(
        "sleep 30 & echo $! > grandchild.pid; wait",
        tmp.path().to_path_buf(),
        Duration::from_millis(500),
    );
    let result = with_timeout(OsProcessSupervisor::new().execute(&request))
        .await
        .unwrap();
    assert!(!result.completed);

    let pid = std::fs::read_to_string(tmp.path().join("grandchild.pid"))
        .unwrap()
        .trim()
        .to_string();

    // Gone, or at worst a zombie waiting to be reaped by init.
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat"));
        let dead = match stat {
            Err(_) => true,
            Ok(s) => s
                .rsplit(')')
                .next()
                .map(|rest| rest.trim_start().starts_with('Z'))
                .unwrap_or(false),
        };
        if dead || !PathBuf::from("/proc").is_dir() {
            break;
        }
        assert!(Instant::now() < deadline, "grandchild {pid} still running");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn missing_executable_is_a_launch_failure() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let request = ProcessRequest {
        program: tmp.path().join("does-not-exist"),
        args: Vec::new(),
        working_dir: tmp.path().to_path_buf(),
        timeout: Duration::from_secs(1),
    };

    let err = OsProcessSupervisor::new().execute(&request).await.unwrap_err();

    match err {
        StagehandError::Launch { program, .. } => assert_eq!(program, request.program),
        other => panic!("expected Launch error, got {other:?}"),
    }
}

#[tokio::test]
async fn signal_termination_maps_to_128_plus_signal() {
    init_tracing();
    let tmp = TempDir::new().unwrap();

    let result = OsProcessSupervisor::new()
        .execute(&sh("kill -TERM $$", tmp.path().to_path_buf(), Duration::from_secs(10)))
        .await
        .unwrap();

    assert!(result.completed);
    assert_eq!(result.exit_code, Some(128 + 15));
}
