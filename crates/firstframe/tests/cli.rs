use std::process::Command;

#[test]
fn help_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_firstframe"))
        .arg("--help")
        .output()
        .expect("failed to run firstframe --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--size"));
    assert!(stdout.contains("--gpu-debug"));
}

#[test]
fn malformed_size_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_firstframe"))
        .args(["--size", "banana"])
        .status()
        .expect("failed to run firstframe with a malformed size");

    assert!(!status.success());
}

#[test]
fn zero_size_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_firstframe"))
        .args(["--size", "0x600"])
        .status()
        .expect("failed to run firstframe with a zero size");

    assert!(!status.success());
}
