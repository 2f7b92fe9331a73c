use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn cobranca(input: &Path, output: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cobranca"))
        .env_remove("COBRANCA_INPUT_DIR")
        .env_remove("COBRANCA_OUTPUT_DIR")
        .arg("--input-dir")
        .arg(input)
        .arg("--output-dir")
        .arg(output)
        .args(args)
        .output()
        .expect("run cobranca")
}

#[test]
fn batch_on_empty_dir_reports_nothing_found() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let out = cobranca(input.path(), output.path(), &["batch"]);
    assert!(out.status.success(), "batch failed: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Nenhum arquivo REM ou RET encontrado no diretório de entrada."));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn analise_on_empty_dir_reports_nothing_found() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let out = cobranca(input.path(), output.path(), &["analise"]);
    assert!(out.status.success(), "analise failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Nenhum arquivo REM ou RET encontrado"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn report_on_missing_file_fails_without_output() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let out = cobranca(input.path(), output.path(), &["report", "nao_existe.REM"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Erro: arquivo não encontrado"), "stderr: {stderr}");
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}
