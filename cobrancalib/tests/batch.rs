mod common;

use chrono::NaiveDate;
use cobrancalib::{
    batch::{self, analysis_file_name, report_path, FileKind, Inputs},
    error::CobrancaError,
    recon::{Summary, UTF8_BOM},
    report::ReportOptions,
};
use common::{file, rem_detail, rem_header, ret_detail, ret_header, ret_trailer};
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn stamp(sec: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 20)
        .unwrap()
        .and_hms_opt(14, 30, sec)
        .unwrap()
}

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("lote.REM"),
        file(
            &[rem_header(), rem_detail("0000000123", "0000000000000000")],
            "\r\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("lote.RET"),
        file(
            &[
                ret_header(),
                ret_detail("0000000123", "00000000000000456", "06"),
                ret_trailer(),
            ],
            "\r\n",
        ),
    )
    .unwrap();
    fs::write(dir.join("leiame.txt"), "ignorado").unwrap();
}

#[rstest]
#[case("a.REM", Some(FileKind::Rem))]
#[case("a.rem", Some(FileKind::Rem))]
#[case("b.Ret", Some(FileKind::Ret))]
#[case("c.txt", None)]
#[case("sem_extensao", None)]
fn kind_by_extension(#[case] name: &str, #[case] expected: Option<FileKind>) {
    assert_eq!(FileKind::from_path(Path::new(name)), expected);
}

#[test]
fn report_path_replaces_extension() {
    let out = Path::new("saida");
    assert_eq!(report_path(Path::new("in/lote.REM"), out), PathBuf::from("saida/lote.REL"));
    assert_eq!(report_path(Path::new("lote.ret"), out), PathBuf::from("saida/lote.REL"));
    assert_eq!(report_path(Path::new("lote.dat"), out), PathBuf::from("saida/lote.dat.REL"));
}

#[test]
fn analysis_name_uses_timestamp() {
    assert_eq!(analysis_file_name(stamp(5)), "analise_rem_ret_20240320_143005.csv");
}

#[test]
fn missing_file_is_not_found_and_writes_nothing() {
    let out = tempdir().unwrap();
    let input = out.path().join("nao_existe.REM");

    let err = batch::process_file(&input, out.path(), &ReportOptions::default()).unwrap_err();
    assert!(matches!(err, CobrancaError::NotFound(ref p) if p == &input));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dados.txt");
    fs::write(&input, "0").unwrap();

    let err = batch::process_file(&input, dir.path(), &ReportOptions::default()).unwrap_err();
    assert!(matches!(err, CobrancaError::UnsupportedFile(_)));
}

#[test]
fn single_file_report() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_inputs(input.path());

    let report = batch::process_file(
        &input.path().join("lote.RET"),
        output.path(),
        &ReportOptions::default(),
    )
    .unwrap();
    assert_eq!(report.kind, FileKind::Ret);
    assert_eq!(report.details, 1);
    assert_eq!(report.output, output.path().join("lote.REL"));

    let text = fs::read_to_string(&report.output).unwrap();
    assert!(text.ends_with("Total de Lancamentos Processados: 1\n"));
    assert!(text.contains("Liquidação normal"));
}

#[test]
fn scan_dir_splits_and_sorts() {
    let dir = tempdir().unwrap();
    for name in ["b.REM", "a.rem", "z.RET", "nota.txt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    let inputs = batch::scan_dir(dir.path()).unwrap();
    assert_eq!(inputs.rem, [dir.path().join("a.rem"), dir.path().join("b.REM")]);
    assert_eq!(inputs.ret, [dir.path().join("z.RET")]);
    assert!(inputs.has_both());
}

#[test]
fn empty_dir_produces_no_analysis() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    assert!(batch::scan_dir(input.path()).unwrap().is_empty());
    assert_eq!(batch::reconcile_dir(input.path(), output.path(), stamp(0)).unwrap(), None);
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn batch_reports_every_input() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_inputs(input.path());

    let inputs = batch::scan_dir(input.path()).unwrap();
    let outcome = batch::process_inputs(&inputs, output.path(), &ReportOptions::default());
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.reports.len(), 2);
    assert_eq!(outcome.reports[0].kind, FileKind::Rem);
    assert_eq!(outcome.reports[1].kind, FileKind::Ret);
}

#[test]
fn missing_file_does_not_stop_batch() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_inputs(input.path());
    let missing = input.path().join("a.REM");

    let inputs = Inputs {
        rem: vec![missing.clone(), input.path().join("lote.REM")],
        ret: Vec::new(),
    };
    let outcome = batch::process_inputs(&inputs, output.path(), &ReportOptions::default());

    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].output, output.path().join("lote.REL"));
    assert_eq!(outcome.failures.len(), 1);
    let (path, err) = &outcome.failures[0];
    assert_eq!(path, &missing);
    assert!(matches!(err, CobrancaError::NotFound(p) if p == &missing));
}

#[test]
fn unreadable_file_is_skipped_in_reconciliation() {
    let input = tempdir().unwrap();
    write_inputs(input.path());

    let inputs = Inputs {
        rem: vec![input.path().join("a.REM"), input.path().join("lote.REM")],
        ret: vec![input.path().join("lote.RET"), input.path().join("z.RET")],
    };
    let out = batch::reconcile_inputs(&inputs);

    let matched = out.get("MATCH_M:123").expect("match entry");
    assert_eq!(matched.rem.as_ref().unwrap().file, "lote.REM");
    assert_eq!(matched.ret.as_ref().unwrap().file, "lote.RET");
    assert_eq!(out.summary().matches, 1);
}

#[test]
fn reconcile_dir_writes_csv() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_inputs(input.path());

    let analysis = batch::reconcile_dir(input.path(), output.path(), stamp(0))
        .unwrap()
        .expect("analysis");
    assert_eq!(
        analysis.path,
        output.path().join("analise_rem_ret_20240320_143000.csv")
    );
    assert_eq!(
        analysis.summary,
        Summary {
            rem: 2,
            ret: 2,
            matches: 1
        }
    );

    let bytes = fs::read(&analysis.path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let rows: Vec<_> = text.split_terminator("\r\n").collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("123;"));
    assert!(rows[1].contains(";lote.REM;lote.RET;"));
    assert!(rows[1].ends_with(";MATCH"));
}

#[test]
fn repeated_runs_give_same_content() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_inputs(input.path());

    let a = batch::reconcile_dir(input.path(), output.path(), stamp(0)).unwrap().unwrap();
    let b = batch::reconcile_dir(input.path(), output.path(), stamp(1)).unwrap().unwrap();
    assert_ne!(a.path, b.path);
    assert_eq!(fs::read(&a.path).unwrap(), fs::read(&b.path).unwrap());
}
