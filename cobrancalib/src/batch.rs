//! Файловая обвязка: поиск REM/RET в каталоге, отчёты .REL, CSV сверки.
//!
//! Ошибки уровня файла возвращаются вызывающему; в пакетном режиме они
//! логируются и не прерывают обработку остальных файлов.

use crate::{
    error::{CobrancaError, Result},
    formats::{rem::Rem, ret::Ret},
    model::{RemRecord, RetRecord},
    recon::{Reconciler, Reconciliation, Summary},
    report::ReportOptions,
    traits::{DecodeFormat, ReportFormat},
};
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Rem,
    Ret,
}

impl FileKind {
    /// По расширению `.rem`/`.ret` без учёта регистра.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("rem") {
            Some(FileKind::Rem)
        } else if ext.eq_ignore_ascii_case("ret") {
            Some(FileKind::Ret)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Rem => "REMESSA",
            FileKind::Ret => "RETORNO",
        }
    }
}

/// `<каталог вывода>/<имя>.REL`: расширение REM/RET заменяется, иначе `.REL` дописывается.
pub fn report_path(input: &Path, output_dir: &Path) -> PathBuf {
    let name = PathBuf::from(input.file_name().unwrap_or_default());
    let name = match FileKind::from_path(&name) {
        Some(_) => name.with_extension("REL"),
        None => {
            let mut s = name.into_os_string();
            s.push(".REL");
            PathBuf::from(s)
        }
    };
    output_dir.join(name)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CobrancaError::NotFound(path.to_path_buf()),
        _ => CobrancaError::Io(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub kind: FileKind,
    pub output: PathBuf,
    pub details: usize,
}

/// Один файл -> отчёт .REL. Для отсутствующего файла ничего не пишется.
pub fn process_file(input: &Path, output_dir: &Path, opts: &ReportOptions) -> Result<FileReport> {
    let reader = open(input)?;
    let kind = FileKind::from_path(input)
        .ok_or_else(|| CobrancaError::UnsupportedFile(input.to_path_buf()))?;
    info!(file = %input.display(), kind = kind.label(), "processando arquivo");

    let output = report_path(input, output_dir);
    let details = match kind {
        FileKind::Rem => {
            let records = Rem::read(reader)?;
            Rem::write_report(BufWriter::new(File::create(&output)?), &records, opts)?
        }
        FileKind::Ret => {
            let records = Ret::read(reader)?;
            Ret::write_report(BufWriter::new(File::create(&output)?), &records, opts)?
        }
    };
    debug!(output = %output.display(), details, "relatório gravado");

    Ok(FileReport {
        kind,
        output,
        details,
    })
}

/// Входные файлы каталога, каждый список отсортирован по пути.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub rem: Vec<PathBuf>,
    pub ret: Vec<PathBuf>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.rem.is_empty() && self.ret.is_empty()
    }

    pub fn has_both(&self) -> bool {
        !self.rem.is_empty() && !self.ret.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.rem.iter().chain(self.ret.iter())
    }
}

pub fn scan_dir(dir: &Path) -> Result<Inputs> {
    let mut inputs = Inputs::default();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match FileKind::from_path(&path) {
            Some(FileKind::Rem) => inputs.rem.push(path),
            Some(FileKind::Ret) => inputs.ret.push(path),
            None => {}
        }
    }
    inputs.rem.sort();
    inputs.ret.sort();
    Ok(inputs)
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub reports: Vec<FileReport>,
    pub failures: Vec<(PathBuf, CobrancaError)>,
}

/// Все REM/RET каталога -> отчёты. Ошибка одного файла не останавливает остальные.
pub fn process_inputs(inputs: &Inputs, output_dir: &Path, opts: &ReportOptions) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        reports: Vec::new(),
        failures: Vec::new(),
    };
    for path in inputs.all() {
        match process_file(path, output_dir, opts) {
            Ok(report) => outcome.reports.push(report),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "falha ao processar arquivo");
                outcome.failures.push((path.clone(), e));
            }
        }
    }
    outcome
}

/// Индексирует детали всех файлов. Нечитаемый файл пропускается с предупреждением.
pub fn reconcile_inputs(inputs: &Inputs) -> Reconciliation {
    let mut reconciler = Reconciler::new();

    for path in &inputs.rem {
        info!(file = %path.display(), "extraindo dados");
        match open(path).and_then(Rem::read) {
            Ok(records) => {
                let name = file_name(path);
                for record in records {
                    if let RemRecord::Detail(detail) = record {
                        reconciler.add_rem(&name, detail);
                    }
                }
            }
            Err(e) => warn!(
                file = %path.display(),
                error = %e,
                "erro ao extrair dados do arquivo REM"
            ),
        }
    }

    for path in &inputs.ret {
        info!(file = %path.display(), "extraindo dados");
        match open(path).and_then(Ret::read) {
            Ok(records) => {
                let name = file_name(path);
                for record in records {
                    if let RetRecord::Detail(detail) = record {
                        reconciler.add_ret(&name, detail);
                    }
                }
            }
            Err(e) => warn!(
                file = %path.display(),
                error = %e,
                "erro ao extrair dados do arquivo RET"
            ),
        }
    }

    reconciler.reconcile()
}

pub fn analysis_file_name(stamp: NaiveDateTime) -> String {
    format!("analise_rem_ret_{}.csv", stamp.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub path: PathBuf,
    pub summary: Summary,
}

/// Сверка всех REM/RET каталога. `Ok(None)`: файлов нет, CSV не создаётся.
pub fn reconcile_dir(
    input_dir: &Path,
    output_dir: &Path,
    stamp: NaiveDateTime,
) -> Result<Option<Analysis>> {
    let inputs = scan_dir(input_dir)?;
    if inputs.is_empty() {
        return Ok(None);
    }

    let reconciliation = reconcile_inputs(&inputs);
    let path = output_dir.join(analysis_file_name(stamp));
    reconciliation.write_csv(BufWriter::new(File::create(&path)?))?;

    let summary = reconciliation.summary();
    info!(
        file = %path.display(),
        rem = summary.rem,
        ret = summary.ret,
        matches = summary.matches,
        "análise gravada"
    );
    Ok(Some(Analysis { path, summary }))
}
