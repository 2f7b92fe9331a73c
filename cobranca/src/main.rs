use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use cobrancalib::{
    batch::{self, FileKind, FileReport},
    codes::CodeTable,
    error::Result,
    report::ReportOptions,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const NOTHING_FOUND: &str = "Nenhum arquivo REM ou RET encontrado no diretório de entrada.";

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Codes {
    /// Códigos de ocorrência
    Occurrence,
    /// Códigos de comando
    Command,
}

impl From<Codes> for CodeTable {
    fn from(c: Codes) -> Self {
        match c {
            Codes::Occurrence => CodeTable::Occurrence,
            Codes::Command => CodeTable::Command,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cobranca", version, about = "Отчёты и сверка файлов cobrança REM/RET (CBR643)")]
struct Cli {
    /// Каталог входных файлов .REM/.RET
    #[arg(long, env = "COBRANCA_INPUT_DIR", default_value = "dataInput", global = true)]
    input_dir: PathBuf,

    /// Каталог для отчётов .REL и CSV сверки
    #[arg(long, env = "COBRANCA_OUTPUT_DIR", default_value = "dataOutput", global = true)]
    output_dir: PathBuf,

    /// Справочник для колонки кода в отчёте RET
    #[arg(long, value_enum, default_value_t = Codes::Occurrence, global = true)]
    codes: Codes,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Один файл .REM/.RET -> отчёт .REL (затем сверка, если в каталоге есть и REM, и RET)
    Report {
        /// Путь к файлу; относительный ищется сначала во входном каталоге
        file: PathBuf,

        /// Не запускать сверку после отчёта
        #[arg(long)]
        no_analise: bool,
    },

    /// Все файлы входного каталога -> отчёты, затем сверка
    Batch,

    /// Только сверка REM x RET -> CSV
    Analise,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erro: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    debug!(?cli, "argumentos");
    fs::create_dir_all(&cli.input_dir)?;
    fs::create_dir_all(&cli.output_dir)?;
    let opts = ReportOptions {
        codes: cli.codes.into(),
    };

    match cli.command {
        Command::Report { file, no_analise } => {
            let input = resolve_input(&file, &cli.input_dir);
            if let Some(kind) = FileKind::from_path(&input) {
                println!("Processando arquivo de {}: {}", kind.label(), input.display());
            }
            let report = batch::process_file(&input, &cli.output_dir, &opts)?;
            print_report(&report);

            if !no_analise && batch::scan_dir(&cli.input_dir)?.has_both() {
                println!("\nGerando arquivo de análise relacionando REM e RET...");
                analise(&cli.input_dir, &cli.output_dir)?;
            }
        }

        Command::Batch => {
            let inputs = batch::scan_dir(&cli.input_dir)?;
            if inputs.is_empty() {
                println!("{NOTHING_FOUND}");
                return Ok(());
            }

            let outcome = batch::process_inputs(&inputs, &cli.output_dir, &opts);
            for report in &outcome.reports {
                print_report(report);
            }
            for (path, e) in &outcome.failures {
                eprintln!("Erro ao processar {}: {e}", path.display());
            }

            println!("\nGerando arquivo de análise relacionando REM e RET...");
            analise(&cli.input_dir, &cli.output_dir)?;
        }

        Command::Analise => {
            println!("Gerando arquivo de análise relacionando REM e RET...");
            analise(&cli.input_dir, &cli.output_dir)?;
        }
    }

    Ok(())
}

/// Относительный путь сначала ищется во входном каталоге.
fn resolve_input(file: &Path, input_dir: &Path) -> PathBuf {
    if file.is_relative() {
        let candidate = input_dir.join(file);
        if candidate.exists() {
            return candidate;
        }
    }
    file.to_path_buf()
}

fn print_report(report: &FileReport) {
    println!(
        "{}: {} lançamentos processados -> {}",
        report.kind.label(),
        report.details,
        report.output.display()
    );
}

fn analise(input_dir: &Path, output_dir: &Path) -> Result<()> {
    match batch::reconcile_dir(input_dir, output_dir, Local::now().naive_local())? {
        None => println!("{NOTHING_FOUND}"),
        Some(analysis) => {
            println!("\nArquivo de análise gerado: {}", analysis.path.display());
            println!("Total de registros REM: {}", analysis.summary.rem);
            println!("Total de registros RET: {}", analysis.summary.ret);
            println!("Total de matches: {}", analysis.summary.matches);
            println!("\nO arquivo CSV pode ser aberto no Excel ou LibreOffice Calc.");
            println!("Use o separador ';' (ponto e vírgula) ao importar.");
        }
    }
    Ok(())
}
