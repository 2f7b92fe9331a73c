//! Ошибки cobrancalib: ввод-вывод, запись CSV, ошибки уровня файла.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CobrancaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("arquivo não encontrado: {}", .0.display())]
    NotFound(PathBuf),

    #[error("tipo de arquivo não reconhecido (use .REM ou .RET): {}", .0.display())]
    UnsupportedFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, CobrancaError>;
