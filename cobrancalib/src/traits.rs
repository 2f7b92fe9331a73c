//! Унифицированные трэйты разбора и отчёта на основе std::io::{BufRead, Write}.

use crate::{codec, error::Result, report::ReportOptions};
use std::io::{BufRead, Write};
use tracing::trace;

pub trait DecodeFormat {
    type Record;

    /// Одна строка без `\r\n`. `None`: строка пропускается (неизвестный флаг, пустая строка).
    fn decode_line(line: &[u8]) -> Option<Self::Record>;

    fn read<R: BufRead>(r: R) -> Result<Vec<Self::Record>> {
        let mut records = Vec::new();
        for (n, line) in r.split(b'\n').enumerate() {
            let line = line?;
            match Self::decode_line(codec::strip_eol(&line)) {
                Some(record) => records.push(record),
                None => trace!(line = n + 1, "linha ignorada"),
            }
        }
        Ok(records)
    }
}

pub trait ReportFormat: DecodeFormat {
    /// Пишет отчёт фиксированных колонок, возвращает число detalhe.
    fn write_report<W: Write>(
        w: W,
        records: &[Self::Record],
        opts: &ReportOptions,
    ) -> Result<usize>;
}
