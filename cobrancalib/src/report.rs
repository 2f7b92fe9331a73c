//! Общие детали текстовых отчётов .REL: колонки, линейки, заголовки один раз на тип записи.

use crate::{codes::CodeTable, error::Result, model::RecordKind};
use std::collections::HashSet;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Справочник для колонки кода в отчёте RET.
    pub codes: CodeTable,
}

/// Ячейки, выровненные влево по ширине; `tail` идёт последним без добивки.
pub(crate) fn columns(cells: &[(&str, usize)], tail: &str) -> String {
    let mut s = String::new();
    for &(value, width) in cells {
        s.push_str(&format!("{value:<width$}"));
    }
    s.push_str(tail);
    s
}

pub(crate) fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

pub(crate) struct ReportWriter<W: Write> {
    out: W,
    titled: HashSet<RecordKind>,
}

impl<W: Write> ReportWriter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            titled: HashSet::new(),
        }
    }

    pub(crate) fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub(crate) fn rule(&mut self, width: usize) -> Result<()> {
        self.line(&"-".repeat(width))
    }

    /// Заголовок колонок + линейка, только при первой записи данного типа.
    pub(crate) fn title_once(&mut self, kind: RecordKind, title: &str, width: usize) -> Result<()> {
        if self.titled.insert(kind) {
            self.line(title)?;
            self.rule(width)?;
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
