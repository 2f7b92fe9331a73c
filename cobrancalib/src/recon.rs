//! Сверка remessa x retorno по ключам `M:<meu número>` и `N:<nosso número>`.
//!
//! Каждая деталь пишется под оба своих ключа; при совпадении ключа побеждает
//! последняя запись. Совпадение считается по ключу, а не по титулу: если у одного
//! титула совпал meu número, но разошёлся nosso número, в выходе будут строка
//! `MATCH` по `M:` и строки `SOMENTE REM`/`SOMENTE RET` по разным `N:`.

use crate::{
    codec::{decode_currency, normalize_key},
    error::Result,
    model::{RemDetail, RetDetail},
};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io::Write;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_HEADER: [&str; 20] = [
    "MEU NUMERO",
    "NOSSO NUMERO (REM)",
    "NOSSO NUMERO (RET)",
    "CONTROLE PARTICIPANTE",
    "ARQUIVO REMESSA",
    "ARQUIVO RETORNO",
    "CPF/CNPJ BENEFICIARIO",
    "CPF/CNPJ PAGADOR",
    "NOME PAGADOR",
    "DATA EMISSAO",
    "DATA VENCIMENTO",
    "VALOR TITULO",
    "CODIGO OCORRENCIA",
    "DESCRICAO OCORRENCIA",
    "DATA LIQUIDACAO",
    "DATA CREDITO",
    "VALOR RECEBIDO",
    "DESCONTO",
    "AGENCIA RECEBEDORA",
    "STATUS MATCH",
];

/// Деталь вместе с именем файла, из которого она прочитана.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub file: String,
    pub record: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Match,
    RemOnly,
    RetOnly,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Match => "MATCH",
            MatchStatus::RemOnly => "SOMENTE REM",
            MatchStatus::RetOnly => "SOMENTE RET",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconEntry {
    /// Ключ без префикса `M:`/`N:`.
    pub display_id: String,
    pub rem: Option<Sourced<RemDetail>>,
    pub ret: Option<Sourced<RetDetail>>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Строк со стороной REM.
    pub rem: usize,
    /// Строк со стороной RET.
    pub ret: usize,
    pub matches: usize,
}

trait BillingIds: Clone {
    fn my_number(&self) -> &str;
    fn our_number(&self) -> &str;
}

impl BillingIds for RemDetail {
    fn my_number(&self) -> &str {
        &self.my_number
    }
    fn our_number(&self) -> &str {
        &self.our_number
    }
}

impl BillingIds for RetDetail {
    fn my_number(&self) -> &str {
        &self.my_number
    }
    fn our_number(&self) -> &str {
        &self.our_number
    }
}

/// Ключи сверки детали: `M:` по meu número, `N:` по nosso número (пустые пропускаются).
pub fn match_keys(my_number: &str, our_number: &str) -> Vec<String> {
    let my = normalize_key(my_number);
    let our = normalize_key(our_number);
    let mut keys = Vec::with_capacity(2);
    if !my.is_empty() {
        keys.push(format!("M:{my}"));
    }
    if !our.is_empty() {
        keys.push(format!("N:{our}"));
    }
    keys
}

fn index<D: BillingIds>(map: &mut HashMap<String, Sourced<D>>, file: &str, detail: D) {
    for key in match_keys(detail.my_number(), detail.our_number()) {
        map.insert(
            key,
            Sourced {
                file: file.to_string(),
                record: detail.clone(),
            },
        );
    }
}

/// Индексы REM и RET. Наполняется последовательно, в порядке файлов и строк.
#[derive(Debug, Default)]
pub struct Reconciler {
    rem: HashMap<String, Sourced<RemDetail>>,
    ret: HashMap<String, Sourced<RetDetail>>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rem(&mut self, file: &str, detail: RemDetail) {
        index(&mut self.rem, file, detail);
    }

    pub fn add_ret(&mut self, file: &str, detail: RetDetail) {
        index(&mut self.ret, file, detail);
    }

    pub fn reconcile(&self) -> Reconciliation {
        let keys: BTreeSet<&String> = self.rem.keys().chain(self.ret.keys()).collect();
        let mut entries = BTreeMap::new();

        for key in keys {
            let rem = self.rem.get(key).cloned();
            let ret = self.ret.get(key).cloned();
            let (entry_key, status) = match (&rem, &ret) {
                (Some(_), Some(_)) => (format!("MATCH_{key}"), MatchStatus::Match),
                (Some(_), None) => (key.clone(), MatchStatus::RemOnly),
                (None, Some(_)) => (key.clone(), MatchStatus::RetOnly),
                (None, None) => continue,
            };
            let display_id = key.split_once(':').map_or(key.as_str(), |(_, id)| id).to_string();
            entries.insert(
                entry_key,
                ReconEntry {
                    display_id,
                    rem,
                    ret,
                    status,
                },
            );
        }

        Reconciliation { entries }
    }
}

/// Результат сверки, упорядоченный по внутреннему ключу (`MATCH_M:..`, `M:..`, `N:..`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    entries: BTreeMap<String, ReconEntry>,
}

impl Reconciliation {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ReconEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn get(&self, key: &str) -> Option<&ReconEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Summary {
        self.entries.values().fold(Summary::default(), |mut s, e| {
            s.rem += usize::from(e.rem.is_some());
            s.ret += usize::from(e.ret.is_some());
            s.matches += usize::from(e.status == MatchStatus::Match);
            s
        })
    }

    /// CSV для Excel/LibreOffice: BOM, `;`, CRLF, строка заголовков всегда.
    pub fn write_csv<W: Write>(&self, mut w: W) -> Result<()> {
        w.write_all(UTF8_BOM)?;
        let mut wrt = WriterBuilder::new()
            .delimiter(b';')
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .from_writer(w);

        wrt.write_record(CSV_HEADER)?;
        for entry in self.entries.values() {
            wrt.serialize(CsvOutRow::from(entry))?;
        }
        wrt.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvOutRow<'a> {
    meu_numero: &'a str,
    nosso_numero_rem: &'a str,
    nosso_numero_ret: &'a str,
    controle_participante: &'a str,
    arquivo_remessa: &'a str,
    arquivo_retorno: &'a str,
    cpf_cnpj_beneficiario: &'a str,
    cpf_cnpj_pagador: &'a str,
    nome_pagador: &'a str,
    data_emissao: &'a str,
    data_vencimento: &'a str,
    valor_titulo: String,
    codigo_ocorrencia: &'a str,
    descricao_ocorrencia: String,
    data_liquidacao: &'a str,
    data_credito: &'a str,
    valor_recebido: String,
    desconto: String,
    agencia_recebedora: &'a str,
    status: &'static str,
}

/// Пустая сумма остаётся пустой ячейкой, а не `0,00`.
fn amount(raw: Option<&str>) -> String {
    raw.filter(|v| !v.is_empty())
        .map(decode_currency)
        .unwrap_or_default()
}

impl<'a> From<&'a ReconEntry> for CsvOutRow<'a> {
    fn from(e: &'a ReconEntry) -> Self {
        let rem = e.rem.as_ref().map(|s| &s.record);
        let ret = e.ret.as_ref().map(|s| &s.record);

        CsvOutRow {
            meu_numero: &e.display_id,
            nosso_numero_rem: rem.map_or("", |d| d.our_number.as_str()),
            nosso_numero_ret: ret.map_or("", |d| d.our_number.as_str()),
            controle_participante: ret.map_or("", |d| d.participant_control.as_str()),
            arquivo_remessa: e.rem.as_ref().map_or("", |s| s.file.as_str()),
            arquivo_retorno: e.ret.as_ref().map_or("", |s| s.file.as_str()),
            cpf_cnpj_beneficiario: rem.map_or("", |d| d.beneficiary_tax_id.as_str()),
            cpf_cnpj_pagador: rem.map_or("", |d| d.payer_tax_id.as_str()),
            nome_pagador: rem.map_or("", |d| d.payer_name.as_str()),
            data_emissao: rem.map_or("", |d| d.issue_date.as_str()),
            data_vencimento: match (rem, ret) {
                (Some(d), _) => d.due_date.as_str(),
                (None, Some(d)) => d.due_date.as_str(),
                (None, None) => "",
            },
            valor_titulo: amount(rem.map(|d| d.face_value.as_str())),
            codigo_ocorrencia: ret.map_or("", |d| d.occurrence_code.as_str()),
            descricao_ocorrencia: ret.map(RetDetail::occurrence_description).unwrap_or_default(),
            data_liquidacao: ret.map_or("", |d| d.settlement_date.as_str()),
            data_credito: ret.map_or("", |d| d.credit_date.as_str()),
            valor_recebido: amount(ret.map(|d| d.amount_received.as_str())),
            desconto: amount(ret.map(|d| d.discount.as_str())),
            agencia_recebedora: ret.map_or("", |d| d.receiving_branch.as_str()),
            status: e.status.as_str(),
        }
    }
}
