//! Доменные модели записей REM/RET. Живут один проход: строка -> запись -> отчёт/индекс сверки.

use serde::{Deserialize, Serialize};

/// Тип записи по первому символу строки.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Header,
    Detail,
    Trailer,
    Unknown,
}

impl RecordKind {
    pub fn of(line: &[u8]) -> Self {
        match line.first() {
            Some(b'0') => RecordKind::Header,
            Some(b'7') => RecordKind::Detail,
            Some(b'9') => RecordKind::Trailer,
            _ => RecordKind::Unknown,
        }
    }
}

/// Header remessa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemHeader {
    pub identification: String,
    pub branch: String,
    pub account: String,
    pub beneficiary: String,
    pub bank_name: String,
    pub recorded_on: String,
    pub agreement: String,
}

/// Detalhe remessa. `face_value`: сырые цифры в центавах.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemDetail {
    pub beneficiary_tax_id: String,
    pub our_number: String,
    pub my_number: String,
    pub participant_control: String,
    pub due_date: String,
    pub face_value: String,
    pub issue_date: String,
    pub payer_tax_id: String,
    pub payer_name: String,
}

/// Header retorno.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetHeader {
    pub operation_type: String,
    pub service_type: String,
    pub service_code: String,
    pub branch: String,
    pub account: String,
    pub company_name: String,
    pub bank_code: String,
    pub bank_name: String,
    pub recorded_on: String,
    pub sequence: String,
}

/// Detalhe retorno. Суммы (`face_value`, `discount`, `amount_received`): сырые центавы.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetDetail {
    pub our_number: String,
    pub participant_control: String,
    pub wallet: String,
    pub my_number: String,
    pub occurrence_code: String,
    pub settlement_date: String,
    pub due_date: String,
    pub face_value: String,
    pub receiving_branch: String,
    pub credit_date: String,
    pub discount: String,
    pub amount_received: String,
}

impl RetDetail {
    pub fn occurrence_description(&self) -> String {
        crate::codes::descricao_ocorrencia(&self.occurrence_code).into_owned()
    }
}

/// Trailer retorno.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trailer {
    pub total_records: String,
    pub total_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemRecord {
    Header(RemHeader),
    Detail(RemDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RetRecord {
    Header(RetHeader),
    Detail(RetDetail),
    Trailer(Trailer),
}
