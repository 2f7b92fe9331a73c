//! Remessa CBR643: header "0" и detalhe "7". Trailer remessa не разбирается.

use crate::{
    codec::{decode_date, field, text, with_check_digit},
    error::Result,
    model::{RecordKind, RemDetail, RemHeader, RemRecord},
    report::{columns, ReportOptions, ReportWriter},
    traits::{DecodeFormat, ReportFormat},
};
use std::io::Write;

const HEADER_TITLE: &str = "TIPO DE SERVICO AG.    CONTA      BENEFICIARIO                   ARRECADADOR        DT. GRAVACAO CONVENIO";
const HEADER_RULE: usize = 105;

const DETAIL_TITLE: &str = "CPF/CNPJ DO BENEFICIARIO      NOSSO NUMERO      CONTROLE EMPRESA          MEU NUMERO DT VENCIMENTO VALOR DO TITULO DT EMISSAO  CPF/CNPJ DO PAGADOR PAGADOR";
const DETAIL_RULE: usize = 195;

pub struct Rem;

impl DecodeFormat for Rem {
    type Record = RemRecord;

    fn decode_line(line: &[u8]) -> Option<RemRecord> {
        match RecordKind::of(line) {
            RecordKind::Header => Some(RemRecord::Header(decode_header(line))),
            RecordKind::Detail => Some(RemRecord::Detail(decode_detail(line))),
            RecordKind::Trailer | RecordKind::Unknown => None,
        }
    }
}

fn decode_header(line: &[u8]) -> RemHeader {
    RemHeader {
        identification: text(line, 11..19),
        branch: with_check_digit(&text(line, 26..30), &text(line, 30..31)),
        account: with_check_digit(&text(line, 31..39), &text(line, 39..40)),
        beneficiary: text(line, 46..76),
        bank_name: text(line, 76..94),
        recorded_on: decode_date(&field(line, 94..100)),
        agreement: text(line, 129..136),
    }
}

fn decode_detail(line: &[u8]) -> RemDetail {
    RemDetail {
        beneficiary_tax_id: text(line, 3..17),
        our_number: text(line, 63..80),
        my_number: text(line, 110..120),
        participant_control: text(line, 38..63),
        due_date: decode_date(&field(line, 120..126)),
        face_value: text(line, 126..139),
        issue_date: decode_date(&field(line, 150..156)),
        payer_tax_id: text(line, 220..234),
        payer_name: text(line, 234..271),
    }
}

impl ReportFormat for Rem {
    fn write_report<W: Write>(w: W, records: &[RemRecord], _opts: &ReportOptions) -> Result<usize> {
        let mut out = ReportWriter::new(w);
        let mut details = 0;

        for record in records {
            match record {
                RemRecord::Header(h) => {
                    out.title_once(RecordKind::Header, HEADER_TITLE, HEADER_RULE)?;
                    out.line(&columns(
                        &[
                            (h.identification.as_str(), 16),
                            (h.branch.as_str(), 7),
                            (h.account.as_str(), 11),
                            (h.beneficiary.as_str(), 31),
                            (h.bank_name.as_str(), 19),
                            (h.recorded_on.as_str(), 13),
                        ],
                        &h.agreement,
                    ))?;
                    out.rule(HEADER_RULE)?;
                }
                RemRecord::Detail(d) => {
                    out.title_once(RecordKind::Detail, DETAIL_TITLE, DETAIL_RULE)?;
                    // valor do título: как в файле, без форматирования
                    out.line(&columns(
                        &[
                            (d.beneficiary_tax_id.as_str(), 30),
                            (d.our_number.as_str(), 18),
                            (d.participant_control.as_str(), 26),
                            (d.my_number.as_str(), 13),
                            (d.due_date.as_str(), 14),
                            (d.face_value.as_str(), 15),
                            (d.issue_date.as_str(), 12),
                            (d.payer_tax_id.as_str(), 19),
                        ],
                        &d.payer_name,
                    ))?;
                    details += 1;
                }
            }
        }

        out.rule(DETAIL_RULE)?;
        out.line(&format!("Total de Lancamentos: {details}"))?;
        out.finish()?;
        Ok(details)
    }
}
