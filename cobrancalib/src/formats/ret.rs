//! Retorno CBR643: header "0", detalhe "7", trailer "9".
//!
//! Código de ocorrência/comando берётся из позиций 109-110 (`[108, 110)`),
//! carteira: из 107-108 (`[106, 108)`).

use crate::{
    codec::{decode_currency, decode_date, decode_optional_date, field, text, with_check_digit},
    error::Result,
    model::{RecordKind, RetDetail, RetHeader, RetRecord, Trailer},
    report::{columns, truncate, ReportOptions, ReportWriter},
    traits::{DecodeFormat, ReportFormat},
};
use std::io::Write;

const HEADER_TITLE: &str = "TIPO OPERACAO TIPO SERV. CODIGO SERV. AG.      CONTA      EMPRESA                         BANCO            NOME DO BANCO          DT. GRAVACAO SEQ.";
const HEADER_RULE: usize = 120;

const DETAIL_TITLE_HEAD: &str = "NOSSO NUMERO          CONTROLE PARTICIPANTE              CARTEIRA MEU NUMERO       ";
const DETAIL_TITLE_TAIL: &str = "DATA LIQUIDACAO DATA VENCIMENTO VALOR TITULO AG RECEBEDORA DATA CREDITO DESCONTO CONCEDIDO VALOR RECEBIDO";
const DETAIL_RULE: usize = 275;
const DESCRIPTION_WIDTH: usize = 45;

pub struct Ret;

impl DecodeFormat for Ret {
    type Record = RetRecord;

    fn decode_line(line: &[u8]) -> Option<RetRecord> {
        match RecordKind::of(line) {
            RecordKind::Header => Some(RetRecord::Header(decode_header(line))),
            RecordKind::Detail => Some(RetRecord::Detail(decode_detail(line))),
            RecordKind::Trailer => Some(RetRecord::Trailer(decode_trailer(line))),
            RecordKind::Unknown => None,
        }
    }
}

fn decode_header(line: &[u8]) -> RetHeader {
    RetHeader {
        operation_type: text(line, 1..3),
        service_type: text(line, 3..5),
        service_code: text(line, 5..11),
        branch: with_check_digit(&text(line, 26..30), &text(line, 30..31)),
        account: with_check_digit(&text(line, 31..39), &text(line, 39..40)),
        company_name: text(line, 46..76),
        bank_code: text(line, 76..79),
        bank_name: text(line, 79..94),
        recorded_on: decode_date(&field(line, 94..100)),
        sequence: text(line, 394..400),
    }
}

fn decode_detail(line: &[u8]) -> RetDetail {
    RetDetail {
        our_number: text(line, 63..80),
        participant_control: text(line, 38..63),
        wallet: text(line, 106..108),
        my_number: text(line, 116..126),
        occurrence_code: text(line, 108..110),
        settlement_date: decode_optional_date(&field(line, 110..116)),
        due_date: decode_optional_date(&field(line, 146..152)),
        face_value: text(line, 152..165),
        receiving_branch: text(line, 168..172),
        credit_date: decode_optional_date(&field(line, 175..181)),
        discount: text(line, 240..253),
        amount_received: text(line, 253..266),
    }
}

fn decode_trailer(line: &[u8]) -> Trailer {
    Trailer {
        total_records: text(line, 17..23),
        total_value: text(line, 23..35),
    }
}

impl ReportFormat for Ret {
    fn write_report<W: Write>(w: W, records: &[RetRecord], opts: &ReportOptions) -> Result<usize> {
        let mut out = ReportWriter::new(w);
        let detail_title = format!(
            "{DETAIL_TITLE_HEAD}{}{DETAIL_TITLE_TAIL}",
            opts.codes.column_titles()
        );
        let mut details = 0;

        for record in records {
            match record {
                RetRecord::Header(h) => {
                    out.title_once(RecordKind::Header, HEADER_TITLE, HEADER_RULE)?;
                    out.line(&columns(
                        &[
                            (h.operation_type.as_str(), 13),
                            (h.service_type.as_str(), 11),
                            (h.service_code.as_str(), 13),
                            (h.branch.as_str(), 9),
                            (h.account.as_str(), 11),
                            (h.company_name.as_str(), 32),
                            (h.bank_code.as_str(), 6),
                            (h.bank_name.as_str(), 22),
                            (h.recorded_on.as_str(), 13),
                        ],
                        &h.sequence,
                    ))?;
                }
                RetRecord::Detail(d) => {
                    out.title_once(RecordKind::Detail, &detail_title, DETAIL_RULE)?;
                    let description =
                        truncate(&opts.codes.describe(&d.occurrence_code), DESCRIPTION_WIDTH);
                    out.line(&columns(
                        &[
                            (d.our_number.as_str(), 21),
                            (d.participant_control.as_str(), 32),
                            (d.wallet.as_str(), 9),
                            (d.my_number.as_str(), 17),
                            (d.occurrence_code.as_str(), 8),
                            (description.as_str(), DESCRIPTION_WIDTH),
                            (d.settlement_date.as_str(), 15),
                            (d.due_date.as_str(), 15),
                            (decode_currency(&d.face_value).as_str(), 13),
                            (d.receiving_branch.as_str(), 15),
                            (d.credit_date.as_str(), 13),
                            (decode_currency(&d.discount).as_str(), 16),
                        ],
                        &decode_currency(&d.amount_received),
                    ))?;
                    details += 1;
                }
                RetRecord::Trailer(t) => {
                    out.rule(DETAIL_RULE)?;
                    out.line(&format!("Total de Registros: {}", t.total_records))?;
                    out.line(&format!("Valor Total: {}", decode_currency(&t.total_value)))?;
                }
            }
        }

        out.rule(DETAIL_RULE)?;
        out.line(&format!("Total de Lancamentos Processados: {details}"))?;
        out.finish()?;
        Ok(details)
    }
}
