//! Справочники кодов ocorrência/comando (Banco do Brasil, CBR643).

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

pub static OCORRENCIAS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("00", "Cobrança registrada"),
        ("01", "Cobrança recusada - instrução inválida"),
        ("02", "Entrada confirmada"),
        ("03", "Entrada rejeitada"),
        ("04", "Transferência de carteira/entrada"),
        ("05", "Transferência de carteira/baixa"),
        ("06", "Liquidação normal"),
        ("07", "Liquidação parcial"),
        ("08", "Baixa solicitada"),
        ("09", "Baixado automaticamente via arquivo"),
        ("10", "Baixado conforme instruções da agência"),
        ("11", "Em ser (só no retorno mensal)"),
        ("12", "Abatimento concedido"),
        ("13", "Abatimento cancelado"),
        ("14", "Vencimento alterado"),
        ("15", "Liquidação em cartório"),
        ("16", "Título pago em cheque - bloqueado"),
        ("17", "Liquidação após baixa ou título não registrado"),
        ("18", "Acerto de depositária"),
        ("19", "Confirmação recebimento instrução de protesto"),
        ("20", "Confirmação recebimento instrução sustação de protesto"),
        ("21", "Acerto do controle do participante"),
        ("22", "Título com pagamento cancelado"),
        ("23", "Entrada do título em cartório"),
        ("24", "Entrada rejeitada por CEP irregular"),
        ("25", "Confirmação recebimento instrução de alteração de dados"),
        ("26", "Debitado a conta corrente"),
        ("27", "Retirado da compensação por instrução"),
        ("28", "Débito não efetuado - falta de autorização"),
        ("29", "Débito não efetuado - saldo insuficiente"),
        ("30", "Débito não efetuado - conta inexistente"),
        ("31", "Liquidação normal - em trânsito"),
        ("32", "Rejeição do pagador - alega que faturamento é indevido"),
        ("33", "Instrução rejeitada - tipo de valor inválido"),
        ("34", "Instrução rejeitada - falta de comprovante prestação de serviço"),
        ("35", "Instrução rejeitada - não comprovado o pagamento do título"),
        ("36", "Instrução rejeitada - comprovante de prestação de serviços inválido"),
        ("40", "Estorno de pagamento"),
        ("41", "Estorno de pagamento - título em cartório"),
        ("42", "Estorno de pagamento – baixado"),
        ("43", "Estorno de pagamento – liquidado"),
        ("44", "Estorno de liquidação"),
        ("51", "Título DDA reconhecido pelo pagador"),
        ("52", "Título DDA não reconhecido pelo pagador"),
        ("53", "Título DDA recusado pela CIP"),
        ("AA", "Controle inválido"),
        ("AB", "Tipo de operação inválido"),
        ("AC", "Tipo de serviço inválido"),
        ("AD", "Forma de lançamento inválida"),
        ("AE", "Tipo/Número de inscrição inválido"),
        ("AF", "Código de convenio inválido"),
        ("AG", "Agência/conta corrente/DV inválido"),
        ("AH", "Nº sequencial do registro no lote inválido"),
        ("AI", "Código de segmento de detalhe inválido"),
        ("AJ", "Tipo de movimento inválido"),
        (
            "AK",
            "Código da câmara de compensação do banco favorecido/depositário inválido",
        ),
        ("AL", "Código do banco favorecido ou depositário inválido"),
        ("AM", "Agência mantenedora da conta corrente do favorecido inválida"),
        ("AN", "Conta corrente/DV do favorecido inválido"),
        ("AO", "Nome do favorecido não informado"),
        ("AP", "Data lançamento inválido"),
        ("AQ", "Tipo/quantidade da moeda inválido"),
        ("AR", "Valor do lançamento inválido"),
        ("AS", "Aviso ao favorecido - identificação inválida"),
        ("AT", "Tipo/Número de inscrição do favorecido inválido"),
        ("AU", "Logradouro do favorecido não informado"),
        ("AV", "Nº do local do favorecido não informado"),
        ("AW", "Cidade do favorecido não informada"),
        ("AX", "CEP/complemento do favorecido inválido"),
        ("AY", "Sigla do estado do favorecido inválida"),
        ("AZ", "Código/Nome do banco depositário inválido"),
        ("BA", "Código/Nome da agência depositária inválido"),
        ("BB", "Seu número inválido"),
        ("BC", "Nosso número inválido"),
        ("BD", "Inclusão efetuada com sucesso"),
        ("BE", "Alteração efetuada com sucesso"),
        ("BF", "Exclusão efetuada com sucesso"),
        ("BG", "Agência/conta impedida legalmente"),
        ("BH", "Empresa não pagou salário"),
    ])
});

pub static COMANDOS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("01", "Registro de título"),
        ("02", "Solicitação de baixa"),
        ("03", "Pedido de devolução"),
        ("04", "Concessão de abatimento"),
        ("05", "Cancelamento de abatimento"),
        ("06", "Alteração de vencimento"),
        ("07", "Alteração de controle do participante"),
        ("08", "Alteração de seu número"),
        ("09", "Protesto"),
        ("18", "Sustação de protesto"),
        ("19", "Sustação de protesto e manutenção em carteira"),
        ("22", "Alteração de dados do pagador"),
        ("23", "Alteração de dados do sacador/avalista"),
        ("24", "Alteração de dados do sacador/avalista e endereço do sacado"),
        ("31", "Alteração de outros dados"),
        ("35", "Desagendamento do débito automático"),
        ("68", "Acerto nos dados do rateio de crédito"),
        ("69", "Cancelamento do rateio de crédito"),
    ])
});

pub fn descricao_ocorrencia(code: &str) -> Cow<'static, str> {
    let code = code.trim();
    match OCORRENCIAS.get(code) {
        Some(desc) => Cow::Borrowed(*desc),
        None => Cow::Owned(format!("Ocorrência {code} não mapeada")),
    }
}

pub fn descricao_comando(code: &str) -> Cow<'static, str> {
    let code = code.trim();
    match COMANDOS.get(code) {
        Some(desc) => Cow::Borrowed(*desc),
        None => Cow::Owned(format!("Comando {code} não mapeado")),
    }
}

/// Какой справочник подписывает колонку кода в отчёте RET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeTable {
    #[default]
    Occurrence,
    Command,
}

impl CodeTable {
    pub fn describe(self, code: &str) -> Cow<'static, str> {
        match self {
            CodeTable::Occurrence => descricao_ocorrencia(code),
            CodeTable::Command => descricao_comando(code),
        }
    }

    /// Заголовки колонок «код + описание» (одинаковой ширины для обоих справочников).
    pub(crate) fn column_titles(self) -> &'static str {
        match self {
            CodeTable::Occurrence => "OCORR.  DESCRICAO OCORRENCIA                         ",
            CodeTable::Command => "COMANDO DESCRICAO COMANDO                            ",
        }
    }
}
