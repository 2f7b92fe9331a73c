//! cobrancalib: разбор файлов cobrança CNAB (remessa .REM / retorno .RET, layout CBR643),
//! текстовые отчёты .REL и сверка REM x RET в CSV.

pub mod batch;
pub mod codec;
pub mod codes;
pub mod error;
pub mod model;
pub mod recon;
pub mod report;
pub mod traits;

pub mod formats {
    pub mod rem;
    pub mod ret;
}
