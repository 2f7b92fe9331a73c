//! Кодек полей фиксированной ширины: срезы строки, даты DDMMYY, суммы в центавах, ключи сверки.

use encoding_rs::WINDOWS_1252;
use rust_decimal::Decimal;
use std::ops::Range;

/// Дата для пустых/нулевых необязательных полей.
pub const EMPTY_DATE: &str = "00/00/00";

/// Срез `[start, end)` строки, декодированный из latin-1.
/// Если строка короче `end`, поле считается пустым.
pub fn field(line: &[u8], range: Range<usize>) -> String {
    match line.get(range) {
        Some(raw) => {
            let (text, _, _) = WINDOWS_1252.decode(raw);
            text.into_owned()
        }
        None => String::new(),
    }
}

/// То же, что [`field`], но с обрезкой пробелов.
pub fn text(line: &[u8], range: Range<usize>) -> String {
    field(line, range).trim().to_string()
}

/// Убирает хвостовые `\r`/`\n`.
pub fn strip_eol(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| *b != b'\r' && *b != b'\n')
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// `DDMMYY` -> `DD/MM/YY`; всё остальное возвращается как есть.
pub fn decode_date(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    match chars.as_slice() {
        [d1, d2, m1, m2, y1, y2] => format!("{d1}{d2}/{m1}{m2}/{y1}{y2}"),
        _ => raw.to_string(),
    }
}

/// Необязательная дата детали RET: пустое или `000000` -> `00/00/00`.
pub fn decode_optional_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if raw.chars().count() != 6 || trimmed.is_empty() || trimmed == "000000" {
        EMPTY_DATE.to_string()
    } else {
        decode_date(raw)
    }
}

/// Сумма в центавах -> бразильская запись `12.345,67`.
/// Нечисловое значение, как и число вне диапазона `Decimal`, возвращается обрезанным, без ошибки.
pub fn decode_currency(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "0,00".to_string();
    }
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }
    let Ok(mut value) = trimmed.parse::<Decimal>() else {
        return trimmed.to_string();
    };
    if value.set_scale(2).is_err() {
        return trimmed.to_string();
    }

    let plain = format!("{:.2}", value.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{},{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Ключ сверки: без пробелов и ведущих нулей; одни нули дают `"0"`.
pub fn normalize_key(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match raw.trim().trim_start_matches('0') {
        "" => "0".to_string(),
        key => key.to_string(),
    }
}

/// Агенция/счёт вида `номер-DV`; без DV: только номер.
pub fn with_check_digit(number: &str, digit: &str) -> String {
    if digit.is_empty() {
        number.to_string()
    } else {
        format!("{number}-{digit}")
    }
}
