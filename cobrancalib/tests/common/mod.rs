#![allow(dead_code)]

/// Длина записи CNAB400.
pub const LINE_LEN: usize = 400;

/// Строка из пробелов длины `len`, в которую вписаны значения по смещениям.
pub fn line(len: usize, fields: &[(usize, &str)]) -> Vec<u8> {
    let mut buf = vec![b' '; len];
    for &(offset, value) in fields {
        buf[offset..offset + value.len()].copy_from_slice(value.as_bytes());
    }
    buf
}

pub fn rem_header() -> Vec<u8> {
    line(
        LINE_LEN,
        &[
            (0, "0"),
            (11, "COBRANCA"),
            (26, "1234"),
            (30, "5"),
            (31, "00012345"),
            (39, "6"),
            (46, "EMPRESA EXEMPLO LTDA"),
            (76, "BANCO DO BRASIL"),
            (94, "010324"),
            (129, "1234567"),
        ],
    )
}

pub fn rem_detail(my_number: &str, our_number: &str) -> Vec<u8> {
    line(
        LINE_LEN,
        &[
            (0, "7"),
            (3, "12345678000199"),
            (38, "CTRL-001"),
            (63, our_number),
            (110, my_number),
            (120, "150324"),
            (126, "0000000150075"),
            (150, "010324"),
            (220, "98765432100"),
            (234, "MARIA DA SILVA"),
        ],
    )
}

pub fn ret_header() -> Vec<u8> {
    line(
        LINE_LEN,
        &[
            (0, "0"),
            (1, "02"),
            (3, "01"),
            (5, "COBRAN"),
            (26, "1234"),
            (30, "5"),
            (31, "00012345"),
            (39, "6"),
            (46, "EMPRESA EXEMPLO LTDA"),
            (76, "001"),
            (79, "BANCODOBRASIL"),
            (94, "200324"),
            (394, "000001"),
        ],
    )
}

pub fn ret_detail(my_number: &str, our_number: &str, code: &str) -> Vec<u8> {
    line(
        LINE_LEN,
        &[
            (0, "7"),
            (38, "CTRL-001"),
            (63, our_number),
            (106, "17"),
            (108, code),
            (110, "200324"),
            (116, my_number),
            (146, "150324"),
            (152, "0000000150075"),
            (168, "1234"),
            (175, "210324"),
            (240, "0000000000500"),
            (253, "0000000149575"),
        ],
    )
}

pub fn ret_trailer() -> Vec<u8> {
    line(LINE_LEN, &[(0, "9"), (17, "000003"), (23, "000000150075")])
}

/// Файл из строк с заданным окончанием строки.
pub fn file(lines: &[Vec<u8>], eol: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for l in lines {
        out.extend_from_slice(l);
        out.extend_from_slice(eol.as_bytes());
    }
    out
}
