//! 클립보드 교환 형식.
//!
//! 복사: 선택된 행/열을 HTML 조각(스프레드시트 붙여넣기용)과 탭 구분 텍스트로 만든다.
//! 붙여넣기: 공백/줄바꿈으로 구분된 2열(또는 2행) 숫자 텍스트를 입력 쌍 목록으로 읽는다.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use thiserror::Error;

use crate::column::{self, COLUMNS};
use crate::table::RecordTable;

/// 유효숫자 자리수. `%g`의 기본값과 같다.
const SIGNIFICANT_DIGITS: i32 = 6;

/// 복사 결과. 같은 선택을 두 가지 형식으로 담는다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardPayload {
    /// 머리행(열 툴팁)을 포함한 HTML 표 조각
    pub html: String,
    /// 머리행 없는 탭 구분 값. 그대로 다시 붙여넣을 수 있다.
    pub text: String,
}

/// 붙여넣기 텍스트 해석 실패. 부분 결과는 만들지 않는다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("붙여넣을 데이터가 없습니다")]
    Empty,

    #[error("{line}행의 '{token}'은(는) 숫자가 아닙니다")]
    NonNumeric { line: usize, token: String },

    #[error("{line}행의 값 개수({found})가 첫 행({expected})과 다릅니다")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("데이터는 2열(또는 2행)이어야 합니다 ({rows}행 x {cols}열)")]
    Shape { rows: usize, cols: usize },

    #[error("첫 값이 -1인 데이터는 받지 않습니다")]
    Sentinel,
}

/// C `%g`와 같은 규칙의 일반 형식(유효숫자 6자리, 뒤쪽 0 제거).
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    // 반올림 후 지수를 얻기 위해 지수 표기를 먼저 만든다.
    let sci = format!("{value:.precision$e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= SIGNIFICANT_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// 선택된 행/열을 복사 형식으로 만든다.
///
/// 행과 열은 중복 제거 후 오름차순으로 내보내므로 선택 순서와 무관하다.
/// 범위 밖 인덱스는 건너뛴다.
pub fn encode<R, C>(table: &RecordTable, rows: R, cols: C) -> ClipboardPayload
where
    R: IntoIterator<Item = usize>,
    C: IntoIterator<Item = usize>,
{
    let rows: BTreeSet<usize> = rows.into_iter().filter(|r| *r < table.len()).collect();
    let cols: BTreeSet<usize> = cols
        .into_iter()
        .filter(|c| *c < column::COLUMN_COUNT)
        .collect();

    let mut html = String::from("<!--StartFragment-->\n<table><tr>\n");
    for &col in &cols {
        let _ = write!(html, "  <td> {}</td>", COLUMNS[col].tooltip);
    }
    html.push_str("</tr>\n");

    let mut text = String::new();
    for &row in &rows {
        html.push_str("<tr>\n");
        let mut cells = Vec::with_capacity(cols.len());
        for &col in &cols {
            let cell = table.get(row, col).to_string();
            let _ = writeln!(html, " <td> {cell} </td>");
            cells.push(cell);
        }
        html.push_str("</tr>\n");
        text.push_str(&cells.join("\t"));
        text.push('\n');
    }
    html.push_str("</table>\n<!--EndFragment-->\n");

    ClipboardPayload { html, text }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 붙여넣기 텍스트를 입력 쌍 목록으로 해석한다.
///
/// 2열이면 각 행이 한 쌍, 2행이면 전치하여 각 열이 한 쌍이다.
/// 어느 쪽도 아니거나, 행 길이가 다르거나, 숫자가 아닌 토큰이 있거나,
/// 첫 값이 -1이면 오류다.
pub fn decode(text: &str) -> Result<Vec<(f64, f64)>, ParseError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut grid: Vec<Vec<f64>> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let row = line
            .split_whitespace()
            .map(|token| {
                parse_number(token).ok_or_else(|| ParseError::NonNumeric {
                    line: i + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(row);
    }

    let cols = grid[0].len();
    if let Some((i, row)) = grid.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(ParseError::Ragged {
            line: i + 1,
            expected: cols,
            found: row.len(),
        });
    }
    if grid[0].first() == Some(&-1.0) {
        return Err(ParseError::Sentinel);
    }

    let rows = grid.len();
    match (rows, cols) {
        (_, 2) => Ok(grid.iter().map(|r| (r[0], r[1])).collect()),
        (2, n) if n > 0 => Ok((0..n).map(|j| (grid[0][j], grid[1][j])).collect()),
        _ => Err(ParseError::Shape { rows, cols }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_matches_percent_g() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(0.1), "0.1");
        assert_eq!(format_general(373.15), "373.15");
        assert_eq!(format_general(2675.4567891), "2675.46");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001234), "1.234e-05");
        assert_eq!(format_general(-12.5), "-12.5");
        assert_eq!(format_general(999999.5), "1e+06");
    }

    #[test]
    fn decode_two_columns() {
        let pairs = decode("10 50\n10 60\n10 70").unwrap();
        assert_eq!(pairs, vec![(10.0, 50.0), (10.0, 60.0), (10.0, 70.0)]);
    }

    #[test]
    fn decode_two_rows_transposes() {
        let pairs = decode("10\t10\t10\n50\t60\t70\n").unwrap();
        assert_eq!(pairs, vec![(10.0, 50.0), (10.0, 60.0), (10.0, 70.0)]);
    }

    #[test]
    fn decode_tolerates_crlf_and_trailing_blank_lines() {
        let pairs = decode("1 2\r\n3 4\r\n\r\n  \n").unwrap();
        assert_eq!(pairs, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn decode_rejects_ragged_rows() {
        assert_eq!(
            decode("1 2 3\n4 5"),
            Err(ParseError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn decode_rejects_non_numeric_and_dash() {
        assert!(matches!(
            decode("1 2\n3 -"),
            Err(ParseError::NonNumeric { line: 2, .. })
        ));
        assert!(matches!(
            decode("1 nan"),
            Err(ParseError::NonNumeric { .. })
        ));
    }

    #[test]
    fn decode_rejects_sentinel_and_bad_shapes() {
        assert_eq!(decode("-1 2\n3 4"), Err(ParseError::Sentinel));
        assert_eq!(decode(""), Err(ParseError::Empty));
        assert_eq!(decode("\n\n"), Err(ParseError::Empty));
        assert_eq!(
            decode("1 2 3\n4 5 6\n7 8 9"),
            Err(ParseError::Shape { rows: 3, cols: 3 })
        );
        assert_eq!(decode("5"), Err(ParseError::Shape { rows: 1, cols: 1 }));
    }
}
