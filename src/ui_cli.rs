use std::io::{self, BufRead, Write};

use crate::app::{describe_parse_error, describe_resolution_error, AppError};
use crate::calculator::{Calculator, PastePolicy};
use crate::column::{COLUMNS, COLUMN_COUNT};
use crate::i18n::{keys, Translator};
use crate::scheme::InputScheme;
use crate::steam::PropertyResolver;
use crate::table::RecordTable;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SelectScheme,
    Calculate,
    List,
    Delete,
    Clear,
    Copy,
    Paste,
    Exit,
}

/// 대화형 세션 상태. 계산기와 현재 입력 필드 기본값을 들고 있다.
pub struct CliSession<R> {
    pub calc: Calculator<R>,
    pub defaults: Option<(f64, f64)>,
    pub paste_policy: PastePolicy,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_SCHEME,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_LIST,
        keys::MAIN_MENU_DELETE,
        keys::MAIN_MENU_CLEAR,
        keys::MAIN_MENU_COPY,
        keys::MAIN_MENU_PASTE,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::SelectScheme),
            "2" => return Ok(MenuChoice::Calculate),
            "3" => return Ok(MenuChoice::List),
            "4" => return Ok(MenuChoice::Delete),
            "5" => return Ok(MenuChoice::Clear),
            "6" => return Ok(MenuChoice::Copy),
            "7" => return Ok(MenuChoice::Paste),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 입력 방식 목록을 보여주고 선택을 반영한다.
pub fn handle_select_scheme<R: PropertyResolver>(
    tr: &Translator,
    session: &mut CliSession<R>,
) -> Result<(), AppError> {
    print!("{}", render_schemes());
    let scheme = loop {
        let sel = read_line(&tr.t(keys::PROMPT_SCHEME))?;
        if let Some(s) = sel.trim().parse().ok().and_then(InputScheme::from_index) {
            break s;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    session.defaults = session.calc.select_scheme(scheme);
    println!(
        "{}",
        tr.tf(keys::SCHEME_ACTIVE, &[("scheme", scheme.to_string())])
    );
    Ok(())
}

/// 두 입력값을 받아 계산한다. 빈 입력이면 기본값을 쓴다.
pub fn handle_calculate<R: PropertyResolver>(
    tr: &Translator,
    session: &mut CliSession<R>,
) -> Result<(), AppError> {
    let scheme = session.calc.scheme();
    let (f1, f2) = scheme.fields();
    let (d1, d2) = match session.defaults {
        Some((a, b)) => (Some(a), Some(b)),
        None => (None, None),
    };
    let raw1 = read_field(tr, &f1, d1)?;
    let raw2 = read_field(tr, &f2, d2)?;
    match session.calc.attempt_resolve(raw1, raw2) {
        Ok(id) => {
            let row = session.calc.table().position(id).unwrap_or_default();
            println!(
                "{}",
                tr.tf(keys::RESULT_APPENDED, &[("row", row.to_string())])
            );
            print!("{}", render_table(session.calc.table()));
            session.defaults = Some((raw1, raw2));
        }
        Err(e) => println!("{}", describe_resolution_error(tr, &e)),
    }
    Ok(())
}

fn read_field(
    tr: &Translator,
    spec: &crate::quantity::FieldSpec,
    default: Option<f64>,
) -> Result<f64, AppError> {
    let mut vars = vec![
        ("label", spec.label.to_string()),
        ("unit", spec.unit.symbol().to_string()),
        ("min", crate::codec::format_general(spec.min)),
        ("max", crate::codec::format_general(spec.max)),
    ];
    let prompt = match default {
        Some(d) => {
            vars.push(("default", crate::codec::format_general(d)));
            tr.tf(keys::PROMPT_FIELD_DEFAULT, &vars)
        }
        None => tr.tf(keys::PROMPT_FIELD, &vars),
    };
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            if let Some(d) = default {
                return Ok(d);
            }
        } else if let Ok(v) = s.parse::<f64>() {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }
}

pub fn handle_list<R: PropertyResolver>(tr: &Translator, session: &CliSession<R>) {
    let table = session.calc.table();
    if table.is_empty() {
        println!("{}", tr.t(keys::TABLE_EMPTY));
    } else {
        print!("{}", render_table(table));
    }
}

pub fn handle_delete<R: PropertyResolver>(
    tr: &Translator,
    session: &mut CliSession<R>,
) -> Result<(), AppError> {
    let rows = read_indices(&tr.t(keys::PROMPT_ROWS))?;
    // 빈 입력을 "전체"로 해석하지 않는다. 전체 삭제는 별도 메뉴다.
    let removed = session.calc.remove_at(rows.unwrap_or_default());
    println!(
        "{}",
        tr.tf(keys::RESULT_REMOVED, &[("count", removed.to_string())])
    );
    Ok(())
}

pub fn handle_clear<R: PropertyResolver>(tr: &Translator, session: &mut CliSession<R>) {
    session.calc.clear();
    println!("{}", tr.t(keys::RESULT_CLEARED));
}

/// 선택 영역을 HTML 조각과 텍스트로 출력한다.
pub fn handle_copy<R: PropertyResolver>(
    tr: &Translator,
    session: &CliSession<R>,
) -> Result<(), AppError> {
    let table = session.calc.table();
    let rows = read_indices(&tr.t(keys::PROMPT_ROWS))?.unwrap_or_else(|| (0..table.len()).collect());
    let cols = read_indices(&tr.t(keys::PROMPT_COLS))?.unwrap_or_else(|| (0..COLUMN_COUNT).collect());
    let payload = session.calc.copy_selection(rows, cols);
    println!("{}", payload.html);
    println!("{}", payload.text);
    println!("{}", tr.t(keys::RESULT_COPIED));
    Ok(())
}

/// 빈 줄이 나올 때까지 읽은 텍스트를 붙여넣는다.
pub fn handle_paste<R: PropertyResolver>(
    tr: &Translator,
    session: &mut CliSession<R>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROMPT_PASTE));
    let mut text = String::new();
    loop {
        let line = read_line("")?;
        if line.trim().is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    match session.calc.paste(&text, session.paste_policy) {
        Ok(report) => {
            for (i, err) in &report.rejected {
                println!("#{}: {}", i + 1, describe_resolution_error(tr, err));
            }
            println!("{}", paste_summary(tr, &report));
            print!("{}", render_table(session.calc.table()));
        }
        Err(e) => println!("{}", describe_parse_error(tr, &e)),
    }
    Ok(())
}

pub fn paste_summary(tr: &Translator, report: &crate::calculator::PasteReport) -> String {
    tr.tf(
        keys::RESULT_PASTE_SUMMARY,
        &[
            ("pairs", report.pairs.to_string()),
            ("appended", report.appended.len().to_string()),
            ("rejected", report.rejected.len().to_string()),
        ],
    )
}

/// 등록된 입력 방식과 필드 범위를 표 형태 문자열로 만든다.
pub fn render_schemes() -> String {
    let mut out = String::new();
    for scheme in InputScheme::ALL {
        let (f1, f2) = scheme.fields();
        out.push_str(&format!(
            "{}) {:<6} {} [{} ~ {}], {} [{} ~ {}]\n",
            scheme.index(),
            scheme.name(),
            f1.label,
            crate::codec::format_general(f1.min),
            crate::codec::format_general(f1.max),
            f2.label,
            crate::codec::format_general(f2.min),
            crate::codec::format_general(f2.max),
        ));
    }
    out
}

/// 테이블을 고정폭 텍스트로 만든다. 첫 열은 행 번호.
pub fn render_table(table: &RecordTable) -> String {
    const WIDTH: usize = 12;
    let mut out = format!("{:>4}", "#");
    for col in &COLUMNS {
        out.push_str(&format!(" {:>WIDTH$}", col.label));
    }
    out.push('\n');
    for row in 0..table.len() {
        out.push_str(&format!("{row:>4}"));
        for col in 0..COLUMN_COUNT {
            out.push_str(&format!(" {:>WIDTH$}", table.get(row, col).to_string()));
        }
        out.push('\n');
    }
    out
}

/// 공백 구분 인덱스 목록. 빈 입력이면 None.
fn read_indices(prompt: &str) -> Result<Option<Vec<usize>>, AppError> {
    let line = read_line(prompt)?;
    if line.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(
        line.split_whitespace()
            .filter_map(|t| t.parse().ok())
            .collect(),
    ))
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let n = io::stdin().lock().read_line(&mut buf)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}
