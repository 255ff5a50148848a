use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SCHEME: &str = "main_menu.scheme";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_LIST: &str = "main_menu.list";
    pub const MAIN_MENU_DELETE: &str = "main_menu.delete";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_COPY: &str = "main_menu.copy";
    pub const MAIN_MENU_PASTE: &str = "main_menu.paste";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const SCHEME_ACTIVE: &str = "scheme.active";
    pub const PROMPT_SCHEME: &str = "prompt.scheme";
    pub const PROMPT_FIELD: &str = "prompt.field";
    pub const PROMPT_FIELD_DEFAULT: &str = "prompt.field_default";
    pub const PROMPT_ROWS: &str = "prompt.rows";
    pub const PROMPT_COLS: &str = "prompt.cols";
    pub const PROMPT_PASTE: &str = "prompt.paste";

    pub const RESULT_APPENDED: &str = "result.appended";
    pub const RESULT_REMOVED: &str = "result.removed";
    pub const RESULT_CLEARED: &str = "result.cleared";
    pub const RESULT_PASTE_SUMMARY: &str = "result.paste_summary";
    pub const RESULT_COPIED: &str = "result.copied";
    pub const TABLE_EMPTY: &str = "table.empty";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_VALIDATION: &str = "error.validation";
    pub const ERROR_UNSUPPORTED_REGION: &str = "error.unsupported_region";
    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_BAD_CLIPBOARD: &str = "error.bad_clipboard";
    pub const PASTE_FORMAT_HELP: &str = "help.paste_format";

    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_DELETE: &str = "gui.delete";
    pub const GUI_CLEAR: &str = "gui.clear";
    pub const GUI_ABOUT: &str = "gui.about";
    pub const GUI_ABOUT_BODY: &str = "gui.about_body";
    pub const GUI_READY: &str = "gui.ready";
    pub const GUI_SCHEME: &str = "gui.scheme";
    pub const GUI_SELECT_HINT: &str = "gui.select_hint";
    pub const GUI_SUPPRESSED: &str = "gui.suppressed";
    pub const GUI_COPIED_TEXT: &str = "gui.copied_text";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 키 자체 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    get_locale()
        .or_else(|| std::env::var("LANG").ok())
        .or_else(|| std::env::var("LC_ALL").ok())
        .and_then(|loc| {
            let lang = loc.split(['.', '_', '-']).next().unwrap_or_default();
            normalize_lang(lang)
        })
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션/키로 구성된 맵을 "섹션.키"로 평탄화한다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "H2Oprops - 물/증기 물성 계산기",
        MAIN_MENU_TITLE => "\n=== H2Oprops ===",
        MAIN_MENU_SCHEME => "1) 입력 방식 선택",
        MAIN_MENU_CALCULATE => "2) 계산",
        MAIN_MENU_LIST => "3) 기록 보기",
        MAIN_MENU_DELETE => "4) 행 삭제",
        MAIN_MENU_CLEAR => "5) 전체 삭제",
        MAIN_MENU_COPY => "6) 복사(HTML/텍스트)",
        MAIN_MENU_PASTE => "7) 붙여넣기",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        SCHEME_ACTIVE => "현재 입력 방식: {scheme}",
        PROMPT_SCHEME => "입력 방식 번호: ",
        PROMPT_FIELD => "{label} [{unit}] ({min} ~ {max}): ",
        PROMPT_FIELD_DEFAULT => "{label} [{unit}] ({min} ~ {max}, 기본값 {default}): ",
        PROMPT_ROWS => "행 번호(공백 구분, 비우면 전체): ",
        PROMPT_COLS => "열 번호(공백 구분, 비우면 전체): ",
        PROMPT_PASTE => "두 열의 숫자를 입력하세요. 빈 줄로 끝냅니다.",
        RESULT_APPENDED => "{row}번 행에 추가했습니다.",
        RESULT_REMOVED => "{count}개 행을 삭제했습니다.",
        RESULT_CLEARED => "모든 기록을 삭제했습니다.",
        RESULT_PASTE_SUMMARY => "{pairs}쌍 중 {appended}개 추가, {rejected}개 거부",
        RESULT_COPIED => "선택 영역을 복사했습니다.",
        TABLE_EMPTY => "기록이 없습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_VALIDATION => "입력 범위 오류",
        ERROR_UNSUPPORTED_REGION => "계산 불가 영역",
        ERROR_INVALID_INPUT => "잘못된 입력",
        ERROR_BAD_CLIPBOARD => "잘못된 클립보드 데이터",
        PASTE_FORMAT_HELP => {
            "붙여넣는 데이터는 두 열로 구성되어야 하며 각 열은 현재 입력 필드에 대응합니다.\n예:\n\n10 50\n10 60\n10 70"
        }
        GUI_CALCULATE => "계산",
        GUI_DELETE => "선택 행 삭제",
        GUI_CLEAR => "전체 삭제",
        GUI_ABOUT => "정보",
        GUI_ABOUT_BODY => {
            "물/증기 물성 계산기.\nIAPWS-IF97 계산은 seuif97 크레이트를 사용합니다.\nCtrl+C로 선택 영역 복사, Ctrl+V로 두 열 숫자 붙여넣기."
        }
        GUI_READY => "준비",
        GUI_SCHEME => "입력 방식",
        GUI_SELECT_HINT => "행 번호/열 머리를 눌러 선택합니다.",
        GUI_SUPPRESSED => "너무 빠른 반복 입력은 무시됩니다.",
        GUI_COPIED_TEXT => {
            "선택 영역을 탭 구분 텍스트로 복사했습니다. HTML 표는 CLI의 복사 메뉴나 `paste --html`로 얻을 수 있습니다."
        }
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "H2Oprops - water and steam properties",
        MAIN_MENU_TITLE => "\n=== H2Oprops ===",
        MAIN_MENU_SCHEME => "1) Select input scheme",
        MAIN_MENU_CALCULATE => "2) Calculate",
        MAIN_MENU_LIST => "3) Show records",
        MAIN_MENU_DELETE => "4) Delete rows",
        MAIN_MENU_CLEAR => "5) Clear table",
        MAIN_MENU_COPY => "6) Copy (HTML/text)",
        MAIN_MENU_PASTE => "7) Paste",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection, try again.",
        SCHEME_ACTIVE => "Active input scheme: {scheme}",
        PROMPT_SCHEME => "Scheme number: ",
        PROMPT_FIELD => "{label} [{unit}] ({min} to {max}): ",
        PROMPT_FIELD_DEFAULT => "{label} [{unit}] ({min} to {max}, default {default}): ",
        PROMPT_ROWS => "Row numbers (space separated, empty = all): ",
        PROMPT_COLS => "Column numbers (space separated, empty = all): ",
        PROMPT_PASTE => "Enter two columns of numbers. Finish with an empty line.",
        RESULT_APPENDED => "Added as row {row}.",
        RESULT_REMOVED => "Removed {count} row(s).",
        RESULT_CLEARED => "All records removed.",
        RESULT_PASTE_SUMMARY => "{appended} of {pairs} pair(s) added, {rejected} rejected",
        RESULT_COPIED => "Selection copied.",
        TABLE_EMPTY => "No records.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_VALIDATION => "Input out of range",
        ERROR_UNSUPPORTED_REGION => "Bad input",
        ERROR_INVALID_INPUT => "Invalid input",
        ERROR_BAD_CLIPBOARD => "Bad clipboard",
        PASTE_FORMAT_HELP => {
            "Pasted data must consist of two columns where each column corresponds to the selected input fields.\nFor example:\n\n10 50\n10 60\n10 70"
        }
        GUI_CALCULATE => "Calculate",
        GUI_DELETE => "Delete selected",
        GUI_CLEAR => "Clear",
        GUI_ABOUT => "About",
        GUI_ABOUT_BODY => {
            "Calculator of water and steam properties.\nIAPWS-IF97 is evaluated with the seuif97 crate.\nCtrl+C copies the selection, Ctrl+V pastes two columns of numbers."
        }
        GUI_READY => "Ready",
        GUI_SCHEME => "Input",
        GUI_SELECT_HINT => "Click row numbers or column headers to select.",
        GUI_SUPPRESSED => "Repeated input too fast, ignored.",
        GUI_COPIED_TEXT => {
            "Selection copied as tab-separated text. For the HTML table use the CLI copy menu or `paste --html`."
        }
        _ => return None,
    })
}
