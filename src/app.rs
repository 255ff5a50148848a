use crate::calculator::{Calculator, ResolutionError};
use crate::codec::ParseError;
use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::steam::{PropertyResolver, ResolverError};
use crate::ui_cli::{self, CliSession, MenuChoice};
use thiserror::Error;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("알 수 없는 입력 방식 번호: {0}")]
    UnknownScheme(usize),
}

/// 계산 실패를 사용자에게 보여줄 "제목: 상세" 문자열로 만든다.
pub fn describe_resolution_error(tr: &Translator, err: &ResolutionError) -> String {
    let title = match err {
        ResolutionError::Validation(_) => keys::ERROR_VALIDATION,
        ResolutionError::Resolver(ResolverError::UnsupportedRegion(_)) => {
            keys::ERROR_UNSUPPORTED_REGION
        }
        ResolutionError::Resolver(ResolverError::InvalidInput(_)) => keys::ERROR_INVALID_INPUT,
    };
    format!("{}: {err}", tr.t(title))
}

/// 붙여넣기 해석 실패 안내. 형식 예시를 덧붙인다.
pub fn describe_parse_error(tr: &Translator, err: &ParseError) -> String {
    format!(
        "{}: {err}\n{}",
        tr.t(keys::ERROR_BAD_CLIPBOARD),
        tr.t(keys::PASTE_FORMAT_HELP)
    )
}

/// 최상위 오류 메시지. 계산/붙여넣기 오류는 분류 제목을 붙인다.
pub fn describe_error(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Resolution(e) => describe_resolution_error(tr, e),
        AppError::Parse(e) => describe_parse_error(tr, e),
        other => format!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
    }
}

/// 명령행 verbosity(-v 개수)로 env_logger를 초기화한다. RUST_LOG가 있으면 그쪽이 우선이다.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// 대화형 CLI 메인 루프를 실행한다.
pub fn run<R: PropertyResolver>(
    calc: Calculator<R>,
    config: &Config,
    tr: &Translator,
) -> Result<(), AppError> {
    let mut session = CliSession {
        calc,
        defaults: None,
        paste_policy: config.session.paste_policy,
    };
    let scheme = session.calc.scheme();
    session.defaults = session.calc.select_scheme(scheme);
    if config.session.compute_on_start {
        if let Some((a, b)) = session.defaults {
            if let Err(e) = session.calc.attempt_resolve(a, b) {
                println!("{}", describe_resolution_error(tr, &e));
            }
        }
    }
    println!("{}", tr.t(keys::APP_TITLE));
    println!(
        "{}",
        tr.tf(keys::SCHEME_ACTIVE, &[("scheme", scheme.to_string())])
    );
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::SelectScheme => ui_cli::handle_select_scheme(tr, &mut session)?,
            MenuChoice::Calculate => ui_cli::handle_calculate(tr, &mut session)?,
            MenuChoice::List => ui_cli::handle_list(tr, &session),
            MenuChoice::Delete => ui_cli::handle_delete(tr, &mut session)?,
            MenuChoice::Clear => ui_cli::handle_clear(tr, &mut session),
            MenuChoice::Copy => ui_cli::handle_copy(tr, &session)?,
            MenuChoice::Paste => ui_cli::handle_paste(tr, &mut session)?,
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
