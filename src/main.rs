//! 명령행 진입점. 하위 명령이 없으면 대화형 메뉴를 띄운다.
//!
//! ```bash
//! h2o_props_cli calc --scheme 0 1 100
//! printf '10 50\n10 60\n10 70\n' | h2o_props_cli paste --scheme 0
//! h2o_props_cli schemes
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use h2o_props::app::{self, describe_resolution_error, AppError};
use h2o_props::i18n::{self, Translator};
use h2o_props::steam::If97Resolver;
use h2o_props::{config, ui_cli, Calculator, InputScheme};

#[derive(Parser)]
#[command(name = "h2o_props_cli")]
#[command(author, version, about = "Water and steam properties (IAPWS-IF97)", long_about = None)]
struct Cli {
    /// 로그 상세도 (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 언어 (auto/ko/en)
    #[arg(short = 'L', long)]
    lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 상태 하나를 계산해 출력한다
    Calc {
        /// 입력 방식 번호 (0~5)
        #[arg(short, long, default_value = "0")]
        scheme: usize,
        #[arg(allow_hyphen_values = true)]
        input1: f64,
        #[arg(allow_hyphen_values = true)]
        input2: f64,
    },

    /// 두 열 숫자 텍스트(파일 또는 표준입력)를 한 줄씩 계산한다
    Paste {
        /// 입력 파일. 없으면 표준입력
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "0")]
        scheme: usize,
        /// 표 대신 HTML 조각으로 출력
        #[arg(long)]
        html: bool,
    },

    /// 입력 방식과 필드 범위를 보여준다
    Schemes,
}

fn main() {
    let cli = Cli::parse();
    app::init_logging(cli.verbose);
    let tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
    if let Err(err) = try_run(cli) {
        eprintln!("{}", app::describe_error(&tr, &err));
        std::process::exit(1);
    }
}

fn scheme_from(index: usize) -> Result<InputScheme, AppError> {
    InputScheme::from_index(index).ok_or(AppError::UnknownScheme(index))
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(config::resolve_path(cli.config))?;
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match cli.command {
        None => {
            let calc = Calculator::with_scheme(If97Resolver, cfg.session.initial_scheme());
            app::run(calc, &cfg, &tr)
        }
        Some(Command::Calc {
            scheme,
            input1,
            input2,
        }) => {
            let mut calc = Calculator::with_scheme(If97Resolver, scheme_from(scheme)?);
            calc.attempt_resolve(input1, input2)?;
            print!("{}", ui_cli::render_table(calc.table()));
            Ok(())
        }
        Some(Command::Paste { file, scheme, html }) => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut calc = Calculator::with_scheme(If97Resolver, scheme_from(scheme)?);
            let report = calc.paste(&text, cfg.session.paste_policy)?;
            for (i, err) in &report.rejected {
                eprintln!("#{}: {}", i + 1, describe_resolution_error(&tr, err));
            }
            eprintln!("{}", ui_cli::paste_summary(&tr, &report));
            if html {
                let table = calc.table();
                let payload =
                    calc.copy_selection(0..table.len(), 0..h2o_props::column::COLUMN_COUNT);
                print!("{}", payload.html);
            } else {
                print!("{}", ui_cli::render_table(calc.table()));
            }
            Ok(())
        }
        Some(Command::Schemes) => {
            print!("{}", ui_cli::render_schemes());
            Ok(())
        }
    }
}
