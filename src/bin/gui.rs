#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//!
//! 화면 이벤트를 계산 세션 호출(계산/행 삭제/초기화/복사/붙여넣기)로만 옮긴다.

use eframe::{egui, App, Frame};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::{env, fs};

use h2o_props::app::{self, describe_parse_error, describe_resolution_error};
use h2o_props::calculator::{Calculator, PastePolicy};
use h2o_props::codec::format_general;
use h2o_props::column::{COLUMNS, COLUMN_COUNT};
use h2o_props::config;
use h2o_props::debounce::Debouncer;
use h2o_props::i18n::{self, keys, Translator};
use h2o_props::steam::If97Resolver;
use h2o_props::InputScheme;

fn main() -> Result<(), eframe::Error> {
    // --lang xx / --lang=xx / -L xx, --config path
    let mut cli_lang: Option<String> = None;
    let mut cli_config: Option<PathBuf> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            cli_config = Some(PathBuf::from(val));
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        } else if a == "--config" && i + 1 < args.len() {
            cli_config = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        }
        i += 1;
    }
    app::init_logging(0);

    let app_cfg = config::load_or_default(config::resolve_path(cli_config)).unwrap_or_else(|e| {
        log::warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    let lang = i18n::resolve_language(cli_lang.as_deref(), Some(&app_cfg.language));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "H2Oprops",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

/// 상태 표시줄 메시지.
#[derive(Debug, Clone, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

struct GuiApp {
    calc: Calculator<If97Resolver>,
    tr: Translator,
    input1: String,
    input2: String,
    selected_rows: BTreeSet<usize>,
    selected_cols: BTreeSet<usize>,
    /// 테이블이 교체되면 true. 행 번호 기반 선택은 더 이상 유효하지 않다.
    table_replaced: Rc<Cell<bool>>,
    debouncer: Debouncer,
    paste_policy: PastePolicy,
    status: Status,
    show_about: bool,
}

impl GuiApp {
    fn new(cfg: config::Config, lang: &str) -> Self {
        let tr = Translator::new_with_pack(lang, cfg.language_pack_dir.as_deref());
        let mut calc = Calculator::with_scheme(If97Resolver, cfg.session.initial_scheme());
        let table_replaced = Rc::new(Cell::new(false));
        let flag = Rc::clone(&table_replaced);
        calc.subscribe(move |_| flag.set(true));

        let mut app = Self {
            calc,
            status: Status::Info(tr.t(keys::GUI_READY)),
            tr,
            input1: String::new(),
            input2: String::new(),
            selected_rows: BTreeSet::new(),
            selected_cols: BTreeSet::new(),
            table_replaced,
            debouncer: Debouncer::new(cfg.session.debounce_interval()),
            paste_policy: cfg.session.paste_policy,
            show_about: false,
        };
        app.change_scheme(app.calc.scheme());
        if cfg.session.compute_on_start {
            app.calculate();
        }
        app
    }

    /// 입력 방식을 바꾸고 입력 칸을 새 기본값으로 채운다.
    fn change_scheme(&mut self, scheme: InputScheme) {
        if let Some((a, b)) = self.calc.select_scheme(scheme) {
            self.input1 = format_general(a);
            self.input2 = format_general(b);
        }
    }

    fn calculate(&mut self) {
        let Some((raw1, raw2)) = parse_inputs(&self.input1, &self.input2) else {
            self.status = Status::Error(self.tr.t(keys::ERROR_INVALID_NUMBER));
            return;
        };
        self.status = match self.calc.attempt_resolve(raw1, raw2) {
            Ok(_) => Status::Info(self.tr.t(keys::GUI_READY)),
            Err(e) => Status::Error(describe_resolution_error(&self.tr, &e)),
        };
    }

    fn delete_selected(&mut self) {
        let rows: Vec<usize> = self.selected_rows.iter().copied().collect();
        let removed = self.calc.remove_at(rows);
        self.status = Status::Info(
            self.tr
                .tf(keys::RESULT_REMOVED, &[("count", removed.to_string())]),
        );
    }

    fn copy(&mut self, ctx: &egui::Context) {
        let rows = selection_or_all(&self.selected_rows, self.calc.table().len());
        let cols = selection_or_all(&self.selected_cols, COLUMN_COUNT);
        let payload = self.calc.copy_selection(rows, cols);
        // egui 클립보드는 텍스트 한 가지 형식만 받으므로 HTML 조각은 싣지 않는다.
        log::debug!("html flavour not placed on clipboard:\n{}", payload.html);
        ctx.output_mut(|o| o.copied_text = payload.text);
        self.status = Status::Info(self.tr.t(keys::GUI_COPIED_TEXT));
    }

    fn paste(&mut self, text: &str) {
        self.status = match self.calc.paste(text, self.paste_policy) {
            Ok(report) => {
                let summary = h2o_props::ui_cli::paste_summary(&self.tr, &report);
                match report.rejected.first() {
                    Some((i, e)) => Status::Error(format!(
                        "{summary} (#{}: {})",
                        i + 1,
                        describe_resolution_error(&self.tr, e)
                    )),
                    None => Status::Info(summary),
                }
            }
            Err(e) => Status::Error(describe_parse_error(&self.tr, &e)),
        };
    }

    /// 텍스트 입력에 포커스가 없을 때만 표 복사/붙여넣기로 처리한다.
    fn handle_clipboard_events(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::Copy => {
                    if self.debouncer.allow() {
                        self.copy(ctx);
                    }
                }
                egui::Event::Paste(text) => {
                    if self.debouncer.allow() {
                        self.paste(&text);
                    } else {
                        self.status = Status::Info(self.tr.t(keys::GUI_SUPPRESSED));
                    }
                }
                _ => {}
            }
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            let current = self.calc.scheme();
            let mut chosen = current;
            egui::ComboBox::from_label(tr.t(keys::GUI_SCHEME))
                .selected_text(chosen.to_string())
                .show_ui(ui, |ui| {
                    for scheme in InputScheme::ALL {
                        ui.selectable_value(&mut chosen, scheme, scheme.to_string());
                    }
                });
            if chosen != current {
                self.change_scheme(chosen);
            }
        });

        let (f1, f2) = self.calc.scheme().fields();
        let mut submit = false;
        ui.horizontal(|ui| {
            for (spec, buf) in [(f1, &mut self.input1), (f2, &mut self.input2)] {
                let range = format!(
                    "{} ~ {}",
                    format_general(spec.min),
                    format_general(spec.max)
                );
                ui.label(spec.label).on_hover_text(range.as_str());
                let resp = ui.add(egui::TextEdit::singleline(buf).desired_width(110.0));
                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.label(format!("[{}]", spec.unit.symbol()));
                ui.add_space(12.0);
            }
            if ui.button(tr.t(keys::GUI_CALCULATE)).clicked() {
                submit = true;
            }
        });
        if submit {
            self.calculate();
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    !self.selected_rows.is_empty(),
                    egui::Button::new(tr.t(keys::GUI_DELETE)),
                )
                .clicked()
            {
                self.delete_selected();
            }
            if ui.button(tr.t(keys::GUI_CLEAR)).clicked() {
                self.calc.clear();
                self.status = Status::Info(tr.t(keys::RESULT_CLEARED));
            }
            if ui.button(tr.t(keys::GUI_ABOUT)).clicked() {
                self.show_about = true;
            }
            ui.small(tr.t(keys::GUI_SELECT_HINT));
        });
    }

    fn ui_table(&mut self, ui: &mut egui::Ui) {
        let table = self.calc.table();
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("records")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    ui.strong("#");
                    for (c, col) in COLUMNS.iter().enumerate() {
                        let selected = self.selected_cols.contains(&c);
                        if ui
                            .selectable_label(selected, col.label)
                            .on_hover_text(col.tooltip)
                            .clicked()
                        {
                            toggle(&mut self.selected_cols, c);
                        }
                    }
                    ui.end_row();

                    for row in 0..table.len() {
                        let selected = self.selected_rows.contains(&row);
                        if ui.selectable_label(selected, row.to_string()).clicked() {
                            toggle(&mut self.selected_rows, row);
                        }
                        for c in 0..COLUMN_COUNT {
                            let text = table.get(row, c).to_string();
                            if selected
                                && (self.selected_cols.is_empty()
                                    || self.selected_cols.contains(&c))
                            {
                                ui.strong(text);
                            } else {
                                ui.label(text);
                            }
                        }
                        ui.end_row();
                    }
                });
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_clipboard_events(ctx);
        if self.table_replaced.replace(false) {
            self.selected_rows.clear();
        }

        egui::TopBottomPanel::top("inputs").show(ctx, |ui| {
            ui.add_space(4.0);
            self.ui_inputs(ui);
            ui.add_space(4.0);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| match &self.status {
            Status::Info(msg) => {
                ui.label(msg);
            }
            Status::Error(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg);
            }
        });
        egui::CentralPanel::default().show(ctx, |ui| self.ui_table(ui));

        if self.show_about {
            let body = self.tr.t(keys::GUI_ABOUT_BODY);
            egui::Window::new(self.tr.t(keys::GUI_ABOUT))
                .collapsible(false)
                .open(&mut self.show_about)
                .show(ctx, |ui| {
                    ui.label(body);
                });
        }
    }
}

fn toggle(set: &mut BTreeSet<usize>, index: usize) {
    if !set.remove(&index) {
        set.insert(index);
    }
}

fn parse_inputs(a: &str, b: &str) -> Option<(f64, f64)> {
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// 선택이 비어 있으면 전체를 선택한 것으로 본다.
fn selection_or_all(selected: &BTreeSet<usize>, len: usize) -> Vec<usize> {
    if selected.is_empty() {
        (0..len).collect()
    } else {
        selected.iter().copied().filter(|i| *i < len).collect()
    }
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // 기본 폰트 뒤에 두어 라틴/그리스 문자는 기본 폰트가 그린다.
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 대체 폰트로 등록한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .map(PathBuf::from),
    );
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found; Hangul may not render.".to_string())?;
    let bytes = fs::read(path).map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}
