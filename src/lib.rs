//! 물/증기 상태 계산 기록기.
//!
//! 입력 쌍 두 개로 IAPWS-IF97 상태를 계산해 기록 테이블에 쌓고, 테이블 일부를
//! 클립보드 형식으로 주고받는다. 계산 로직을 라이브러리로 분리하여 CLI와 GUI가
//! 같은 세션 API를 쓴다.

pub mod app;
pub mod calculator;
pub mod codec;
pub mod column;
pub mod config;
pub mod debounce;
pub mod i18n;
pub mod quantity;
pub mod record;
pub mod scheme;
pub mod steam;
pub mod table;
pub mod ui_cli;
pub mod units;

pub use calculator::{Calculator, PastePolicy, PasteReport, ResolutionError};
pub use column::CellValue;
pub use record::StateRecord;
pub use scheme::InputScheme;
pub use table::{RecordId, RecordTable, TableEvent};
