//! 입력 필드 단위와 리졸버 기준 단위 사이의 변환.

pub mod pressure;
pub mod temperature;

pub use pressure::PressureUnit;
pub use temperature::{TemperatureUnit, CELSIUS_OFFSET_K};
