//! 기록 테이블의 고정 열 스키마와 물성 접근자.
//!
//! 열 번호 → 물성 매핑은 분기문 대신 추출 함수 배열로 정의한다.
//! 새 열은 [`COLUMNS`]에 항목 하나를 추가하면 된다.

use crate::codec::format_general;
use crate::record::StateRecord;
use crate::steam::PropertySet;

/// 셀 값. `Unavailable`은 0과 구분되는 "정의되지 않음" 표식이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Value(f64),
    Unavailable,
}

impl CellValue {
    pub fn is_available(self) -> bool {
        matches!(self, CellValue::Value(_))
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => CellValue::Value(v),
            _ => CellValue::Unavailable,
        }
    }
}

/// `-` 또는 유효숫자 6자리 일반 형식.
impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Value(v) => f.write_str(&format_general(*v)),
            CellValue::Unavailable => f.write_str("-"),
        }
    }
}

/// 열 하나의 정의: 짧은 라벨, 툴팁(긴 라벨), 추출 함수.
#[derive(Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub tooltip: &'static str,
    extract: fn(&PropertySet) -> Option<f64>,
}

impl Column {
    const fn new(
        label: &'static str,
        tooltip: &'static str,
        extract: fn(&PropertySet) -> Option<f64>,
    ) -> Self {
        Self {
            label,
            tooltip,
            extract,
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("tooltip", &self.tooltip)
            .finish()
    }
}

pub const COLUMN_COUNT: usize = 14;

pub static COLUMNS: [Column; COLUMN_COUNT] = [
    Column::new("P", "Pressure [MPa]", |p| Some(p.pressure_mpa)),
    Column::new("T", "Temperature [K]", |p| Some(p.temperature_k)),
    Column::new("\u{03C1}", "Density [kg/m3]", |p| Some(p.density)),
    Column::new("x", "Quality [-]", |p| p.quality),
    Column::new("Cp", "Cp [kJ/kgK]", |p| p.cp),
    Column::new("h", "Enthalpy [kJ/kg]", |p| Some(p.enthalpy)),
    Column::new("s", "Entropy [kJ/kgK]", |p| Some(p.entropy)),
    Column::new("k", "Thermal Conductivity [W/mK]", |p| {
        p.thermal_conductivity
    }),
    Column::new("\u{03B1}", "Thermal Diffusivity [m2/s]", |p| {
        p.thermal_diffusivity
    }),
    Column::new("Pr", "Prandtl number [-]", |p| p.prandtl),
    Column::new("c", "Speed of Sound [m/s]", |p| p.speed_of_sound),
    Column::new("\u{03BD}", "Kinematic viscosity [m2/s]", |p| {
        p.kinematic_viscosity
    }),
    Column::new("\u{03BC}", "Dynamic viscosity [Pa s]", |p| {
        p.dynamic_viscosity
    }),
    Column::new(
        "\u{03B1}v",
        "Isobaric cubic expansion coefficient, [1/K]",
        |p| p.expansion_coefficient,
    ),
];

pub fn column(index: usize) -> Option<&'static Column> {
    COLUMNS.get(index)
}

/// 열 번호와 기록으로 셀 값을 구한다. 모든 입력에 대해 값을 돌려주며 패닉하지 않는다.
///
/// 무효 기록, 범위 밖 열, 해당 영역에서 정의되지 않는 물성은 모두 `Unavailable`이다.
pub fn value_of(index: usize, record: &StateRecord) -> CellValue {
    if !record.is_valid() {
        return CellValue::Unavailable;
    }
    match COLUMNS.get(index) {
        Some(col) => (col.extract)(record.properties()).into(),
        None => CellValue::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liquid() -> PropertySet {
        PropertySet {
            pressure_mpa: 3.0,
            temperature_k: 300.0,
            density: 997.8,
            enthalpy: 115.33,
            entropy: 0.3923,
            quality: None,
            cp: Some(4.17),
            thermal_conductivity: Some(0.61),
            thermal_diffusivity: Some(1.47e-7),
            prandtl: Some(5.8),
            speed_of_sound: Some(1507.7),
            kinematic_viscosity: Some(8.5e-7),
            dynamic_viscosity: Some(8.5e-4),
            expansion_coefficient: Some(2.8e-4),
            region: 1,
        }
    }

    #[test]
    fn schema_has_fourteen_distinct_tooltips() {
        assert_eq!(COLUMNS.len(), 14);
        let mut tips: Vec<_> = COLUMNS.iter().map(|c| c.tooltip).collect();
        tips.sort();
        tips.dedup();
        assert_eq!(tips.len(), 14);
    }

    #[test]
    fn quality_is_unavailable_for_compressed_liquid() {
        let record = StateRecord::new(liquid(), true);
        assert_eq!(value_of(3, &record), CellValue::Unavailable);
        assert_eq!(value_of(0, &record), CellValue::Value(3.0));
        assert_eq!(value_of(13, &record), CellValue::Value(2.8e-4));
    }

    #[test]
    fn invalid_record_short_circuits_every_column() {
        let record = StateRecord::new(liquid(), false);
        for i in 0..COLUMN_COUNT {
            assert_eq!(value_of(i, &record), CellValue::Unavailable);
        }
    }

    #[test]
    fn out_of_range_column_is_unavailable() {
        let record = StateRecord::new(liquid(), true);
        assert_eq!(value_of(14, &record), CellValue::Unavailable);
        assert_eq!(value_of(usize::MAX, &record), CellValue::Unavailable);
    }

    #[test]
    fn nan_property_reads_as_unavailable() {
        let mut props = liquid();
        props.density = f64::NAN;
        let record = StateRecord::new(props, true);
        assert_eq!(value_of(2, &record), CellValue::Unavailable);
    }

    #[test]
    fn unavailable_renders_as_dash() {
        assert_eq!(CellValue::Unavailable.to_string(), "-");
        assert_eq!(CellValue::Value(373.15).to_string(), "373.15");
    }
}
