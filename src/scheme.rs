//! 입력 방식(입력 쌍 + 단위) 레지스트리.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::{FieldSpec, FieldUnit, QuantityKind};
use crate::steam::{CanonicalInputs, PropertySet};
use crate::units::{pressure, temperature, PressureUnit, TemperatureUnit};

/// 지원하는 여섯 가지 입력 방식. 순서(0~5)가 외부 인덱스다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputScheme {
    /// 압력[bar] + 온도[°C]
    #[default]
    PressureTemperature,
    /// 압력[bar] + 비엔탈피[kJ/kg]
    PressureEnthalpy,
    /// 압력[bar] + 비엔트로피[kJ/kg·K]
    PressureEntropy,
    /// 압력[bar] + 건도[-]
    PressureQuality,
    /// 온도[°C] + 건도[-]
    TemperatureQuality,
    /// 비엔탈피[kJ/kg] + 비엔트로피[kJ/kg·K]
    EnthalpyEntropy,
}

/// 입력 필드 범위 검증 실패. 리졸버를 부르기 전에 보고된다.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label} 값 {value}이(가) 허용 범위 [{min}, {max}]를 벗어났습니다")]
pub struct ValidationError {
    pub scheme: InputScheme,
    /// 실패한 필드 (0 또는 1)
    pub field: usize,
    pub label: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

const PRESSURE_BAR: FieldSpec = FieldSpec {
    kind: QuantityKind::Pressure,
    label: "Pressure",
    unit: FieldUnit::Pressure(PressureUnit::Bar),
    min: 0.0,
    max: 1e10,
};

const TEMPERATURE_C: FieldSpec = FieldSpec {
    kind: QuantityKind::Temperature,
    label: "Temperature",
    unit: FieldUnit::Temperature(TemperatureUnit::Celsius),
    min: -temperature::CELSIUS_OFFSET_K,
    max: 1000.0,
};

const ENTHALPY: FieldSpec = FieldSpec {
    kind: QuantityKind::SpecificEnthalpy,
    label: "Enthalpy",
    unit: FieldUnit::KjPerKg,
    min: 0.0,
    max: 1e10,
};

const ENTROPY: FieldSpec = FieldSpec {
    kind: QuantityKind::SpecificEntropy,
    label: "Entropy",
    unit: FieldUnit::KjPerKgK,
    min: 0.0,
    max: 1e10,
};

const QUALITY: FieldSpec = FieldSpec {
    kind: QuantityKind::Quality,
    label: "Quality",
    unit: FieldUnit::Fraction,
    min: 0.0,
    max: 1.0,
};

/// 등록된 입력 방식 수.
pub fn scheme_count() -> usize {
    InputScheme::COUNT
}

impl InputScheme {
    pub const COUNT: usize = 6;

    pub const ALL: [InputScheme; InputScheme::COUNT] = [
        InputScheme::PressureTemperature,
        InputScheme::PressureEnthalpy,
        InputScheme::PressureEntropy,
        InputScheme::PressureQuality,
        InputScheme::TemperatureQuality,
        InputScheme::EnthalpyEntropy,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 콤보박스 등에 쓰는 짧은 이름.
    pub fn name(self) -> &'static str {
        match self {
            InputScheme::PressureTemperature => "P, T",
            InputScheme::PressureEnthalpy => "P, h",
            InputScheme::PressureEntropy => "P, s",
            InputScheme::PressureQuality => "P, x",
            InputScheme::TemperatureQuality => "T, x",
            InputScheme::EnthalpyEntropy => "h, s",
        }
    }

    /// 두 입력 필드의 사양.
    pub fn fields(self) -> (FieldSpec, FieldSpec) {
        match self {
            InputScheme::PressureTemperature => (PRESSURE_BAR, TEMPERATURE_C),
            InputScheme::PressureEnthalpy => (PRESSURE_BAR, ENTHALPY),
            InputScheme::PressureEntropy => (PRESSURE_BAR, ENTROPY),
            InputScheme::PressureQuality => (PRESSURE_BAR, QUALITY),
            InputScheme::TemperatureQuality => (TEMPERATURE_C, QUALITY),
            InputScheme::EnthalpyEntropy => (ENTHALPY, ENTROPY),
        }
    }

    /// 필드 범위를 검증한다.
    pub fn validate(self, raw1: f64, raw2: f64) -> Result<(), ValidationError> {
        let (f1, f2) = self.fields();
        for (field, (spec, value)) in [(f1, raw1), (f2, raw2)].into_iter().enumerate() {
            if !spec.accepts(value) {
                return Err(ValidationError {
                    scheme: self,
                    field,
                    label: spec.label,
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }

    /// 사용자 단위 입력을 검증한 뒤 리졸버 기준 단위로 환산한다.
    pub fn to_canonical(self, raw1: f64, raw2: f64) -> Result<CanonicalInputs, ValidationError> {
        self.validate(raw1, raw2)?;
        let p = |bar: f64| pressure::to_mpa(bar, PressureUnit::Bar);
        let t = |c: f64| temperature::to_kelvin(c, TemperatureUnit::Celsius);
        Ok(match self {
            InputScheme::PressureTemperature => CanonicalInputs::PressureTemperature {
                p_mpa: p(raw1),
                t_k: t(raw2),
            },
            InputScheme::PressureEnthalpy => CanonicalInputs::PressureEnthalpy {
                p_mpa: p(raw1),
                h: raw2,
            },
            InputScheme::PressureEntropy => CanonicalInputs::PressureEntropy {
                p_mpa: p(raw1),
                s: raw2,
            },
            InputScheme::PressureQuality => CanonicalInputs::PressureQuality {
                p_mpa: p(raw1),
                x: raw2,
            },
            InputScheme::TemperatureQuality => CanonicalInputs::TemperatureQuality {
                t_k: t(raw1),
                x: raw2,
            },
            InputScheme::EnthalpyEntropy => CanonicalInputs::EnthalpyEntropy { h: raw1, s: raw2 },
        })
    }

    /// 계산된 상태를 이 방식의 입력 단위로 되돌린다. 방식 전환 시 기본값으로 쓴다.
    pub fn display_values(self, props: &PropertySet) -> (f64, f64) {
        let (f1, f2) = self.fields();
        (field_value(&f1, props), field_value(&f2, props))
    }
}

impl std::fmt::Display for InputScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (f1, f2) = self.fields();
        write!(
            f,
            "{} [{}] + {} [{}]",
            f1.label,
            f1.unit.symbol(),
            f2.label,
            f2.unit.symbol()
        )
    }
}

fn field_value(spec: &FieldSpec, props: &PropertySet) -> f64 {
    match spec.kind {
        QuantityKind::Pressure => pressure::from_mpa(props.pressure_mpa, PressureUnit::Bar),
        QuantityKind::Temperature => {
            temperature::from_kelvin(props.temperature_k, TemperatureUnit::Celsius)
        }
        QuantityKind::SpecificEnthalpy => props.enthalpy,
        QuantityKind::SpecificEntropy => props.entropy,
        // 단상이면 과열(2·5 영역)은 건증기, 그 외는 포화수로 본다.
        QuantityKind::Quality => props.quality.unwrap_or(match props.region {
            2 | 5 => 1.0,
            _ => 0.0,
        }),
    }
}
