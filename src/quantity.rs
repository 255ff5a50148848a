use crate::units::{PressureUnit, TemperatureUnit};

/// 입력 필드가 나타내는 물리량 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Pressure,
    Temperature,
    SpecificEnthalpy,
    SpecificEntropy,
    Quality,
}

/// 입력 필드에 표시되는 단위.
///
/// 압력/온도만 환산이 필요하고, 비엔탈피(kJ/kg)·비엔트로피(kJ/kg·K)·건도(-)는
/// 리졸버 기준 단위를 그대로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUnit {
    Pressure(PressureUnit),
    Temperature(TemperatureUnit),
    KjPerKg,
    KjPerKgK,
    Fraction,
}

impl FieldUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            FieldUnit::Pressure(u) => u.symbol(),
            FieldUnit::Temperature(u) => u.symbol(),
            FieldUnit::KjPerKg => "kJ/kg",
            FieldUnit::KjPerKgK => "kJ/kg K",
            FieldUnit::Fraction => "-",
        }
    }
}

/// 입력 필드 한 칸의 사양. 범위는 양 끝을 포함한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub kind: QuantityKind,
    pub label: &'static str,
    pub unit: FieldUnit,
    pub min: f64,
    pub max: f64,
}

impl FieldSpec {
    /// 값이 유한하고 범위 안에 있으면 true.
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}
