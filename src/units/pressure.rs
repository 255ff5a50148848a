use serde::{Deserialize, Serialize};

/// 입력 필드에서 쓰는 압력 단위. 내부(리졸버) 기준은 항상 MPa(절대)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Bar,
    MegaPascal,
}

const BAR_PER_MPA: f64 = 10.0;

impl PressureUnit {
    /// 화면 표시용 단위 문자열.
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::MegaPascal => "MPa",
        }
    }
}

/// 주어진 압력을 MPa로 변환한다.
pub fn to_mpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value / BAR_PER_MPA,
        PressureUnit::MegaPascal => value,
    }
}

/// MPa 값을 원하는 단위로 변환한다.
pub fn from_mpa(value_mpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value_mpa * BAR_PER_MPA,
        PressureUnit::MegaPascal => value_mpa,
    }
}
