use serde::{Deserialize, Serialize};

/// 섭씨-켈빈 오프셋. 모든 변환 경로가 이 값 하나만 사용한다.
pub const CELSIUS_OFFSET_K: f64 = 273.15;

/// 온도 단위를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
}

impl TemperatureUnit {
    /// 화면 표시용 단위 문자열.
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

/// 주어진 값을 켈빈으로 변환한다.
pub fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value,
        TemperatureUnit::Celsius => value + CELSIUS_OFFSET_K,
    }
}

/// 켈빈 값을 원하는 단위로 변환한다.
pub fn from_kelvin(value_k: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value_k,
        TemperatureUnit::Celsius => value_k - CELSIUS_OFFSET_K,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_round_trips_through_kelvin() {
        assert_eq!(to_kelvin(0.0, TemperatureUnit::Celsius), 273.15);
        let c = from_kelvin(to_kelvin(26.85, TemperatureUnit::Celsius), TemperatureUnit::Celsius);
        assert!((c - 26.85).abs() < 1e-12);
    }
}
