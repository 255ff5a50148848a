//! 물성 리졸버 인터페이스.
//!
//! 리졸버는 독립 상태량 두 개(기준 단위)를 받아 전체 물성 집합과 유효 플래그를
//! 돌려주거나, 구현 영역 밖/물리적으로 모순된 입력이라고 거부한다.

use thiserror::Error;

/// 리졸버 기준 단위(MPa, K, kJ/kg, kJ/kg·K, 0~1)로 환산된 입력 쌍.
///
/// 변형마다 정확히 두 값만 담으므로 리졸버에 더 많거나 적은 입력이 전달될 수 없다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalInputs {
    PressureTemperature { p_mpa: f64, t_k: f64 },
    PressureEnthalpy { p_mpa: f64, h: f64 },
    PressureEntropy { p_mpa: f64, s: f64 },
    PressureQuality { p_mpa: f64, x: f64 },
    TemperatureQuality { t_k: f64, x: f64 },
    EnthalpyEntropy { h: f64, s: f64 },
}

impl CanonicalInputs {
    /// 두 입력값을 선언 순서대로 반환한다.
    pub fn values(&self) -> (f64, f64) {
        match *self {
            CanonicalInputs::PressureTemperature { p_mpa, t_k } => (p_mpa, t_k),
            CanonicalInputs::PressureEnthalpy { p_mpa, h } => (p_mpa, h),
            CanonicalInputs::PressureEntropy { p_mpa, s } => (p_mpa, s),
            CanonicalInputs::PressureQuality { p_mpa, x } => (p_mpa, x),
            CanonicalInputs::TemperatureQuality { t_k, x } => (t_k, x),
            CanonicalInputs::EnthalpyEntropy { h, s } => (h, s),
        }
    }

    /// 입력에 포함된 압력(MPa). 없으면 None.
    pub fn pressure_mpa(&self) -> Option<f64> {
        match *self {
            CanonicalInputs::PressureTemperature { p_mpa, .. }
            | CanonicalInputs::PressureEnthalpy { p_mpa, .. }
            | CanonicalInputs::PressureEntropy { p_mpa, .. }
            | CanonicalInputs::PressureQuality { p_mpa, .. } => Some(p_mpa),
            _ => None,
        }
    }

    /// 입력에 포함된 온도(K). 없으면 None.
    pub fn temperature_k(&self) -> Option<f64> {
        match *self {
            CanonicalInputs::PressureTemperature { t_k, .. }
            | CanonicalInputs::TemperatureQuality { t_k, .. } => Some(t_k),
            _ => None,
        }
    }

    /// 입력에 포함된 건도. 없으면 None.
    pub fn quality(&self) -> Option<f64> {
        match *self {
            CanonicalInputs::PressureQuality { x, .. }
            | CanonicalInputs::TemperatureQuality { x, .. } => Some(x),
            _ => None,
        }
    }
}

/// 리졸버가 계산한 물성 집합.
///
/// 압력·온도·밀도·비엔탈피·비엔트로피는 상태를 정의하는 핵심 값이고,
/// 나머지는 해당 영역에서 정의되지 않거나 계산할 수 없으면 `None`이다.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySet {
    /// 압력 [MPa]
    pub pressure_mpa: f64,
    /// 온도 [K]
    pub temperature_k: f64,
    /// 밀도 [kg/m³]
    pub density: f64,
    /// 비엔탈피 [kJ/kg]
    pub enthalpy: f64,
    /// 비엔트로피 [kJ/kg·K]
    pub entropy: f64,
    /// 건도 [-]. 2상 영역에서만 정의된다.
    pub quality: Option<f64>,
    /// 정압비열 [kJ/kg·K]
    pub cp: Option<f64>,
    /// 열전도율 [W/m·K]
    pub thermal_conductivity: Option<f64>,
    /// 열확산율 [m²/s]
    pub thermal_diffusivity: Option<f64>,
    /// 프란틀 수 [-]
    pub prandtl: Option<f64>,
    /// 음속 [m/s]
    pub speed_of_sound: Option<f64>,
    /// 동점성계수 [m²/s]
    pub kinematic_viscosity: Option<f64>,
    /// 점성계수 [Pa·s]
    pub dynamic_viscosity: Option<f64>,
    /// 정압 체적팽창계수 [1/K]
    pub expansion_coefficient: Option<f64>,
    /// IF97 영역 번호(1~5)
    pub region: u8,
}

impl PropertySet {
    /// 2상(포화) 영역 여부.
    pub fn is_two_phase(&self) -> bool {
        self.region == 4
    }
}

/// 리졸버 호출 결과. `valid`가 false면 물리적으로 의미 없는 상태다.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedState {
    pub properties: PropertySet,
    pub valid: bool,
}

/// 리졸버 거부 사유.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// 입력 조합이 IF97 구현 영역 밖에 있다.
    #[error("IF97 구현 영역 밖의 입력입니다: {0}")]
    UnsupportedRegion(String),

    /// 입력이 수치적으로 모순되거나 물리적 한계를 벗어났다.
    #[error("잘못된 입력입니다: {0}")]
    InvalidInput(String),
}

/// 독립 상태량 두 개로부터 전체 물성을 계산하는 외부 기능.
pub trait PropertyResolver {
    /// # Errors
    ///
    /// 입력이 구현 영역 밖이면 [`ResolverError::UnsupportedRegion`],
    /// 모순되거나 물리적 한계를 벗어나면 [`ResolverError::InvalidInput`]을 반환한다.
    fn resolve(&self, inputs: CanonicalInputs) -> Result<ResolvedState, ResolverError>;
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for &R {
    fn resolve(&self, inputs: CanonicalInputs) -> Result<ResolvedState, ResolverError> {
        (**self).resolve(inputs)
    }
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for Box<R> {
    fn resolve(&self, inputs: CanonicalInputs) -> Result<ResolvedState, ResolverError> {
        (**self).resolve(inputs)
    }
}
