//! IAPWS-IF97 계산을 seuif97 크레이트로 위임한 리졸버.
//! seuif97 경계의 단위: 압력 MPa, 온도 °C, 비엔탈피 kJ/kg, 비엔트로피 kJ/kg·K.
//! 리졸버 바깥으로는 온도를 K로 돌려준다.

use log::debug;
use seuif97::{
    hs, ph, ps, pt, px, tx, OCP, OD, ODV, OEC, OH, OKV, OP, OPR, OR, OS, OT, OTC, OTD, OW, OX,
};

use super::resolver::{
    CanonicalInputs, PropertyResolver, PropertySet, ResolvedState, ResolverError,
};
use crate::units::CELSIUS_OFFSET_K;

/// seuif97이 지원하지 않는 출력 요청에 돌려주는 표식값.
const INVALID_OUTID: f64 = -1000.0;
/// seuif97이 계산에 실패했을 때 돌려주는 표식값.
const INVALID_VALUE: f64 = -9999.0;

/// 포화선 범위 [MPa]: 삼중점 ~ 임계점.
const SATURATION_P_MPA: (f64, f64) = (0.000_611_657, 22.064);
/// 포화선 범위 [K]: IF97 4영역 하한 ~ 임계점.
const SATURATION_T_K: (f64, f64) = (273.15, 647.096);

/// seuif97 기반 리졸버. 상태가 없으므로 자유롭게 복사해 쓴다.
#[derive(Debug, Clone, Copy, Default)]
pub struct If97Resolver;

/// seuif97 출력 하나를 해석한다. NaN과 표식값은 "값 없음"이다.
///
/// 음수 자체는 정상 값일 수 있다(4 °C 아래의 팽창계수 등).
fn reading(v: f64) -> Option<f64> {
    (v.is_finite() && v != INVALID_OUTID && v != INVALID_VALUE).then_some(v)
}

fn query(inputs: CanonicalInputs, o_id: i32) -> f64 {
    match inputs {
        CanonicalInputs::PressureTemperature { p_mpa, t_k } => {
            pt(p_mpa, t_k - CELSIUS_OFFSET_K, o_id)
        }
        CanonicalInputs::PressureEnthalpy { p_mpa, h } => ph(p_mpa, h, o_id),
        CanonicalInputs::PressureEntropy { p_mpa, s } => ps(p_mpa, s, o_id),
        CanonicalInputs::PressureQuality { p_mpa, x } => px(p_mpa, x, o_id),
        CanonicalInputs::TemperatureQuality { t_k, x } => tx(t_k - CELSIUS_OFFSET_K, x, o_id),
        CanonicalInputs::EnthalpyEntropy { h, s } => hs(h, s, o_id),
    }
}

/// 리졸버를 부르기 전에 걸러낼 수 있는 물리적 모순.
fn check_physical_bounds(inputs: &CanonicalInputs) -> Result<(), ResolverError> {
    let (a, b) = inputs.values();
    if !a.is_finite() || !b.is_finite() {
        return Err(ResolverError::InvalidInput("유한하지 않은 입력".into()));
    }
    if let Some(p) = inputs.pressure_mpa() {
        if p <= 0.0 {
            return Err(ResolverError::InvalidInput(format!(
                "압력은 양수여야 합니다 (P = {p} MPa)"
            )));
        }
    }
    if let Some(t) = inputs.temperature_k() {
        if t <= 0.0 {
            return Err(ResolverError::InvalidInput(format!(
                "절대온도는 양수여야 합니다 (T = {t} K)"
            )));
        }
    }
    if let Some(x) = inputs.quality() {
        if !(0.0..=1.0).contains(&x) {
            return Err(ResolverError::InvalidInput(format!(
                "건도는 0~1 사이여야 합니다 (x = {x})"
            )));
        }
    }
    Ok(())
}

/// IF97 영역 번호.
///
/// 건도가 입력이면 상태는 정의상 포화(4영역)이고, seuif97의 `px`/`tx`는 영역 번호를
/// 출력하지 않으므로 묻지 않는다. 대신 포화선 범위를 직접 확인한다.
fn region_of(inputs: CanonicalInputs) -> Result<u8, ResolverError> {
    let on_saturation_line = match inputs {
        CanonicalInputs::PressureQuality { p_mpa, .. } => {
            Some((SATURATION_P_MPA.0..=SATURATION_P_MPA.1).contains(&p_mpa))
        }
        CanonicalInputs::TemperatureQuality { t_k, .. } => {
            Some((SATURATION_T_K.0..=SATURATION_T_K.1).contains(&t_k))
        }
        _ => None,
    };
    match on_saturation_line {
        Some(true) => return Ok(4),
        Some(false) => {
            return Err(ResolverError::UnsupportedRegion(format!(
                "포화선 범위 밖입니다: {inputs:?}"
            )))
        }
        None => {}
    }

    match reading(query(inputs, OR)) {
        Some(r) if (1.0..=5.0).contains(&r) => Ok(r.round() as u8),
        _ => Err(ResolverError::UnsupportedRegion(format!("{inputs:?}"))),
    }
}

impl PropertyResolver for If97Resolver {
    fn resolve(&self, inputs: CanonicalInputs) -> Result<ResolvedState, ResolverError> {
        check_physical_bounds(&inputs)?;
        let region = region_of(inputs)?;

        // 입력으로 주어진 값은 되묻지 않는다.
        let pressure_mpa = inputs
            .pressure_mpa()
            .or_else(|| reading(query(inputs, OP)));
        let temperature_k = inputs
            .temperature_k()
            .or_else(|| reading(query(inputs, OT)).map(|t_c| t_c + CELSIUS_OFFSET_K));
        let density = reading(query(inputs, OD));
        let enthalpy = reading(query(inputs, OH));
        let entropy = reading(query(inputs, OS));
        let valid = matches!(
            (pressure_mpa, temperature_k, density, enthalpy, entropy),
            (Some(p), Some(t), Some(rho), Some(_), Some(_)) if p > 0.0 && t > 0.0 && rho > 0.0
        );

        let two_phase = region == 4;
        let quality = if two_phase {
            inputs.quality().or_else(|| reading(query(inputs, OX)))
        } else {
            None
        };
        // 포화 혼합물에서는 단상 전용 물성을 정의하지 않는다.
        let single_phase = |o_id| {
            if two_phase {
                None
            } else {
                reading(query(inputs, o_id))
            }
        };

        let properties = PropertySet {
            pressure_mpa: pressure_mpa.unwrap_or(f64::NAN),
            temperature_k: temperature_k.unwrap_or(f64::NAN),
            density: density.unwrap_or(f64::NAN),
            enthalpy: enthalpy.unwrap_or(f64::NAN),
            entropy: entropy.unwrap_or(f64::NAN),
            quality,
            cp: single_phase(OCP),
            thermal_conductivity: single_phase(OTC),
            thermal_diffusivity: single_phase(OTD),
            prandtl: single_phase(OPR),
            speed_of_sound: single_phase(OW),
            kinematic_viscosity: single_phase(OKV),
            dynamic_viscosity: single_phase(ODV),
            expansion_coefficient: single_phase(OEC),
            region,
        };
        debug!("IF97 region {region} resolved from {inputs:?} (valid = {valid})");
        Ok(ResolvedState { properties, valid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pressure_is_invalid_input() {
        let err = If97Resolver
            .resolve(CanonicalInputs::PressureTemperature {
                p_mpa: 0.0,
                t_k: 300.0,
            })
            .unwrap_err();
        assert!(matches!(err, ResolverError::InvalidInput(_)));
    }

    #[test]
    fn quality_above_one_is_invalid_input() {
        let err = If97Resolver
            .resolve(CanonicalInputs::PressureQuality { p_mpa: 0.1, x: 1.2 })
            .unwrap_err();
        assert!(matches!(err, ResolverError::InvalidInput(_)));
    }

    #[test]
    fn sentinels_read_as_missing_but_negatives_survive() {
        assert_eq!(reading(INVALID_OUTID), None);
        assert_eq!(reading(INVALID_VALUE), None);
        assert_eq!(reading(f64::NAN), None);
        assert_eq!(reading(-6.8e-5), Some(-6.8e-5));
    }

    #[test]
    fn quality_inputs_are_two_phase_without_asking_seuif97() {
        assert_eq!(
            region_of(CanonicalInputs::PressureQuality { p_mpa: 0.1, x: 0.5 }),
            Ok(4)
        );
        assert_eq!(
            region_of(CanonicalInputs::TemperatureQuality { t_k: 373.15, x: 0.0 }),
            Ok(4)
        );
    }

    #[test]
    fn quality_beyond_critical_point_is_unsupported() {
        let err = If97Resolver
            .resolve(CanonicalInputs::PressureQuality { p_mpa: 25.0, x: 0.5 })
            .unwrap_err();
        assert!(matches!(err, ResolverError::UnsupportedRegion(_)));
        let err = If97Resolver
            .resolve(CanonicalInputs::TemperatureQuality { t_k: 700.0, x: 0.5 })
            .unwrap_err();
        assert!(matches!(err, ResolverError::UnsupportedRegion(_)));
    }
}
