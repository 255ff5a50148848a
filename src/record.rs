//! 계산 한 번의 결과를 담는 불변 상태 기록.

use crate::steam::{PropertySet, ResolvedState};

/// 리졸버가 성공한 계산 하나의 스냅샷. 생성 후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    properties: PropertySet,
    valid: bool,
}

impl StateRecord {
    pub fn new(properties: PropertySet, valid: bool) -> Self {
        Self { properties, valid }
    }

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// 리졸버가 물리적으로 의미 있다고 판단한 상태인지.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn pressure_mpa(&self) -> f64 {
        self.properties.pressure_mpa
    }

    pub fn temperature_k(&self) -> f64 {
        self.properties.temperature_k
    }
}

impl From<ResolvedState> for StateRecord {
    fn from(state: ResolvedState) -> Self {
        Self::new(state.properties, state.valid)
    }
}
