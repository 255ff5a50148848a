//! 계산 파이프라인과 세션 상태.
//!
//! 입력 검증 → 기준 단위 환산 → 리졸버 호출 → 테이블 추가. 실패하면 테이블은 그대로다.
//! UI에 의존하지 않으며, 표시 계층은 이 모듈의 호출만으로 동작한다.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{self, ClipboardPayload, ParseError};
use crate::record::StateRecord;
use crate::scheme::{InputScheme, ValidationError};
use crate::steam::{CanonicalInputs, PropertyResolver, PropertySet, ResolverError};
use crate::table::{RecordId, RecordTable};

/// 테이블이 비어 있을 때 기본값을 만드는 기준 상태 (0.1 MPa, 283 K).
pub const DEFAULT_STATE: CanonicalInputs = CanonicalInputs::PressureTemperature {
    p_mpa: 0.1,
    t_k: 283.0,
};

/// 계산 한 번의 실패 사유.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// 입력 필드 범위 밖. 리졸버를 호출하지 않았다.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 리졸버가 입력을 거부했다.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

/// 붙여넣기 시 기존 기록을 어떻게 다룰지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PastePolicy {
    /// 테이블을 비운 뒤 붙여넣은 값으로 채운다.
    #[default]
    Replace,
    /// 기존 기록 뒤에 추가한다.
    Append,
}

/// 붙여넣기 결과 요약.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PasteReport {
    /// 해석된 입력 쌍 수
    pub pairs: usize,
    /// 추가된 기록
    pub appended: Vec<RecordId>,
    /// 거부된 쌍: (쌍 번호, 사유)
    pub rejected: Vec<(usize, ResolutionError)>,
}

/// 입력을 검증하고 리졸버로 상태 기록을 만든다. 부작용이 없다.
pub fn resolve_record<R>(
    resolver: &R,
    scheme: InputScheme,
    raw1: f64,
    raw2: f64,
) -> Result<StateRecord, ResolutionError>
where
    R: PropertyResolver + ?Sized,
{
    let inputs = scheme.to_canonical(raw1, raw2)?;
    debug!("resolving {inputs:?} ({scheme})");
    let state = resolver.resolve(inputs)?;
    if !state.valid {
        return Err(ResolverError::InvalidInput(format!(
            "리졸버가 유효하지 않은 상태를 반환했습니다: {inputs:?}"
        ))
        .into());
    }
    Ok(StateRecord::from(state))
}

/// 활성 입력 방식과 기록 테이블을 소유하는 계산 세션.
#[derive(Debug)]
pub struct Calculator<R> {
    resolver: R,
    scheme: InputScheme,
    table: RecordTable,
}

impl<R: PropertyResolver> Calculator<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_scheme(resolver, InputScheme::default())
    }

    pub fn with_scheme(resolver: R, scheme: InputScheme) -> Self {
        Self {
            resolver,
            scheme,
            table: RecordTable::new(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn scheme(&self) -> InputScheme {
        self.scheme
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// 변경 통지 구독용. 구조 변경은 세션 메서드로만 한다.
    pub fn subscribe(&mut self, listener: impl FnMut(crate::table::TableEvent) + 'static) {
        self.table.subscribe(listener);
    }

    /// 입력 방식을 바꾸고 새 방식의 기본 입력값을 돌려준다.
    ///
    /// 기본값은 가장 최근 기록에서, 기록이 없으면 [`DEFAULT_STATE`]에서 얻는다.
    /// 기준 상태조차 계산할 수 없으면 None.
    pub fn select_scheme(&mut self, scheme: InputScheme) -> Option<(f64, f64)> {
        self.scheme = scheme;
        self.reference_state()
            .map(|props| scheme.display_values(&props))
    }

    fn reference_state(&self) -> Option<PropertySet> {
        if let Some(last) = self.table.last() {
            return Some(last.properties().clone());
        }
        match self.resolver.resolve(DEFAULT_STATE) {
            Ok(state) if state.valid => Some(state.properties),
            Ok(_) => None,
            Err(e) => {
                warn!("default state could not be resolved: {e}");
                None
            }
        }
    }

    /// 활성 입력 방식으로 계산해 성공하면 테이블에 추가한다.
    pub fn attempt_resolve(&mut self, raw1: f64, raw2: f64) -> Result<RecordId, ResolutionError> {
        self.attempt_resolve_with(self.scheme, raw1, raw2)
    }

    /// 지정한 입력 방식으로 계산해 성공하면 테이블에 추가한다.
    pub fn attempt_resolve_with(
        &mut self,
        scheme: InputScheme,
        raw1: f64,
        raw2: f64,
    ) -> Result<RecordId, ResolutionError> {
        let record = resolve_record(&self.resolver, scheme, raw1, raw2).inspect_err(|e| {
            warn!("calculation rejected ({scheme}, {raw1}, {raw2}): {e}");
        })?;
        self.table.append(record).ok_or_else(|| {
            ResolverError::InvalidInput("유효하지 않은 기록은 추가할 수 없습니다".into()).into()
        })
    }

    pub fn remove_at<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        self.table.remove_at(indices)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// 선택된 행/열을 복사 형식으로 만든다.
    pub fn copy_selection<Rows, Cols>(&self, rows: Rows, cols: Cols) -> ClipboardPayload
    where
        Rows: IntoIterator<Item = usize>,
        Cols: IntoIterator<Item = usize>,
    {
        codec::encode(&self.table, rows, cols)
    }

    /// 텍스트를 해석해 활성 입력 방식으로 한 쌍씩 계산한다.
    ///
    /// 해석에 실패하면 테이블을 건드리지 않는다. `Replace`는 해석이 성공한 뒤에만
    /// 테이블을 비운다. 개별 쌍의 계산 실패는 보고서에 남기고 다음 쌍으로 넘어간다.
    pub fn paste(&mut self, text: &str, policy: PastePolicy) -> Result<PasteReport, ParseError> {
        let pairs = codec::decode(text)?;
        if policy == PastePolicy::Replace {
            self.table.clear();
        }
        let mut report = PasteReport {
            pairs: pairs.len(),
            ..PasteReport::default()
        };
        for (i, (raw1, raw2)) in pairs.into_iter().enumerate() {
            match self.attempt_resolve(raw1, raw2) {
                Ok(id) => report.appended.push(id),
                Err(e) => report.rejected.push((i, e)),
            }
        }
        info!(
            "pasted {} pair(s): {} appended, {} rejected",
            report.pairs,
            report.appended.len(),
            report.rejected.len()
        );
        Ok(report)
    }
}
