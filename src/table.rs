//! 상태 기록 테이블.
//!
//! 삽입 순서가 곧 표시 순서이며 중복 제거는 하지 않는다. 구조 변경(추가/삭제/초기화)은
//! 셀 단위 이벤트 없이 "테이블 교체" 이벤트 하나로만 통지한다.

use std::collections::HashSet;

use log::{debug, warn};

use crate::column::{self, CellValue};
use crate::record::StateRecord;

/// 테이블 안에서 기록을 식별하는 번호. 삭제 후에도 재사용하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

/// 구조 변경 통지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// 테이블 전체가 교체되었다. 표시 계층은 모든 행을 다시 읽어야 한다.
    Replaced { revision: u64, rows: usize },
}

type Listener = Box<dyn FnMut(TableEvent)>;

#[derive(Default)]
pub struct RecordTable {
    entries: Vec<(RecordId, StateRecord)>,
    next_id: u64,
    revision: u64,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for RecordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordTable")
            .field("rows", &self.entries.len())
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 구조 변경 통지를 받을 리스너를 등록한다.
    pub fn subscribe(&mut self, listener: impl FnMut(TableEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// 구조 변경마다 1씩 증가한다.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&self, row: usize) -> Option<&StateRecord> {
        self.entries.get(row).map(|(_, r)| r)
    }

    pub fn id_at(&self, row: usize) -> Option<RecordId> {
        self.entries.get(row).map(|(id, _)| *id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|(e, _)| *e == id)
    }

    pub fn last(&self) -> Option<&StateRecord> {
        self.entries.last().map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &StateRecord)> + '_ {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    /// 기록을 맨 뒤에 추가한다. 유효 플래그가 false인 기록은 거부한다.
    pub fn append(&mut self, record: StateRecord) -> Option<RecordId> {
        if !record.is_valid() {
            warn!("invalid state record rejected (status flag is false)");
            return None;
        }
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, record));
        self.notify();
        Some(id)
    }

    /// 주어진 행 위치의 기록을 삭제한다.
    ///
    /// 삭제 전에 위치를 기록 식별자로 먼저 바꾸므로 정렬되지 않았거나 중복된 인덱스도
    /// 정확히 해당 기록만 지운다. 범위 밖 인덱스는 무시한다. 지운 개수를 반환한다.
    pub fn remove_at<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let doomed: HashSet<RecordId> = indices
            .into_iter()
            .filter_map(|row| self.id_at(row))
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        let before = self.entries.len();
        self.entries.retain(|(id, _)| !doomed.contains(id));
        let removed = before - self.entries.len();
        debug!("removed {removed} record(s)");
        self.notify();
        removed
    }

    /// 모든 행을 삭제한다.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.notify();
    }

    /// 셀 값. 범위 밖 행/열도 `Unavailable`로 답한다.
    pub fn get(&self, row: usize, col: usize) -> CellValue {
        match self.record(row) {
            Some(record) => column::value_of(col, record),
            None => CellValue::Unavailable,
        }
    }

    fn notify(&mut self) {
        self.revision += 1;
        let event = TableEvent::Replaced {
            revision: self.revision,
            rows: self.entries.len(),
        };
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::PropertySet;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(p: f64) -> StateRecord {
        StateRecord::new(
            PropertySet {
                pressure_mpa: p,
                temperature_k: 300.0,
                density: 1000.0,
                enthalpy: 100.0,
                entropy: 0.3,
                quality: None,
                cp: None,
                thermal_conductivity: None,
                thermal_diffusivity: None,
                prandtl: None,
                speed_of_sound: None,
                kinematic_viscosity: None,
                dynamic_viscosity: None,
                expansion_coefficient: None,
                region: 1,
            },
            true,
        )
    }

    fn pressures(table: &RecordTable) -> Vec<f64> {
        table.iter().map(|(_, r)| r.pressure_mpa()).collect()
    }

    #[test]
    fn append_keeps_insertion_order_and_duplicates() {
        let mut table = RecordTable::new();
        table.append(record(1.0));
        table.append(record(2.0));
        table.append(record(1.0));
        assert_eq!(pressures(&table), vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn invalid_record_never_reaches_table() {
        let mut table = RecordTable::new();
        let bad = StateRecord::new(record(1.0).properties().clone(), false);
        assert_eq!(table.append(bad), None);
        assert!(table.is_empty());
        assert_eq!(table.revision(), 0);
    }

    #[test]
    fn remove_unsorted_duplicate_indices() {
        let mut table = RecordTable::new();
        for p in [0.0, 1.0, 2.0, 3.0, 4.0] {
            table.append(record(p));
        }
        let removed = table.remove_at([3, 1, 3, 9]);
        assert_eq!(removed, 2);
        assert_eq!(pressures(&table), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn empty_removal_is_a_silent_no_op() {
        let mut table = RecordTable::new();
        table.append(record(1.0));
        let rev = table.revision();
        assert_eq!(table.remove_at(Vec::new()), 0);
        assert_eq!(table.revision(), rev);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn ids_survive_removal_of_earlier_rows() {
        let mut table = RecordTable::new();
        table.append(record(0.0));
        let id = table.append(record(1.0)).unwrap();
        table.remove_at([0]);
        assert_eq!(table.position(id), Some(0));
        let fresh = table.append(record(2.0)).unwrap();
        assert_ne!(fresh, id);
    }

    #[test]
    fn each_mutation_emits_one_replaced_event() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut table = RecordTable::new();
        table.subscribe(move |e| sink.borrow_mut().push(e));

        table.append(record(1.0));
        table.append(record(2.0));
        table.remove_at([0, 1]);
        table.clear();
        table.append(record(3.0));
        table.clear();

        assert_eq!(
            *events.borrow(),
            vec![
                TableEvent::Replaced { revision: 1, rows: 1 },
                TableEvent::Replaced { revision: 2, rows: 2 },
                TableEvent::Replaced { revision: 3, rows: 0 },
                TableEvent::Replaced { revision: 4, rows: 1 },
                TableEvent::Replaced { revision: 5, rows: 0 },
            ]
        );
    }

    #[test]
    fn get_outside_table_is_unavailable() {
        let mut table = RecordTable::new();
        table.append(record(1.0));
        assert_eq!(table.get(0, 0), CellValue::Value(1.0));
        assert_eq!(table.get(1, 0), CellValue::Unavailable);
        assert_eq!(table.get(0, 99), CellValue::Unavailable);
    }
}
