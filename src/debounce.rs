//! 대량 입력(붙여넣기/복사) 앞단의 연타 방지.
//!
//! 키 입력 한 번이 이벤트 여러 개로 들어오는 경우를 걸러내는 UI 보호 장치일 뿐이다.
//! 계산 파이프라인이나 테이블의 정합성과는 무관하다.

use std::time::{Duration, Instant};

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl Debouncer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// 지금 들어온 트리거를 처리해도 되는지.
    pub fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    /// `now` 시각의 트리거를 처리해도 되는지. 거부된 트리거도 타이머를 다시 건다.
    pub fn allow_at(&mut self, now: Instant) -> bool {
        let ok = match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        };
        self.last = Some(now);
        ok
    }
}
