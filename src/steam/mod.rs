//! 물/증기 상태 계산 경계. IAPWS-IF97 계산 자체는 seuif97 크레이트에 위임한다.

pub mod if97;
pub mod resolver;

pub use if97::If97Resolver;
pub use resolver::*;
