//! 증기 물성 계산 모듈.

pub mod if97;
