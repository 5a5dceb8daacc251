//! 표면식 복수기(셸 앤 튜브) 열수력 설계 계산 라이브러리.
//! 상관식, 설계 레코드, 계산 파이프라인을 라이브러리로 두어 CLI 외 다른 화면에서도 그대로 쓴다.

pub mod config;
pub mod correlations;
pub mod error;
pub mod interp;
pub mod material_db;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod steam;
pub mod units;
