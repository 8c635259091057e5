//! phonetic-dict - PHONETIC DICT CONVERTER
//!
//! 표제어와 발음 목록으로 된 발음 사전 JSON을 토크나이저가 읽는
//! 파이프 구분 라인 포맷으로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🌊 **스트리밍 디코딩**: 최상위 배열을 원소 하나씩 읽어 사전 크기와 무관한 메모리 사용
//! - 📏 **고정 출력 포맷**: `표제어|bopomofo|bopomofo2|pinyin...`, 빈 필드는 생략
//! - 🛑 **즉시 중단**: 잘못된 JSON은 복구 없이 에러로 종료
//! - 📖 **사전 로더**: 변환 결과를 다시 읽어 표제어별 주음부호 조회
//! - 📈 **변환 통계**: 레코드/필드 수, 구분자 충돌, 출력 용량
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (./dict-revised.json → 표준 출력)
//! phonetic-dict > phonetic.dict
//!
//! # 유효성 검사만
//! phonetic-dict -i dict-revised.json --validate-only
//!
//! # 변환 결과에서 조회
//! phonetic-dict --lookup 萌 --dict phonetic.dict
//! ```

pub mod cli;
pub mod converter;
pub mod dict;
pub mod error;
pub mod logger;
pub mod record;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use converter::{convert, convert_file, validate_file, ConvertOptions, Converter, RecordStream};
pub use dict::{Explanation, PhoneticDict};
pub use error::{PhoneticError, Result};
pub use record::{Pronunciation, Record};
pub use stats::{format_bytes, ConvertSummary};
