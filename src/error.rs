//! 에러 타입 정의 모듈
//!
//! 변환기와 사전 로더에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// phonetic-dict에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum PhoneticError {
    /// 입력 파일 열기 실패
    #[error("입력 파일을 열 수 없습니다 ({path}): {reason}")]
    InputUnavailable { path: PathBuf, reason: String },

    /// JSON 구조 또는 레코드 디코딩 실패
    #[error("잘못된 입력 (레코드 #{index}): {reason}")]
    MalformedInput { index: usize, reason: String },

    /// 출력 쓰기 실패
    #[error("출력 쓰기 실패: {reason}")]
    WriteError { reason: String },

    /// 발음 사전 파일 열기 실패
    #[error("발음 사전을 읽을 수 없습니다 ({path}): {reason}")]
    DictUnavailable { path: PathBuf, reason: String },
}

/// phonetic-dict 결과 타입 별칭
pub type Result<T> = std::result::Result<T, PhoneticError>;
