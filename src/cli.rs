//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! 인자 없이 실행하면 `./dict-revised.json`을 읽어 표준 출력으로 변환합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::converter::DEFAULT_INPUT;
use crate::dict::DICT_FILE_NAME;

/// phonetic-dict CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "phonetic-dict",
    author = "YourName <your@email.com>",
    version,
    about = "PHONETIC DICT CONVERTER - 발음 사전 JSON을 파이프 구분 라인 포맷으로 변환",
    long_about = r#"
PHONETIC DICT CONVERTER
=======================

표제어와 발음(주음부호, 병음) 목록으로 된 JSON 배열을
한 줄에 레코드 하나씩 `표제어|필드|필드...` 형식으로 변환합니다.

예제:
  phonetic-dict > phonetic.dict
  phonetic-dict -i dict-revised.json -o phonetic.dict --stats
  phonetic-dict --validate-only
  phonetic-dict --lookup 萌 --dict ./config/mmseg
"#
)]
pub struct Args {
    /// 발음 사전 JSON 파일 경로
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// 출력 파일 경로 (기본값: 표준 출력)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 상세 로그 출력
    #[arg(short, long)]
    pub verbose: bool,

    /// 변환 통계를 표준 에러로 출력
    #[arg(long)]
    pub stats: bool,

    /// 진행 표시 (표준 에러)
    #[arg(long)]
    pub progress: bool,

    /// JSON 유효성 검사만 수행 (변환 없음)
    #[arg(long)]
    pub validate_only: bool,

    /// 발음 사전에서 조회할 단어 (여러 번 지정 가능)
    #[arg(long = "lookup", value_name = "WORD")]
    pub lookup: Vec<String>,

    /// 조회에 사용할 발음 사전 파일 또는 디렉토리
    #[arg(long, default_value = DICT_FILE_NAME)]
    pub dict: PathBuf,
}

impl Args {
    /// 사전 조회 모드 여부
    pub fn is_lookup(&self) -> bool {
        !self.lookup.is_empty()
    }
}
