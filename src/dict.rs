//! 발음 사전 로더 모듈
//!
//! 변환기가 만든 파이프 구분 라인 파일을 다시 읽어
//! 표제어 → 발음 목록 맵으로 적재하고 조회합니다.

use tracing::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{PhoneticError, Result};
use crate::record::FIELD_SEPARATOR;

/// 디렉토리가 주어졌을 때 찾는 사전 파일 이름
pub const DICT_FILE_NAME: &str = "phonetic.dict";

/// 세 표기가 모두 있는 발음 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub bopomofo: String,
    pub bopomofo2: String,
    pub pinyin: String,
}

/// 적재된 발음 사전
#[derive(Debug)]
pub struct PhoneticDict {
    path: PathBuf,
    entries: HashMap<String, Vec<Explanation>>,
}

impl PhoneticDict {
    /// 사전 파일 또는 `phonetic.dict`가 있는 디렉토리에서 적재
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve_path(path.as_ref());
        let entries = load_entries(&path)?;
        Ok(Self { path, entries })
    }

    /// 리더에서 직접 적재 (파일 경로 없음)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let entries = parse_entries(reader, Path::new(""))?;
        Ok(Self {
            path: PathBuf::new(),
            entries,
        })
    }

    /// 같은 경로에서 다시 적재
    ///
    /// 실패하면 기존 내용을 그대로 유지하고 에러를 반환합니다.
    pub fn reload(&mut self) -> Result<()> {
        match load_entries(&self.path) {
            Ok(entries) => {
                self.entries = entries;
                info!("발음 사전 재적재 성공: {:?}", self.path);
                Ok(())
            }
            Err(e) => {
                warn!("발음 사전 재적재 실패, 기존 사전 유지: {}", e);
                Err(e)
            }
        }
    }

    /// 첫 번째 발음의 주음부호 반환
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries
            .get(word)
            .and_then(|list| list.first())
            .map(|e| e.bopomofo.as_str())
    }

    /// 표제어의 전체 발음 목록
    pub fn explanations(&self, word: &str) -> Option<&[Explanation]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// 사전 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 표제어 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DICT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, Vec<Explanation>>> {
    info!("발음 사전 적재: {:?}", path);
    let file = File::open(path).map_err(|e| PhoneticError::DictUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let entries = parse_entries(BufReader::new(file), path)?;
    info!("발음 사전 적재 완료: 표제어 {}개", entries.len());
    Ok(entries)
}

fn parse_entries<R: BufRead>(reader: R, path: &Path) -> Result<HashMap<String, Vec<Explanation>>> {
    let mut entries: HashMap<String, Vec<Explanation>> = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| PhoneticError::DictUnavailable {
            path: path.to_path_buf(),
            reason: format!("{}번째 줄: {}", line_no + 1, e),
        })?;

        match parse_line(&line) {
            Some((title, explanation)) => entries
                .entry(title.to_string())
                .or_default()
                .push(explanation),
            None => debug!("{}번째 줄 건너뜀: {:?}", line_no + 1, line),
        }
    }

    Ok(entries)
}

/// 라인 하나를 (표제어, 발음)으로 분해
///
/// 끝의 빈 조각을 버린 뒤 정확히 네 조각인 라인만 인정합니다.
/// 발음이 둘 이상이거나 표기가 빠진 라인은 `None`입니다.
pub fn parse_line(line: &str) -> Option<(&str, Explanation)> {
    let mut parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    match parts.as_slice() {
        [title, bopomofo, bopomofo2, pinyin] => Some((
            *title,
            Explanation {
                bopomofo: bopomofo.to_string(),
                bopomofo2: bopomofo2.to_string(),
                pinyin: pinyin.to_string(),
            },
        )),
        _ => None,
    }
}
