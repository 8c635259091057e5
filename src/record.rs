//! 레코드 모델 모듈
//!
//! 사전 항목(`Record`)과 발음(`Pronunciation`) 정의 및 라인 변환을 담당합니다.

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::{self, Write};

/// 출력 필드 구분자
pub const FIELD_SEPARATOR: char = '|';

/// 사전 항목 하나 (표제어 + 발음 목록)
///
/// JSON 키 `title`, `heteronyms`에 대응합니다. 디코딩 규칙은 `RecordVisitor` 참고.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// 표제어 (빈 문자열 가능)
    pub title: String,
    /// 발음 목록 (원본 순서 유지)
    pub pronunciations: Vec<Pronunciation>,
}

/// 발음 하나 (주음부호, 주음부호 변형, 병음)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pronunciation {
    pub bopomofo: Option<String>,
    pub bopomofo2: Option<String>,
    pub pinyin: Option<String>,
}

impl Pronunciation {
    /// 값이 있는 필드를 고정 순서(bopomofo, bopomofo2, pinyin)로 반환
    ///
    /// 빈 문자열은 값이 없는 것으로 취급합니다.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [&self.bopomofo, &self.bopomofo2, &self.pinyin]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.is_empty())
    }
}

impl Record {
    /// 레코드의 모든 출력 필드 (발음 순서, 발음 내 필드 순서 유지)
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.pronunciations.iter().flat_map(|p| p.fields())
    }

    /// 줄바꿈을 제외한 출력 라인 생성
    ///
    /// # Examples
    /// ```
    /// use phonetic_dict::record::{Pronunciation, Record};
    ///
    /// let record = Record {
    ///     title: "T".to_string(),
    ///     pronunciations: vec![Pronunciation {
    ///         pinyin: Some("p1".to_string()),
    ///         ..Default::default()
    ///     }],
    /// };
    /// assert_eq!(record.to_line(), "T|p1");
    /// ```
    pub fn to_line(&self) -> String {
        let mut line = self.title.clone();
        for field in self.fields() {
            line.push(FIELD_SEPARATOR);
            line.push_str(field);
        }
        line
    }

    /// 라인을 줄바꿈과 함께 기록하고 쓴 바이트 수를 반환
    pub fn write_line<W: Write>(&self, writer: &mut W) -> io::Result<u64> {
        let line = self.to_line();
        writeln!(writer, "{}", line)?;
        Ok(line.len() as u64 + 1)
    }

    /// 구분자나 줄바꿈이 포함되어 출력 포맷을 깨뜨리는 필드 목록
    pub fn colliding_fields(&self) -> Vec<&str> {
        std::iter::once(self.title.as_str())
            .chain(self.fields())
            .filter(|f| breaks_format(f))
            .collect()
    }
}

fn breaks_format(field: &str) -> bool {
    field.contains([FIELD_SEPARATOR, '\n', '\r'])
}

/// 키 비교 (ASCII 대소문자 무시)
fn key_is(key: &str, name: &str) -> bool {
    key.eq_ignore_ascii_case(name)
}

/// 문자열 필드 디코딩: `null`이면 기존 값을 유지
fn merge_string<'de, A: MapAccess<'de>>(
    map: &mut A,
    slot: &mut Option<String>,
) -> std::result::Result<(), A::Error> {
    if let Some(value) = map.next_value::<Option<String>>()? {
        *slot = Some(value);
    }
    Ok(())
}

/// 레코드 디코딩 규칙
///
/// - 모르는 키는 무시, 없는 키는 빈 값
/// - 같은 키가 반복되면 마지막 값이 이김
/// - 문자열 자리의 `null`은 이전 값을 유지, `heteronyms: null`은 빈 목록
/// - `heteronyms` 안의 `null` 항목은 건너뜀
struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("사전 레코드 객체")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Record, A::Error> {
        let mut title = None;
        let mut pronunciations = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key_is(&key, "title") {
                merge_string(&mut map, &mut title)?;
            } else if key_is(&key, "heteronyms") {
                let entries: Option<Vec<Option<Pronunciation>>> = map.next_value()?;
                pronunciations = entries.unwrap_or_default().into_iter().flatten().collect();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Record {
            title: title.unwrap_or_default(),
            pronunciations,
        })
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct PronunciationVisitor;

impl<'de> Visitor<'de> for PronunciationVisitor {
    type Value = Pronunciation;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("발음 객체")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> std::result::Result<Pronunciation, A::Error> {
        let mut pron = Pronunciation::default();

        while let Some(key) = map.next_key::<String>()? {
            if key_is(&key, "bopomofo") {
                merge_string(&mut map, &mut pron.bopomofo)?;
            } else if key_is(&key, "bopomofo2") {
                merge_string(&mut map, &mut pron.bopomofo2)?;
            } else if key_is(&key, "pinyin") {
                merge_string(&mut map, &mut pron.pinyin)?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(pron)
    }
}

impl<'de> Deserialize<'de> for Pronunciation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PronunciationVisitor)
    }
}
