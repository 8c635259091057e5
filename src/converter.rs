//! 사전 변환 모듈
//!
//! 최상위 JSON 배열을 레코드 단위로 스트리밍 디코딩하고,
//! 레코드마다 파이프 구분 라인 하나를 기록합니다.

use tracing::{debug, info, warn};
use memmap2::Mmap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::path::Path;

use crate::error::{PhoneticError, Result};
use crate::record::Record;
use crate::stats::ConvertSummary;

/// 기본 입력 파일 경로
pub const DEFAULT_INPUT: &str = "./dict-revised.json";

/// 변환 옵션
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            mmap_threshold: 10 * 1024 * 1024, // 10MB
            ..Default::default()
        }
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }
}

/// 입력 파일 열기
///
/// 파일 크기가 `mmap_threshold` 이상이면 메모리 매핑을, 아니면 버퍼 리더를 사용합니다.
pub fn open_input(path: &Path, options: &ConvertOptions) -> Result<Box<dyn BufRead>> {
    let unavailable = |reason: String| PhoneticError::InputUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

    if file_size >= options.mmap_threshold && file_size > 0 {
        debug!("메모리 매핑으로 입력 읽기: {:?} ({} bytes)", path, file_size);
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| unavailable(format!("메모리 매핑 실패: {}", e)))?
        };
        Ok(Box::new(Cursor::new(mmap)))
    } else {
        debug!("버퍼 리더로 입력 읽기: {:?} ({} bytes)", path, file_size);
        Ok(Box::new(BufReader::new(file)))
    }
}

/// 스트림 디코딩 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// 여는 대괄호 대기
    AwaitOpen,
    /// 첫 원소 또는 닫는 대괄호 대기
    FirstElement,
    /// 쉼표 또는 닫는 대괄호 대기
    NextElement,
    /// 닫는 대괄호까지 읽음
    Done,
    /// 디코딩 실패 (더 이상 읽지 않음)
    Fatal,
}

/// 최상위 JSON 배열의 원소를 하나씩 디코딩하는 지연 반복자
///
/// 한 번에 원소 하나만 메모리에 올리므로 사전 크기와 무관하게
/// 메모리 사용량이 일정합니다. 에러를 한 번 반환하면 이후에는 `None`만 반환합니다.
pub struct RecordStream<R> {
    reader: R,
    state: StreamState,
    index: usize,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: StreamState::AwaitOpen,
            index: 0,
        }
    }

    /// 지금까지 디코딩한 원소 수
    pub fn decoded(&self) -> usize {
        self.index
    }

    /// 닫는 대괄호까지 정상적으로 읽었는지 여부
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Done
    }

    /// 공백을 건너뛰고 다음 바이트를 소비하지 않은 채 반환
    fn peek_token(&mut self) -> Result<Option<u8>> {
        let index = self.index;
        loop {
            let (skip, next, available) = {
                let buf = self
                    .reader
                    .fill_buf()
                    .map_err(|e| malformed_at(index, e.to_string()))?;
                let skip = buf
                    .iter()
                    .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
                    .count();
                (skip, buf.get(skip).copied(), buf.len())
            };

            if available == 0 {
                return Ok(None);
            }
            self.reader.consume(skip);
            if next.is_some() {
                return Ok(next);
            }
        }
    }

    fn expect_token(&self, found: Option<u8>, expected: &str) -> PhoneticError {
        let found = match found {
            Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
            Some(b) => format!("0x{:02x}", b),
            None => "입력 끝".to_string(),
        };
        malformed_at(self.index, format!("{} 기대, {} 발견", expected, found))
    }

    fn decode_element(&mut self) -> Result<Record> {
        let index = self.index;
        let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
        let record = Option::<Record>::deserialize(&mut de)
            .map_err(|e| malformed_at(index, e.to_string()))?;
        self.index += 1;
        self.state = StreamState::NextElement;
        Ok(record.unwrap_or_default())
    }

    fn advance(&mut self) -> Result<Option<Record>> {
        loop {
            match self.state {
                StreamState::AwaitOpen => match self.peek_token()? {
                    Some(b'[') => {
                        self.reader.consume(1);
                        self.state = StreamState::FirstElement;
                    }
                    other => return Err(self.expect_token(other, "'['")),
                },
                StreamState::FirstElement => match self.peek_token()? {
                    Some(b']') => {
                        self.reader.consume(1);
                        self.state = StreamState::Done;
                    }
                    None => return Err(self.expect_token(None, "배열 원소 또는 ']'")),
                    Some(_) => return self.decode_element().map(Some),
                },
                StreamState::NextElement => match self.peek_token()? {
                    Some(b']') => {
                        self.reader.consume(1);
                        self.state = StreamState::Done;
                    }
                    Some(b',') => {
                        self.reader.consume(1);
                        return self.decode_element().map(Some);
                    }
                    other => return Err(self.expect_token(other, "',' 또는 ']'")),
                },
                StreamState::Done | StreamState::Fatal => return Ok(None),
            }
        }
    }
}

fn malformed_at(index: usize, reason: String) -> PhoneticError {
    PhoneticError::MalformedInput { index, reason }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.state = StreamState::Fatal;
                Some(Err(e))
            }
        }
    }
}

/// 레코드를 라인으로 기록하는 출력기
pub struct Converter<W: Write> {
    writer: W,
    summary: ConvertSummary,
}

impl<W: Write> Converter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            summary: ConvertSummary::new(),
        }
    }

    /// 레코드 하나를 라인으로 기록
    ///
    /// 구분자가 포함된 필드도 그대로 기록하되 경고를 남기고 통계에 집계합니다.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let collisions = record.colliding_fields();
        if !collisions.is_empty() {
            warn!(
                "레코드 #{} ({:?}): 구분자 또는 줄바꿈이 포함된 필드 {:?}",
                self.summary.records, record.title, collisions
            );
        }

        let written = record
            .write_line(&mut self.writer)
            .map_err(|e| PhoneticError::WriteError {
                reason: e.to_string(),
            })?;

        self.summary.record(record, written, collisions.len());
        Ok(())
    }

    /// 출력 버퍼 비우기
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| PhoneticError::WriteError {
            reason: e.to_string(),
        })
    }

    /// 현재까지의 통계
    pub fn summary(&self) -> &ConvertSummary {
        &self.summary
    }

    /// 버퍼를 비우고 통계 반환
    pub fn finish(mut self) -> Result<ConvertSummary> {
        self.flush()?;
        Ok(self.summary)
    }
}

/// 입력 전체를 변환하여 `writer`에 기록
///
/// 에러가 발생하면 그 전까지 기록한 라인을 비운 뒤 즉시 에러를 반환합니다.
/// 복구는 시도하지 않으며 종료 여부는 호출자가 결정합니다.
pub fn convert<R: BufRead, W: Write>(reader: R, writer: W) -> Result<ConvertSummary> {
    convert_with(reader, writer, |_| {})
}

/// 레코드를 기록할 때마다 `on_record`를 호출하며 변환
pub fn convert_with<R, W, F>(reader: R, writer: W, mut on_record: F) -> Result<ConvertSummary>
where
    R: BufRead,
    W: Write,
    F: FnMut(&ConvertSummary),
{
    let mut converter = Converter::new(writer);

    for record in RecordStream::new(reader) {
        let outcome = record.and_then(|r| converter.write_record(&r));
        if let Err(e) = outcome {
            // 이미 디코딩한 레코드의 라인은 내보냄
            if let Err(flush_err) = converter.flush() {
                warn!("에러 이전 출력 비우기 실패: {}", flush_err);
            }
            return Err(e);
        }
        on_record(converter.summary());
    }

    let summary = converter.finish()?;
    info!("변환 완료: 레코드 {}개", summary.records);
    Ok(summary)
}

/// 입력 전체를 디코딩만 하고 레코드 수를 반환
pub fn validate<R: BufRead>(reader: R) -> Result<usize> {
    let mut stream = RecordStream::new(reader);
    for record in stream.by_ref() {
        record?;
    }
    Ok(stream.decoded())
}

/// 파일 경로를 받아 변환
pub fn convert_file<W: Write>(
    path: &Path,
    writer: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    let reader = open_input(path, options)?;
    convert(reader, writer)
}

/// 파일 경로를 받아 디코딩만 하고 레코드 수를 반환
pub fn validate_file(path: &Path, options: &ConvertOptions) -> Result<usize> {
    let reader = open_input(path, options)?;
    let records = validate(reader)?;
    info!("유효성 검사 완료: 레코드 {}개", records);
    Ok(records)
}
