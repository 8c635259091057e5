//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.
//! 표준 출력은 변환 결과 전용이므로 요약은 모두 표준 에러로 출력합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::record::Record;

/// 변환 통계 구조체
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// 기록한 레코드(라인) 수
    pub records: usize,
    /// 처리한 발음 수
    pub pronunciations: usize,
    /// 기록한 발음 필드 수
    pub fields: usize,
    /// 빈 라인 수 (표제어와 발음이 모두 없는 레코드)
    pub empty_lines: usize,
    /// 구분자 충돌 필드 수
    pub collisions: usize,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Instant,
}

impl Default for ConvertSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertSummary {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            records: 0,
            pronunciations: 0,
            fields: 0,
            empty_lines: 0,
            collisions: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    /// 기록한 레코드 하나를 집계
    pub fn record(&mut self, record: &Record, bytes_written: u64, collisions: usize) {
        let fields = record.fields().count();

        self.records += 1;
        self.pronunciations += record.pronunciations.len();
        self.fields += fields;
        self.collisions += collisions;
        self.bytes_written += bytes_written;
        if record.title.is_empty() && fields == 0 {
            self.empty_lines += 1;
        }
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 📊 변환 통계".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!(
            "  {} 레코드:       {}",
            "📚".bright_cyan(),
            self.records.to_string().green()
        );
        eprintln!("  {} 발음:         {}", "🔤".bright_cyan(), self.pronunciations);
        eprintln!("  {} 필드:         {}", "🏷️".bright_cyan(), self.fields);
        eprintln!("  {} 빈 라인:      {}", "⬜".bright_white(), self.empty_lines);

        if self.collisions > 0 {
            eprintln!(
                "  {} 구분자 충돌:  {}",
                "⚠️".bright_yellow(),
                self.collisions.to_string().yellow()
            );
        } else {
            eprintln!("  {} 구분자 충돌:  {}", "✅".bright_green(), "0".green());
        }

        eprintln!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        eprintln!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }

    /// 유효성 검사 통계 요약 출력
    pub fn print_validation_summary(&self) {
        eprintln!("\n{}", "═".repeat(50).bright_blue());
        eprintln!("{}", " 🔍 유효성 검사 결과".bright_white().bold());
        eprintln!("{}", "═".repeat(50).bright_blue());

        eprintln!(
            "  {} 유효 레코드:  {}",
            "✅".bright_green(),
            self.records.to_string().green()
        );
        eprintln!(
            "  {} 검사 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        eprintln!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use phonetic_dict::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
