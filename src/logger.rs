//! 로깅 모듈
//!
//! `tracing-subscriber` 포맷터를 표준 에러에 설치합니다.
//! 표준 출력은 변환 결과 전용입니다.

use tracing_subscriber::EnvFilter;

/// 상세 모드 여부에 따른 기본 필터 지시자
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// 로그 필터 구성
///
/// `--verbose`가 없으면 `RUST_LOG`를 우선하고, 없으면 `warn`을 사용합니다.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(default_directive(true));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
}

/// 전역 구독자 설치 (프로세스당 한 번)
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_verbose_filter_ignores_env() {
        assert_eq!(env_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_init_only_once() {
        // 두 번째 설치는 에러
        let _ = init(false);
        assert!(init(false).is_err());
    }
}
