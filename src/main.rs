//! phonetic-dict - PHONETIC DICT CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{error, info, warn};

use phonetic_dict::{
    cli::Args,
    converter::{convert_with, open_input, validate_file, ConvertOptions},
    dict::PhoneticDict,
    logger,
    stats::ConvertSummary,
};

fn main() {
    let args = Args::parse();

    if let Err(e) = logger::init(args.verbose) {
        eprintln!("로거 초기화 실패: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // 사전 조회 모드
    if args.is_lookup() {
        return run_lookup_mode(args);
    }

    let options = ConvertOptions::new();
    info!("입력 파일: {:?}", args.input);

    // 유효성 검사 모드
    if args.validate_only {
        return run_validation_mode(&args.input, &options);
    }

    // 입력을 먼저 열어 실패 시 출력이 전혀 생기지 않게 함
    let reader = open_input(&args.input, &options)?;

    // 일반 변환 모드
    run_conversion_mode(args, reader)
}

/// 변환 모드 실행
fn run_conversion_mode(args: &Args, reader: Box<dyn BufRead>) -> Result<()> {
    let writer = open_output(args)?;
    let pb = args.progress.then(create_spinner);

    let result = convert_with(reader, writer, |summary| {
        if let Some(pb) = &pb {
            pb.set_position(summary.records as u64);
        }
    });

    if let Some(pb) = &pb {
        match &result {
            Ok(_) => pb.finish_with_message("완료!"),
            Err(_) => pb.abandon_with_message("중단"),
        }
    }

    let summary = result?;
    if summary.collisions > 0 {
        warn!(
            "구분자 또는 줄바꿈이 포함된 필드 {}개를 그대로 기록했습니다",
            summary.collisions
        );
    }
    if args.stats {
        summary.print_summary();
    }

    Ok(())
}

/// 유효성 검사 모드 실행
fn run_validation_mode(input: &Path, options: &ConvertOptions) -> Result<()> {
    let mut summary = ConvertSummary::new();
    summary.records = validate_file(input, options)?;
    summary.print_validation_summary();
    Ok(())
}

/// 사전 조회 모드 실행
fn run_lookup_mode(args: &Args) -> Result<()> {
    let dict = PhoneticDict::load(&args.dict)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for word in &args.lookup {
        match dict.lookup(word) {
            Some(bopomofo) => writeln!(out, "{}|{}", word, bopomofo)?,
            None => {
                warn!("사전에 없는 단어: {}", word);
                writeln!(out, "{}", word)?;
            }
        }
    }

    out.flush().context("표준 출력 쓰기 실패")?;
    Ok(())
}

/// 출력 대상 열기 (파일 또는 표준 출력)
fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("출력 파일을 열 수 없습니다: {:?}", path))?;
            info!("출력 파일: {:?}", path);
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// 진행 표시 스피너 생성
fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] 레코드 {pos} ({per_sec}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_output_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.dict");
        fs::write(&output, "old\n").unwrap();

        let args = Args::parse_from(["phonetic-dict", "-o", output.to_str().unwrap()]);
        let mut writer = open_output(&args).unwrap();
        writeln!(writer, "new").unwrap();
        drop(writer);

        assert_eq!(fs::read_to_string(&output).unwrap(), "new\n");
    }

    #[test]
    fn test_run_validate_only_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("dict-revised.json");
        let output = temp_dir.path().join("out.dict");
        fs::write(&input, r#"[{"title": "a"}, {"title": "b"}]"#).unwrap();

        let args = Args::parse_from([
            "phonetic-dict",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--validate-only",
        ]);

        run(&args).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn test_run_missing_input_creates_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.dict");
        let args = Args::parse_from([
            "phonetic-dict",
            "-i",
            temp_dir.path().join("missing.json").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        assert!(run(&args).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_to_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("dict-revised.json");
        let output = temp_dir.path().join("out.dict");
        fs::write(
            &input,
            r#"[{"title": "萌", "heteronyms": [{"bopomofo": "ㄇㄥˊ", "pinyin": "méng"}]}]"#,
        )
        .unwrap();

        let args = Args::parse_from([
            "phonetic-dict",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        run(&args).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "萌|ㄇㄥˊ|méng\n");
    }
}
