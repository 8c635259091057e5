//! 통합 테스트 모듈
//!
//! 파일 입력부터 라인 출력, 사전 재적재까지 전체 흐름을 테스트합니다.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 테스트용 JSON 파일 생성 헬퍼
fn create_json_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 실제 사전과 비슷한 형태의 입력
const SAMPLE_DICT: &str = r#"[
  {
    "title": "萌",
    "radical": "艸",
    "stroke_count": 12,
    "heteronyms": [
      {"bopomofo": "ㄇㄥˊ", "bopomofo2": "méng", "pinyin": "méng", "definitions": [{"def": "草木初生的芽。"}]}
    ]
  },
  {
    "title": "行",
    "heteronyms": [
      {"bopomofo": "ㄒㄧㄥˊ", "pinyin": "xíng"},
      {"bopomofo": "ㄏㄤˊ", "bopomofo2": "", "pinyin": "háng"}
    ]
  },
  {"title": "", "heteronyms": []},
  {"title": "㐀"}
]"#;

mod converter_tests {
    use super::*;
    use phonetic_dict::converter::{convert_file, validate_file, ConvertOptions};
    use phonetic_dict::PhoneticError;

    fn convert_to_string(path: &std::path::Path, options: &ConvertOptions) -> (String, phonetic_dict::Result<phonetic_dict::ConvertSummary>) {
        let mut out = Vec::new();
        let result = convert_file(path, &mut out, options);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_convert_sample_dictionary() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "dict-revised.json", SAMPLE_DICT);

        let (out, result) = convert_to_string(&path, &ConvertOptions::new());
        let summary = result.unwrap();

        assert_eq!(
            out,
            "萌|ㄇㄥˊ|méng|méng\n行|ㄒㄧㄥˊ|xíng|ㄏㄤˊ|háng\n\n㐀\n"
        );
        assert_eq!(summary.records, 4);
        assert_eq!(out.lines().count(), summary.records);
        assert_eq!(summary.empty_lines, 1);
        assert_eq!(summary.fields, 7);
    }

    #[test]
    fn test_convert_with_mmap() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "dict-revised.json", SAMPLE_DICT);

        let buffered = convert_to_string(&path, &ConvertOptions::new()).0;
        let mapped =
            convert_to_string(&path, &ConvertOptions::new().with_mmap_threshold(1)).0;

        assert_eq!(buffered, mapped);
    }

    #[test]
    fn test_missing_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict-revised.json");

        let (out, result) = convert_to_string(&path, &ConvertOptions::new());

        assert!(out.is_empty());
        match result {
            Err(PhoneticError::InputUnavailable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(
            temp_dir.path(),
            "dict-revised.json",
            r#"[{"title": "a", "heteronyms": [{"pinyin": "p"}]}, {"title": "b", "heter"#,
        );

        let (out, result) = convert_to_string(&path, &ConvertOptions::new());

        assert_eq!(out, "a|p\n");
        let err = result.unwrap_err();
        assert!(matches!(err, PhoneticError::MalformedInput { index: 1, .. }));
        assert!(err.to_string().contains("잘못된 입력"));
    }

    #[test]
    fn test_validate_file_counts_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "dict-revised.json", SAMPLE_DICT);

        assert_eq!(validate_file(&path, &ConvertOptions::new()).unwrap(), 4);

        let broken = create_json_file(temp_dir.path(), "broken.json", r#"[{"title": "a"},"#);
        assert!(matches!(
            validate_file(&broken, &ConvertOptions::new()),
            Err(PhoneticError::MalformedInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_large_array_order_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let items: Vec<String> = (0..5000)
            .map(|i| format!(r#"{{"title": "w{}", "heteronyms": [{{"pinyin": "p{}"}}]}}"#, i, i))
            .collect();
        let path = create_json_file(
            temp_dir.path(),
            "dict-revised.json",
            &format!("[{}]", items.join(",\n")),
        );

        let (out, result) = convert_to_string(&path, &ConvertOptions::new());

        assert_eq!(result.unwrap().records, 5000);
        for (i, line) in out.lines().enumerate() {
            assert_eq!(line, format!("w{}|p{}", i, i));
        }
    }
}

mod dict_tests {
    use super::*;
    use phonetic_dict::converter::{convert_file, ConvertOptions};
    use phonetic_dict::PhoneticDict;

    #[test]
    fn test_converted_output_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_json_file(temp_dir.path(), "dict-revised.json", SAMPLE_DICT);
        let output = temp_dir.path().join("phonetic.dict");

        let file = fs::File::create(&output).unwrap();
        convert_file(&input, file, &ConvertOptions::new()).unwrap();

        let dict = PhoneticDict::load(temp_dir.path()).unwrap();

        // 세 표기가 모두 있는 단일 발음 라인만 적재됨
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.lookup("萌"), Some("ㄇㄥˊ"));
        assert_eq!(dict.lookup("行"), None);
        assert_eq!(dict.lookup("㐀"), None);
    }
}

mod error_tests {
    use phonetic_dict::error::PhoneticError;
    use std::path::PathBuf;

    #[test]
    fn test_input_unavailable_display() {
        let error = PhoneticError::InputUnavailable {
            path: PathBuf::from("./dict-revised.json"),
            reason: "No such file or directory".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("입력 파일을 열 수 없습니다"));
        assert!(msg.contains("dict-revised.json"));
    }

    #[test]
    fn test_malformed_input_display() {
        let error = PhoneticError::MalformedInput {
            index: 3,
            reason: "EOF while parsing".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("EOF while parsing"));
    }
}
