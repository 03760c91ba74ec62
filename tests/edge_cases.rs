//! Edge-case tests for malformed and unusual exports.

use kakaopack::config::{Hooks, ParseConfig};
use kakaopack::prelude::*;

fn parse(content: &str) -> Result<Chatroom> {
    import_str(content, "fallback", &ParseConfig::new(), &Hooks::new())
}

#[test]
fn test_empty_input_is_unrecognized() {
    let err = parse("").unwrap_err();
    assert!(err.is_format_unrecognized());
}

#[test]
fn test_plain_prose_is_unrecognized() {
    let err = parse("그냥 아무 텍스트 파일입니다.\n카카오톡이 아닙니다.\n").unwrap_err();
    assert!(err.is_format_unrecognized());
}

#[test]
fn test_bom_stripped_from_header_line() {
    let room = parse(
        "\u{feff}스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 안녕하세요",
    )
    .unwrap();

    assert_eq!(room.name(), "스터디 모임");
}

#[test]
fn test_header_without_known_shape_falls_back() {
    // First line is consumed as the header even when it matches nothing;
    // the name falls back to the caller-provided one.
    let room = parse(
        "exported chat log\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 안녕하세요",
    )
    .unwrap();

    assert_eq!(room.name(), "fallback");
    assert_eq!(room.len(), 1);
}

#[test]
fn test_crlf_line_endings() {
    let room = parse(
        "스터디 모임 4 카카오톡 대화\r\n\
         2023년 1월 5일 오전 10:28\r\n\
         2023년 1월 5일 오전 10:28, 철수 : 안녕하세요\r\n\
         2023년 1월 5일 오전 10:30, 영희 : 반가워요\r\n",
    )
    .unwrap();

    assert_eq!(room.len(), 2);
    assert_eq!(room.messages()[0].content, "안녕하세요");
}

#[test]
fn test_colon_inside_message_content() {
    let room = parse(
        "스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 시간: 오후 3시 장소: 카페",
    )
    .unwrap();

    assert_eq!(room.messages()[0].sender, "철수");
    assert_eq!(room.messages()[0].content, "시간: 오후 3시 장소: 카페");
}

#[test]
fn test_invalid_calendar_date_keeps_previous_cursor() {
    let room = parse(
        "스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 정상\n\
         2023년 2월 30일 오전 9:00\n\
         2023년 2월 30일 오전 9:00, 영희 : 날짜가 이상해도",
    )
    .unwrap();

    assert_eq!(room.len(), 2);
    // Second message lands on the still-valid cursor date
    assert_eq!(
        room.messages()[1].timestamp.format("%Y-%m-%d").to_string(),
        "2023-01-05"
    );
}

#[test]
fn test_blank_lines_between_messages_ignored() {
    let room = parse(
        "스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 첫 메시지\n\
         \n\
         \n\
         2023년 1월 5일 오전 10:30, 영희 : 둘째 메시지",
    )
    .unwrap();

    assert_eq!(room.len(), 2);
    assert_eq!(room.messages()[0].content, "첫 메시지");
}

#[test]
fn test_sender_name_containing_brackets_windows() {
    let room = parse(
        "[봇] 님과 카카오톡 대화\n\
         --------------- 2023년 1월 5일 목요일 ---------------\n\
         [[봇]] [오전 10:28] 자동 응답입니다",
    )
    .unwrap();

    assert_eq!(room.len(), 1);
    assert_eq!(room.messages()[0].sender, "[봇]");
}

#[test]
fn test_tabular_bad_timestamp_aborts() {
    let err = parse(
        "Date,User,Message\n\
         2023-01-05 10:28,철수,정상\n\
         2023년 1월 5일,영희,한국식 날짜",
    )
    .unwrap_err();

    assert!(err.is_timestamp());
    assert!(err.to_string().contains("%Y-%m-%d %H:%M"));
}

#[test]
fn test_tabular_custom_date_format() {
    let config = ParseConfig::new().with_date_format("%d/%m/%Y %H:%M");
    let room = import_str(
        "Date,User,Message\n\
         2023-01-05 10:28,철수,안녕하세요",
        "fallback",
        &config,
        &Hooks::new(),
    );

    // Detection still routes by shape; the configured format then fails
    // on the ISO-shaped cell.
    assert!(room.unwrap_err().is_timestamp());
}

#[test]
fn test_mac_ignores_configured_date_format() {
    let config = ParseConfig::new().with_date_format("%d/%m/%Y %H:%M");
    let room = import_str(
        "Date,User,Message\n\
         2023-01-05 10:28:03,철수,안녕하세요",
        "fallback",
        &config,
        &Hooks::new(),
    )
    .unwrap();

    assert_eq!(room.len(), 1);
}

#[test]
fn test_merge_never_crosses_a_large_gap_even_across_days() {
    let room = import_str(
        "스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 첫날\n\
         2023년 1월 6일 오전 10:28\n\
         2023년 1월 6일 오전 10:28, 철수 : 다음날 같은 시각",
        "fallback",
        &ParseConfig::new().with_merge(true),
        &Hooks::new(),
    )
    .unwrap();

    assert_eq!(room.len(), 2);
}

#[test]
fn test_message_content_looking_like_date_header() {
    // A continuation line shaped like a date header moves the cursor
    // instead of joining the message.
    let room = parse(
        "스터디 모임 4 카카오톡 대화\n\
         2023년 1월 5일 오전 10:28\n\
         2023년 1월 5일 오전 10:28, 철수 : 약속 잡자\n\
         2023년 1월 9일 오전 11:00\n\
         2023년 1월 9일 오전 11:05, 영희 : 그 날 좋아",
    )
    .unwrap();

    assert_eq!(room.len(), 2);
    assert_eq!(
        room.messages()[1].timestamp.format("%Y-%m-%d").to_string(),
        "2023-01-09"
    );
}
