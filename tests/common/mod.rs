#![allow(dead_code)]

use scholarship_digest::DigestConfig;
use std::collections::HashMap;
use std::sync::Arc;

pub const LISTING_PATH: &str = "/janghak/bbs/list.do";
pub const VIEW_PATH: &str = "/janghak/bbs/view.do";
pub const GKS_PATH: &str = "/external/gks";

/// A board page with one row for each case the parser handles: pinned
/// notice, kept, other department, class-based category, no link,
/// absolute link without a date.
pub fn listing_html(base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>장학공지</title></head>
<body>
<table class="board">
  <thead><tr><th>번호</th><th>분류</th><th>제목</th><th>작성자</th><th>등록일</th></tr></thead>
  <tbody id="boardList">
    <tr class="notice"><td>공지</td><td>공지</td><td><a href="javascript:view('9001');">장학금 신청 안내 (상시)</a></td><td>장학팀</td><td>2000-01-02</td></tr>
    <tr><td>120</td><td>공통_교내장학</td><td><a href="javascript:view('1234');">2999학년도 교내장학 신청</a></td><td>장학팀</td><td>2999-01-10</td></tr>
    <tr><td>119</td><td>학사_안내</td><td><a href="javascript:view('1190');">수강신청 일정</a></td><td>학사팀</td><td>2999-01-09</td></tr>
    <tr><td>118</td><td></td><td><span class="category">국제_외부장학</span> <a href="/janghak/bbs/view.do?articleId=1180">오래된 외부 장학</a></td><td>장학팀</td><td>2000-01-01</td></tr>
    <tr><td>117</td><td>공통_기타</td><td>첨부 전용 게시물</td><td>장학팀</td><td>2999-01-08</td></tr>
    <tr><td>116</td><td>국제_정부초청</td><td><a href="{base}/external/gks">GKS 정부초청 장학생 모집</a></td><td>국제팀</td><td></td></tr>
  </tbody>
</table>
</body>
</html>"#,
        base = base_url
    )
}

pub fn detail_html(body: &str) -> String {
    format!(
        r#"<html><body><div id="header">경희대학교 장학</div><div class="bbs_cont">{}</div></body></html>"#,
        body
    )
}

pub fn config_for(listing_url: String) -> Arc<DigestConfig> {
    Arc::new(DigestConfig {
        listing_url,
        ..DigestConfig::default()
    })
}

pub fn mail_settings(host: &str, port: u16) -> HashMap<String, String> {
    [
        ("EMAIL_HOST", host.to_string()),
        ("EMAIL_PORT", port.to_string()),
        ("EMAIL_USERNAME", "digest-bot".to_string()),
        ("EMAIL_PASSWORD", "app-password".to_string()),
        ("EMAIL_FROM", "digest-bot@example.com".to_string()),
        ("EMAIL_TO", "student@example.com".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
