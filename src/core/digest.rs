use crate::config::DigestConfig;
use crate::domain::model::{Digest, NoticeRecord};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

pub const NO_NOTICES_LINE: &str = "금일 신규로 확인된 공지가 없습니다. (no notices found)";
const ELLIPSIS: &str = "...";

/// Renders records into the plain-text digest mail.
pub struct DigestFormatter {
    config: Arc<DigestConfig>,
}

impl DigestFormatter {
    pub fn new(config: Arc<DigestConfig>) -> Self {
        Self { config }
    }

    /// `[경희대] 장학 공지 요약 (2024-01-11)`
    pub fn subject(&self, generated_at: DateTime<FixedOffset>) -> String {
        format!(
            "[{}] {} ({})",
            self.config.institution,
            self.config.summary_label,
            generated_at.format("%Y-%m-%d")
        )
    }

    pub fn format_digest(&self, records: &[NoticeRecord], generated_at: DateTime<FixedOffset>) -> String {
        let mut lines = vec![
            format!(
                "{} {} ({}) {}",
                self.config.institution,
                self.config.board_label,
                self.filter_description(),
                generated_at.format("%Y-%m-%d %H:%M")
            ),
            format!("총 {}건", records.len()),
            format!("목록: {}", self.config.listing_url),
            String::new(),
        ];

        if records.is_empty() {
            lines.push(NO_NOTICES_LINE.to_string());
            return lines.join("\n");
        }

        for (idx, record) in records.iter().enumerate() {
            lines.push(format!("[{}] {}", idx + 1, record.title));
            lines.push(format!("카테고리: {}", record.category));
            if !record.posted_at.is_empty() {
                lines.push(format!("등록일: {}", record.posted_at));
            }
            lines.push(format!("링크: {}", record.url));

            let detail = record.detail.as_deref().unwrap_or_default().trim();
            if !detail.is_empty() {
                lines.push("내용 요약:".to_string());
                lines.push(preview(detail, self.config.preview_chars));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn build(&self, records: &[NoticeRecord], generated_at: DateTime<FixedOffset>) -> Digest {
        Digest {
            subject: self.subject(generated_at),
            body: self.format_digest(records, generated_at),
            notice_count: records.len(),
        }
    }

    /// e.g. `공통_/국제_, 최근 5일`
    fn filter_description(&self) -> String {
        format!(
            "{}, 최근 {}일",
            self.config.category_prefixes.join("/"),
            self.config.recency_window_days + 1
        )
    }
}

/// At most `budget` characters, with `...` appended when cut.
pub fn preview(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, 8, 30, 0)
            .unwrap()
    }

    fn formatter() -> DigestFormatter {
        DigestFormatter::new(Arc::new(DigestConfig::default()))
    }

    #[test]
    fn empty_digest_has_sentinel_and_no_blocks() {
        let body = formatter().format_digest(&[], generated_at());

        assert!(body.starts_with("경희대 장학 공지 (공통_/국제_, 최근 5일) 2024-01-15 08:30\n총 0건\n"));
        assert!(body.contains(NO_NOTICES_LINE));
        assert!(body.contains("no notices found"));
        assert!(!body.contains("[1]"));
    }

    #[test]
    fn blocks_follow_input_order() {
        let records = vec![
            NoticeRecord::new("교내 장학 신청", "공통_교내", "https://example.com/1", "2024-01-14"),
            NoticeRecord::new("GKS 모집", "국제_정부", "https://example.com/2", "")
                .with_detail("모집 요강 첨부"),
        ];

        let body = formatter().format_digest(&records, generated_at());

        let first = body.find("[1] 교내 장학 신청").unwrap();
        let second = body.find("[2] GKS 모집").unwrap();
        assert!(first < second);
        assert!(!body.contains("[3]"));
        assert!(body.contains("카테고리: 공통_교내\n등록일: 2024-01-14\n링크: https://example.com/1\n"));
        // no date line when the date is missing
        assert!(body.contains("카테고리: 국제_정부\n링크: https://example.com/2\n내용 요약:\n모집 요강 첨부\n"));
        assert!(body.contains("총 2건"));
        assert!(!body.contains(NO_NOTICES_LINE));
    }

    #[test]
    fn long_detail_is_truncated_with_ellipsis() {
        let config = DigestConfig {
            preview_chars: 5,
            ..DigestConfig::default()
        };
        let formatter = DigestFormatter::new(Arc::new(config));
        let record = NoticeRecord::new("t", "공통_x", "https://example.com", "")
            .with_detail("가나다라마바사");

        let body = formatter.format_digest(&[record], generated_at());
        assert!(body.contains("\n가나다라마...\n"));
    }

    #[test]
    fn blank_detail_is_omitted() {
        let record =
            NoticeRecord::new("t", "공통_x", "https://example.com", "").with_detail("  \n ");
        let body = formatter().format_digest(&[record], generated_at());
        assert!(!body.contains("내용 요약"));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview("장학금", 3), "장학금");
        assert_eq!(preview("장학금안내", 3), "장학금...");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn subject_uses_institution_and_date() {
        let digest = formatter().build(&[], generated_at());
        assert_eq!(digest.subject, "[경희대] 장학 공지 요약 (2024-01-15)");
        assert_eq!(digest.notice_count, 0);
    }
}
