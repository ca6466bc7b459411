use crate::config::{compile_selector, compile_selectors, DigestConfig};
use crate::core::html_text::block_text;
use crate::utils::error::Result;
use scraper::{Html, Selector};

/// Pulls the readable body out of a notice detail page.
pub struct DetailParser {
    content_selectors: Vec<Selector>,
    body: Selector,
}

impl DetailParser {
    pub fn new(config: &DigestConfig) -> Result<Self> {
        Ok(Self {
            content_selectors: compile_selectors(&config.selectors.content)?,
            body: compile_selector("body")?,
        })
    }

    /// Text of the first content container with any text, else the whole
    /// body, else an empty string.
    pub fn extract_text(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        self.content_selectors
            .iter()
            .find_map(|selector| {
                document
                    .select(selector)
                    .map(block_text)
                    .find(|text| !text.is_empty())
            })
            .or_else(|| document.select(&self.body).next().map(block_text))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DetailParser {
        DetailParser::new(&DigestConfig::default()).unwrap()
    }

    #[test]
    fn prefers_content_selectors_in_priority_order() {
        let html = r#"<html><body>
            <div class="contents">사이트 전체 영역</div>
            <div class="view_cnt"><p>신청 기간: 1월 10일 ~ 1월 20일</p><p>대상: 재학생</p></div>
        </body></html>"#;

        assert_eq!(
            parser().extract_text(html),
            "신청 기간: 1월 10일 ~ 1월 20일\n대상: 재학생"
        );
    }

    #[test]
    fn empty_container_is_passed_over() {
        let html = r#"<html><body>
            <div class="bbs_cont">   </div>
            <div class="board_view">본문</div>
        </body></html>"#;

        assert_eq!(parser().extract_text(html), "본문");
    }

    #[test]
    fn falls_back_to_body_text() {
        let html = "<html><head><title>x</title></head><body><h1>제목</h1><p>내용</p><script>track()</script></body></html>";
        assert_eq!(parser().extract_text(html), "제목\n내용");
    }

    #[test]
    fn blank_page_yields_empty_text() {
        assert_eq!(parser().extract_text(""), "");
    }
}
