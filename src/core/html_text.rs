use scraper::ElementRef;

/// Text nodes under `element`, skipping `<script>` and `<style>` contents.
pub fn visible_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        (!hidden).then_some(&**text)
    })
}

/// Single-line text with runs of whitespace collapsed to one space.
/// Adjacent text nodes are joined as-is, so inline markup adds no spaces.
pub fn inline_text(element: ElementRef<'_>) -> String {
    visible_text(element)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-empty text nodes, one per line.
pub fn block_text(element: ElementRef<'_>) -> String {
    visible_text(element)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
