use std::ops::Range;

use gpui::{
    App, FontStyle, FontWeight, HighlightStyle, IntoElement, ParentElement, RenderOnce,
    SharedString, Styled, StyledText, Window, div, px,
};

use crate::theme::{ThemeExt, ThemeSettings};

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
}

impl Block {
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Heading { spans, .. } | Block::Paragraph(spans) => spans,
        }
    }
}

/// Parses the small HTML subset shown by [`ContentField`]: `h1`-`h6`, `p`,
/// `strong`/`b`, `em`/`i`, `br` and character entities. Unknown tags are dropped
/// and their text kept.
pub fn parse_html(html: &str) -> Vec<Block> {
    let mut parser = HtmlParser::default();
    let mut rest = html;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) if !starts_tag(rest) => {
                parser.text("<");
                rest = &rest[1..];
            }
            Some(0) => match rest.find('>') {
                Some(end) => {
                    parser.tag(&rest[1..end]);
                    rest = &rest[end + 1..];
                }
                None => {
                    parser.text(rest);
                    rest = "";
                }
            },
            Some(start) => {
                parser.text(&rest[..start]);
                rest = &rest[start..];
            }
            None => {
                parser.text(rest);
                rest = "";
            }
        }
    }

    parser.finish()
}

/// Whether the `<` opening `rest` begins a tag rather than a literal less-than sign.
fn starts_tag(rest: &str) -> bool {
    rest[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

#[derive(Default)]
struct HtmlParser {
    blocks: Vec<Block>,
    current: Option<(Option<u8>, Vec<Span>)>,
    bold: usize,
    italic: usize,
}

impl HtmlParser {
    fn tag(&mut self, raw: &str) {
        let raw = raw.trim().trim_end_matches('/').trim();
        let (closing, raw) = match raw.strip_prefix('/') {
            Some(raw) => (true, raw),
            None => (false, raw),
        };
        let name = raw
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match (name.as_str(), closing) {
            ("p", false) => self.open(None),
            ("p", true) => self.close(),
            (heading, false) if heading_level(heading).is_some() => {
                self.open(heading_level(heading))
            }
            (heading, true) if heading_level(heading).is_some() => self.close(),
            ("strong" | "b", false) => self.bold += 1,
            ("strong" | "b", true) => self.bold = self.bold.saturating_sub(1),
            ("em" | "i", false) => self.italic += 1,
            ("em" | "i", true) => self.italic = self.italic.saturating_sub(1),
            ("br", _) => self.push("\n"),
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        let mut collapsed = String::with_capacity(decoded.len());
        let mut last_space = self.ends_with_space();
        for c in decoded.chars() {
            if c.is_whitespace() && c != '\u{a0}' {
                if !last_space {
                    collapsed.push(' ');
                }
                last_space = true;
            } else {
                collapsed.push(c);
                last_space = false;
            }
        }
        if collapsed.is_empty() || (self.current.is_none() && collapsed.trim().is_empty()) {
            return;
        }
        self.push(&collapsed);
    }

    fn ends_with_space(&self) -> bool {
        match &self.current {
            None => true,
            Some((_, spans)) => spans
                .last()
                .is_none_or(|span| span.text.ends_with([' ', '\n'])),
        }
    }

    fn push(&mut self, text: &str) {
        let (bold, italic) = (self.bold > 0, self.italic > 0);
        let (_, spans) = self.current.get_or_insert_with(|| (None, Vec::new()));
        match spans.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic => last.text.push_str(text),
            _ => spans.push(Span {
                text: text.to_string(),
                bold,
                italic,
            }),
        }
    }

    fn open(&mut self, level: Option<u8>) {
        self.close();
        self.current = Some((level, Vec::new()));
    }

    fn close(&mut self) {
        let Some((level, mut spans)) = self.current.take() else {
            return;
        };
        if let Some(last) = spans.last_mut() {
            let trimmed = last.text.trim_end_matches(' ').len();
            last.text.truncate(trimmed);
        }
        spans.retain(|span| !span.text.is_empty());
        if spans.is_empty() {
            return;
        }
        self.blocks.push(match level {
            Some(level) => Block::Heading { level, spans },
            None => Block::Paragraph(spans),
        });
    }

    fn finish(mut self) -> Vec<Block> {
        self.close();
        self.blocks
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Decodes named (`&amp;` `&lt;` `&gt;` `&quot;` `&apos;` `&nbsp;`) and numeric
/// character references. Unknown references are kept as written.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity.strip_prefix('#').and_then(|code| {
                    let value = match code.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => code.parse().ok(),
                    };
                    value.and_then(char::from_u32)
                }),
            };
            c.map(|c| (c, end))
        });
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn styled_runs(spans: &[Span]) -> (String, Vec<(Range<usize>, HighlightStyle)>) {
    let mut text = String::new();
    let mut highlights = Vec::new();
    for span in spans {
        let start = text.len();
        text.push_str(&span.text);
        if span.bold || span.italic {
            highlights.push((
                start..text.len(),
                HighlightStyle {
                    font_weight: span.bold.then_some(FontWeight::BOLD),
                    font_style: span.italic.then_some(FontStyle::Italic),
                    ..Default::default()
                },
            ));
        }
    }
    (text, highlights)
}

/// Static rich text, for terms, instructions and the like.
#[derive(IntoElement)]
pub struct ContentField {
    settings: ThemeSettings,
    html: SharedString,
}

impl ContentField {
    pub fn new(settings: ThemeSettings, html: impl Into<SharedString>) -> Self {
        Self {
            settings,
            html: html.into(),
        }
    }
}

impl RenderOnce for ContentField {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let sizes = theme.layout.text.default_font.sizes.clone();
        let body_color = theme.colors.text.primary;
        let heading_color = self.settings.accent_color.to_rgba();

        div()
            .flex()
            .flex_col()
            .gap(px(8.))
            .font_family(self.settings.body_font.family_name())
            .children(parse_html(&self.html).into_iter().map(|block| {
                let (text, highlights) = styled_runs(block.spans());
                let styled = StyledText::new(text).with_highlights(highlights);
                match block {
                    Block::Heading { level, .. } => div()
                        .font_family(self.settings.header_font.family_name())
                        .font_weight(self.settings.header_font.weight_or(FontWeight::SEMIBOLD))
                        .text_color(heading_color)
                        .text_size(match level {
                            1 => sizes.heading_xl,
                            2 => sizes.heading_lg,
                            3 => sizes.heading_md,
                            _ => sizes.heading_sm,
                        })
                        .child(styled),
                    Block::Paragraph(_) => div()
                        .text_color(body_color)
                        .text_size(sizes.body)
                        .child(styled),
                }
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, bold: bool, italic: bool) -> Span {
        Span {
            text: text.into(),
            bold,
            italic,
        }
    }

    #[test]
    fn heading_then_paragraph_with_bold() {
        let blocks = parse_html("<h4>Terms</h4><p>A <strong>b</strong></p>");
        assert_eq!(
            blocks,
            [
                Block::Heading {
                    level: 4,
                    spans: vec![span("Terms", false, false)],
                },
                Block::Paragraph(vec![span("A ", false, false), span("b", true, false)]),
            ]
        );
    }

    #[test]
    fn collapses_whitespace_and_breaks_lines() {
        let blocks = parse_html("<p>\n  one   <em>two</em><br/>three  </p>");
        assert_eq!(
            blocks,
            [Block::Paragraph(vec![
                span("one ", false, false),
                span("two", false, true),
                span("\nthree", false, false),
            ])]
        );
    }

    #[test]
    fn loose_text_becomes_a_paragraph() {
        let blocks = parse_html("Plain <b>bold</b> <span>kept</span>");
        assert_eq!(
            blocks,
            [Block::Paragraph(vec![
                span("Plain ", false, false),
                span("bold", true, false),
                span(" kept", false, false),
            ])]
        );
    }

    #[test]
    fn stray_angle_brackets_stay_text() {
        let blocks = parse_html("<p>1 < 2 and 3 > 1</p><p>x <5</p>");
        assert_eq!(
            blocks,
            [
                Block::Paragraph(vec![span("1 < 2 and 3 > 1", false, false)]),
                Block::Paragraph(vec![span("x <5", false, false)]),
            ]
        );
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#65;&#x42;&quot;"), "AB\"");
        assert_eq!(decode_entities("fish & chips &bogus;"), "fish & chips &bogus;");
    }

    #[test]
    fn bold_runs_become_highlights() {
        let (text, highlights) = styled_runs(&[span("A ", false, false), span("b", true, false)]);
        assert_eq!(text, "A b");
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].0, 2..3);
        assert_eq!(highlights[0].1.font_weight, Some(FontWeight::BOLD));
    }
}
