//! Review page layout and field extraction.
//!
//! A review page is either a plain single-album review or a multi-album
//! review that documents several releases, each under its own heading.
//! [`ReviewPage`] carries that distinction as a tag; every field read
//! dispatches on it so that, on multi-album pages, values come from the
//! matched album's own section and never from a sibling's.

use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ── Selectors ────────────────────────────────────────────────────────────────

/// CSS selectors describing the page layout.  Each one can be overridden from
/// the `[layout]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSelectors {
    /// Present only on multi-album reviews
    pub multi_indicator: String,
    /// One heading per album on a multi-album review
    pub headings: String,
    pub score: String,
    pub labels: String,
    pub year: String,
    pub cover: String,
    /// Cover image of one section, looked up from the section's parent
    pub multi_cover: String,
    /// "Label; Year" line inside a multi-album section
    pub multi_info: String,
    pub body: String,
    pub abstract_meta: String,
    pub best_new_music: String,
}

impl Default for LayoutSelectors {
    fn default() -> Self {
        LayoutSelectors {
            multi_indicator: ".review-multi".to_string(),
            headings: ".review-meta h2".to_string(),
            score: ".score".to_string(),
            labels: ".labels-list__item".to_string(),
            year: "time".to_string(),
            cover: ".album-art img".to_string(),
            multi_cover: ".artwork img".to_string(),
            multi_info: "h3".to_string(),
            body: ".body__inner-container".to_string(),
            abstract_meta: "meta[property=\"og:description\"]".to_string(),
            best_new_music: ".bnm-arrows".to_string(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Compiled form of [`LayoutSelectors`].
#[derive(Debug, Clone)]
pub struct Layout {
    multi_indicator: Selector,
    headings: Selector,
    score: Selector,
    labels: Selector,
    year: Selector,
    cover: Selector,
    multi_cover: Selector,
    multi_info: Selector,
    body: Selector,
    abstract_meta: Selector,
    best_new_music: Selector,
}

impl Layout {
    pub fn compile(selectors: &LayoutSelectors) -> Result<Self> {
        Ok(Layout {
            multi_indicator: compile(&selectors.multi_indicator)?,
            headings: compile(&selectors.headings)?,
            score: compile(&selectors.score)?,
            labels: compile(&selectors.labels)?,
            year: compile(&selectors.year)?,
            cover: compile(&selectors.cover)?,
            multi_cover: compile(&selectors.multi_cover)?,
            multi_info: compile(&selectors.multi_info)?,
            body: compile(&selectors.body)?,
            abstract_meta: compile(&selectors.abstract_meta)?,
            best_new_music: compile(&selectors.best_new_music)?,
        })
    }

    /// Whether the page reviews several albums.
    pub fn is_multi(&self, html: &Html) -> bool {
        html.select(&self.multi_indicator).next().is_some()
    }

    /// Text of every album heading, in page order.
    pub fn headings(&self, html: &Html) -> Vec<String> {
        html.select(&self.headings).map(text_of).collect()
    }
}

impl Default for Layout {
    fn default() -> Self {
        // The built-in selectors are known to parse.
        Layout::compile(&LayoutSelectors::default()).unwrap()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first<'a>(scope: ElementRef<'a>, selector: &Selector, field: &'static str) -> Result<ElementRef<'a>> {
    scope.select(selector)
        .next()
        .ok_or_else(|| Error::extraction(field, "element not found"))
}

fn parse_score(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| Error::extraction("score", format!("'{}': {}", text.trim(), e)))
}

fn image_src(img: ElementRef<'_>, field: &'static str) -> Result<String> {
    img.value()
        .attr("src")
        .map(|src| src.trim().to_string())
        .ok_or_else(|| Error::extraction(field, "image has no src"))
}

/// Split a multi-album info line such as `"Capitol; 2009"` into label and year.
fn split_info(line: &str, field: &'static str) -> Result<(String, String)> {
    line.split_once(';')
        .map(|(label, year)| (label.trim().to_string(), year.trim().to_string()))
        .ok_or_else(|| Error::extraction(field, format!("no ';' in '{}'", line)))
}

/// Return a copy of `html` in which every `<br>` element has been replaced by
/// a `"\n"` text node.  Attributes and the rest of the tree are untouched.
pub fn replace_breaks(html: &Html) -> Html {
    let br = Selector::parse("br").unwrap();
    let mut cleaned = html.clone();
    let breaks: Vec<_> = cleaned.select(&br).map(|el| el.id()).collect();
    for id in breaks {
        if let Some(mut node) = cleaned.tree.get_mut(id) {
            node.insert_before(Node::Text(Text { text: "\n".into() }));
            node.detach();
        }
    }
    cleaned
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre",
    "section", "table", "tr", "ul",
];

fn flush_block(inline: &mut String, blocks: &mut Vec<String>) {
    let text = inline.trim();
    if !text.is_empty() {
        blocks.push(text.to_string());
    }
    inline.clear();
}

/// Split the text under `el` into blocks, one per block-level element, with
/// runs of inline content between them forming blocks of their own.
fn collect_blocks(el: ElementRef<'_>, blocks: &mut Vec<String>) {
    let mut inline = String::new();
    for child in el.children() {
        match ElementRef::wrap(child) {
            Some(child_el) if BLOCK_TAGS.contains(&child_el.value().name()) => {
                flush_block(&mut inline, blocks);
                collect_blocks(child_el, blocks);
            }
            Some(child_el) => inline.extend(child_el.text()),
            None => {
                if let Some(text) = child.value().as_text() {
                    inline.push_str(text);
                }
            }
        }
    }
    flush_block(&mut inline, blocks);
}

// ── Review pages ─────────────────────────────────────────────────────────────

/// Position of the matched album's heading among a page's album headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRef {
    pub heading_index: usize,
}

/// A fetched review page.
#[derive(Debug, Clone)]
pub enum ReviewPage {
    Single(Html),
    Multi(Html, SectionRef),
}

impl ReviewPage {
    pub fn html(&self) -> &Html {
        match self {
            ReviewPage::Single(html) | ReviewPage::Multi(html, _) => html,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, ReviewPage::Multi(..))
    }

    /// The element holding the matched album's fields on a multi-album page.
    pub fn section<'a>(&'a self, layout: &Layout) -> Result<Option<ElementRef<'a>>> {
        let (html, section) = match self {
            ReviewPage::Single(_) => return Ok(None),
            ReviewPage::Multi(html, section) => (html, section),
        };
        let heading = html.select(&layout.headings)
            .nth(section.heading_index)
            .ok_or_else(|| Error::extraction("section", format!("no heading #{}", section.heading_index)))?;
        let parent = heading.parent()
            .and_then(ElementRef::wrap)
            .ok_or_else(|| Error::extraction("section", "heading has no parent element"))?;
        Ok(Some(parent))
    }

    pub fn score(&self, layout: &Layout) -> Result<f64> {
        let scope = match self.section(layout)? {
            Some(section) => section,
            None => self.html().root_element(),
        };
        parse_score(&text_of(first(scope, &layout.score, "score")?))
    }

    /// Record label(s).  Several distinct labels are joined with `" / "`.
    pub fn label(&self, layout: &Layout) -> Result<String> {
        if let Some(section) = self.section(layout)? {
            let info = text_of(first(section, &layout.multi_info, "label")?);
            return split_info(&info, "label").map(|(label, _)| label);
        }

        let mut labels: Vec<String> = Vec::new();
        for item in self.html().select(&layout.labels) {
            let label = text_of(item);
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        if labels.is_empty() {
            return Err(Error::extraction("label", "element not found"));
        }
        Ok(labels.join(" / "))
    }

    /// Release year.  Reissues carry both years, e.g. `"1999/2014"`.
    pub fn year(&self, layout: &Layout) -> Result<String> {
        match self.section(layout)? {
            Some(section) => {
                let info = text_of(first(section, &layout.multi_info, "year")?);
                split_info(&info, "year").map(|(_, year)| year)
            }
            None => Ok(text_of(first(self.html().root_element(), &layout.year, "year")?)),
        }
    }

    pub fn cover(&self, layout: &Layout) -> Result<String> {
        match self.section(layout)? {
            Some(section) => {
                let container = section.parent()
                    .and_then(ElementRef::wrap)
                    .unwrap_or(section);
                image_src(first(container, &layout.multi_cover, "cover")?, "cover")
            }
            None => image_src(first(self.html().root_element(), &layout.cover, "cover")?, "cover"),
        }
    }

    /// Full text of the review body.  Line breaks are kept and block elements
    /// (paragraphs, quotes, subheadings, list items) are separated by a blank
    /// line.
    pub fn editorial(&self, layout: &Layout) -> Result<String> {
        let body = first(self.html().root_element(), &layout.body, "editorial")?;
        let cleaned = replace_breaks(&Html::parse_fragment(&body.html()));

        let mut blocks = Vec::new();
        collect_blocks(cleaned.root_element(), &mut blocks);
        Ok(blocks.join("\n\n"))
    }

    /// The short summary published in the page metadata.
    pub fn abstract_text(&self, layout: &Layout) -> Result<String> {
        first(self.html().root_element(), &layout.abstract_meta, "abstract")?
            .value()
            .attr("content")
            .map(|c| c.trim().to_string())
            .ok_or_else(|| Error::extraction("abstract", "meta tag has no content"))
    }

    pub fn best_new_music(&self, layout: &Layout) -> bool {
        self.html().select(&layout.best_new_music).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn single() -> ReviewPage {
        ReviewPage::Single(Html::parse_document(fixtures::MOGWAI_PAGE))
    }

    fn multi(heading_index: usize) -> ReviewPage {
        ReviewPage::Multi(Html::parse_document(fixtures::RADIOHEAD_PAGE), SectionRef { heading_index })
    }

    #[test]
    fn test_single_fields() {
        let layout = Layout::default();
        let page = single();

        assert!(!layout.is_multi(page.html()));
        assert_eq!(page.score(&layout).unwrap(), 8.3);
        assert_eq!(page.label(&layout).unwrap(), "Chemikal Underground");
        assert_eq!(page.year(&layout).unwrap(), "1999/2014");
        assert_eq!(page.cover(&layout).unwrap(), "https://media.pitchfork.com/photos/mogwai-come-on-die-young.jpg");
        assert!(page.abstract_text(&layout).unwrap().starts_with("Mogwai's second album"));
        assert!(!page.best_new_music(&layout));
    }

    #[test]
    fn test_editorial_keeps_breaks_and_paragraphs() {
        let layout = Layout::default();
        let text = single().editorial(&layout).unwrap();
        assert!(text.starts_with("Though few of their songs contain actual words"));
        assert!(text.contains("words,\nMogwai"));
        assert!(text.contains("\n\nThe deluxe edition"));
    }

    #[test]
    fn test_multi_detection_and_headings() {
        let layout = Layout::default();
        let html = Html::parse_document(fixtures::RADIOHEAD_PAGE);
        assert!(layout.is_multi(&html));
        assert_eq!(
            layout.headings(&html),
            vec![
                "Pablo Honey: Collector's Edition",
                "The Bends: Collector's Edition",
                "OK Computer: Collector's Edition",
            ]
        );
    }

    #[test]
    fn test_multi_fields_stay_in_their_section() {
        let layout = Layout::default();

        let ok_computer = multi(2);
        assert_eq!(ok_computer.score(&layout).unwrap(), 10.0);
        assert_eq!(ok_computer.label(&layout).unwrap(), "Capitol");
        assert_eq!(ok_computer.year(&layout).unwrap(), "2009");
        assert_eq!(ok_computer.cover(&layout).unwrap(), "https://media.pitchfork.com/photos/ok-computer.jpg");
        assert!(ok_computer.best_new_music(&layout));

        let pablo_honey = multi(0);
        assert_eq!(pablo_honey.score(&layout).unwrap(), 8.0);
        assert_eq!(pablo_honey.label(&layout).unwrap(), "Parlophone");
        assert_eq!(pablo_honey.cover(&layout).unwrap(), "https://media.pitchfork.com/photos/pablo-honey.jpg");
    }

    #[test]
    fn test_missing_fields_are_extraction_errors() {
        let layout = Layout::default();
        let page = ReviewPage::Single(Html::parse_document("<html><body><p>nothing here</p></body></html>"));

        for err in [
            page.score(&layout).unwrap_err(),
            page.label(&layout).unwrap_err(),
            page.year(&layout).unwrap_err(),
            page.cover(&layout).unwrap_err(),
            page.editorial(&layout).unwrap_err(),
        ] {
            assert!(matches!(err, Error::Extraction { .. }), "{}", err);
        }

        let page = ReviewPage::Single(Html::parse_document(r#"<div class="score">N/A</div>"#));
        assert!(matches!(page.score(&layout), Err(Error::Extraction { field: "score", .. })));

        assert!(matches!(multi(7).score(&layout), Err(Error::Extraction { field: "section", .. })));
    }

    #[test]
    fn test_label_deduplicates_and_joins() {
        let layout = Layout::default();
        let page = ReviewPage::Single(Html::parse_document(
            r#"<ul><li class="labels-list__item">Merge</li><li class="labels-list__item">Domino</li>
               <li class="labels-list__item">Merge</li></ul>"#,
        ));
        assert_eq!(page.label(&layout).unwrap(), "Merge / Domino");
    }

    #[test]
    fn test_replace_breaks() {
        let html = Html::parse_fragment("<p>one<br>two<BR/>three<br />four</p>");
        let cleaned = replace_breaks(&html);
        let text: String = cleaned.root_element().text().collect();
        assert_eq!(text, "one\ntwo\nthree\nfour");
        // The input tree is left untouched
        assert_eq!(html.select(&Selector::parse("br").unwrap()).count(), 3);
    }

    #[test]
    fn test_editorial_keeps_text_outside_paragraphs() {
        let layout = Layout::default();
        let page = ReviewPage::Single(Html::parse_document(
            r#"<div class="body__inner-container"><p>First.</p><blockquote>Quoted line</blockquote>
               <h2>Sub</h2><ul><li>one</li><li>two</li></ul>Loose <em>words</em>.<p>Second.</p></div>"#,
        ));
        assert_eq!(
            page.editorial(&layout).unwrap(),
            "First.\n\nQuoted line\n\nSub\n\none\n\ntwo\n\nLoose words.\n\nSecond."
        );
    }

    #[test]
    fn test_replace_breaks_leaves_attributes_alone() {
        let html = Html::parse_fragment(r#"<p><img alt="a<br>b" src="x.jpg">one<br>two</p>"#);
        let cleaned = replace_breaks(&html);

        let img = cleaned.select(&Selector::parse("img").unwrap()).next().unwrap();
        assert_eq!(img.value().attr("alt"), Some("a<br>b"));
        let text: String = cleaned.root_element().text().collect();
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn test_replace_breaks_keeps_document_structure() {
        let html = Html::parse_document(
            "<html><head><title>T</title></head><body><p>a<br>b</p></body></html>",
        );
        let cleaned = replace_breaks(&html);

        let title = cleaned.select(&Selector::parse("head > title").unwrap()).next().unwrap();
        assert_eq!(text_of(title), "T");
        let p = cleaned.select(&Selector::parse("body > p").unwrap()).next().unwrap();
        assert_eq!(p.text().collect::<String>(), "a\nb");
        assert_eq!(cleaned.select(&Selector::parse("br").unwrap()).count(), 0);
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = LayoutSelectors { score: "..bad[".to_string(), ..LayoutSelectors::default() };
        assert!(matches!(Layout::compile(&selectors), Err(Error::Selector { .. })));
    }
}
