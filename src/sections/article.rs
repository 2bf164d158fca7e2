//! Sections shared by generic documentation, pages and blog posts, plus the
//! table of contents.

use super::{item_text, SectionContext};
use crate::model::{Page, SectionId};
use crate::render::markup::{escape_html, PageBuilder};

/// Sections that never appear as table of contents entries.
fn is_front_matter(section: SectionId) -> bool {
    matches!(
        section,
        SectionId::Cover
            | SectionId::TableOfContents
            | SectionId::Letterhead
            | SectionId::ArticleHeader
            | SectionId::InvoiceHeader
    )
}

pub(super) fn table_of_contents(ctx: &SectionContext<'_>) -> Page {
    let mut toc = String::from("<ol class=\"toc\">\n");
    for (position, section) in ctx.outline.iter().enumerate() {
        if is_front_matter(*section) {
            continue;
        }
        toc.push_str(&format!(
            "<li><a href=\"#page-{}\">{}</a><span class=\"toc-page\">{}</span></li>\n",
            section.as_str(),
            escape_html(section.title()),
            position + 1
        ));
    }
    toc.push_str("</ol>");
    PageBuilder::new(SectionId::TableOfContents).raw(&toc).finish()
}

pub(super) fn article_header(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut page = PageBuilder::untitled(SectionId::ArticleHeader)
        .heading(1, &f.text("title", "[Untitled]"));
    if f.has("subtitle") {
        page = page.paragraph_class("subtitle", &f.text("subtitle", ""));
    }
    let byline = format!(
        "{} · {}",
        f.first_of(&["author.name", "author"], "[Author]"),
        f.date("publishDate")
    );
    page = page.paragraph_class("byline", &byline);

    let tags = f.strings("tags");
    if !tags.is_empty() {
        let chips: String = tags
            .iter()
            .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
            .collect();
        page = page.raw(&format!("<div class=\"tags\">{}</div>", chips));
    }
    if f.has("excerpt") {
        page = page.callout(&f.text("excerpt", ""));
    }
    page.finish()
}

pub(super) fn article_body(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut page = PageBuilder::untitled(SectionId::ArticleBody);

    // `content` is editor-produced markup and is placed as-is.
    if let Some(content) = f.get("content").and_then(|v| v.as_str()) {
        return page.raw(content).finish();
    }

    let parts = f.array("sections");
    if parts.is_empty() {
        return page
            .paragraph("[Start writing your content here.]")
            .finish();
    }
    for part in parts {
        page = page
            .heading(2, &item_text(part, "heading", "[Heading]"))
            .paragraph(&item_text(part, "body", "[Section content]"));
    }
    page.finish()
}

pub(super) fn references(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut list = String::from("<ol class=\"references\">\n");
    for reference in f.array("references") {
        let title = item_text(reference, "title", "[Reference]");
        match reference.get("url").and_then(|u| u.as_str()).filter(|u| !u.trim().is_empty()) {
            Some(url) => list.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_html(url.trim()),
                escape_html(&title)
            )),
            None => list.push_str(&format!("<li>{}</li>\n", escape_html(&title))),
        }
    }
    list.push_str("</ol>");
    PageBuilder::new(SectionId::References).raw(&list).finish()
}

pub(super) fn author_bio(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::AuthorBio)
        .heading(3, &f.first_of(&["author.name", "author"], "[Author]"))
        .paragraph(&f.text("author.bio", "[A short biography of the author.]"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;
    use crate::render::ComposeOptions;
    use serde_json::{json, Value};

    fn ctx_for<'a>(
        data: &'a Value,
        options: &'a ComposeOptions,
        outline: &'a [SectionId],
    ) -> SectionContext<'a> {
        SectionContext::new(DocumentType::Blog, data, options, outline)
    }

    #[test]
    fn test_toc_links_sections_in_order() {
        let data = json!({});
        let options = ComposeOptions::default();
        let outline = [
            SectionId::Cover,
            SectionId::TableOfContents,
            SectionId::ExecutiveSummary,
            SectionId::Pricing,
        ];
        let page = table_of_contents(&ctx_for(&data, &options, &outline));

        let summary = page.body.find("#page-executive-summary").unwrap();
        let pricing = page.body.find("#page-pricing").unwrap();
        assert!(summary < pricing);
        assert!(!page.body.contains("#page-cover"));
        assert!(page.body.contains("<span class=\"toc-page\">4</span>"));
    }

    #[test]
    fn test_article_body_modes() {
        let options = ComposeOptions::default();
        let outline = [SectionId::ArticleBody];

        let data = json!({ "content": "<p>Hello <em>world</em></p>" });
        assert!(article_body(&ctx_for(&data, &options, &outline))
            .body
            .contains("<em>world</em>"));

        let data = json!({ "sections": [{ "heading": "Intro", "body": "Text" }] });
        let body = article_body(&ctx_for(&data, &options, &outline)).body;
        assert!(body.contains("<h2>Intro</h2>"));

        let data = json!({});
        assert!(article_body(&ctx_for(&data, &options, &outline))
            .body
            .contains("[Start writing your content here.]"));
    }

    #[test]
    fn test_references_escape_urls() {
        let data = json!({ "references": [
            { "title": "Reference", "url": "https://example.com/?a=1&b=\"2\"" },
            "Plain citation"
        ]});
        let options = ComposeOptions::default();
        let outline = [SectionId::References];
        let body = references(&ctx_for(&data, &options, &outline)).body;
        assert!(body.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(body.contains("<li>Plain citation</li>"));
    }

    #[test]
    fn test_header_with_tags() {
        let data = json!({ "title": "Launch", "author": { "name": "Ada" }, "tags": ["rust", "docs"] });
        let options = ComposeOptions::default();
        let outline = [SectionId::ArticleHeader];
        let body = article_header(&ctx_for(&data, &options, &outline)).body;
        assert!(body.contains("<h1>Launch</h1>"));
        assert!(body.contains("Ada ·"));
        assert!(body.contains("<span class=\"tag\">rust</span>"));
    }
}
