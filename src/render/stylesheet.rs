//! Document stylesheet.

use super::Layout;

const BASE: &str = r#"
body { font-family: "Helvetica Neue", Arial, sans-serif; color: #1f2933; line-height: 1.5; margin: 0; }
.page { max-width: 800px; margin: 0 auto; padding: 48px 56px; }
.page h1 { font-size: 2.2em; margin: 0 0 0.4em; }
.page h2 { font-size: 1.5em; border-bottom: 2px solid #e4e7eb; padding-bottom: 0.2em; }
.page-cover { text-align: center; padding-top: 160px; }
.subtitle, .byline { color: #616e7c; }
table { width: 100%; border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #cbd2d9; padding: 6px 10px; text-align: left; }
th { background: #f5f7fa; }
table.details th { width: 35%; }
.callout { background: #f0f4f8; border-left: 4px solid #2680c2; padding: 12px 16px; }
.toc { padding-left: 1.2em; }
.toc li { display: flex; justify-content: space-between; }
.tag { display: inline-block; background: #e4e7eb; border-radius: 4px; padding: 0 6px; margin-right: 4px; }
.signatures { display: flex; gap: 48px; margin-top: 48px; }
.signature { flex: 1; border-top: 1px solid #1f2933; padding-top: 8px; }
.mermaid { margin: 1.5em 0; text-align: center; }
"#;

const SCREEN: &str = r#"
.page { box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12); margin-bottom: 24px; background: #fff; }
.page-break { height: 0; }
"#;

const PRINT: &str = r#"
@page { size: A4; margin: 20mm; }
.page { padding: 0; max-width: none; }
.page-break { page-break-after: always; break-after: page; }
.page-break:last-child { page-break-after: auto; break-after: auto; }
"#;

/// The `<style>` block prepended once to every composed document.
pub fn stylesheet(layout: Layout) -> String {
    let variant = match layout {
        Layout::Screen => SCREEN,
        Layout::Print => PRINT,
    };
    let mut out = String::with_capacity(BASE.len() + variant.len() + 32);
    out.push_str("<style>");
    out.push_str(BASE);
    out.push_str(variant);
    out.push_str("</style>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_variant_breaks_pages() {
        let print = stylesheet(Layout::Print);
        assert!(print.starts_with("<style>"));
        assert!(print.contains("@page"));
        assert!(print.contains("page-break-after: always"));
        assert!(!stylesheet(Layout::Screen).contains("@page"));
    }
}
