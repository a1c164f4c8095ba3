//! CSS URL rewriter.

use std::sync::LazyLock;

use regex::Regex;

use super::{Replacer, Rewrite};
use crate::error::RewriteError;

// Groups 1-3: url("..."), url('...'), url(...); groups 4-5: @import "..." / '...'.
// No part of a match may cross a line break. `\b` keeps `myurl(` out; a
// leading `-` (as in `-url(`) is rejected in `rewrite`.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?i:url)\([ \t]*(?:"([^"\n]*)"|'([^'\n]*)'|([^\s'"()]+))[ \t]*\)|@import[ \t]+(?:"([^"\n]*)"|'([^'\n]*)')"#,
    )
    .expect("url pattern is valid")
});

/// Rewrites URLs in CSS text.
///
/// Handles `url(...)` in its unquoted, single-quoted and double-quoted forms
/// (any case, spaces and tabs inside the parentheses allowed) and bare
/// `@import "..."` strings. Only the URL text is replaced; quotes, spacing
/// and everything around it are kept. Empty URLs are left alone.
///
/// A reference is only recognized when it sits on a single line, so the
/// result does not depend on how the text was split into batches.
///
/// # Example
///
/// ```
/// use cssurl::{map_urls, CssUrlRewriter, Rewrite};
///
/// let replacer = map_urls(|url| format!("/assets/{url}"));
/// let out = CssUrlRewriter::default()
///     .rewrite("a{background:url('a.png')}", &replacer)
///     .unwrap();
/// assert_eq!(out, "a{background:url('/assets/a.png')}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CssUrlRewriter;

impl Rewrite for CssUrlRewriter {
    fn rewrite(&mut self, text: &str, replacer: &dyn Replacer) -> Result<String, RewriteError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in URL_PATTERN.captures_iter(text) {
            let whole = caps.get(0).map_or(0, |m| m.start());
            if text[..whole].ends_with('-') && !text[whole..].starts_with('@') {
                continue;
            }
            let Some(url) = caps.iter().skip(1).flatten().next() else {
                continue;
            };
            if url.is_empty() {
                continue;
            }

            let replacement =
                replacer
                    .replace(url.as_str())
                    .map_err(|source| RewriteError::Replace {
                        url: url.as_str().to_owned(),
                        source,
                    })?;

            out.push_str(&text[last..url.start()]);
            out.push_str(&replacement);
            last = url.end();
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::rewrite::map_urls;
    use std::cell::RefCell;

    fn rewrite(text: &str, replacer: &dyn Replacer) -> String {
        CssUrlRewriter.rewrite(text, replacer).unwrap()
    }

    #[test]
    fn test_unquoted() {
        let replacer = map_urls(|url| url.replace("a.png", "b.png"));
        assert_eq!(rewrite("url(a.png)\n", &replacer), "url(b.png)\n");
    }

    #[test]
    fn test_quoted_forms_keep_quotes() {
        let replacer = map_urls(|url| format!("x/{url}"));
        assert_eq!(
            rewrite(r#"a{b:url("a.png")} c{d:url('c.png')}"#, &replacer),
            r#"a{b:url("x/a.png")} c{d:url('x/c.png')}"#
        );
    }

    #[test]
    fn test_whitespace_and_case() {
        let replacer = map_urls(|url| format!("x/{url}"));
        assert_eq!(rewrite("URL(  a.png  )", &replacer), "URL(  x/a.png  )");
    }

    #[test]
    fn test_import_string() {
        let replacer = map_urls(|url| format!("x/{url}"));
        assert_eq!(
            rewrite("@import \"base.css\";\n@import url(more.css);", &replacer),
            "@import \"x/base.css\";\n@import url(x/more.css);"
        );
    }

    #[test]
    fn test_empty_url_untouched() {
        let replacer = map_urls(|_| "changed".to_owned());
        assert_eq!(rewrite("url() url(\"\")", &replacer), "url() url(\"\")");
    }

    #[test]
    fn test_text_without_urls_unchanged() {
        let replacer = map_urls(|_| "changed".to_owned());
        assert_eq!(rewrite("b{color:red}\n", &replacer), "b{color:red}\n");
        assert_eq!(rewrite("", &replacer), "");
    }

    #[test]
    fn test_url_suffix_of_identifier_untouched() {
        let replacer = map_urls(|url| format!("Z{url}"));
        let text = "a{b:myurl(x.png)} c{d:my-url(y.png)} e{f:_url(z.png)}\n";
        assert_eq!(rewrite(text, &replacer), text);
        assert_eq!(
            rewrite("a{b:url(x.png)}(url(y.png)),url(z.png)", &replacer),
            "a{b:url(Zx.png)}(url(Zy.png)),url(Zz.png)"
        );
    }

    #[test]
    fn test_reference_split_by_line_break_untouched() {
        let replacer = map_urls(|_| "changed".to_owned());
        let text = "url(\"a\n.png\") url(\n a.png)";
        assert_eq!(rewrite(text, &replacer), text);
    }

    #[test]
    fn test_urls_visited_in_order() {
        let seen = RefCell::new(Vec::new());
        let replacer = map_urls(|url| {
            seen.borrow_mut().push(url.to_owned());
            url.to_owned()
        });
        rewrite("url(one.png) url(two.png)\nurl(three.png)", &replacer);
        assert_eq!(*seen.borrow(), ["one.png", "two.png", "three.png"]);
    }

    #[test]
    fn test_replacer_failure_aborts() {
        let replacer = |url: &str| -> Result<String, BoxError> {
            if url == "bad.png" {
                Err("no mapping".into())
            } else {
                Ok(url.to_owned())
            }
        };
        let err = CssUrlRewriter
            .rewrite("url(ok.png) url(bad.png)", &replacer)
            .unwrap_err();
        match err {
            RewriteError::Replace { url, .. } => assert_eq!(url, "bad.png"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
