//! URL rewriting collaborators.
//!
//! The stream core never looks for URLs itself. It hands each batch to a
//! [`Rewrite`] implementation together with the caller's [`Replacer`].
//!
//! - [`Replacer`] - Maps one URL to its replacement
//! - [`Rewrite`] - Finds URLs in a batch and applies a replacer
//! - [`CssUrlRewriter`] - Default rewriter for CSS `url(...)` and `@import`

mod css;

pub use css::CssUrlRewriter;

use crate::error::{BoxError, RewriteError};

/// Maps a URL to the URL that should replace it.
///
/// Implemented for every `Fn(&str) -> Result<String, E>`. Use [`map_urls`]
/// for infallible closures.
///
/// # Example
///
/// ```
/// use cssurl::Replacer;
///
/// let cdn = |url: &str| -> Result<String, std::io::Error> {
///     Ok(format!("https://cdn.example.com/{url}"))
/// };
/// assert_eq!(cdn.replace("a.png").unwrap(), "https://cdn.example.com/a.png");
/// ```
pub trait Replacer {
    /// Returns the replacement for `url`.
    fn replace(&self, url: &str) -> Result<String, BoxError>;
}

impl<F, E> Replacer for F
where
    F: Fn(&str) -> Result<String, E>,
    E: Into<BoxError>,
{
    fn replace(&self, url: &str) -> Result<String, BoxError> {
        self(url).map_err(Into::into)
    }
}

/// Replacer built from an infallible closure. See [`map_urls`].
#[derive(Debug, Clone, Copy)]
pub struct MapUrls<F>(F);

impl<F> Replacer for MapUrls<F>
where
    F: Fn(&str) -> String,
{
    fn replace(&self, url: &str) -> Result<String, BoxError> {
        Ok((self.0)(url))
    }
}

/// Wraps an infallible closure as a [`Replacer`].
///
/// # Example
///
/// ```
/// use cssurl::{map_urls, Replacer};
///
/// let replacer = map_urls(|url| url.replace("a.png", "b.png"));
/// assert_eq!(replacer.replace("img/a.png").unwrap(), "img/b.png");
/// ```
pub fn map_urls<F>(f: F) -> MapUrls<F>
where
    F: Fn(&str) -> String,
{
    MapUrls(f)
}

/// Finds URLs in a batch of text and replaces them.
///
/// A fresh value is created for every batch (`Default`), so any state an
/// implementation keeps lives for one call only.
pub trait Rewrite {
    /// Rewrites every URL in `text` through `replacer`.
    ///
    /// The first failure aborts the batch; no partial output is returned.
    fn rewrite(&mut self, text: &str, replacer: &dyn Replacer) -> Result<String, RewriteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_replacer() {
        let replacer = |url: &str| -> Result<String, std::fmt::Error> { Ok(url.to_uppercase()) };
        assert_eq!(replacer.replace("a.png").unwrap(), "A.PNG");
    }

    #[test]
    fn test_failing_closure_replacer() {
        let replacer = |_: &str| -> Result<String, BoxError> { Err("unmapped".into()) };
        let err = replacer.replace("a.png").unwrap_err();
        assert_eq!(err.to_string(), "unmapped");
    }

    #[test]
    fn test_map_urls() {
        let replacer = map_urls(|url| format!("/static/{url}"));
        assert_eq!(replacer.replace("a.png").unwrap(), "/static/a.png");
    }

    #[test]
    fn test_replacer_as_trait_object() {
        let replacer = map_urls(str::to_owned);
        let dynamic: &dyn Replacer = &replacer;
        assert_eq!(dynamic.replace("x").unwrap(), "x");
    }
}
