//! Scalar extraction from HTML documents

use crate::core::{Error, Result};
use scraper::{Html, Selector};

/// Compiled selector applied to fetched documents
pub struct Extractor {
    selector: Selector,
    expression: String,
}

impl Extractor {
    /// Compile a CSS selector expression
    ///
    /// An empty or uncompilable expression is a configuration error, raised
    /// here so it can never surface mid-poll.
    pub fn new(expression: &str) -> Result<Self> {
        if expression.trim().is_empty() {
            return Err(Error::Config("Selector must not be empty".to_string()));
        }

        let selector = Selector::parse(expression)
            .map_err(|e| Error::Config(format!("Invalid selector '{}': {}", expression, e)))?;

        Ok(Self {
            selector,
            expression: expression.to_string(),
        })
    }

    /// Extract the scalar reading from an HTML body
    ///
    /// Selects the first node matching the selector and parses its
    /// whitespace-trimmed text as a finite float. No match or empty text is
    /// `Error::Extraction`; unparseable or non-finite text is `Error::Parse`.
    /// No default value is ever substituted.
    pub fn extract(&self, body: &str) -> Result<f64> {
        let document = Html::parse_document(body);

        let element = document.select(&self.selector).next().ok_or_else(|| {
            Error::Extraction(format!("No element matches '{}'", self.expression))
        })?;

        let text = element.text().collect::<String>();
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::Extraction(format!(
                "Element matching '{}' has no text",
                self.expression
            )));
        }

        let value: f64 = text
            .parse()
            .map_err(|_| Error::Parse(format!("Not a number: '{}'", text)))?;

        if !value.is_finite() {
            return Err(Error::Parse(format!("Not a finite number: '{}'", text)));
        }

        Ok(value)
    }
}
