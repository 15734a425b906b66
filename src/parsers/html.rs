use crate::error::{Result, ScrapeError};
use crate::utils::normalize_text;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page that can be queried by tag, class and attribute
pub struct Document {
    html: Html,
}

/// A single element inside a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl Document {
    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// First element matching a raw CSS selector
    pub fn select_one(&self, css: &str) -> Result<Option<Element<'_>>> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).next().map(Element::from))
    }

    /// All elements matching a raw CSS selector
    pub fn select_all(&self, css: &str) -> Result<Vec<Element<'_>>> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).map(Element::from).collect())
    }

    /// First `tag` element, optionally carrying `class`
    pub fn find_one(&self, tag: &str, class: Option<&str>) -> Result<Option<Element<'_>>> {
        let classes: Vec<&str> = class.into_iter().collect();
        self.select_one(&build_selector(tag, &classes, None))
    }

    /// All `tag` elements carrying every class in `classes` and, if given, the attribute `attr`
    pub fn find_all(
        &self,
        tag: &str,
        classes: &[&str],
        attr: Option<&str>,
    ) -> Result<Vec<Element<'_>>> {
        let selector = compile(&build_selector(tag, classes, attr))?;
        let elements = self
            .html
            .select(&selector)
            .map(Element::from)
            .collect::<Vec<_>>();

        ::log::trace!("Matched {} <{}> elements", elements.len(), tag);
        Ok(elements)
    }
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }
}

impl<'a> Element<'a> {
    /// Concatenated text of all descendant text nodes, as found
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// Text with whitespace runs collapsed and the ends trimmed
    pub fn clean_text(&self) -> String {
        normalize_text(&self.text())
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    pub fn tag_name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// First descendant `tag` element, optionally carrying `class`
    pub fn find_one(&self, tag: &str, class: Option<&str>) -> Result<Option<Element<'a>>> {
        let classes: Vec<&str> = class.into_iter().collect();
        let selector = compile(&build_selector(tag, &classes, None))?;
        Ok(self.inner.select(&selector).next().map(Element::from))
    }

    /// All descendants matching a raw CSS selector
    pub fn select_all(&self, css: &str) -> Result<Vec<Element<'a>>> {
        let selector = compile(css)?;
        Ok(self.inner.select(&selector).map(Element::from).collect())
    }
}

/// Build a CSS selector such as `a.itemLink.product-item[href]`.
///
/// Class strings may hold several space separated class names.
pub fn build_selector(tag: &str, classes: &[&str], attr: Option<&str>) -> String {
    let mut selector = tag.to_string();
    for class in classes.iter().flat_map(|c| c.split_whitespace()) {
        selector.push('.');
        selector.push_str(class);
    }
    if let Some(attr) = attr {
        selector.push('[');
        selector.push_str(attr);
        selector.push(']');
    }
    selector
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}
