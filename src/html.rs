//! HTML tag descriptors for entry documents.
//!
//! In production the plugin asks the host to add a stylesheet link to every
//! HTML entry. Hosts that consume tag descriptors use [`HtmlTransformResult`]
//! directly; hosts that want finished markup can call [`inject_tags`].

use minijinja::{Environment, Error};
use once_cell::sync::Lazy;
use serde::Serialize;

const TAG_TEMPLATE: &str = concat!(
    "<{{ tag }}",
    "{% for name, value in attrs %} {{ name }}=\"{{ value | attr }}\"{% endfor %}>",
    "{% if not void %}{{ children | attr }}</{{ tag }}>{% endif %}",
);

const VOID_ELEMENTS: &[&str] = &["base", "br", "hr", "img", "input", "link", "meta"];

static TAG_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_filter("attr", |value: String| -> String { escape_attr(&value) });
    env
});

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Where in the document a tag goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectTo {
    /// End of `<head>`.
    Head,
    /// Start of `<head>`.
    HeadPrepend,
    /// End of `<body>`.
    Body,
    /// Start of `<body>`.
    BodyPrepend,
}

/// An element to add to an HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlTag {
    pub tag: String,
    /// Attributes in output order.
    pub attrs: Vec<(String, String)>,
    pub children: Option<String>,
    pub inject_to: InjectTo,
}

impl HtmlTag {
    /// Creates a `<link rel="stylesheet">` for the head.
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self {
            tag: "link".to_string(),
            attrs: vec![
                ("href".to_string(), href.into()),
                ("rel".to_string(), "stylesheet".to_string()),
            ],
            children: None,
            inject_to: InjectTo::Head,
        }
    }

    /// Returns the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Renders the tag as markup, escaping attribute values and children.
    pub fn render(&self) -> Result<String, Error> {
        let void = VOID_ELEMENTS.contains(&self.tag.as_str());
        TAG_ENV.render_str(
            TAG_TEMPLATE,
            minijinja::context! {
                tag => &self.tag,
                attrs => &self.attrs,
                children => self.children.as_deref().unwrap_or(""),
                void => void,
            },
        )
    }
}

/// The document plus the tags a host should inject into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlTransformResult {
    pub html: String,
    pub tags: Vec<HtmlTag>,
}

/// Joins a public base path and an asset file name.
///
/// Path bases are normalized (`.` and empty segments dropped, `..` applied);
/// URL bases are joined with a single slash.
pub fn join_base(base: &str, file_name: &str) -> String {
    if base.contains("://") || base.starts_with("//") {
        return format!(
            "{}/{}",
            base.trim_end_matches('/'),
            file_name.trim_start_matches('/')
        );
    }

    let absolute = base.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(file_name.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if !absolute => segments.push(".."),
                _ => {}
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Inserts rendered tags into an HTML document.
///
/// Tags sharing an injection point keep their relative order. When the
/// document lacks the anchor element, head tags are prepended to the document
/// and body tags appended.
pub fn inject_tags(html: &str, tags: &[HtmlTag]) -> Result<String, Error> {
    let mut out = html.to_string();

    for point in [
        InjectTo::HeadPrepend,
        InjectTo::Head,
        InjectTo::BodyPrepend,
        InjectTo::Body,
    ] {
        let mut markup = String::new();
        for tag in tags.iter().filter(|t| t.inject_to == point) {
            markup.push_str(&tag.render()?);
            markup.push('\n');
        }
        if markup.is_empty() {
            continue;
        }

        let position = match point {
            InjectTo::HeadPrepend => find_open_tag_end(&out, "head"),
            InjectTo::Head => find_ci(&out, "</head>"),
            InjectTo::BodyPrepend => find_open_tag_end(&out, "body"),
            InjectTo::Body => find_ci(&out, "</body>"),
        };
        let fallback = match point {
            InjectTo::HeadPrepend | InjectTo::Head => 0,
            InjectTo::BodyPrepend | InjectTo::Body => out.len(),
        };
        out.insert_str(position.unwrap_or(fallback), &markup);
    }

    Ok(out)
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(needle)
}

/// Byte offset just past `<name ...>`, skipping longer names like `<header>`.
fn find_open_tag_end(html: &str, name: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", name);
    let mut from = 0;

    while let Some(found) = lower[from..].find(&open) {
        let start = from + found;
        let after = start + open.len();
        match lower[after..].chars().next() {
            Some(c) if c == '>' || c.is_ascii_whitespace() => {
                return lower[after..].find('>').map(|end| after + end + 1);
            }
            _ => from = after,
        }
    }
    None
}
