//! Record extraction for legacy HTML exports.
//!
//! The exports are machine-generated but not always well-formed, so the
//! document is scanned with a handful of tolerant patterns instead of a
//! full DOM: `div` opening tags are located and their attributes parsed,
//! each record container is cut out by counting nested `div`s (bounded by
//! the next container), and text is recovered by stripping tags and
//! decoding entities.
//!
//! A rich record looks like this:
//!
//! ```html
//! <div class="msg_item" id="msg1022">
//!   <div class="from">
//!     <b>Alina Boschenko</b>
//!     <a href="https://vk.com/id1">id1</a>
//!     <a href="https://vk.com/im?sel=1&msgid=1022">2019.05.16 16:52:51</a>
//!   </div>
//!   <div class="msg_body">1111111111</div>
//! </div>
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::Message;
use crate::config::HtmlTemplate;
use crate::error::{ChatstatsError, Result};
use crate::parser::{Parsed, SkipReason};

/// Permalink anchor text format (`2019.05.16 16:52:51`).
pub const PERMALINK_TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

static DIV_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<div\b([^>]*)>").unwrap());

static ELEMENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)([a-z][a-z0-9]*)\b([^>]*)>").unwrap());

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").unwrap());

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .unwrap()
});

static PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<a\b[^>]*>\s*(\d{4}\.\d{2}\.\d{2}\s+\d{2}:\d{2}:\d{2})\s*</a\s*>").unwrap()
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link", "source", "wbr"];

/// An [`HtmlTemplate`] with its patterns compiled.
#[derive(Debug, Clone)]
pub struct HtmlRules {
    template: HtmlTemplate,
    id_pattern: Option<Regex>,
    author: Option<Regex>,
}

impl HtmlRules {
    /// Compiles the template's patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidPattern`] if the message-id pattern
    /// is not a valid regex.
    pub fn compile(template: HtmlTemplate) -> Result<Self> {
        let id_pattern = template
            .id_pattern
            .as_deref()
            .map(|p| Regex::new(p).map_err(|e| ChatstatsError::invalid_pattern(p, e)))
            .transpose()?;

        let author = template
            .author_tag
            .as_deref()
            .map(|tag| {
                let tag = regex::escape(tag);
                let pattern = format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}\s*>");
                Regex::new(&pattern).map_err(|e| ChatstatsError::invalid_pattern(pattern.clone(), e))
            })
            .transpose()?;

        Ok(Self {
            template,
            id_pattern,
            author,
        })
    }

    /// Returns the source template.
    pub fn template(&self) -> &HtmlTemplate {
        &self.template
    }
}

/// One record container cut out of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlRecord<'a> {
    id: Option<String>,
    classes: Vec<String>,
    inner: &'a str,
}

impl<'a> HtmlRecord<'a> {
    /// The container's `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns `true` if the container carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Markup between the container's opening and closing tags.
    pub fn inner(&self) -> &'a str {
        self.inner
    }
}

/// Returns `true` if the document contains a permalink timestamp anchor.
pub fn has_permalink_timestamp(document: &str) -> bool {
    PERMALINK.is_match(document)
}

/// Parses permalink anchor text (`YYYY.MM.DD HH:MM:SS`).
///
/// Runs of whitespace between date and time are accepted.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::html::parse_permalink_timestamp;
/// use chrono::Timelike;
///
/// let ts = parse_permalink_timestamp("2019.05.16 16:52:51").unwrap();
/// assert_eq!(ts.format("%d/%m/%y").to_string(), "16/05/19");
/// assert_eq!(ts.hour(), 16);
///
/// assert!(parse_permalink_timestamp("2019.13.40 25:00:00").is_none());
/// ```
pub fn parse_permalink_timestamp(text: &str) -> Option<NaiveDateTime> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, PERMALINK_TIMESTAMP_FORMAT).ok()
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (name, decode_entities(value))
        })
        .collect()
}

fn attribute<'v>(attributes: &'v [(String, String)], name: &str) -> Option<&'v str> {
    attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn class_list(attributes: &[(String, String)]) -> Vec<String> {
    attribute(attributes, "class")
        .map(|c| c.split_whitespace().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Returns the content of a `name` element whose opening tag ends where
/// `fragment` starts, up to its matching closing tag. Nested elements of
/// the same name are counted; `None` if the element is never closed.
fn element_inner<'a>(fragment: &'a str, name: &str) -> Option<&'a str> {
    let mut depth = 1usize;
    for caps in ELEMENT_TAG.captures_iter(fragment) {
        if !caps[2].eq_ignore_ascii_case(name) || caps[3].trim_end().ends_with('/') {
            continue;
        }
        if &caps[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return Some(&fragment[..caps.get(0)?.start()]);
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// Like [`element_inner`] for a `div`, running to the end of `fragment`
/// when unclosed.
fn div_inner(fragment: &str) -> &str {
    element_inner(fragment, "div").unwrap_or(fragment)
}

/// Cuts a document into records, one per `div` carrying `container_class`.
///
/// Each record ends at its matching `</div>`, or at the next container when
/// the markup is unbalanced.
pub fn split_records<'a>(document: &'a str, container_class: &str) -> Vec<HtmlRecord<'a>> {
    let starts: Vec<(usize, usize, Vec<(String, String)>)> = DIV_OPEN
        .captures_iter(document)
        .filter_map(|caps| {
            let tag = caps.get(0)?;
            let attributes = parse_attributes(&caps[1]);
            class_list(&attributes)
                .iter()
                .any(|c| c == container_class)
                .then(|| (tag.start(), tag.end(), attributes))
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, (_, content_start, attributes))| {
            let limit = starts.get(i + 1).map_or(document.len(), |next| next.0);
            HtmlRecord {
                id: attribute(attributes, "id").map(ToString::to_string),
                classes: class_list(attributes),
                inner: div_inner(&document[*content_start..limit]),
            }
        })
        .collect()
}

/// Finds the first descendant `div` with `class`, returning its offset in
/// `markup` and its inner content.
fn find_div_by_class<'a>(markup: &'a str, class: &str) -> Option<(usize, &'a str)> {
    DIV_OPEN.captures_iter(markup).find_map(|caps| {
        let tag = caps.get(0)?;
        class_list(&parse_attributes(&caps[1]))
            .iter()
            .any(|c| c == class)
            .then(|| (tag.start(), div_inner(&markup[tag.end()..])))
    })
}

/// End offset of the element whose opening tag ends at `from`.
///
/// An unclosed `div` runs to the end of `markup`; any other unclosed
/// element ends with its opening tag.
fn element_end(markup: &str, name: &str, from: usize) -> usize {
    match element_inner(&markup[from..], name) {
        Some(inner) => {
            let close = from + inner.len();
            markup[close..].find('>').map_or(markup.len(), |i| close + i + 1)
        }
        None if name == "div" => markup.len(),
        None => from,
    }
}

/// Drops elements carrying the media marker class, content included.
fn remove_marked_elements<'a>(markup: &'a str, marker: &str) -> Cow<'a, str> {
    if marker.is_empty() || !markup.contains(marker) {
        return Cow::Borrowed(markup);
    }

    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;
    for caps in OPEN_TAG.captures_iter(markup) {
        let Some(tag) = caps.get(0) else { continue };
        if tag.start() < cursor {
            continue;
        }
        if !class_list(&parse_attributes(&caps[2])).iter().any(|c| c == marker) {
            continue;
        }
        out.push_str(&markup[cursor..tag.start()]);
        let name = caps[1].to_ascii_lowercase();
        cursor = if VOID_TAGS.contains(&name.as_str()) || caps[2].trim_end().ends_with('/') {
            tag.end()
        } else {
            element_end(markup, &name, tag.end())
        };
    }
    out.push_str(&markup[cursor..]);
    Cow::Owned(out)
}

/// Decodes the common named entities and numeric character references.
///
/// Unknown entities are left as they are.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::html::decode_entities;
///
/// assert_eq!(decode_entities("a &amp; b &lt;3 &#1087;&#x440;"), "a & b <3 пр");
/// assert_eq!(decode_entities("&unknown;"), "&unknown;");
/// ```
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Converts a markup fragment to plain text.
///
/// Elements with the `media_marker` class are dropped, `<br>` becomes a
/// newline, remaining tags are stripped and entities decoded.
pub fn html_to_text(markup: &str, media_marker: &str) -> String {
    let cleaned = remove_marked_elements(markup, media_marker);
    let with_breaks = LINE_BREAK.replace_all(&cleaned, "\n");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped).trim().to_string()
}

/// Extracts a message from one record, or says why it has none.
///
/// Checks, in order: the message-id pattern ([`SkipReason::Service`]), the
/// text body ([`SkipReason::Media`] when absent or empty once media markers
/// are removed), the author ([`SkipReason::Malformed`]`("sender")`), and the
/// permalink timestamp ([`SkipReason::Malformed`]`("timestamp")` when the
/// template requires one).
///
/// Author and timestamp are searched in the record header, i.e. the markup
/// before the text body, so bold text or dates inside a message never
/// count.
pub fn extract_html_message(
    record: &HtmlRecord<'_>,
    rules: &HtmlRules,
) -> std::result::Result<Message, SkipReason> {
    let template = &rules.template;

    if let Some(id_pattern) = &rules.id_pattern {
        match record.id() {
            Some(id) if id_pattern.is_match(id) => {}
            _ => return Err(SkipReason::Service),
        }
    }

    let (header, body) = if record.has_class(&template.body_class) {
        ("", record.inner())
    } else {
        let (offset, body) =
            find_div_by_class(record.inner(), &template.body_class).ok_or(SkipReason::Media)?;
        (&record.inner()[..offset], body)
    };

    let text = html_to_text(body, &template.media_marker_class);
    if text.is_empty() {
        return Err(SkipReason::Media);
    }
    let mut message = Message::new(text);

    if let Some(author) = &rules.author {
        let sender = author
            .captures(header)
            .map(|caps| html_to_text(&caps[1], &template.media_marker_class))
            .filter(|name| !name.is_empty())
            .ok_or(SkipReason::Malformed("sender"))?;
        message = message.with_sender(sender);
    }

    let timestamp = PERMALINK
        .captures(header)
        .and_then(|caps| parse_permalink_timestamp(&caps[1]));
    match timestamp {
        Some(ts) => message = message.with_timestamp(ts),
        None if template.require_timestamp => return Err(SkipReason::Malformed("timestamp")),
        None => {}
    }

    Ok(message)
}

/// Extracts every record of a document.
///
/// # Errors
///
/// Returns a [`ChatstatsError::Parse`] error when the document contains no
/// record container at all, which means the template doesn't fit the file.
pub fn parse_html_document(document: &str, rules: &HtmlRules) -> Result<Parsed> {
    let container = &rules.template.container_class;
    let records = split_records(document, container);
    if records.is_empty() {
        return Err(ChatstatsError::html_parse(
            format!("no <div class=\"{}\"> records found", container),
            None,
        ));
    }

    let mut parsed = Parsed::default();
    for record in &records {
        let outcome = extract_html_message(record, rules);
        if let Err(reason) = &outcome {
            tracing::debug!(id = record.id().unwrap_or("-"), %reason, "skipped HTML record");
        }
        parsed.push(outcome);
    }
    Ok(parsed)
}
