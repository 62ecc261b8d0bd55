//! CSS selector subset
//!
//! Supports what the page runtime queries with: type selectors, `#id`,
//! `.class`, `[attr]` / `[attr=value]` compounds and comma-separated lists.
//! Combinators (descendant, child, sibling) are rejected.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{cut, map, opt, value},
    error::{context, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
    Finish, IResult,
};
use smallvec::SmallVec;
use std::fmt;

use showcase_core::{Result, ShowcaseError};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// View of an element for selector matching
pub trait SelectorTarget {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Attribute condition inside a compound
#[derive(Clone, Debug, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector such as `img.lazy[data-src]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    attributes: SmallVec<[AttributeMatch; 1]>,
}

impl Compound {
    pub fn matches<T: SelectorTarget + ?Sized>(&self, target: &T) -> bool {
        if let Some(tag) = &self.tag {
            if !target.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if target.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| target.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|a| match (&a.value, target.attribute(&a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// A parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: SmallVec<[Compound; 2]>,
}

impl Selector {
    /// Parse a selector list such as `.value-card, .tech-card`
    pub fn parse(source: &str) -> Result<Self> {
        let (rest, alternatives) = selector_list(source)
            .finish()
            .map_err(|e| selector_error(source, &format_verbose_error(&e)))?;

        if !rest.trim().is_empty() {
            let reason = match rest.chars().next() {
                Some(c) if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                    "combinators are not supported".to_string()
                }
                _ => format!("unexpected input \"{}\"", rest.trim()),
            };
            return Err(selector_error(source, &reason));
        }

        Ok(Self {
            source: source.trim().to_string(),
            alternatives: alternatives.into_iter().collect(),
        })
    }

    /// Selector text as written, for backends with native matching
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches<T: SelectorTarget + ?Sized>(&self, target: &T) -> bool {
        self.alternatives.iter().any(|c| c.matches(target))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn selector_error(selector: &str, reason: &str) -> ShowcaseError {
    ShowcaseError::Selector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

/// Format a VerboseError into a short reason
fn format_verbose_error(err: &VerboseError<&str>) -> String {
    let parts: Vec<String> = err
        .errors
        .iter()
        .map(|(input, kind)| match kind {
            VerboseErrorKind::Context(ctx) => format!("in {}", ctx),
            VerboseErrorKind::Char(c) => {
                let preview: String = input.chars().take(20).collect();
                format!("expected '{}' near \"{}\"", c, preview)
            }
            VerboseErrorKind::Nom(ek) => format!("{:?}", ek),
        })
        .collect();

    if parts.is_empty() {
        "unknown parse error".to_string()
    } else {
        parts.join(", ")
    }
}

/// Parse an identifier (alphanumeric, hyphen, underscore)
fn identifier<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Comma-separated compounds; trailing input is left for the caller
fn selector_list(input: &str) -> ParseResult<Vec<Compound>> {
    context(
        "selector list",
        preceded(
            multispace0,
            separated_list1(delimited(multispace0, char(','), multispace0), compound),
        ),
    )(input)
}

/// One piece of a compound after the type selector
enum Part<'a> {
    Id(&'a str),
    Class(&'a str),
    Attribute(AttributeMatch),
}

/// `tag`, `*` or nothing
fn type_selector(input: &str) -> ParseResult<Option<&str>> {
    alt((value(None, char('*')), map(identifier, Some)))(input)
}

/// Parse an ID selector: #identifier
fn id_selector(input: &str) -> ParseResult<Part<'_>> {
    context("ID selector", map(preceded(char('#'), cut(identifier)), Part::Id))(input)
}

/// Parse a class selector: .identifier
fn class_selector(input: &str) -> ParseResult<Part<'_>> {
    context(
        "class selector",
        map(preceded(char('.'), cut(identifier)), Part::Class),
    )(input)
}

/// Quoted or bare attribute value
fn attribute_value(input: &str) -> ParseResult<&str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        identifier,
    ))(input)
}

/// `name` or `name=value` inside the brackets
fn attribute_body(input: &str) -> ParseResult<(&str, Option<&str>)> {
    let (input, name) = delimited(multispace0, identifier, multispace0)(input)?;
    let (input, value) = opt(delimited(
        char('='),
        delimited(multispace0, attribute_value, multispace0),
        multispace0,
    ))(input)?;
    let (input, _) = char(']')(input)?;
    Ok((input, (name, value)))
}

/// Parse an attribute selector: [name] or [name=value]
fn attribute_selector(input: &str) -> ParseResult<Part<'_>> {
    context("attribute selector", |input| {
        let (input, _) = char('[')(input)?;
        let (input, (name, value)) = cut(attribute_body)(input)?;

        Ok((
            input,
            Part::Attribute(AttributeMatch {
                name: name.to_string(),
                value: value.map(str::to_string),
            }),
        ))
    })(input)
}

/// Parse a compound such as `img.lazy[data-src]`
fn compound(input: &str) -> ParseResult<Compound> {
    context("compound selector", |input| {
        let (input, tag) = opt(type_selector)(input)?;
        let (input, parts) = many0(alt((id_selector, class_selector, attribute_selector)))(input)?;

        if tag.is_none() && parts.is_empty() {
            return Err(nom::Err::Error(VerboseError::from_error_kind(
                input,
                ErrorKind::Verify,
            )));
        }

        let mut compound = Compound {
            tag: tag.flatten().map(str::to_ascii_lowercase),
            ..Compound::default()
        };
        for part in parts {
            match part {
                Part::Id(id) => compound.id = Some(id.to_string()),
                Part::Class(class) => compound.classes.push(class.to_string()),
                Part::Attribute(attribute) => compound.attributes.push(attribute),
            }
        }
        Ok((input, compound))
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        tag: &'static str,
        classes: Vec<&'static str>,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl SelectorTarget for Fake {
        fn tag(&self) -> &str {
            self.tag
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
        }
    }

    fn nav_link() -> Fake {
        Fake {
            tag: "a",
            classes: vec!["nav-link", "active"],
            attrs: vec![("data-target", "metrics"), ("id", "link-metrics")],
        }
    }

    #[test]
    fn test_class_and_list() {
        let sel = Selector::parse(".value-card, .nav-link").unwrap();
        assert!(sel.matches(&nav_link()));
        assert!(!Selector::parse(".value-card").unwrap().matches(&nav_link()));
    }

    #[test]
    fn test_compound() {
        assert!(Selector::parse("a.nav-link.active").unwrap().matches(&nav_link()));
        assert!(Selector::parse("#link-metrics").unwrap().matches(&nav_link()));
        assert!(Selector::parse("[data-target=metrics]").unwrap().matches(&nav_link()));
        assert!(Selector::parse("a[data-target='metrics']").unwrap().matches(&nav_link()));
        assert!(!Selector::parse("img[data-src]").unwrap().matches(&nav_link()));
        assert!(!Selector::parse("[data-target=home]").unwrap().matches(&nav_link()));
    }

    #[test]
    fn test_rejects_combinators() {
        assert!(matches!(
            Selector::parse(".nav .link"),
            Err(ShowcaseError::Selector { .. })
        ));
        assert!(Selector::parse(".a,,.b").is_err());
        assert!(Selector::parse("[data-src").is_err());
        assert!(Selector::parse(".").is_err());
    }

    #[test]
    fn test_error_reasons() {
        let reason = |source: &str| match Selector::parse(source) {
            Err(ShowcaseError::Selector { reason, .. }) => reason,
            other => panic!("expected selector error, got {:?}", other),
        };
        assert_eq!(reason("ul > li"), "combinators are not supported");
        assert_eq!(reason(".nav .link"), "combinators are not supported");
        assert!(reason("#").contains("in ID selector"));
        assert!(reason("[data-target=").contains("in attribute selector"));
        assert!(reason("a!").starts_with("unexpected input"));
    }

    #[test]
    fn test_quoted_values_and_whitespace() {
        let card = Fake {
            tag: "div",
            classes: vec!["tech-card"],
            attrs: vec![("title", "two words")],
        };
        assert!(Selector::parse(" div.tech-card[ title = \"two words\" ] ").unwrap().matches(&card));
        assert!(Selector::parse("*.tech-card").unwrap().matches(&card));
        assert!(Selector::parse("DIV").unwrap().matches(&card));
        assert_eq!(Selector::parse(" .a , .b ").unwrap().as_str(), ".a , .b");
    }
}
