//! Selector matching
//!
//! A small CSS selector subset: selector lists of compound selectors made
//! of a tag (or `*`), `#id`, `.class`, `[attr]`, `[attr=value]` and the
//! `:checked`, `:disabled`, `:enabled` pseudo-classes. Combinators are
//! rejected; widgets bind to elements by class, not by structure.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::ElementData;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudo(String),

    #[error("combinators are not supported in {0:?}")]
    Combinator(String),
}

/// Supported pseudo-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    Checked,
    Disabled,
    Enabled,
}

impl PseudoClass {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "checked" => Some(Self::Checked),
            "disabled" => Some(Self::Disabled),
            "enabled" => Some(Self::Enabled),
            _ => None,
        }
    }

    fn matches(self, el: &ElementData) -> bool {
        match self {
            Self::Checked => el.checked,
            Self::Disabled => el.disabled,
            Self::Enabled => !el.disabled,
        }
    }
}

/// One compound selector, e.g. `input.select-one:checked`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// None matches any tag
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, Option<String>)>,
    pub pseudo: Vec<PseudoClass>,
}

impl CompoundSelector {
    pub fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|(name, value)| match value {
                Some(v) => el.get_attr(name) == Some(v.as_str()),
                None => el.get_attr(name).is_some(),
            })
            && self.pseudo.iter().all(|p| p.matches(el))
    }
}

/// Selector list (`a, b`); matches if any member matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<CompoundSelector>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parser = Parser {
            src: input,
            chars: input.char_indices().peekable(),
        };
        let mut compounds = Vec::new();
        loop {
            parser.skip_ws();
            compounds.push(parser.compound()?);
            let saw_ws = parser.skip_ws();
            match parser.chars.next() {
                None => break,
                Some((_, ',')) => continue,
                Some((_, '>' | '+' | '~')) => {
                    return Err(SelectorError::Combinator(input.trim().to_string()));
                }
                Some(_) if saw_ws => {
                    return Err(SelectorError::Combinator(input.trim().to_string()));
                }
                Some((pos, ch)) => return Err(SelectorError::UnexpectedChar { ch, pos }),
            }
        }

        Ok(Self {
            source: input.trim().to_string(),
            compounds,
        })
    }

    /// Selector matching elements with the given class
    pub fn class(class: &str) -> Self {
        Self {
            source: format!(".{class}"),
            compounds: vec![CompoundSelector {
                classes: vec![class.to_string()],
                ..Default::default()
            }],
        }
    }

    /// Selector matching elements whose attribute `name` equals `value`
    pub fn attr_equals(name: &str, value: &str) -> Self {
        Self {
            source: format!("[{name}=\"{value}\"]"),
            compounds: vec![CompoundSelector {
                attrs: vec![(name.to_ascii_lowercase(), Some(value.to_string()))],
                ..Default::default()
            }],
        }
    }

    pub fn matches(&self, el: &ElementData) -> bool {
        self.compounds.iter().any(|c| c.matches(el))
    }

    pub fn compounds(&self) -> &[CompoundSelector] {
        &self.compounds
    }

    /// The selector text as parsed
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    /// Skip whitespace, reporting whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {
            skipped = true;
        }
        skipped
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|(_, c)| c.is_alphanumeric() || *c == '-' || *c == '_')
        {
            out.push(c);
        }
        out
    }

    /// Identifier that must be non-empty
    fn required_ident(&mut self) -> Result<String, SelectorError> {
        let ident = self.ident();
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }

    fn unexpected(&mut self) -> SelectorError {
        match self.chars.peek() {
            Some(&(pos, ch)) => SelectorError::UnexpectedChar { ch, pos },
            None => SelectorError::UnexpectedChar {
                ch: self.src.chars().last().unwrap_or(' '),
                pos: self.src.len(),
            },
        }
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::default();
        let mut consumed = false;

        if self.chars.next_if(|(_, c)| *c == '*').is_some() {
            consumed = true;
        } else {
            let tag = self.ident();
            if !tag.is_empty() {
                compound.tag = Some(tag.to_ascii_lowercase());
                consumed = true;
            }
        }

        while let Some(&(_, c)) = self.chars.peek() {
            match c {
                '#' => {
                    self.chars.next();
                    compound.id = Some(self.required_ident()?);
                }
                '.' => {
                    self.chars.next();
                    compound.classes.push(self.required_ident()?);
                }
                '[' => {
                    self.chars.next();
                    compound.attrs.push(self.attribute()?);
                }
                ':' => {
                    self.chars.next();
                    let name = self.required_ident()?;
                    let pseudo = PseudoClass::parse(&name.to_ascii_lowercase())
                        .ok_or(SelectorError::UnsupportedPseudo(name))?;
                    compound.pseudo.push(pseudo);
                }
                _ => break,
            }
            consumed = true;
        }

        if !consumed {
            return Err(match self.chars.peek() {
                None => SelectorError::Empty,
                Some(_) => self.unexpected(),
            });
        }
        Ok(compound)
    }

    /// `[name]` or `[name=value]`, opening bracket already consumed
    fn attribute(&mut self) -> Result<(String, Option<String>), SelectorError> {
        self.skip_ws();
        let name = self.required_ident()?.to_ascii_lowercase();
        self.skip_ws();
        match self.chars.next() {
            Some((_, ']')) => Ok((name, None)),
            Some((_, '=')) => {
                self.skip_ws();
                let value = match self.chars.next_if(|(_, c)| *c == '"' || *c == '\'') {
                    Some((_, quote)) => {
                        let mut value = String::new();
                        loop {
                            match self.chars.next() {
                                Some((_, c)) if c == quote => break,
                                Some((_, c)) => value.push(c),
                                None => return Err(SelectorError::UnterminatedAttribute),
                            }
                        }
                        value
                    }
                    None => {
                        let mut value = String::new();
                        while let Some((_, c)) =
                            self.chars.next_if(|(_, c)| *c != ']' && !c.is_whitespace())
                        {
                            value.push(c);
                        }
                        value
                    }
                };
                self.skip_ws();
                match self.chars.next() {
                    Some((_, ']')) => Ok((name, Some(value))),
                    _ => Err(SelectorError::UnterminatedAttribute),
                }
            }
            Some((pos, ch)) => Err(SelectorError::UnexpectedChar { ch, pos }),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox(classes: &str, checked: bool) -> ElementData {
        let mut el = ElementData::new("input");
        el.set_attr("type", "checkbox");
        el.set_attr("class", classes);
        el.checked = checked;
        el
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("input.select-one[type=checkbox]:checked").unwrap();
        let c = &sel.compounds()[0];
        assert_eq!(c.tag.as_deref(), Some("input"));
        assert_eq!(c.classes, vec!["select-one".to_string()]);
        assert_eq!(c.attrs, vec![("type".to_string(), Some("checkbox".to_string()))]);
        assert_eq!(c.pseudo, vec![PseudoClass::Checked]);
    }

    #[test]
    fn test_selector_list_matches_any() {
        let sel = Selector::parse(".select-one, .select-all").unwrap();
        assert_eq!(sel.compounds().len(), 2);
        assert!(sel.matches(&checkbox("select-all", false)));
        assert!(sel.matches(&checkbox("select-one", false)));
        assert!(!sel.matches(&checkbox("other", false)));
    }

    #[test]
    fn test_checked_pseudo() {
        let sel = Selector::parse(".select-one:checked").unwrap();
        assert!(sel.matches(&checkbox("select-one", true)));
        assert!(!sel.matches(&checkbox("select-one", false)));
    }

    #[test]
    fn test_quoted_attribute_value() {
        let sel = Selector::parse("[name='principal, total']").unwrap();
        let mut el = ElementData::new("input");
        el.set_attr("name", "principal, total");
        assert!(sel.matches(&el));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse(".input-group-btn .btn-dropdown"),
            Err(SelectorError::Combinator(_))
        ));
        assert!(matches!(Selector::parse("div > p"), Err(SelectorError::Combinator(_))));
        assert_eq!(
            Selector::parse("[name=x"),
            Err(SelectorError::UnterminatedAttribute)
        );
        assert_eq!(
            Selector::parse(":hover"),
            Err(SelectorError::UnsupportedPseudo("hover".to_string()))
        );
        assert!(matches!(
            Selector::parse(".a,"),
            Err(SelectorError::Empty)
        ));
        assert!(matches!(
            Selector::parse("#"),
            Err(SelectorError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn test_class_constructor() {
        let sel = Selector::class("hidden");
        assert_eq!(sel.as_str(), ".hidden");
        assert!(sel.matches(&checkbox("hidden", false)));
    }
}
