// ============================================================================
// XliffMerge - ICU Message Model
// ============================================================================
//
// File: src/models/icu.rs
// Responsibility: recognition and canonical rendering of ICU plural/select messages
// Boundaries:
//   - ✅ ICU message parsing (plural, select, selectordinal, nested messages)
//   - ✅ Canonical string rendering
//   - ❌ Should not contain placeholder handling
//   - ❌ Should not contain XML handling
//
// ============================================================================

use std::fmt;

/// Kind of an ICU message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcuKind {
    Plural,
    Select,
    SelectOrdinal,
}

impl IcuKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcuKind::Plural => "plural",
            IcuKind::Select => "select",
            IcuKind::SelectOrdinal => "selectordinal",
        }
    }

    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "plural" => Some(IcuKind::Plural),
            "select" => Some(IcuKind::Select),
            "selectordinal" => Some(IcuKind::SelectOrdinal),
            _ => None,
        }
    }
}

/// One piece of a case body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcuPart {
    Text(String),
    Message(IcuMessage),
}

/// One `selector {body}` alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuCase {
    pub selector: String,
    pub body: Vec<IcuPart>,
}

/// A parsed `{VAR, plural|select, ...}` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuMessage {
    pub variable: String,
    pub kind: IcuKind,
    pub offset: Option<String>,
    pub cases: Vec<IcuCase>,
}

impl IcuMessage {
    /// Parse `input` as exactly one ICU message (surrounding whitespace allowed).
    ///
    /// Returns `None` when the text is not an ICU message or contains
    /// anything besides it.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parser = Parser {
            chars: input.trim().chars().collect(),
            pos: 0,
        };
        let message = parser.message()?;
        if parser.pos == parser.chars.len() {
            Some(message)
        } else {
            None
        }
    }

    /// Canonical rendering, independent of the whitespace used between cases
    pub fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IcuMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {},", self.variable, self.kind.as_str())?;
        if let Some(offset) = &self.offset {
            write!(f, " offset:{}", offset)?;
        }
        for case in &self.cases {
            write!(f, " {} {{", case.selector)?;
            for part in &case.body {
                match part {
                    IcuPart::Text(text) => f.write_str(text)?,
                    IcuPart::Message(message) => write!(f, "{}", message)?,
                }
            }
            f.write_str("}")?;
        }
        f.write_str("}")
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        (self.bump()? == expected).then_some(())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Text up to (not including) the next `,`, trimmed; braces are not allowed.
    fn field(&mut self) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.peek()? {
                ',' => break,
                '{' | '}' => return None,
                c => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    }

    fn message(&mut self) -> Option<IcuMessage> {
        self.expect('{')?;
        let variable = self.field()?;
        self.expect(',')?;
        let kind = IcuKind::from_keyword(&self.field()?)?;
        self.expect(',')?;

        let mut offset = None;
        let mut cases = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == '}' {
                self.pos += 1;
                break;
            }
            let selector = self.selector()?;
            if let Some(value) = selector.strip_prefix("offset:") {
                offset = Some(value.to_string());
                continue;
            }
            self.skip_whitespace();
            self.expect('{')?;
            let body = self.body()?;
            cases.push(IcuCase { selector, body });
        }

        if cases.is_empty() {
            return None;
        }
        Some(IcuMessage {
            variable,
            kind,
            offset,
            cases,
        })
    }

    fn selector(&mut self) -> Option<String> {
        let mut selector = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '{' || c == '}' {
                break;
            }
            selector.push(c);
            self.pos += 1;
        }
        (!selector.is_empty()).then_some(selector)
    }

    /// Case body after its opening brace; consumes the closing brace.
    fn body(&mut self) -> Option<Vec<IcuPart>> {
        let mut parts = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek()? {
                '}' => {
                    self.pos += 1;
                    break;
                }
                '{' => {
                    if !text.is_empty() {
                        parts.push(IcuPart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(IcuPart::Message(self.message()?));
                }
                c => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
        if !text.is_empty() {
            parts.push(IcuPart::Text(text));
        }
        Some(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plural() {
        let icu = IcuMessage::parse("{VAR_PLURAL, plural, =0 {none} =1 {one} other {many}}").unwrap();
        assert_eq!(icu.variable, "VAR_PLURAL");
        assert_eq!(icu.kind, IcuKind::Plural);
        assert_eq!(icu.cases.len(), 3);
        assert_eq!(icu.cases[2].selector, "other");
    }

    #[test]
    fn test_canonical_ignores_layout_between_cases() {
        let a = IcuMessage::parse("{n,plural,=0{none}  other {many}}").unwrap();
        let b = IcuMessage::parse("  {n, plural,\n  =0 {none}\n  other {many}\n}").unwrap();
        assert_eq!(a.to_canonical(), b.to_canonical());
        assert_eq!(a.to_canonical(), "{n, plural, =0 {none} other {many}}");
    }

    #[test]
    fn test_case_text_is_significant() {
        let a = IcuMessage::parse("{n, plural, other {many}}").unwrap();
        let b = IcuMessage::parse("{n, plural, other {lots}}").unwrap();
        assert_ne!(a.to_canonical(), b.to_canonical());
    }

    #[test]
    fn test_nested_select() {
        let icu = IcuMessage::parse(
            "{gender, select, male {{n, plural, other {his items}}} other {theirs}}",
        )
        .unwrap();
        assert_eq!(icu.kind, IcuKind::Select);
        assert!(matches!(icu.cases[0].body[0], IcuPart::Message(_)));
    }

    #[test]
    fn test_offset() {
        let icu = IcuMessage::parse("{n, plural, offset:1 =0 {nobody} other {# others}}").unwrap();
        assert_eq!(icu.offset.as_deref(), Some("1"));
        assert_eq!(icu.to_canonical(), "{n, plural, offset:1 =0 {nobody} other {# others}}");
    }

    #[test]
    fn test_not_icu() {
        assert!(IcuMessage::parse("Hello world").is_none());
        assert!(IcuMessage::parse("{n, number}").is_none());
        assert!(IcuMessage::parse("{n, plural, other {x}} trailing").is_none());
        assert!(IcuMessage::parse("{n, plural, other {unterminated}").is_none());
        assert!(IcuMessage::parse("{n, plural, }").is_none());
    }
}
