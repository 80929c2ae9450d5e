//! Pull-based event reader for JSON text.

use std::borrow::Cow;
use std::collections::VecDeque;

use tracing::trace;

use crate::scalar::unescape;
use crate::{Event, EventStream, Lexer, ReadError, ReadErrorKind, Span, Token, TokenKind};

/// Reads JSON text and yields [`Event`]s one at a time.
#[derive(Clone)]
pub struct JsonReader<'src> {
    lexer: Lexer<'src>,
    stack: Vec<Frame>,
    queue: VecDeque<Event<'src>>,
    state: ReaderState,
    /// Error detected while queueing events; surfaced once the queue drains.
    error: Option<ReadError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    BeforeDocument,
    InDocument,
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    container: Container,
    /// Span of the opening brace or bracket.
    open: Span,
    expect: Expect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Directly after `{` or `[`.
    First,
    /// After a member: `,` or the closing token.
    Next,
}

impl<'src> JsonReader<'src> {
    /// Create a reader over the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            stack: Vec::new(),
            queue: VecDeque::new(),
            state: ReaderState::BeforeDocument,
            error: None,
        }
    }

    /// Read every event, stopping at the first structural error.
    pub fn collect_events(mut self) -> Result<Vec<Event<'src>>, ReadError> {
        let mut events = Vec::new();
        while self.has_next() {
            events.push(self.next_event()?);
        }
        Ok(events)
    }

    fn step(&mut self) -> Result<(), ReadError> {
        let Some(frame) = self.stack.last().copied() else {
            return Err(self.error_here(ReadErrorKind::UnexpectedToken));
        };
        let token = self.lexer.next_token();

        match (frame.container, frame.expect, token.kind) {
            (container, _, TokenKind::Eof) => Err(ReadError::new(unclosed(container), frame.open)),

            (Container::Object, _, TokenKind::RBrace) | (Container::Array, _, TokenKind::RBracket) => {
                self.close_container(token.span);
                Ok(())
            }

            (Container::Object, Expect::First, _) => self.property(token),
            (Container::Object, Expect::Next, TokenKind::Comma) => {
                let key = self.lexer.next_token();
                if key.kind == TokenKind::RBrace {
                    return Err(ReadError::new(ReadErrorKind::TrailingComma, token.span));
                }
                self.property(key)
            }

            (Container::Array, Expect::First, _) => {
                self.expect_next();
                self.value(token)
            }
            (Container::Array, Expect::Next, TokenKind::Comma) => {
                let item = self.lexer.next_token();
                match item.kind {
                    TokenKind::RBracket => {
                        Err(ReadError::new(ReadErrorKind::TrailingComma, token.span))
                    }
                    TokenKind::Eof => Err(ReadError::new(ReadErrorKind::UnclosedArray, frame.open)),
                    _ => {
                        self.expect_next();
                        self.value(item)
                    }
                }
            }

            (_, Expect::Next, _) => Err(ReadError::new(ReadErrorKind::UnexpectedToken, token.span)),
        }
    }

    /// A `"name": value` member, starting at the name token.
    fn property(&mut self, key: Token<'src>) -> Result<(), ReadError> {
        match key.kind {
            TokenKind::String => {}
            TokenKind::Eof => return Err(self.unclosed_top()),
            TokenKind::UnterminatedString => {
                return Err(ReadError::new(ReadErrorKind::UnterminatedString, key.span));
            }
            _ => return Err(ReadError::new(ReadErrorKind::ExpectedKey, key.span)),
        }
        let name = string_body(&key)?;

        let colon = self.lexer.next_token();
        if colon.kind != TokenKind::Colon {
            return Err(ReadError::new(ReadErrorKind::ExpectedColon, colon.span));
        }

        self.expect_next();
        self.queue.push_back(Event::StartProperty {
            span: key.span,
            name,
        });

        let value = self.lexer.next_token();
        if value.kind == TokenKind::Eof {
            return Err(self.unclosed_top());
        }
        self.value(value)
    }

    /// Any value: opens a container or queues a literal.
    fn value(&mut self, token: Token<'src>) -> Result<(), ReadError> {
        let literal = match token.kind {
            TokenKind::LBrace => {
                self.open(Container::Object, token.span);
                self.queue.push_back(Event::StartObject { span: token.span });
                return Ok(());
            }
            TokenKind::LBracket => {
                self.open(Container::Array, token.span);
                self.queue.push_back(Event::StartArray { span: token.span });
                return Ok(());
            }
            TokenKind::String => Some(string_body(&token)?),
            TokenKind::Number | TokenKind::True | TokenKind::False => {
                Some(Cow::Borrowed(token.text))
            }
            TokenKind::Null => None,

            TokenKind::Eof => {
                return Err(ReadError::new(ReadErrorKind::UnexpectedEof, token.span));
            }
            TokenKind::UnterminatedString => {
                return Err(ReadError::new(ReadErrorKind::UnterminatedString, token.span));
            }
            TokenKind::InvalidNumber => {
                return Err(ReadError::new(ReadErrorKind::InvalidNumber, token.span));
            }
            TokenKind::RBrace
            | TokenKind::RBracket
            | TokenKind::Colon
            | TokenKind::Comma => {
                return Err(ReadError::new(ReadErrorKind::ExpectedValue, token.span));
            }
            TokenKind::Error => {
                return Err(ReadError::new(ReadErrorKind::UnexpectedToken, token.span));
            }
        };

        self.queue.push_back(Event::EndProperty {
            span: token.span,
            value: literal,
        });
        if self.stack.is_empty() {
            self.finish_document();
        }
        Ok(())
    }

    fn open(&mut self, container: Container, span: Span) {
        self.stack.push(Frame {
            container,
            open: span,
            expect: Expect::First,
        });
    }

    fn close_container(&mut self, span: Span) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        self.queue.push_back(match frame.container {
            Container::Object => Event::EndObject { span },
            Container::Array => Event::EndArray { span },
        });

        match self.stack.last() {
            Some(parent) if parent.container == Container::Object => {
                self.queue.push_back(Event::EndProperty { span, value: None });
            }
            Some(_) => {}
            None => self.finish_document(),
        }
    }

    fn expect_next(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.expect = Expect::Next;
        }
    }

    /// Root value is complete; anything but end of input is an error.
    fn finish_document(&mut self) {
        self.state = ReaderState::Finished;
        let trailing = self.lexer.next_token();
        if trailing.kind != TokenKind::Eof {
            self.error = Some(ReadError::new(ReadErrorKind::TrailingContent, trailing.span));
        }
    }

    fn unclosed_top(&self) -> ReadError {
        match self.stack.last() {
            Some(frame) => ReadError::new(unclosed(frame.container), frame.open),
            None => self.error_here(ReadErrorKind::UnexpectedEof),
        }
    }

    fn error_here(&self, kind: ReadErrorKind) -> ReadError {
        ReadError::new(kind, Span::empty(self.lexer.position()))
    }
}

impl<'src> EventStream<'src> for JsonReader<'src> {
    fn has_next(&mut self) -> bool {
        !self.queue.is_empty() || self.error.is_some() || self.state != ReaderState::Finished
    }

    fn next_event(&mut self) -> Result<Event<'src>, ReadError> {
        if self.queue.is_empty() {
            if let Some(error) = self.error.take() {
                return Err(error);
            }

            let produced = match self.state {
                ReaderState::Finished => Err(self.error_here(ReadErrorKind::Exhausted)),
                ReaderState::BeforeDocument => {
                    self.state = ReaderState::InDocument;
                    let token = self.lexer.next_token();
                    self.value(token)
                }
                ReaderState::InDocument => self.step(),
            };

            if let Err(error) = produced {
                trace!(%error, "read error");
                self.state = ReaderState::Finished;
                self.queue.clear();
                return Err(error);
            }
        }

        match self.queue.pop_front() {
            Some(event) => {
                trace!(%event, span = %event.span(), "event");
                Ok(event)
            }
            None => match self.error.take() {
                Some(error) => Err(error),
                None => Err(self.error_here(ReadErrorKind::Exhausted)),
            },
        }
    }

    fn close(&mut self) {
        self.state = ReaderState::Finished;
        self.queue.clear();
        self.stack.clear();
        self.error = None;
    }
}

fn unclosed(container: Container) -> ReadErrorKind {
    match container {
        Container::Object => ReadErrorKind::UnclosedObject,
        Container::Array => ReadErrorKind::UnclosedArray,
    }
}

/// Unescaped contents of a string token.
fn string_body<'src>(token: &Token<'src>) -> Result<Cow<'src, str>, ReadError> {
    let text = token.text;
    let body = &text[1..text.len() - 1];
    unescape(body).map_err(|seq| ReadError::new(ReadErrorKind::InvalidEscape(seq), token.span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn read(source: &str) -> Vec<String> {
        JsonReader::new(source)
            .collect_events()
            .unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    fn read_err(source: &str) -> ReadError {
        JsonReader::new(source).collect_events().unwrap_err()
    }

    #[test]
    fn test_flat_object() {
        assert_eq!(
            read(r#"{"name": "Ann", "age": 30, "nick": null}"#),
            vec![
                "StartObject",
                "StartProperty(name)",
                "EndProperty(\"Ann\")",
                "StartProperty(age)",
                "EndProperty(\"30\")",
                "StartProperty(nick)",
                "EndProperty(null)",
                "EndObject",
            ]
        );
    }

    #[test]
    fn test_nested_values_end_with_bare_end_property() {
        assert_eq!(
            read(r#"{"a": {"b": true}, "c": [1, {"d": "x"}, null]}"#),
            vec![
                "StartObject",
                "StartProperty(a)",
                "StartObject",
                "StartProperty(b)",
                "EndProperty(\"true\")",
                "EndObject",
                "EndProperty(null)",
                "StartProperty(c)",
                "StartArray",
                "EndProperty(\"1\")",
                "StartObject",
                "StartProperty(d)",
                "EndProperty(\"x\")",
                "EndObject",
                "EndProperty(null)",
                "EndArray",
                "EndProperty(null)",
                "EndObject",
            ]
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(read("{}"), vec!["StartObject", "EndObject"]);
        assert_eq!(
            read(r#"{"xs": []}"#),
            vec![
                "StartObject",
                "StartProperty(xs)",
                "StartArray",
                "EndArray",
                "EndProperty(null)",
                "EndObject",
            ]
        );
    }

    #[test]
    fn test_escaped_names_and_values() {
        let events = JsonReader::new(r#"{"a\"b": "line\nbreak"}"#)
            .collect_events()
            .unwrap();
        assert!(matches!(&events[1], Event::StartProperty { name, .. } if name == "a\"b"));
        assert!(
            matches!(&events[2], Event::EndProperty { value: Some(v), .. } if v == "line\nbreak")
        );
    }

    #[test]
    fn test_spans() {
        let events = JsonReader::new(r#"{"k": 12}"#).collect_events().unwrap();
        assert_eq!(events[0].span(), Span::new(0, 1));
        assert_eq!(events[1].span(), Span::new(1, 4));
        assert_eq!(events[2].span(), Span::new(6, 8));
        assert_eq!(events[3].span(), Span::new(8, 9));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(read_err("").kind, ReadErrorKind::UnexpectedEof);
        assert_eq!(read_err(r#"{"a": 1"#).kind, ReadErrorKind::UnclosedObject);
        assert_eq!(read_err(r#"{"a": [1, 2"#).kind, ReadErrorKind::UnclosedArray);
        assert_eq!(read_err(r#"{"a" 1}"#).kind, ReadErrorKind::ExpectedColon);
        assert_eq!(read_err(r#"{a: 1}"#).kind, ReadErrorKind::ExpectedKey);
        assert_eq!(read_err(r#"{"a": 1,}"#).kind, ReadErrorKind::TrailingComma);
        assert_eq!(read_err(r#"[1,]"#).kind, ReadErrorKind::TrailingComma);
        assert_eq!(read_err(r#"{"a": 1 "b": 2}"#).kind, ReadErrorKind::UnexpectedToken);
        assert_eq!(read_err(r#"{"a": }"#).kind, ReadErrorKind::ExpectedValue);
        assert_eq!(read_err(r#"{"a": 01}"#).kind, ReadErrorKind::UnexpectedToken);
        assert_eq!(read_err(r#"{} {}"#).kind, ReadErrorKind::TrailingContent);
        assert_eq!(
            read_err(r#"{"a": "\x"}"#).kind,
            ReadErrorKind::InvalidEscape("\\x".to_string())
        );
    }

    #[test]
    fn test_events_before_error_are_delivered() {
        let mut reader = JsonReader::new(r#"{"a": 1} x"#);
        let mut seen = Vec::new();
        let error = loop {
            match reader.next_event() {
                Ok(event) => seen.push(event.to_string()),
                Err(error) => break error,
            }
        };
        assert_eq!(
            seen,
            vec!["StartObject", "StartProperty(a)", "EndProperty(\"1\")", "EndObject"]
        );
        assert_eq!(error.kind, ReadErrorKind::TrailingContent);
        assert!(!reader.has_next());
    }

    #[test]
    fn test_close_stops_stream() {
        let mut reader = JsonReader::new(r#"{"a": 1}"#);
        assert!(reader.has_next());
        reader.next_event().unwrap();
        reader.close();
        assert!(!reader.has_next());
        assert_eq!(reader.next_event().unwrap_err().kind, ReadErrorKind::Exhausted);
    }
}
