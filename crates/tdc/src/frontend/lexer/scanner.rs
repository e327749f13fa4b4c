//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;

/// Lexer for record-definition source
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(Token::new(kind, Span::new(span.start, span.end)))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                Err(CompileError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(span.start, span.end),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// Tokenize the entire source, including the trailing EOF token
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let source = "class def let int string list";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Class));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Def));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Let));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Int));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::String));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::List));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_identifiers() {
        let source = "Common Web_1 _host classy";
        let mut lexer = Lexer::new(source);

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "Common"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "Web_1"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "_host"
        ));
        // Keyword prefix does not make an identifier a keyword
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "classy"
        ));
    }

    #[test]
    fn test_integers() {
        let source = "0 22 -1 -443";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(0)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(22)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(-1)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::IntLiteral(-443)));
    }

    #[test]
    fn test_strings() {
        let source = r#""git" "a b c" "say \"hi\"" "back\\slash" "tab\there""#;
        let mut lexer = Lexer::new(source);

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "git"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "a b c"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "say \"hi\""
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "back\\slash"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::StringLiteral(s) if s == "tab\there"
        ));
    }

    #[test]
    fn test_punctuation() {
        let source = "{ } [ ] < > : ; , =";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::LBrace));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::RBrace));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::LBracket));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::RBracket));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Lt));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Gt));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Colon));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Semi));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Comma));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eq));
    }

    #[test]
    fn test_comments_skipped() {
        let source = "// a line comment\nclass /* block */ Foo";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Class));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "Foo"
        ));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("class @");
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Class));
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, CompileError::Lexer { .. }));
    }

    #[test]
    fn test_tokenize_all_ends_with_eof() {
        let tokens = Lexer::new("def A;").tokenize_all().unwrap();
        assert_eq!(tokens.len(), 4);
        assert!(matches!(tokens.last().unwrap().kind, TokenKind::Eof));
    }
}
