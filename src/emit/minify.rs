//! CSS post-processing before the stylesheet is emitted as an asset.

use cssparser::{ParseError, Parser, ParserInput, ToCss, Token};
use thiserror::Error;

/// Error returned by a [`CssMinifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinifyError {
    /// The stylesheet holds an unterminated string, a malformed `url()` or
    /// an unbalanced closing bracket.
    #[error("invalid CSS in {file_name} at {line}:{column}")]
    Syntax {
        file_name: String,
        line: u32,
        column: u32,
    },

    /// A host-provided minifier reported a failure.
    #[error("CSS minification failed: {0}")]
    Failed(String),
}

/// The host's CSS pipeline stage.
///
/// Only consulted when the host reports its CSS stages as available;
/// otherwise the stylesheet is emitted unprocessed.
pub trait CssMinifier: Send + Sync {
    /// Processes `css`, which will be emitted as `file_name`.
    fn minify(&self, css: &str, file_name: &str) -> Result<String, MinifyError>;
}

/// Token-level minifier built on `cssparser`.
///
/// Drops comments and collapses whitespace, keeping a single space only where
/// removing it could change how the stylesheet tokenizes or what a selector
/// means.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssparserMinifier;

impl CssMinifier for CssparserMinifier {
    fn minify(&self, css: &str, file_name: &str) -> Result<String, MinifyError> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut out = String::with_capacity(css.len());

        write_tokens(&mut parser, &mut out).map_err(|err| MinifyError::Syntax {
            file_name: file_name.to_string(),
            line: err.location.line + 1,
            column: err.location.column,
        })?;

        Ok(out)
    }
}

fn write_tokens<'i>(parser: &mut Parser<'i, '_>, out: &mut String) -> Result<(), ParseError<'i, ()>> {
    let mut pending_space = false;

    loop {
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) => {
                pending_space = true;
                continue;
            }
            Token::BadString(_)
            | Token::BadUrl(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket => return Err(parser.new_unexpected_token_error(token)),
            _ => {}
        }

        if pending_space && needs_space(out, &token) {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(&token.to_css_string());

        let closing = match token {
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };
        if let Some(closing) = closing {
            parser.parse_nested_block(|nested| write_tokens(nested, out))?;
            out.push(closing);
        }
    }

    Ok(())
}

/// Whitespace is dropped next to punctuation that never needs it.
fn needs_space(out: &str, next: &Token<'_>) -> bool {
    let after_punctuation = matches!(
        out.chars().last(),
        None | Some('{') | Some('}') | Some(';') | Some(',') | Some('>') | Some(':') | Some('(')
    );
    let before_punctuation = matches!(
        next,
        Token::CurlyBracketBlock | Token::Semicolon | Token::Comma | Token::Delim('>')
    );
    !(after_punctuation || before_punctuation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(css: &str) -> String {
        CssparserMinifier.minify(css, "stylex.css").unwrap()
    }

    #[test]
    fn test_strips_whitespace_and_comments() {
        let css = "/* generated */\n.x1 {\n  color: red;\n}\n";
        assert_eq!(minify(css), ".x1{color:red;}");
    }

    #[test]
    fn test_keeps_descendant_combinator() {
        assert_eq!(
            minify("html[dir='rtl']   .x1 { margin-right: 0 }"),
            "html[dir=\"rtl\"] .x1{margin-right:0}"
        );
    }

    #[test]
    fn test_keeps_media_query_spacing() {
        assert_eq!(
            minify("@media (min-width: 800px) and (max-width: 1200px) { .x1 { color: red } }"),
            "@media (min-width:800px) and (max-width:1200px){.x1{color:red}}"
        );
    }

    #[test]
    fn test_child_combinator_and_lists() {
        assert_eq!(minify(".a > .b , .c { x: 1 }"), ".a>.b,.c{x:1}");
    }

    #[test]
    fn test_layers_output() {
        let css = "\n@layer priority1, priority2;\n@layer priority2{\n.x1{color:red}\n}";
        assert_eq!(
            minify(css),
            "@layer priority1,priority2;@layer priority2{.x1{color:red}}"
        );
    }

    #[test]
    fn test_functions_preserved() {
        assert_eq!(
            minify(".x1 { width: calc(100% - 4px) ; }"),
            ".x1{width:calc(100% - 4px);}"
        );
    }

    #[test]
    fn test_unterminated_string_is_a_syntax_error() {
        let err = CssparserMinifier
            .minify(".x1{color:red}\n.x2{content:'oops\n}", "stylex.css")
            .unwrap_err();
        assert!(matches!(
            err,
            MinifyError::Syntax { ref file_name, line: 2, .. } if file_name == "stylex.css"
        ));
    }

    #[test]
    fn test_malformed_url_and_stray_brace_are_syntax_errors() {
        for css in [".x1{background:url(a b)}", ".x1{color:red}}"] {
            let result = CssparserMinifier.minify(css, "stylex.css");
            assert!(
                matches!(result, Err(MinifyError::Syntax { line: 1, .. })),
                "{css}: {result:?}"
            );
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("   /* nothing */  "), "");
    }
}
