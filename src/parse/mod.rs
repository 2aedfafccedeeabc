pub mod redirect;
pub mod tokenize;
pub mod types;

pub use redirect::split_redirection;
pub use tokenize::{split_stages, tokenize};
pub use types::{Command, Pipeline, RedirectMode, Redirection, Stream};

use thiserror::Error;

/// Malformed input line. The line is discarded and nothing runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
    #[error("backslash at end of input")]
    DanglingEscape,
    #[error("syntax error: redirection without a target")]
    MissingRedirectTarget,
    #[error("syntax error near unexpected token `|'")]
    EmptyStage,
}

/// Knobs that change how a line is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Ignore `>` and `<` inside quotes or after a backslash when looking for
    /// the redirection operator. Off by default.
    pub quote_aware_redirection: bool,
}

/// Parse a line with the default options.
pub fn parse(line: &str) -> Result<Pipeline, ParseError> {
    parse_with(line, ParseOptions::default())
}

/// Parse a raw input line into a [`Pipeline`].
///
/// The redirection scan runs once over the whole line first; the remaining
/// command text is then split into `|` stages and each stage is tokenized.
/// Blank input yields an empty pipeline.
pub fn parse_with(line: &str, options: ParseOptions) -> Result<Pipeline, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Pipeline::default());
    }

    let (text, redirection) = split_redirection(line, options.quote_aware_redirection)?;

    let pieces = split_stages(text);
    let mut stages = Vec::with_capacity(pieces.len());
    for piece in &pieces {
        match Command::from_words(tokenize(piece)?) {
            Some(cmd) => stages.push(cmd),
            // A lone command with no words is blank input; an empty piece
            // between pipes is not.
            None if pieces.len() == 1 => return Ok(Pipeline::default()),
            None => return Err(ParseError::EmptyStage),
        }
    }

    Ok(Pipeline {
        stages,
        redirection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_blank() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \t ").unwrap().is_empty());
    }

    #[test]
    fn parse_single_stage() {
        let p = parse("echo 'a  b' c").unwrap();
        assert_eq!(p.stages, vec![Command::new("echo", vec!["a  b".into(), "c".into()])]);
        assert!(p.redirection.is_none());
    }

    #[test]
    fn parse_pipeline_stages() {
        let p = parse("cat file.txt | grep x | wc -l").unwrap();
        let names: Vec<&str> = p.stages.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["cat", "grep", "wc"]);
        assert_eq!(p.stages[2].arguments, vec!["-l"]);
    }

    #[test]
    fn parse_pipeline_with_redirection() {
        let p = parse("cat f | wc -l > count.txt").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(
            p.redirection,
            Some(Redirection::new(Stream::Stdout, RedirectMode::Truncate, "count.txt"))
        );
    }

    #[test]
    fn parse_quoted_pipe_is_an_argument() {
        let p = parse("echo 'a | b'").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.stages[0].arguments, vec!["a | b"]);
    }

    #[test]
    fn parse_empty_stage() {
        assert_eq!(parse("ls |"), Err(ParseError::EmptyStage));
        assert_eq!(parse("| wc"), Err(ParseError::EmptyStage));
        assert_eq!(parse("ls || wc"), Err(ParseError::EmptyStage));
    }

    #[test]
    fn parse_redirection_only_is_blank() {
        assert!(parse("> out.txt").unwrap().is_empty());
    }

    #[test]
    fn parse_errors_propagate() {
        assert_eq!(parse("echo 'oops"), Err(ParseError::UnterminatedQuote('\'')));
        assert_eq!(parse(r"echo oops\"), Err(ParseError::DanglingEscape));
        assert_eq!(parse("echo >"), Err(ParseError::MissingRedirectTarget));
    }

    #[test]
    fn parse_with_quote_aware_option() {
        let options = ParseOptions {
            quote_aware_redirection: true,
        };
        let p = parse_with("echo 'a > b'", options).unwrap();
        assert_eq!(p.stages[0].arguments, vec!["a > b"]);
        assert!(p.redirection.is_none());
    }
}
