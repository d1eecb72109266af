/// Hard cap on tokens extracted per line; anything past it is ignored.
pub const MAX_TOKENS: usize = 5;

/// Whitespace as the sheet format sees it: ASCII whitespace (which covers
/// `\r` before a line terminator) plus NUL.
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0
}

/// Walks the input buffer one `\n`-terminated line at a time. Tokens are
/// subslices of the original buffer; nothing is copied or overwritten.
pub struct Tokenizer<'a> {
    data: &'a str,
    offset: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, offset: 0 }
    }

    /// Advances to the next line and splits it. Returns `None` once the
    /// whole buffer has been consumed; a missing final terminator still
    /// yields the remainder as one last line.
    pub fn next_line(&mut self) -> Option<TokenLine<'a>> {
        if self.offset >= self.data.len() {
            return None;
        }

        let rest = &self.data[self.offset..];
        let (line, consumed) = match rest.as_bytes().iter().position(|&b| b == b'\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        self.offset += consumed;

        Some(TokenLine::split(line))
    }
}

/// The tokens of a single line, capped at [`MAX_TOKENS`].
pub struct TokenLine<'a> {
    tokens: [&'a str; MAX_TOKENS],
    num_tokens: usize,
}

impl<'a> TokenLine<'a> {
    fn split(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let mut tokens = [""; MAX_TOKENS];
        let mut num_tokens = 0;
        let mut pos = 0;

        while num_tokens < MAX_TOKENS {
            while pos < bytes.len() && is_space(bytes[pos]) {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }

            if bytes[pos] == b'"' {
                // Quoted token: runs to the closing quote, whitespace and
                // all. Without a closing quote the token is dropped and the
                // line ends here.
                let start = pos + 1;
                let Some(end) = bytes[start..].iter().position(|&b| b == b'"') else {
                    break;
                };
                tokens[num_tokens] = &line[start..start + end];
                pos = start + end + 1;
            } else {
                let start = pos;
                while pos < bytes.len() && !is_space(bytes[pos]) {
                    pos += 1;
                }
                tokens[num_tokens] = &line[start..pos];
            }
            num_tokens += 1;
        }

        Self { tokens, num_tokens }
    }

    pub fn token(&self, n: usize) -> Option<&'a str> {
        if n >= self.num_tokens {
            return None;
        }
        Some(self.tokens[n])
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(line: &str) -> Vec<&str> {
        let mut tokenizer = Tokenizer::new(line);
        let line = tokenizer.next_line().unwrap();
        (0..line.num_tokens())
            .map(|n| line.token(n).unwrap())
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokens_of("TRACK 01 AUDIO"), vec!["TRACK", "01", "AUDIO"]);
        assert_eq!(tokens_of("  INDEX\t01   00:00:00  "), vec!["INDEX", "01", "00:00:00"]);
    }

    #[test]
    fn quoted_token_preserves_embedded_spaces() {
        assert_eq!(
            tokens_of("FILE \"A B C\" BINARY"),
            vec!["FILE", "A B C", "BINARY"]
        );
    }

    #[test]
    fn empty_quotes_yield_an_empty_token() {
        assert_eq!(tokens_of("TITLE \"\""), vec!["TITLE", ""]);
    }

    #[test]
    fn unterminated_quote_drops_the_token() {
        assert_eq!(tokens_of("FILE \"broken.bin BINARY"), vec!["FILE"]);
    }

    #[test]
    fn caps_tokens_at_five() {
        assert_eq!(
            tokens_of("FLAGS DCP 4CH PRE SCMS EXTRA IGNORED"),
            vec!["FLAGS", "DCP", "4CH", "PRE", "SCMS"]
        );
    }

    #[test]
    fn blank_and_whitespace_lines_yield_no_tokens() {
        let mut tokenizer = Tokenizer::new("\n   \t  \nTRACK 01 AUDIO\n");
        assert_eq!(tokenizer.next_line().unwrap().num_tokens(), 0);
        assert_eq!(tokenizer.next_line().unwrap().num_tokens(), 0);
        assert_eq!(tokenizer.next_line().unwrap().num_tokens(), 3);
        assert!(tokenizer.next_line().is_none());
    }

    #[test]
    fn final_line_without_terminator_is_still_produced() {
        let mut tokenizer = Tokenizer::new("CATALOG 123");
        let line = tokenizer.next_line().unwrap();
        assert_eq!(line.token(0), Some("CATALOG"));
        assert_eq!(line.token(1), Some("123"));
        assert!(tokenizer.next_line().is_none());
    }

    #[test]
    fn carriage_return_is_not_part_of_the_last_token() {
        let mut tokenizer = Tokenizer::new("TITLE Abc\r\nPERFORMER Xyz\r\n");
        let line = tokenizer.next_line().unwrap();
        assert_eq!(line.token(1), Some("Abc"));
        let line = tokenizer.next_line().unwrap();
        assert_eq!(line.token(1), Some("Xyz"));
    }

    #[test]
    fn token_index_out_of_range_is_none() {
        let mut tokenizer = Tokenizer::new("REM DATE 2020");
        let line = tokenizer.next_line().unwrap();
        assert_eq!(line.token(3), None);
        assert_eq!(line.token(MAX_TOKENS), None);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(Tokenizer::new("").next_line().is_none());
    }
}
