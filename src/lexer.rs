use crate::dictionary::MAX_WORD_LEN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub u32, pub u32);

impl Pos {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Pos,
    pub end: Pos,
    pub lexeme: String,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Word,
}

/// Streams the words of a text: runs of ASCII letters, apostrophes
/// allowed after the first character. Runs containing digits and runs
/// longer than the dictionary's maximum word length yield no token.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    col: u32,
    line: u32,
    offset: usize,
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new<T: AsRef<str>>(text: T) -> Lexer {
        Lexer {
            chars: text.as_ref().chars().collect(),
            col: 0,
            line: 0,
            offset: 0,
        }
    }

    fn pos(&self) -> Pos {
        Pos(self.line, self.col)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let next_char = self.peek()?;

            match next_char {
                'a'..='z' | 'A'..='Z' => {
                    if let Some(token) = self.word() {
                        return Some(token);
                    }
                }
                '0'..='9' => self.skip_run(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.peek()?;

        self.offset += 1;
        if char == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }

        Some(char)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    // Consumes the rest of a rejected run, apostrophes included, so no
    // fragment of it comes back as a word.
    fn skip_run(&mut self) {
        while let Some(char) = self.peek() {
            if char.is_ascii_alphanumeric() || char == '\'' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn word(&mut self) -> Option<Token> {
        let start = self.pos();
        let mut lexeme = String::new();

        loop {
            let Some(char) = self.peek() else {
                break;
            };

            match char {
                'a'..='z' | 'A'..='Z' | '\'' => {
                    lexeme.push(char);
                    self.advance();
                }
                '0'..='9' => {
                    // "mp3" is not a word.
                    self.skip_run();
                    return None;
                }
                _ => break,
            }
        }

        if lexeme.len() > MAX_WORD_LEN {
            return None;
        }

        let end = self.pos();

        Some(Token {
            end,
            start,
            kind: TokenKind::Word,
            lexeme,
        })
    }
}
