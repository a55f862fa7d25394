#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;
    use rose_interpreter as rose;

    use rose::error::RoseError;
    use rose::scanner::*;
    use rose::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let tokens: Vec<Token> = tokenize(source.as_bytes()).expect("source should scan");

        let actual: Vec<(TokenType, &str)> = tokens
            .iter()
            .map(|t| (t.token_type, t.lexeme.as_str()))
            .collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn single_character_operators_map_one_to_one() {
        let source = "{ } ( ) ; , . + - * / | & ! = < >";
        let tokens = tokenize(source.as_bytes()).unwrap();

        let chars: Vec<&str> = source.split(' ').collect();
        assert_eq!(tokens.len(), chars.len() + 1);

        for (token, ch) in tokens.iter().zip(chars.iter()) {
            assert_eq!(token.lexeme, *ch);
            assert_eq!(token.length, 1);
        }
        assert_eq!(tokens.last().unwrap().token_type, TokenType::EOF);
    }

    #[test]
    fn two_character_operators() {
        assert_token_sequence(
            "== != <= >= = ! < >",
            &[
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EQUAL, "="),
                (TokenType::BANG, "!"),
                (TokenType::LESS, "<"),
                (TokenType::GREATER, ">"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_token_sequence(
            "and or if else while fn for return var struct print true false _x x1 fnord",
            &[
                (TokenType::AND, "and"),
                (TokenType::OR, "or"),
                (TokenType::IF, "if"),
                (TokenType::ELSE, "else"),
                (TokenType::WHILE, "while"),
                (TokenType::FN, "fn"),
                (TokenType::FOR, "for"),
                (TokenType::RETURN, "return"),
                (TokenType::VAR, "var"),
                (TokenType::STRUCT, "struct"),
                (TokenType::PRINT, "print"),
                (TokenType::TRUE, "true"),
                (TokenType::FALSE, "false"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::IDENTIFIER, "x1"),
                (TokenType::IDENTIFIER, "fnord"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn numbers_with_and_without_fraction() {
        assert_token_sequence(
            "42 3.14 7",
            &[
                (TokenType::NUMBER, "42"),
                (TokenType::NUMBER, "3.14"),
                (TokenType::NUMBER, "7"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn digit_then_letters_splits_into_number_and_identifier() {
        assert_token_sequence(
            "12ab",
            &[
                (TokenType::NUMBER, "12"),
                (TokenType::IDENTIFIER, "ab"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn string_lexeme_excludes_quotes() {
        let tokens = tokenize(b"print \"hello world\";").unwrap();

        assert_eq!(tokens[1].token_type, TokenType::STRING);
        assert_eq!(tokens[1].lexeme, "hello world");
        assert_eq!(tokens[1].length, 11);
    }

    #[test]
    fn display_matches_tokenize_output() {
        let tokens = tokenize(b"var name = \"rose\";\nprint name >= 12;").unwrap();

        let rendered: Vec<String> = tokens.iter().map(Token::to_string).collect();

        assert_eq!(
            rendered,
            vec![
                "VAR var",
                "IDENTIFIER name",
                "EQUAL =",
                "STRING \"rose\"",
                "SEMICOLON ;",
                "PRINT print",
                "IDENTIFIER name",
                "GREATER_EQUAL >=",
                "NUMBER 12",
                "SEMICOLON ;",
                "EOF",
            ]
        );
    }

    #[test]
    fn empty_source_yields_only_eof() {
        let tokens = tokenize(b"").unwrap();

        assert_eq!(tokens, vec![Token::eof(1)]);
    }

    #[test]
    fn whitespace_only_source_ends_on_last_line() {
        let tokens = tokenize(b" \t\r\n\n  ").unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::EOF);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn newlines_advance_line_numbers() {
        let tokens = tokenize(b"a\nb\n\"x\ny\"\nc").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

        assert_eq!(lines, vec![1, 2, 4, 5, 5]);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let err = tokenize(b"print \"oops;").unwrap_err();
        assert!(matches!(err, RoseError::UnterminatedString { line: 1 }));

        let err = tokenize(b"\"").unwrap_err();
        assert!(matches!(err, RoseError::UnterminatedString { .. }));
    }

    #[test]
    fn trailing_dot_is_malformed_number() {
        let err = tokenize(b"var x = 1.;").unwrap_err();

        match err {
            RoseError::MalformedNumber { lexeme, line } => {
                assert_eq!(lexeme, "1.");
                assert_eq!(line, 1);
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }

        assert!(tokenize(b"1.x").is_err());
    }

    #[test]
    fn unexpected_character_is_reported() {
        let err = tokenize(b"var #").unwrap_err();

        assert!(matches!(
            err,
            RoseError::UnexpectedCharacter { character: '#', line: 1 }
        ));
        assert_eq!(err.to_string(), "[line 1] Error: Unexpected character: #");
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let results: Vec<_> = Scanner::new(b", $ .").collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
