#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;
    use rose_interpreter as rose;

    use rose::ast_printer::AstPrinter;
    use rose::error::RoseError;
    use rose::expr::Expr;
    use rose::parser::Parser;
    use rose::scanner::tokenize;
    use rose::stmt::Stmt;
    use rose::token::TokenType;

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<RoseError>> {
        let tokens = tokenize(source.as_bytes()).expect("source should scan");
        Parser::new(&tokens).parse()
    }

    /// Pretty-printed form of every top-level statement.
    fn printed(source: &str) -> Vec<String> {
        parse(source)
            .expect("source should parse")
            .iter()
            .map(AstPrinter::print_stmt)
            .collect()
    }

    fn errors(source: &str) -> Vec<RoseError> {
        parse(source).expect_err("source should not parse")
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let statements = parse("1 + 2 * 3;").unwrap();

        let Stmt::Expression { expr } = &statements[0] else {
            panic!("expected expression statement");
        };
        let Expr::Binary { operator, right, .. } = expr else {
            panic!("expected binary root");
        };

        assert_eq!(operator.token_type, TokenType::PLUS);
        assert!(matches!(
            right.as_ref(),
            Expr::Binary { operator, .. } if operator.token_type == TokenType::STAR
        ));
    }

    #[test]
    fn precedence_ladder() {
        assert_eq!(
            printed("a = 1 | 2 == 3 < 4 + 5 * -6;"),
            vec!["(expr (= a (| 1 (== 2 (< 3 (+ 4 (* 5 (- 6))))))))"]
        );
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(
            printed("1 - 2 - 3; 1 & 2 | 3; 8 / 4 / 2;"),
            vec![
                "(expr (- (- 1 2) 3))",
                "(expr (| (& 1 2) 3))",
                "(expr (/ (/ 8 4) 2))",
            ]
        );
    }

    #[test]
    fn assignment_and_unary_are_right_associative() {
        assert_eq!(
            printed("a = b = 1; !!true; - -1;"),
            vec!["(expr (= a (= b 1)))", "(expr (! (! true)))", "(expr (- (- 1)))"]
        );
    }

    #[test]
    fn grouping_and_calls() {
        assert_eq!(
            printed("(1 + 2) * 3; f(1, \"s\")(); g();"),
            vec![
                "(expr (* (group (+ 1 2)) 3))",
                "(expr (call (call f 1 s)))",
                "(expr (call g))",
            ]
        );
    }

    #[test]
    fn statements() {
        assert_eq!(
            printed("var x = 1; print x; { var y = 2; } if (x == 1) print x;"),
            vec![
                "(var x 1)",
                "(print x)",
                "(block (var y 2))",
                "(if (== x 1) (print x))",
            ]
        );
    }

    #[test]
    fn for_loop_requires_var_pre_clause() {
        assert_eq!(
            printed("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(for (var i 0) (< i 3) (= i (+ i 1)) (print i))"]
        );

        let errs = errors("for (i = 0; i < 3; i = i + 1) print i;");
        assert!(matches!(errs[0], RoseError::ExpectedLoopVariable { .. }));
    }

    #[test]
    fn declaration_errors_are_distinct() {
        assert!(matches!(
            errors("var = 1;").as_slice(),
            [RoseError::ExpectedVarName { line: 1 }]
        ));
        assert!(matches!(
            errors("var x 1;").as_slice(),
            [RoseError::ExpectedEquals { line: 1 }]
        ));
        assert!(matches!(
            errors("var x = 1").as_slice(),
            [RoseError::ExpectedSemicolon { line: 1, .. }]
        ));
    }

    #[test]
    fn invalid_assignment_target() {
        let errs = errors("1 + 2 = 3;");

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], RoseError::InvalidAssignmentTarget { line: 1 }));
    }

    #[test]
    fn missing_delimiters() {
        assert!(matches!(
            errors("if x) print 1;").as_slice(),
            [RoseError::ExpectedLeftParen { .. }]
        ));
        assert!(matches!(
            errors("print (1 + 2;").as_slice(),
            [RoseError::ExpectedRightParen { .. }]
        ));
        assert!(matches!(
            errors("{ print 1;").as_slice(),
            [RoseError::ExpectedRightBrace { .. }]
        ));
    }

    #[test]
    fn missing_expression_is_unexpected_end() {
        let errs = errors("print ;");

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], RoseError::UnexpectedEnd { .. }));
        assert_eq!(
            errs[0].message(),
            "Error: Unexpected end: expected expression, found ';'."
        );
    }

    #[test]
    fn one_error_per_malformed_statement() {
        let tokens = tokenize(b"var = 1; var x 2; print 3;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 2);
        assert!(matches!(errs[0], RoseError::ExpectedVarName { .. }));
        assert!(matches!(errs[1], RoseError::ExpectedEquals { .. }));

        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(print 3)");
    }

    #[test]
    fn missing_semicolon_does_not_swallow_next_statement() {
        let tokens = tokenize(b"var x = 1\nprint x;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], RoseError::ExpectedSemicolon { line: 1, .. }));
        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(print x)");
    }

    #[test]
    fn errors_inside_block_are_recovered_inside_it() {
        let tokens = tokenize(b"{ var = 1; print 2; } print 3;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 1);
        assert_eq!(statements.len(), 2);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(block (print 2))");
    }

    #[test]
    fn missing_semicolon_before_closing_brace_keeps_block() {
        let tokens = tokenize(b"{ print 1 } print 2;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], RoseError::ExpectedSemicolon { line: 1, .. }));
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Stmt::Block { .. }));
        assert_eq!(AstPrinter::print_stmt(&statements[1]), "(print 2)");

        let tokens = tokenize(b"var a = 1; { a = 2 }\nprint a;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 1);
        assert_eq!(statements.len(), 3);
        assert_eq!(AstPrinter::print_stmt(&statements[2]), "(print a)");
    }

    #[test]
    fn stray_closing_brace_at_top_level_is_skipped() {
        let tokens = tokenize(b"} print 1;").unwrap();
        let (statements, errs) = Parser::new(&tokens).parse_recovering();

        assert_eq!(errs.len(), 1);
        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(print 1)");
    }

    #[test]
    fn diagnostics_carry_lines() {
        let errs = errors("print 1;\nvar = 2;\nprint 3\n");

        let pairs: Vec<(Option<usize>, String)> =
            errs.iter().map(|e| (e.line(), e.message())).collect();

        assert_eq!(
            pairs,
            vec![
                (Some(2), "Error: Expected variable name.".to_string()),
                (Some(3), "Error: Expected ';' after value.".to_string()),
            ]
        );
    }

    #[test]
    fn else_is_not_part_of_the_language() {
        assert!(parse("if (true) print 1; else print 2;").is_err());
    }
}
