use arn::{
    ast::{Extra, InfixOp, Node, PrefixOp, SuffixOp},
    error::ParseError,
    interpreter::{
        lexer::tokenize,
        parser::core::{CallTable, parse},
    },
};

fn parse_source(source: &str) -> Result<Vec<Node>, ParseError> {
    let tokens = tokenize(source).unwrap();
    parse(&tokens, &mut CallTable::new()).map(|program| program.items)
}

fn single(source: &str) -> Node {
    let mut items = parse_source(source).unwrap();
    assert_eq!(items.len(), 1, "{source} should parse to one item");
    items.remove(0)
}

#[test]
fn parsing_is_deterministic() {
    let tokens = tokenize("{(\"Fizz\"^!%3)|(\"Buzz\"^!%5)||}\\~ +\\[1 {+1} -> 10]").unwrap();
    let first = parse(&tokens, &mut CallTable::new()).unwrap();
    let second = parse(&tokens, &mut CallTable::new()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_operands_are_implicit() {
    let Node::Infix { op, left, right, .. } = single("+") else {
        panic!("expected an infix node");
    };
    assert_eq!(op, InfixOp::Add);
    assert!(left.is_implicit());
    assert!(right.is_implicit());
}

#[test]
fn minus_is_negation_without_left_operand() {
    assert!(matches!(single("-3"), Node::Prefix { op: PrefixOp::Negate, .. }));
    assert!(matches!(single("5-3"), Node::Infix { op: InfixOp::Subtract, .. }));
}

#[test]
fn precedence_groups_tighter_operators_first() {
    let Node::Infix { op, right, .. } = single("1+2*3") else {
        panic!("expected an infix node");
    };
    assert_eq!(op, InfixOp::Add);
    assert!(matches!(*right, Node::Infix { op: InfixOp::Multiply, .. }));

    let Node::Infix { op, left, .. } = single("1-2-3") else {
        panic!("expected an infix node");
    };
    assert_eq!(op, InfixOp::Subtract);
    assert!(matches!(*left, Node::Infix { op: InfixOp::Subtract, .. }));
}

#[test]
fn suffix_applies_to_preceding_operand() {
    let Node::Suffix { op, arg, .. } = single("\"a b\" :s") else {
        panic!("expected a suffix node");
    };
    assert_eq!(op, SuffixOp::Words);
    assert!(matches!(*arg, Node::StringLiteral { .. }));
}

#[test]
fn fold_takes_map_block_and_combinator() {
    let Node::Prefix { op, extra, .. } = single("+{:*}\\[1 2]") else {
        panic!("expected a fold");
    };
    assert_eq!(op, PrefixOp::Fold);
    let Extra::Fold { map, combinator } = extra else {
        panic!("expected fold data");
    };
    assert!(map.is_some());
    assert!(combinator.is_some());
}

#[test]
fn arrays_with_a_block_hold_one_generator() {
    let Node::Array { body, .. } = single("[1 1 {+} -> 10]") else {
        panic!("expected an array");
    };
    assert!(body.block().is_some());

    assert!(matches!(parse_source("[{1} {2}]"), Err(ParseError::MultipleGenerators { .. })));
}

#[test]
fn definitions_register_arity_for_later_calls() {
    let items = parse_source("f(a b) := a+b f 1 2 3").unwrap();

    assert_eq!(items.len(), 3);
    assert!(matches!(&items[0], Node::FunctionDef { params, .. } if params.len() == 2));
    assert!(matches!(&items[1], Node::Call { name, args, .. } if name == "f" && args.len() == 2));
}

#[test]
fn named_blocks_bind_their_parameter() {
    let Node::Block(block) = single("v{v+1}") else {
        panic!("expected a block");
    };
    assert_eq!(block.param, "v");
}

#[test]
fn base_directive_reads_width_and_codes() {
    let Node::Suffix { extra: Extra::Base { width, codes }, .. } = single("5;8bd") else {
        panic!("expected a base conversion");
    };
    assert_eq!(width, 8);
    assert_eq!(codes.len(), 2);

    assert!(matches!(parse_source("5;q"), Err(ParseError::InvalidBaseDirective { .. })));
}

#[test]
fn malformed_constructs_are_parse_errors() {
    assert!(matches!(parse_source("$5"), Err(ParseError::MissingBlock { .. })));
    assert!(matches!(parse_source("f(1) := 2"), Err(ParseError::InvalidFunctionDefinition { .. })));
    assert!(matches!(parse_source("1.nope"), Err(ParseError::InvalidCallTarget { .. })));
    assert!(matches!(parse_source("[1]@+"), Err(ParseError::IncompleteZip { .. })));
    assert!(matches!(parse_source(")"), Err(ParseError::UnexpectedToken { .. })));
}
