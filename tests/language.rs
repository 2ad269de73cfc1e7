use std::{fs, path::Path};

use arn::{
    Options,
    error::{Error, ParseError, RuntimeError},
    interpreter::value::core::Value,
    parse, run_with_output,
    util::codec::Dictionary,
};
use walkdir::WalkDir;

fn output_with(src: &str, options: &Options) -> String {
    let mut output = Vec::new();
    if let Err(e) = run_with_output(src, options, &mut output) {
        panic!("Script failed: {}", e.render(src));
    }
    String::from_utf8(output).expect("output is UTF-8")
}

fn assert_output(src: &str, input: &[&str], expected: &str) {
    assert_eq!(output_with(src, &Options::with_input(input)), expected, "program: {src}");
}

fn assert_failure(src: &str) -> Error {
    match parse(src, &Options::with_input(&[])) {
        Ok(value) => panic!("Script succeeded with '{value}' but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn program_fixtures_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "arn"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let input = read_sibling(path, "in");
        let expected = read_sibling(path, "out").unwrap_or_else(|| panic!("Missing expected output for {path:?}"));

        let lines: Vec<&str> = input.as_deref().map(|i| i.lines().collect()).unwrap_or_default();
        let actual = output_with(source.trim_end_matches('\n'), &Options::with_input(&lines));
        assert_eq!(actual, expected, "fixture {path:?}");
        count += 1;
    }

    assert!(count > 0, "No program fixtures found in tests/programs");
}

fn read_sibling(path: &Path, extension: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(extension)).ok()
}

#[test]
fn folds_sequences_with_declared_length() {
    assert_output("+\\[1 {+1} -> 10]", &[], "55\n");
    assert_output("*\\[1 {+1} => 4]", &[], "120\n");
}

#[test]
fn folds_combine_left_to_right() {
    assert_output("-\\[10 3 2]", &[], "5\n");
    assert_output("/\\[100 5 2]", &[], "10\n");
    assert_output("^\\[2 3 2]", &[], "64\n");
}

#[test]
fn filters_keep_matching_elements() {
    assert_output("${!%2}1=>10", &[], "2\n4\n6\n8\n10\n");
    assert_output("${0=%2}1=>10", &[], "2\n4\n6\n8\n10\n");
    assert_output("$:{>4}[1 2 3]", &[], "0\n");
    assert_output("$:{>2}[1 {+1} -> 5]", &[], "1\n");
}

#[test]
fn fizzbuzz_transcript() {
    let expected = "1\n2\nFizz\n4\nBuzz\nFizz\n7\n8\nFizz\nBuzz\n11\nFizz\n13\n14\nFizzBuzz\n";
    assert_output("{(\"Fizz\"^!%3)|(\"Buzz\"^!%5)||}\\~", &["15"], expected);

    let full = output_with("{(\"Fizz\"^!%3)|(\"Buzz\"^!%5)||}\\~", &Options::with_input(&["100"]));
    let lines: Vec<&str> = full.lines().collect();
    assert_eq!(lines.len(), 100);
    assert_eq!(lines[98], "Fizz");
    assert_eq!(lines[99], "Buzz");
}

#[test]
fn fibonacci_sequence_takes_length_from_input() {
    let value = parse("[1 1 {+} ->]", &Options::with_input(&["15"])).unwrap();
    let Value::Array(items) = value else {
        panic!("expected the finite sequence to settle into an array, got {value}");
    };
    assert_eq!(items.len(), 15);
    assert_eq!(items[14], Value::from(610));
}

#[test]
fn text_operators() {
    assert_output(":{ | :}", &["Greetings!"], "G!\n");
    assert_output("\"This is a string\":s", &[], "This\nis\na\nstring\n");
    assert_output("!!\"abc\"", &[], "cba\n");
    assert_output("\"ab\"^3", &[], "ababab\n");
    assert_output("[1 2 3]:|\"-\"", &[], "1-2-3\n");
    assert_output("\"a-b-c\":!\"-\"", &[], "a\nb\nc\n");
}

#[test]
fn dictionary_strings_decode_through_word_list() {
    let mut words = vec!["x"; 2420];
    words[2419] = "hello";
    words[118] = "world";
    let options = Options { dictionary: Dictionary::from_words(&words.join("\n")),
                            ..Options::with_input(&[]) };

    assert_eq!(output_with("'yt, bs!", &options), "Hello, World!\n");
    assert_eq!(output_with("`yt, bs!`", &options), "Hello, world!\n");
}

#[test]
fn unbounded_map_is_an_error() {
    let err = assert_failure("{+1}\\[1 {+1}]");
    assert!(matches!(err, Error::Runtime(RuntimeError::UnboundedSequence { .. })), "{err}");
}

#[test]
fn filtering_an_infinite_sequence_is_an_error() {
    for src in ["$:{<0}[1 {+1}]", "$:{>4}[1 {+1}]", "${%2}[1 {+1}]"] {
        let err = assert_failure(src);
        assert!(matches!(err, Error::Runtime(RuntimeError::UnboundedSequence { action: "filter", .. })),
                "{src}: {err}");
    }
}

#[test]
fn evil_and_abundant_numbers() {
    assert_output("$n{!((+\\n;b)%2)}~10", &[], "3\n5\n6\n9\n10\n");
    assert_output("$n{(+\\${!(n%_)}1->n)>n}~20", &[], "12\n18\n20\n");
}

#[test]
fn infinite_sequences_are_taken_lazily() {
    assert_output("take [1 {*2}] 5", &[], "1\n2\n4\n8\n16\n");
    assert_output("[1 {*2}].take 3", &[], "1\n2\n4\n");
    assert_output("[1 {*2}]?10", &[], "1024\n");
}

#[test]
fn user_defined_functions() {
    assert_output("sq(x) := x*x sq 7", &[], "49\n");
    assert_output("f(n) := n<2||n*f(n-1) f 5", &[], "120\n");
    assert_output("x:1 g := x:x+1 g g x", &[], "3\n");
}

#[test]
fn builtins_can_be_redefined() {
    assert_output("max(x) := 7 max [3 9 2]", &[], "7\n");
    assert_output("fact(n) := n+1 fact 4", &[], "5\n");
}

#[test]
fn scopes_merge_shared_names_back() {
    assert_output("a:1 {a:2} a", &[], "2\n");
    assert_output("{_:9} _", &["5"], "5\n");
    let err = assert_failure("{b:2} b");
    assert!(matches!(err, Error::Runtime(RuntimeError::UnboundName { .. })));
}

#[test]
fn builtin_functions() {
    assert_output("max [3 9 2]", &[], "9\n");
    assert_output("min [3 9 2]", &[], "2\n");
    assert_output("fact 5", &[], "120\n");
    assert_output("mean [1 2 3 6]", &[], "3\n");
    assert_output("mode [1 2 2 3]", &[], "2\n");
    assert_output("intr \"abc\" \",\"", &[], "a,b,c,\n");
    assert_output("[3 1 2].max", &[], "3\n");
    assert_output("out 5 7", &[], "5\n7\n");
}

#[test]
fn zips_pair_or_combine_elements() {
    assert_output("[1 2 3]@+[10 20 30]", &[], "11\n22\n33\n");
    assert_output("[1 2]@[3 4]", &[], "1 3\n2 4\n");
    assert_output("[1 2 3]@*[1 {+1}]", &[], "1\n4\n9\n");
}

#[test]
fn array_operators() {
    assert_output(":<[3 1 2]", &[], "3\n2\n1\n");
    assert_output(":>\"cab\"", &[], "a\nb\nc\n");
    assert_output("[5 6 7]?_1", &[], "7\n");
    assert_output("[5 6 7]?9", &[], "\n");
    assert_output("[5 6 7]:i 6", &[], "1\n");
    assert_output("[5 6 7]&6", &[], "1\n");
    assert_output("[[1 2] [3]]..", &[], "1\n2\n3\n");
    assert_output("[1 2 3].{", &[], "2\n3\n");
    assert_output("[1 2 3].}", &[], "1\n2\n");
    assert_output("x:[1 2] ++x x", &[], "2\n3\n");
    assert_output("a:[1 2 3 2] a@:2 a", &[], "1\n3\n2\n");
}

#[test]
fn numbers_and_base_conversion() {
    assert_output("10;b", &[], "1010\n");
    assert_output("5;8b", &[], "00000101\n");
    assert_output("\"ff\";Hd", &[], "255\n");
    assert_output("_7%3", &[], "2\n");
    assert_output("1/4", &[], "0.25\n");
    assert_output("2^10", &[], "1024\n");
    assert_output(":/16", &[], "4\n");
    assert_output("16^*", &[], "1\n");
    assert_output("_3.5.|", &[], "3.5\n");
    assert_output(":v2.7 :^2.1", &[], "3\n");
}

#[test]
fn precision_bounds_significant_digits() {
    let options = Options { precision: 5,
                            ..Options::with_input(&[]) };
    assert_eq!(output_with("1/3", &options), "0.33333\n");
    assert_eq!(output_with("1/3", &Options::with_input(&[])), format!("0.{}\n", "3".repeat(25)));
}

#[test]
fn precision_keeps_at_least_one_digit() {
    let options = Options { precision: 0,
                            ..Options::with_input(&[]) };
    assert_eq!(output_with("1/3", &options), "0.3\n");
}

#[test]
fn huge_exponents_are_rejected() {
    let err = assert_failure("\"1e999999999\"+1");
    assert!(matches!(err, Error::Runtime(RuntimeError::TypeCoercion { .. })), "{err}");

    for src in ["1e999999999+1", "10^999999999", "x:1e90000 x*x"] {
        let err = assert_failure(src);
        assert!(matches!(err, Error::Runtime(RuntimeError::Arithmetic { .. })), "{src}: {err}");
    }

    assert_output("1e_999999999+1", &[], "1\n");
    assert_output("10^_999999999", &[], "0\n");
    assert_output("(1e400)/(1e399)", &[], "10\n");
}

#[test]
fn input_shapes() {
    assert_output("_#", &["a", "b"], "2\n");
    assert_output("_", &["hello"], "hello\n");
    assert_output("_|\"!\"", &[], "!\n");
}

#[test]
fn wrap_in_braces_maps_over_input() {
    let options = Options { wrap_in_braces: true,
                            ..Options::with_input(&["1", "2", "3"]) };
    assert_eq!(output_with("*2", &options), "2\n4\n6\n");
}

#[test]
fn division_by_zero_is_error() {
    let err = assert_failure("1/0");
    assert!(matches!(err, Error::Runtime(RuntimeError::Arithmetic { .. })));
}

#[test]
fn unknown_variable_is_error() {
    let err = assert_failure("1 + nope");
    assert!(matches!(err, Error::Runtime(RuntimeError::UnboundName { .. })));
}

#[test]
fn assigning_to_a_literal_is_error() {
    let err = assert_failure("5:3");
    assert!(matches!(err, Error::Runtime(RuntimeError::ImmutableTarget { .. })));
}

#[test]
fn redefinition_with_other_arity_is_error() {
    let err = assert_failure("f(a) := a h := f 1 f(a b) := b h");
    assert!(matches!(err, Error::Runtime(RuntimeError::ArityMismatch { expected: 2, found: 1, .. })));
}

#[test]
fn filter_without_block_is_error() {
    let err = assert_failure("$5");
    assert!(matches!(err, Error::Parse(ParseError::MissingBlock { .. })));
}
