use arn::{
    Options, run_with_output,
    util::codec::{Dictionary, is_packed, pack, unpack},
};

#[test]
fn packed_programs_run_like_their_source() {
    let source = "+\\[1 {+1} -> 10]";
    let packed = pack(source).unwrap();

    assert!(is_packed(&packed));
    assert!(!is_packed(source));
    assert_eq!(unpack(&packed), source);

    let mut output = Vec::new();
    run_with_output(&packed, &Options::with_input(&[]), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "55\n");
}

#[test]
fn only_printable_ascii_packs() {
    assert!(pack("tab\there").is_none());
    assert!(pack("é").is_none());
}

#[test]
fn missing_words_leave_symbols_undecoded() {
    let dictionary = Dictionary::from_words("zero\none");

    assert_eq!(dictionary.decode("a!", true), "Zero!");
    assert_eq!(dictionary.decode("ab", false), "One");
    assert_eq!(dictionary.decode("! ab", false), "! one");
    assert_eq!(dictionary.decode("zz", true), "zz");
    assert!(Dictionary::default().is_empty());
}
