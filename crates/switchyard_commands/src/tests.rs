use super::*;

#[test]
fn build_metadata() {
    let ok = vec![
        Metadata::describe("bare").short('a').build(),
        Metadata::describe("question").short('?').build(),
        Metadata::describe("long only").long("my-switch").build(),
        Metadata::describe("underscore head").long("_hidden").build(),
        Metadata::describe("both")
            .short('v')
            .long("verbosity")
            .required("mask", "byte", "category bitmask")
            .build(),
        Metadata::describe("req then opt")
            .short('x')
            .required("a", "int", "")
            .optional("b", "int", "", "0")
            .build(),
        Metadata::describe("opt then trailing")
            .short('x')
            .optional("a", "int", "", "0")
            .trailing("rest", "string", "")
            .build(),
        Metadata::describe("trailing only")
            .short('x')
            .trailing("rest", "string", "")
            .build(),
    ];

    for meta in ok {
        meta.unwrap();
    }

    let bad = vec![
        Metadata::describe("no switch").build(),
        Metadata::describe("digit short").short('1').build(),
        Metadata::describe("punct short").short('-').build(),
        Metadata::describe("digit head").long("1abc").build(),
        Metadata::describe("empty long").long("").build(),
        Metadata::describe("space in long").long("my switch").build(),
        Metadata::describe("dup short").short('a').short('a').build(),
        Metadata::describe("dup long").long("log").long("log").build(),
        Metadata::describe("dup param")
            .short('x')
            .required("a", "int", "")
            .required("a", "int", "")
            .build(),
        Metadata::describe("bad param name")
            .short('x')
            .required("a b", "int", "")
            .build(),
        Metadata::describe("req after opt")
            .short('x')
            .optional("a", "int", "", "0")
            .required("b", "int", "")
            .build(),
        Metadata::describe("param after trailing")
            .short('x')
            .trailing("rest", "string", "")
            .required("a", "int", "")
            .build(),
        Metadata::describe("double trailing")
            .short('x')
            .trailing("rest", "string", "")
            .trailing("more", "string", "")
            .build(),
    ];

    for meta in bad {
        meta.unwrap_err();
    }
}

#[test]
fn switch_syntax_errors_name_the_offender() {
    let err = Metadata::describe("d").short('1').build().unwrap_err();
    assert_eq!(err, Error::BadShortSwitch('1'));

    let err = Metadata::describe("d").long("1abc").build().unwrap_err();
    assert_eq!(err, Error::BadLongSwitch("1abc".into()));

    let err = Metadata::describe("d")
        .short('x')
        .optional("a", "int", "", "0")
        .required("b", "int", "")
        .build()
        .unwrap_err();
    assert_eq!(err, Error::RequiredAfterOptional("b".into()));

    let err = Metadata::describe("d")
        .short('x')
        .trailing("rest", "string", "")
        .optional("a", "int", "", "0")
        .build()
        .unwrap_err();
    assert_eq!(err, Error::ParamAfterTrailing("a".into()));
}

#[test]
fn accessors() {
    let meta = Metadata::describe("set the verbosity mask")
        .short('v')
        .long("verbosity")
        .required("mask", "byte", "category bitmask")
        .build()
        .unwrap();

    assert_eq!(meta.help(), "set the verbosity mask");
    assert!(meta.has_short('v'));
    assert!(!meta.has_short('V'));
    assert!(meta.has_long("verbosity"));
    assert!(!meta.has_long("Verbosity"));

    let params = meta.params();
    assert_eq!(params.len(), 1);
    assert_eq!(&*params[0].name, "mask");
    assert_eq!(&*params[0].tag, "byte");
    assert!(!params[0].is_optional());
    assert!(!params[0].is_trailing());
}

#[test]
fn optional_default_is_kept() {
    let meta = Metadata::describe("d")
        .short('l')
        .optional("path", "path", "log file", "")
        .build()
        .unwrap();

    match &meta.params()[0].kind {
        ParamKind::Optional { default } => assert_eq!(&**default, ""),
        kind => panic!("expected optional, got {:?}", kind),
    }
}
