extern crate wirebox;

mod common;

use pretty_assertions::assert_eq;
use syn::{Item, ItemImpl, ItemMod};
use wirebox::{
    compile, tokenizer::token::TokenizerError, BuilderError, Error, GeneratorConfig,
};

const LOGGING: &str = r#"
// logging
:log.path = '/var/log/app.log'
:log.level = 200
:log.channels = ['app', 'audit']

@log.handler: Acme\Log\FileHandler(:log.path, :log.level)
@logger: Acme\Log\Logger('main', @log.handler)
  - pushChannel('audit')
  - setFallback(null)

override @log.handler: Acme\Log\StreamHandler(:log.path)
@mailer: Acme\Mailer(@container, @transport)
"#;

fn impl_fn_names(item: &ItemImpl) -> Vec<String> {
    item.items
        .iter()
        .filter_map(|item| match item {
            syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

fn inherent_impl(items: &[Item]) -> &ItemImpl {
    items
        .iter()
        .find_map(|item| match item {
            Item::Impl(item) if item.trait_.is_none() => Some(item),
            _ => None,
        })
        .expect("inherent impl")
}

#[test]
fn test_compile_flat_container() {
    let source = compile("AppContainer", LOGGING, &GeneratorConfig::default()).unwrap();
    let file = syn::parse_file(&source).unwrap();

    let structs: Vec<String> = file
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Struct(item) => Some(item.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(structs, vec!["AppContainer"]);

    assert_eq!(
        impl_fn_names(inherent_impl(&file.items)),
        vec![
            "new",
            "default_parameters",
            "into_inner",
            "resolveLogHandler",
            "resolveLogger",
            "resolveMailer",
        ]
    );
}

#[test]
fn test_compile_renders_arguments() {
    let source = compile("AppContainer", LOGGING, &GeneratorConfig::default()).unwrap();
    let compact: String = source.split_whitespace().collect();

    // the override replaced the file handler in place
    assert!(compact.contains(r#"construct("Acme\\Log\\StreamHandler",arguments)"#));
    assert!(!compact.contains("FileHandler"));
    // shared dependency declared in the same file
    assert!(compact.contains(r#"container.resolve_shared("log.handler",Self::resolveLogHandler)?"#));
    // undeclared dependency falls back to a lookup by name
    assert!(compact.contains(r#"container.get("transport")?"#));
    assert!(compact.contains("container.self_reference()"));
    assert!(compact.contains(r#"container.parameter("log.path")"#));
    assert!(compact.contains(r#"json!(["app","audit"])"#));
    assert!(compact.contains(r#"json!(null)"#));
    assert!(compact.contains(r#""setFallback""#));
}

#[test]
fn test_compile_nested_module() {
    let config = GeneratorConfig::from_str(r#"{ "runtime_path": "crate::di", "derive_debug": true }"#)
        .unwrap();
    let source = compile("app::services::AppContainer", LOGGING, &config).unwrap();
    let file = syn::parse_file(&source).unwrap();

    let Some(Item::Mod(ItemMod {
        ident,
        content: Some((_, items)),
        ..
    })) = file.items.first()
    else {
        panic!("expected an outer module");
    };
    assert_eq!(ident, "app");

    let Some(Item::Mod(ItemMod {
        ident,
        content: Some((_, items)),
        ..
    })) = items.first()
    else {
        panic!("expected an inner module");
    };
    assert_eq!(ident, "services");

    let Some(Item::Struct(container)) = items.first() else {
        panic!("expected the container struct");
    };
    assert_eq!(container.ident, "AppContainer");
    assert!(container.attrs.iter().any(|attr| attr.path().is_ident("derive")));
    let compact: String = source.split_whitespace().collect();
    assert!(compact.contains("crate::di::Container"));
    assert!(!compact.contains("::wirebox"));
}

#[test]
fn test_compile_is_deterministic() {
    let config = GeneratorConfig::default();
    assert_eq!(
        compile("AppContainer", LOGGING, &config).unwrap(),
        compile("AppContainer", LOGGING, &config).unwrap()
    );
}

#[test]
fn test_compile_errors() {
    let config = GeneratorConfig::default();

    assert!(matches!(
        compile("AppContainer", "@logger Acme\\Log", &config),
        Err(Error::Parse(_))
    ));
    assert!(matches!(
        compile("AppContainer", "@container: Acme\\Log", &config),
        Err(Error::Builder(BuilderError::InvalidServiceName(_)))
    ));
    assert!(matches!(
        compile("App Container", "@logger: Acme\\Log", &config),
        Err(Error::Builder(BuilderError::InvalidContainerName(_)))
    ));

    let config = GeneratorConfig {
        runtime_path: "not a path".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        compile("AppContainer", "@logger: Acme\\Log", &config),
        Err(Error::Builder(BuilderError::InvalidRuntimePath(_)))
    ));
}

#[test]
fn test_compile_rejects_oversized_integer() {
    let err = compile(
        "AppContainer",
        ":log.level = 99999999999999999999",
        &GeneratorConfig::default(),
    )
    .unwrap_err();
    let Error::Lexical(TokenizerError::LiteralOutOfRange { literal, span }) = err else {
        panic!("expected an out of range literal, got {:?}", err);
    };
    assert_eq!(literal, "99999999999999999999");
    assert_eq!((span.line, span.column), (1, 14));
}

#[test]
fn test_compile_empty_source() {
    let source = compile("EmptyContainer", "\n// nothing yet\n", &GeneratorConfig::default()).unwrap();
    let file = syn::parse_file(&source).unwrap();
    assert_eq!(
        impl_fn_names(inherent_impl(&file.items)),
        vec!["new", "default_parameters", "into_inner"]
    );
}
