//! 默认翻译器注册表集成测试
//!
//! 所有测试共享同一个进程级槽位，通过 `SERIAL` 串行执行。

use std::sync::{Mutex, MutexGuard, PoisonError};

use lolspeak::{
    element_to_lolspeak, element_to_lolspeak_recursive, has_default, set_default, to_lolspeak,
    with_default, xml_to_lolspeak, Document, Result, Tranzlator,
};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

fn install_fixture() {
    let yaml = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/tranzlator.yml");
    set_default(Some(Tranzlator::from_file(yaml).unwrap()));
}

fn upcase(word: &str) -> Result<String> {
    Ok(word.to_uppercase())
}

#[test]
fn test_default_created_lazily_from_bundled_dictionary() {
    let _lock = serial();
    set_default(None);
    assert!(!has_default());

    let entries = with_default(|t| t.dictionary().len()).unwrap();
    assert!(entries > 0);
    assert!(has_default());

    // 内置词典
    assert_eq!(to_lolspeak("hi cat", None).unwrap(), "oh hai kitteh");
}

#[test]
fn test_set_default_replaces_instance() {
    let _lock = serial();
    install_fixture();
    assert_eq!(to_lolspeak("I'm eating a cheeseburger", None).unwrap(), "me eating a cheezeburger");

    let previous = set_default(None).unwrap();
    assert_eq!(previous.dictionary().len(), 7);
    assert!(!has_default());
}

#[test]
fn test_default_state_persists_between_calls() {
    let _lock = serial();
    install_fixture();
    with_default(|t| t.set_trace(true)).unwrap();

    to_lolspeak("hi", None).unwrap();
    to_lolspeak("cat", None).unwrap();

    let traced = with_default(|t| t.traced_words().len()).unwrap();
    assert_eq!(traced, 2);
    set_default(None);
}

#[test]
fn test_to_lolspeak_with_filter() {
    let _lock = serial();
    install_fixture();
    assert_eq!(
        to_lolspeak("Hi, I'm a cat!", Some(&upcase)).unwrap(),
        "OH HAI, ME A KITTEH!"
    );
}

#[test]
fn test_xml_to_lolspeak() {
    let _lock = serial();
    install_fixture();
    assert_eq!(
        xml_to_lolspeak("<p>hi <i>cat</i></p>", None).unwrap(),
        "<p>oh hai <i>kitteh</i></p>"
    );
    assert_eq!(
        xml_to_lolspeak("<b>hi&nbsp;eat</b>", Some(&upcase)).unwrap(),
        "<b>OH HAI&nbsp;EAT</b>"
    );
}

#[test]
fn test_element_to_lolspeak() {
    let _lock = serial();
    install_fixture();

    let mut document = Document::parse("<p>hi <i>cat</i></p>").unwrap();
    element_to_lolspeak(document.root_mut().unwrap(), None).unwrap();
    assert_eq!(document.to_xml(), "<p>oh hai <i>cat</i></p>");

    let mut document = Document::parse("<p>hi <i>cat</i></p>").unwrap();
    element_to_lolspeak_recursive(document.root_mut().unwrap(), Some(&upcase)).unwrap();
    assert_eq!(document.to_xml(), "<p>OH HAI <i>KITTEH</i></p>");
}
