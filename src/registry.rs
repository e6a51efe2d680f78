//! 默认翻译器注册表
//!
//! 进程内唯一的默认 `Tranzlator` 槽位，首次使用时由内置词典惰性创建。
//! 槽位由互斥锁保护，同一时刻只有一个调用方持有该实例；
//! 在 `with_default` 的闭包或过滤器中再次访问默认实例会造成死锁。

// 标准库导入
use std::sync::{Mutex, MutexGuard, PoisonError};

// 第三方crate导入
use tracing::info;

// 本地模块导入
use crate::error::Result;
use crate::translator::{Tranzlator, WordFilter};
use crate::xml_processor::Element;

static DEFAULT_TRANZLATOR: Mutex<Option<Tranzlator>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<Tranzlator>> {
    // 持锁线程panic不影响槽位中的数据
    DEFAULT_TRANZLATOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// 替换默认翻译器，传入 `None` 则清空槽位，返回原先的实例
pub fn set_default(tranzlator: Option<Tranzlator>) -> Option<Tranzlator> {
    std::mem::replace(&mut *slot(), tranzlator)
}

/// 槽位中是否已有默认翻译器
pub fn has_default() -> bool {
    slot().is_some()
}

/// 在默认翻译器上执行闭包，槽位为空时先由内置词典创建
pub fn with_default<R>(f: impl FnOnce(&mut Tranzlator) -> R) -> Result<R> {
    let mut guard = slot();
    let tranzlator = match guard.take() {
        Some(existing) => guard.insert(existing),
        None => {
            info!("🐱 使用内置词典创建默认翻译器");
            guard.insert(Tranzlator::bundled()?)
        }
    };
    Ok(f(tranzlator))
}

/// 使用默认翻译器翻译字符串
pub fn to_lolspeak(text: &str, filter: Option<WordFilter<'_>>) -> Result<String> {
    with_default(|t| t.translate_words(text, filter))?
}

/// 使用默认翻译器翻译XML字符串
pub fn xml_to_lolspeak(xml: &str, filter: Option<WordFilter<'_>>) -> Result<String> {
    with_default(|t| t.translate_xml_string(xml, filter))?
}

/// 使用默认翻译器翻译元素的直接文本
pub fn element_to_lolspeak(element: &mut Element, filter: Option<WordFilter<'_>>) -> Result<()> {
    with_default(|t| t.translate_element(element, filter))?
}

/// 使用默认翻译器翻译元素及其所有后代元素的文本
pub fn element_to_lolspeak_recursive(
    element: &mut Element,
    filter: Option<WordFilter<'_>>,
) -> Result<()> {
    with_default(|t| t.translate_element_recursive(element, filter))?
}
