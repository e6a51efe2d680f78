//! lolspeak - 英语到LOLspeak翻译库
//!
//! 这个库提供了基于词典的单词翻译、可选的启发式变形、纯文本翻译，
//! 以及只改写文本节点的XML翻译功能。

pub mod config;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod heuristics;
pub mod registry;
pub mod stats;
pub mod translator;
pub mod utils;
pub mod xml_processor;

pub use error::{LolspeakError, Result};
pub use registry::{
    element_to_lolspeak, element_to_lolspeak_recursive, has_default, set_default, to_lolspeak,
    with_default, xml_to_lolspeak,
};
pub use translator::{Tranzlator, WordFilter};
pub use xml_processor::{Document, Element, Node, Text};
