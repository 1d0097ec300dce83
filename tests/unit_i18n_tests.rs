//! # I18n Unit Tests / 国际化单元测试
//!
//! Checks that both locale files carry the same keys and that lookups with an
//! explicit locale return the expected language. The global locale is only
//! touched by a single test, since it is shared by every test thread.
//!
//! 检查两个语言文件具有相同的键，并且显式指定语言的查找返回预期的语言。
//! 全局语言设置只在一个测试中修改，因为它被所有测试线程共享。

use rust_i18n::t;
use std::collections::BTreeSet;

rust_i18n::i18n!("locales", fallback = "en");

fn collect_keys(prefix: &str, table: &toml::Table, keys: &mut BTreeSet<String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => collect_keys(&full, inner, keys),
            _ => {
                keys.insert(full);
            }
        }
    }
}

fn locale_keys(file: &str) -> BTreeSet<String> {
    let path = format!("{}/locales/{file}", env!("CARGO_MANIFEST_DIR"));
    let table: toml::Table = std::fs::read_to_string(path).unwrap().parse().unwrap();
    let mut keys = BTreeSet::new();
    collect_keys("", &table, &mut keys);
    keys
}

#[test]
fn test_locales_share_the_same_keys() {
    let en = locale_keys("en.toml");
    let zh = locale_keys("zh-CN.toml");
    assert!(!en.is_empty());
    assert_eq!(en, zh);
}

#[test]
fn test_explicit_locale_lookup() {
    assert_eq!(t!("stage.configure", locale = "en"), "Configure");
    assert_eq!(t!("stage.configure", locale = "zh-CN"), "配置");
}

#[test]
fn test_interpolation() {
    let message = t!("init.success", locale = "en", path = "KarmaRun.toml");
    assert_eq!(message, "Created KarmaRun.toml");
}

#[test]
fn test_set_locale_falls_back() {
    karma_runner::set_locale("zh-CN");
    assert_eq!(rust_i18n::locale().to_string(), "zh-CN");

    // Unknown region, known language.
    karma_runner::set_locale("en-AU");
    assert_eq!(rust_i18n::locale().to_string(), "en");

    karma_runner::set_locale("xx-YY");
    assert_eq!(rust_i18n::locale().to_string(), "en");

    karma_runner::set_locale("");
    assert_eq!(rust_i18n::locale().to_string(), "en");
}
