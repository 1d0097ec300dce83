//! # Placeholder Template Module / 占位符模板模块
//!
//! Line-level substitution of the two tokens recognized in the bundled templates.
//!
//! 对内置模板中识别的两个占位符进行逐行替换。

/// Token replaced by the quoted, comma-joined test module list.
/// The token carries its own single quotes, so `['%TEST_MODULE%']` becomes `['a','b']`.
pub const TEST_MODULE_TOKEN: &str = "'%TEST_MODULE%'";

/// Token replaced by the resolved base path.
pub const BASE_PATH_TOKEN: &str = "%BASE_PATH%";

/// Substitutes the module-list token, then the base-path token, in a single line.
///
/// Both replacements are literal and non-recursive. The module token is
/// always handled first, so the base-path pass also sees the inserted module text.
///
/// 先替换模块列表占位符，再替换基础路径占位符。两次替换都是字面量替换且不递归。
pub fn substitute_line(line: &str, base_path: &str, quoted_modules: &str) -> String {
    line.replace(TEST_MODULE_TOKEN, quoted_modules)
        .replace(BASE_PATH_TOKEN, base_path)
}

/// Values substituted into every template line of one installation pass.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
    pub base_path: &'a str,
    pub quoted_modules: &'a str,
}

impl Substitutions<'_> {
    pub fn apply(&self, line: &str) -> String {
        substitute_line(line, self.base_path, self.quoted_modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_token_consumes_its_quotes() {
        let out = substitute_line("tests: ['%TEST_MODULE%']", "/b", "'a','b'");
        assert_eq!(out, "tests: ['a','b']");
    }

    #[test]
    fn module_list_is_substituted_before_base_path() {
        // A module whose name contains the base-path token is rewritten by the second pass.
        let out = substitute_line("['%TEST_MODULE%']", "/base", "'%BASE_PATH%'");
        assert_eq!(out, "['/base']");
    }
}
