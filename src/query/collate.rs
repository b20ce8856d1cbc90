use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// 根排序规则中标点和符号的先后顺序，均排在数字和字母之前
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// 近似浏览器 `localeCompare` 的字符串比较
///
/// 分三级比较：
///
/// 1. 去掉重音、忽略大小写的基本字符，字符类别依次为空白、标点符号、数字、字母
/// 2. 重音（不带重音的排在前面）
/// 3. 大小写（小写排在大写前面）
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// 单个字符的基本排序权重：(类别, 类别内顺序, 字符)
fn primary_weight(c: char) -> (u8, u32, char) {
    if c.is_whitespace() {
        (0, 0, c)
    } else if c.is_alphabetic() {
        (3, 0, c)
    } else if c.is_numeric() {
        (2, 0, c)
    } else {
        let rank = match PUNCTUATION_ORDER.find(c) {
            Some(idx) => idx as u32,
            None => PUNCTUATION_ORDER.len() as u32 + c as u32,
        };
        (1, rank, c)
    }
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, u32, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(primary_weight)
}

fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Rust", "rust"), Ordering::Greater);
    }

    #[test]
    fn test_accents_sort_next_to_base_letter() {
        assert_eq!(locale_cmp("café", "cafe"), Ordering::Greater);
        assert_eq!(locale_cmp("café", "cafz"), Ordering::Less);
        assert_eq!(locale_cmp("Éclair", "eclipse"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_and_digits_before_letters() {
        assert_eq!(locale_cmp("Top 10: Tips", "Top 100 Tips"), Ordering::Less);
        assert_eq!(locale_cmp("a_b", "a-b"), Ordering::Less);
        assert_eq!(locale_cmp("~x", "ax"), Ordering::Less);
        assert_eq!(locale_cmp("9 lives", "Apples"), Ordering::Less);
        assert_eq!(locale_cmp("Top picks", "Topaz"), Ordering::Less);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(locale_cmp("Same", "Same"), Ordering::Equal);
    }
}
