//! Identifier synthesis for generated method names.
//!
//! Free text (selectors, accessible names, values) is reduced to words:
//! digits are dropped outright, every other non-alphabetic character
//! separates words, and each word is lowercased before casing is applied.
//! Numbers in labels therefore never reach a generated identifier.

use regex::Regex;
use std::sync::LazyLock;

/// `role=<role>[name="<name>"...]` selectors are named after the accessible name.
static ROLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*role=[^\[\s]*\[\s*name\s*=\s*"([^"]*)""#).expect("role name regex")
});

/// camelCase identifier: first word lowercase, following words capitalized.
///
/// Returns an empty string when the input holds no letters.
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::new();
    for (idx, word) in words(source_text(input)).iter().enumerate() {
        if idx == 0 {
            out.push_str(word);
        } else {
            out.push_str(&upper_first(word));
        }
    }
    out
}

/// PascalCase fragment: every word capitalized.
///
/// Used after a verb prefix (`click`, `fill`, ...).
#[must_use]
pub fn to_proper_camel_case(input: &str) -> String {
    words(source_text(input))
        .iter()
        .map(|word| upper_first(word))
        .collect()
}

/// Uppercase the first character, leaving the rest untouched.
#[must_use]
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lowercase the first character, leaving the rest untouched.
#[must_use]
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// True if `input` can be used verbatim as a TypeScript identifier.
#[must_use]
pub fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn source_text(input: &str) -> &str {
    ROLE_NAME_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map_or(input, |m| m.as_str())
}

fn words(input: &str) -> Vec<String> {
    let without_digits: String = input.chars().filter(|c| !c.is_numeric()).collect();
    without_digits
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_uses_accessible_name_of_role_selector() {
        assert_eq!(
            to_camel_case(r#"role=textbox[name="Email Address"]"#),
            "emailAddress"
        );
    }

    #[test]
    fn proper_camel_case_capitalizes_every_word() {
        assert_eq!(to_proper_camel_case("Email Address"), "EmailAddress");
        assert_eq!(to_proper_camel_case("sign-in_button"), "SignInButton");
    }

    #[test]
    fn punctuation_separates_and_digits_vanish() {
        assert_eq!(to_camel_case("#submit-button"), "submitButton");
        assert_eq!(to_camel_case("input[type=\"checkbox\"]"), "inputTypeCheckbox");
        assert_eq!(to_camel_case("Step 2 of 3"), "stepOf");
        assert_eq!(to_camel_case("item42label"), "itemlabel");
        assert_eq!(to_proper_camel_case("Top 10 Deals!"), "TopDeals");
    }

    #[test]
    fn empty_and_letterless_inputs_yield_empty() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_proper_camel_case(""), "");
        assert_eq!(to_camel_case("123 !!"), "");
        assert_eq!(to_proper_camel_case("#42"), "");
    }

    #[test]
    fn words_are_lowercased_before_casing() {
        assert_eq!(to_camel_case("SIGN IN"), "signIn");
        assert_eq!(to_camel_case("Sign In"), "signIn");
        assert_eq!(to_proper_camel_case("sign in"), "SignIn");
    }

    #[test]
    fn role_selector_without_name_is_plain_text() {
        assert_eq!(to_camel_case("role=button"), "roleButton");
    }

    #[test]
    fn first_letter_helpers() {
        assert_eq!(upper_first("login"), "Login");
        assert_eq!(lower_first("LoginPage"), "loginPage");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("getUser"));
        assert!(is_identifier("_private$"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("get-user"));
        assert!(!is_identifier(""));
    }
}
