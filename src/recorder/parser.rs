//! Recorded-action parser.
//!
//! A recording is scanned line by line. Lines that do not call into the
//! `page.` handle are dropped; every remaining line is classified by the
//! first rule of [`RULES`] that matches it. Rules are ordered from the most
//! specific composite chains to the generic single-locator forms, and a
//! line no rule recognizes is kept as an [`Action::Other`] step so the
//! step sequence stays complete.
//!
//! Matching is purely textual. String arguments may use single, double or
//! backtick quotes; escaped characters inside them are unescaped.

use crate::recorder::ident::to_proper_camel_case;
use crate::recorder::step::{Action, Modifier, StepRecord};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Marker every interaction line contains.
const INTERACTION_MARKER: &str = "page.";

/// Separator joining a parent locator and a scoped child locator.
const SCOPE_SEPARATOR: &str = " >> ";

/// Names the rule that produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Goto,
    LocatorFilterClick,
    RoleTextClick,
    RoleLocatorCheck,
    LocatorClick,
    RoleClick,
    RoleSelect,
    RolePress,
    RoleCheck,
    RoleFill,
    LocatorFill,
    LocatorPress,
    LocatorCheck,
    LocatorSelect,
    TextClick,
    PlaceholderClick,
    PlaceholderFill,
    TestIdClick,
    TestIdFill,
}

type Extractor = fn(&Captures<'_>, Action, &str) -> Option<StepRecord>;

struct Rule {
    kind: RuleKind,
    action: Action,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    fn new(kind: RuleKind, action: Action, pattern: &str, extract: Extractor) -> Self {
        Self {
            kind,
            action,
            pattern: Regex::new(pattern).expect("recorder rule regex"),
            extract,
        }
    }

    fn apply(&self, line: &str) -> Option<StepRecord> {
        let caps = self.pattern.captures(line)?;
        (self.extract)(&caps, self.action, line)
    }
}

/// String literal in any quote style, captured into `<name>_sq|_dq|_bt`.
fn lit(name: &str) -> String {
    format!(
        r#"(?:'(?P<{name}_sq>(?:[^'\\]|\\.)*)'|"(?P<{name}_dq>(?:[^"\\]|\\.)*)"|`(?P<{name}_bt>(?:[^`\\]|\\.)*)`)"#
    )
}

const PAGE: &str = r"\bpage\.";

/// Optional `.first()`, `.last()` or `.nth(k)` qualifier.
const MODIFIER: &str = r"(?:\.(?P<mod>first|last)\(\s*\)|\.nth\(\s*(?P<nth>\d+)\s*\))?";

/// `getByRole('<role>'[, { ... }])`
fn role_call() -> String {
    format!(
        r"getByRole\(\s*{}\s*(?:,\s*\{{(?P<opts>[^}}]*)\}}\s*)?\)",
        lit("role")
    )
}

/// `locator('<sel>'[, ...])`
fn locator_call(name: &str) -> String {
    format!(r"locator\(\s*{}\s*(?:,[^)]*)?\)", lit(name))
}

/// The terminal action call, capturing its literal argument when it takes one.
fn action_call(action: Action) -> String {
    match action {
        Action::Click => r"\.click\(".to_string(),
        Action::Check => r"\.check\(".to_string(),
        Action::Fill => format!(r"\.fill\(\s*{}", lit("value")),
        Action::Press => format!(r"\.press\(\s*{}", lit("value")),
        Action::Select => format!(r"\.selectOption\(\s*{}", lit("value")),
        Action::Goto | Action::Other => unreachable!("not an element action"),
    }
}

static NAME_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\bname\s*:\s*{}", lit("name"))).expect("name option regex")
});

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(build_rules);

fn build_rules() -> Vec<Rule> {
    let role = role_call();
    let mut rules = vec![
        Rule::new(
            RuleKind::Goto,
            Action::Goto,
            &format!(r"{PAGE}goto\(\s*{}", lit("url")),
            extract_goto,
        ),
        Rule::new(
            RuleKind::LocatorFilterClick,
            Action::Click,
            &format!(
                r"{PAGE}{}\.filter\(\s*\{{\s*hasText\s*:\s*{}\s*\}}\s*\)\.click\(",
                locator_call("sel"),
                lit("text")
            ),
            extract_locator_filter,
        ),
        Rule::new(
            RuleKind::RoleTextClick,
            Action::Click,
            &format!(
                r"{PAGE}{role}\.getByText\(\s*{}\s*(?:,[^)]*)?\)\.click\(",
                lit("text")
            ),
            extract_role_text,
        ),
        Rule::new(
            RuleKind::RoleLocatorCheck,
            Action::Check,
            &format!(r"{PAGE}{role}\.{}\.check\(", locator_call("sel")),
            extract_role_locator,
        ),
        Rule::new(
            RuleKind::LocatorClick,
            Action::Click,
            &format!(
                r"{PAGE}{}{MODIFIER}{}",
                locator_call("sel"),
                action_call(Action::Click)
            ),
            extract_locator,
        ),
    ];

    for (kind, action) in [
        (RuleKind::RoleClick, Action::Click),
        (RuleKind::RoleSelect, Action::Select),
        (RuleKind::RolePress, Action::Press),
        (RuleKind::RoleCheck, Action::Check),
        (RuleKind::RoleFill, Action::Fill),
    ] {
        rules.push(Rule::new(
            kind,
            action,
            &format!(r"{PAGE}{role}{MODIFIER}{}", action_call(action)),
            extract_role,
        ));
    }

    for (kind, action) in [
        (RuleKind::LocatorFill, Action::Fill),
        (RuleKind::LocatorPress, Action::Press),
        (RuleKind::LocatorCheck, Action::Check),
        (RuleKind::LocatorSelect, Action::Select),
    ] {
        rules.push(Rule::new(
            kind,
            action,
            &format!(
                r"{PAGE}{}{MODIFIER}{}",
                locator_call("sel"),
                action_call(action)
            ),
            extract_locator,
        ));
    }

    rules.push(Rule::new(
        RuleKind::TextClick,
        Action::Click,
        &format!(
            r"{PAGE}getByText\(\s*{}\s*(?:,[^)]*)?\){MODIFIER}\.click\(",
            lit("text")
        ),
        extract_text,
    ));

    for (kind, action, call, extract) in [
        (
            RuleKind::PlaceholderClick,
            Action::Click,
            "getByPlaceholder",
            extract_placeholder as Extractor,
        ),
        (
            RuleKind::PlaceholderFill,
            Action::Fill,
            "getByPlaceholder",
            extract_placeholder as Extractor,
        ),
        (
            RuleKind::TestIdClick,
            Action::Click,
            "getByTestId",
            extract_test_id as Extractor,
        ),
        (
            RuleKind::TestIdFill,
            Action::Fill,
            "getByTestId",
            extract_test_id as Extractor,
        ),
    ] {
        rules.push(Rule::new(
            kind,
            action,
            &format!(
                r"{PAGE}{call}\(\s*{}\s*(?:,[^)]*)?\){MODIFIER}{}",
                lit("target"),
                action_call(action)
            ),
            extract,
        ));
    }

    rules
}

/// Parse a whole recording into its ordered step sequence.
#[must_use]
pub fn parse_recording(content: &str) -> Vec<StepRecord> {
    let steps: Vec<StepRecord> = content
        .lines()
        .map(str::trim)
        .filter(|line| is_interaction_line(line))
        .map(classify_line)
        .collect();

    debug!(
        steps = steps.len(),
        unrecognized = steps.iter().filter(|s| s.action == Action::Other).count(),
        "Parsed recording"
    );
    steps
}

/// Classify one interaction line. Never fails: unknown lines become `Other`.
#[must_use]
pub fn classify_line(line: &str) -> StepRecord {
    let line = line.trim();
    for rule in RULES.iter() {
        if let Some(step) = rule.apply(line) {
            trace!(rule = ?rule.kind, method = ?step.method_name, "Matched recorded line");
            return step;
        }
    }
    debug!(line, "No rule matched recorded line");
    StepRecord::other(line)
}

/// Which rule (if any) claims a line.
#[must_use]
pub fn matching_rule(line: &str) -> Option<RuleKind> {
    let line = line.trim();
    RULES
        .iter()
        .find(|rule| rule.apply(line).is_some())
        .map(|rule| rule.kind)
}

fn is_interaction_line(line: &str) -> bool {
    if line.is_empty() || line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
    {
        return false;
    }
    line.contains(INTERACTION_MARKER)
}

// === Extractors ===

fn extract_goto(caps: &Captures<'_>, _action: Action, raw: &str) -> Option<StepRecord> {
    let url = literal(caps, "url")?;
    Some(StepRecord::goto(raw, url))
}

fn extract_locator_filter(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let sel = literal(caps, "sel")?;
    let text = literal(caps, "text")?;
    let selector = format!("{sel}:has-text(\"{}\")", escape_attr(&text));
    let method = method_name(
        action,
        &[
            to_proper_camel_case(&sel),
            "Text".to_string(),
            to_proper_camel_case(&text),
        ],
        None,
    );
    Some(StepRecord::interaction(action, raw, selector, method))
}

fn extract_role_text(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let (role, name) = role_parts(caps)?;
    let text = literal(caps, "text")?;
    let selector = format!(
        "{}{SCOPE_SEPARATOR}text={text}",
        role_selector(&role, name.as_deref())
    );
    let method = method_name(
        action,
        &[
            role_fragment(&role),
            name.as_deref().map(to_proper_camel_case).unwrap_or_default(),
            to_proper_camel_case(&text),
        ],
        None,
    );
    Some(StepRecord::interaction(action, raw, selector, method).with_role(role, name))
}

fn extract_role_locator(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let (role, name) = role_parts(caps)?;
    let sel = literal(caps, "sel")?;
    let selector = format!(
        "{}{SCOPE_SEPARATOR}{sel}",
        role_selector(&role, name.as_deref())
    );
    let method = method_name(
        action,
        &[
            role_fragment(&role),
            name.as_deref().map(to_proper_camel_case).unwrap_or_default(),
            to_proper_camel_case(&sel),
        ],
        None,
    );
    Some(StepRecord::interaction(action, raw, selector, method).with_role(role, name))
}

fn extract_locator(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let sel = literal(caps, "sel")?;
    let modifier = modifier(caps);
    let method = method_name(action, &[to_proper_camel_case(&sel)], modifier);
    Some(
        StepRecord::interaction(action, raw, sel, method)
            .with_value(action_value(caps, action))
            .with_modifier(modifier),
    )
}

fn extract_role(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let (role, name) = role_parts(caps)?;
    let modifier = modifier(caps);
    let selector = role_selector(&role, name.as_deref());
    let method = method_name(
        action,
        &[
            role_fragment(&role),
            name.as_deref().map(to_proper_camel_case).unwrap_or_default(),
        ],
        modifier,
    );
    Some(
        StepRecord::interaction(action, raw, selector, method)
            .with_role(role, name)
            .with_value(action_value(caps, action))
            .with_modifier(modifier),
    )
}

fn extract_text(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let text = literal(caps, "text")?;
    let modifier = modifier(caps);
    let method = method_name(
        action,
        &["Text".to_string(), to_proper_camel_case(&text)],
        modifier,
    );
    Some(
        StepRecord::interaction(action, raw, format!("text={text}"), method)
            .with_modifier(modifier),
    )
}

fn extract_placeholder(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let target = literal(caps, "target")?;
    attribute_step(caps, action, raw, "placeholder", &target)
}

fn extract_test_id(caps: &Captures<'_>, action: Action, raw: &str) -> Option<StepRecord> {
    let target = literal(caps, "target")?;
    attribute_step(caps, action, raw, "data-testid", &target)
}

fn attribute_step(
    caps: &Captures<'_>,
    action: Action,
    raw: &str,
    attribute: &str,
    target: &str,
) -> Option<StepRecord> {
    let modifier = modifier(caps);
    let selector = format!("[{attribute}=\"{}\"]", escape_attr(target));
    let method = method_name(action, &[to_proper_camel_case(target)], modifier);
    Some(
        StepRecord::interaction(action, raw, selector, method)
            .with_value(action_value(caps, action))
            .with_modifier(modifier),
    )
}

// === Helpers ===

/// Verb prefix + fragments + modifier suffix; `Element` when nothing else survives.
fn method_name(action: Action, parts: &[String], modifier: Option<Modifier>) -> String {
    let mut name = action.verb().to_string();
    for part in parts {
        name.push_str(part);
    }
    if let Some(modifier) = modifier {
        name.push_str(&modifier.method_suffix());
    }
    if name == action.verb() {
        name.push_str("Element");
    }
    name
}

fn role_fragment(role: &str) -> String {
    let fragment = to_proper_camel_case(role);
    if fragment.is_empty() {
        "Button".to_string()
    } else {
        fragment
    }
}

fn role_parts(caps: &Captures<'_>) -> Option<(String, Option<String>)> {
    let role = literal(caps, "role")?;
    let name = caps
        .name("opts")
        .and_then(|opts| NAME_OPTION_RE.captures(opts.as_str()))
        .and_then(|name_caps| literal(&name_caps, "name"));
    Some((role, name))
}

fn role_selector(role: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("role={role}[name=\"{}\"]", escape_attr(name)),
        None => format!("role={role}"),
    }
}

fn action_value(caps: &Captures<'_>, action: Action) -> Option<String> {
    if action.takes_value() {
        literal(caps, "value")
    } else {
        None
    }
}

fn modifier(caps: &Captures<'_>) -> Option<Modifier> {
    if let Some(m) = caps.name("mod") {
        return match m.as_str() {
            "first" => Some(Modifier::First),
            "last" => Some(Modifier::Last),
            _ => None,
        };
    }
    caps.name("nth")
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(Modifier::Nth)
}

/// The unescaped content of a literal captured by [`lit`].
fn literal(caps: &Captures<'_>, name: &str) -> Option<String> {
    ["sq", "dq", "bt"]
        .iter()
        .find_map(|suffix| caps.name(&format!("{name}_{suffix}")))
        .map(|m| unescape(m.as_str()))
}

/// Resolve JavaScript string escapes. Unknown or malformed escapes are kept verbatim.
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            '\\' | '\'' | '"' | '`' => out.push(next),
            'x' => push_hex_escape(&mut out, &mut chars, 'x', 2),
            'u' => push_hex_escape(&mut out, &mut chars, 'u', 4),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// `\xHH`, `\uHHHH` or `\u{H..}`; falls back to the original text when invalid.
fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    kind: char,
    width: usize,
) {
    let mut digits = String::new();
    let braced = kind == 'u' && chars.peek() == Some(&'{');
    if braced {
        chars.next();
        while let Some(&c) = chars.peek() {
            chars.next();
            if c == '}' {
                break;
            }
            digits.push(c);
        }
    } else {
        while digits.len() < width {
            match chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    digits.push(*c);
                    chars.next();
                }
                _ => break,
            }
        }
    }

    let decoded = (braced || digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(kind);
            if braced {
                out.push('{');
                out.push_str(&digits);
                out.push('}');
            } else {
                out.push_str(&digits);
            }
        }
    }
}

fn escape_attr(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(line: &str) -> String {
        classify_line(line).method_name.unwrap_or_default()
    }

    #[test]
    fn goto_extracts_url() {
        let step = classify_line("await page.goto('https://example.test/login');");
        assert_eq!(step.action, Action::Goto);
        assert_eq!(step.url.as_deref(), Some("https://example.test/login"));
        assert_eq!(step.method_name.as_deref(), Some("goto"));
        assert!(step.selector.is_none());
    }

    #[test]
    fn locator_filter_click_combines_text() {
        let line = "await page.locator('div').filter({ hasText: 'Welcome back' }).click();";
        let step = classify_line(line);
        assert_eq!(matching_rule(line), Some(RuleKind::LocatorFilterClick));
        assert_eq!(step.selector.as_deref(), Some("div:has-text(\"Welcome back\")"));
        assert_eq!(step.method_name.as_deref(), Some("clickDivTextWelcomeBack"));
    }

    #[test]
    fn plain_locator_click() {
        let step = classify_line("await page.locator('#submit-button').click();");
        assert_eq!(step.action, Action::Click);
        assert_eq!(step.selector.as_deref(), Some("#submit-button"));
        assert_eq!(step.method_name.as_deref(), Some("clickSubmitButton"));
    }

    #[test]
    fn role_click_with_name() {
        let step = classify_line("await page.getByRole('button', { name: 'Sign in' }).click();");
        assert_eq!(step.action, Action::Click);
        assert_eq!(step.role.as_deref(), Some("button"));
        assert_eq!(step.name.as_deref(), Some("Sign in"));
        assert_eq!(step.selector.as_deref(), Some(r#"role=button[name="Sign in"]"#));
        assert_eq!(step.method_name.as_deref(), Some("clickButtonSignIn"));
    }

    #[test]
    fn role_click_with_exact_option_and_double_quotes() {
        let step =
            classify_line(r#"await page.getByRole("link", { name: "Home", exact: true }).click();"#);
        assert_eq!(step.name.as_deref(), Some("Home"));
        assert_eq!(step.method_name.as_deref(), Some("clickLinkHome"));
    }

    #[test]
    fn role_click_modifiers_without_name() {
        assert_eq!(
            method("await page.getByRole('button').first().click();"),
            "clickButtonFirst"
        );
        let step = classify_line("await page.getByRole('link').nth(2).click();");
        assert_eq!(step.modifier, Some(Modifier::Nth(2)));
        assert_eq!(step.method_name.as_deref(), Some("clickLinkNth2"));
        assert_eq!(step.full_selector().as_deref(), Some("role=link >> nth=2"));
        assert_eq!(method("await page.getByRole('menuitem').click();"), "clickMenuitem");
    }

    #[test]
    fn role_click_name_and_modifier_both_contribute() {
        assert_eq!(
            method("await page.getByRole('button', { name: 'Delete' }).nth(1).click();"),
            "clickButtonDeleteNth1"
        );
    }

    #[test]
    fn role_with_letterless_role_falls_back_to_button() {
        assert_eq!(method("await page.getByRole('42').click();"), "clickButton");
    }

    #[test]
    fn role_fill_select_press_check() {
        let fill = classify_line(
            "await page.getByRole('textbox', { name: 'Email Address' }).fill('user@example.test');",
        );
        assert_eq!(fill.action, Action::Fill);
        assert_eq!(fill.value.as_deref(), Some("user@example.test"));
        assert_eq!(fill.method_name.as_deref(), Some("fillTextboxEmailAddress"));

        let select =
            classify_line("await page.getByRole('combobox', { name: 'Country' }).selectOption('US');");
        assert_eq!(select.action, Action::Select);
        assert_eq!(select.value.as_deref(), Some("US"));
        assert_eq!(select.method_name.as_deref(), Some("selectComboboxCountry"));

        let press =
            classify_line("await page.getByRole('textbox', { name: 'Search' }).press('Enter');");
        assert_eq!(press.action, Action::Press);
        assert_eq!(press.value.as_deref(), Some("Enter"));
        assert_eq!(press.method_name.as_deref(), Some("pressTextboxSearch"));

        let check =
            classify_line("await page.getByRole('checkbox', { name: 'Remember me' }).check();");
        assert_eq!(check.action, Action::Check);
        assert!(check.value.is_none());
        assert_eq!(check.method_name.as_deref(), Some("checkCheckboxRememberMe"));
    }

    #[test]
    fn locator_fill_press_check() {
        let fill = classify_line("await page.locator('#email').fill('a@b.test');");
        assert_eq!(fill.action, Action::Fill);
        assert_eq!(fill.method_name.as_deref(), Some("fillEmail"));
        assert_eq!(fill.value.as_deref(), Some("a@b.test"));

        let press = classify_line("await page.locator('#search').press('Tab');");
        assert_eq!(press.method_name.as_deref(), Some("pressSearch"));

        let check = classify_line("await page.locator('#terms').check();");
        assert_eq!(check.method_name.as_deref(), Some("checkTerms"));
    }

    #[test]
    fn text_click() {
        let step = classify_line("await page.getByText('Dashboard').click();");
        assert_eq!(step.selector.as_deref(), Some("text=Dashboard"));
        assert_eq!(step.method_name.as_deref(), Some("clickTextDashboard"));

        let exact = classify_line("await page.getByText('Log out', { exact: true }).click();");
        assert_eq!(exact.method_name.as_deref(), Some("clickTextLogOut"));
    }

    #[test]
    fn chained_role_text_click() {
        let line = "await page.getByRole('row', { name: 'John Smith' }).getByText('Edit').click();";
        assert_eq!(matching_rule(line), Some(RuleKind::RoleTextClick));
        let step = classify_line(line);
        assert_eq!(
            step.selector.as_deref(),
            Some(r#"role=row[name="John Smith"] >> text=Edit"#)
        );
        assert_eq!(step.method_name.as_deref(), Some("clickRowJohnSmithEdit"));
    }

    #[test]
    fn chained_role_locator_check() {
        let line = r#"await page.getByRole('row', { name: 'Alice' }).locator('input[type="checkbox"]').check();"#;
        assert_eq!(matching_rule(line), Some(RuleKind::RoleLocatorCheck));
        let step = classify_line(line);
        assert_eq!(step.action, Action::Check);
        assert_eq!(
            step.selector.as_deref(),
            Some(r#"role=row[name="Alice"] >> input[type="checkbox"]"#)
        );
        assert_eq!(step.method_name.as_deref(), Some("checkRowAliceInputTypeCheckbox"));
    }

    #[test]
    fn placeholder_and_test_id() {
        let fill = classify_line("await page.getByPlaceholder('Your name').fill('Ada');");
        assert_eq!(fill.selector.as_deref(), Some(r#"[placeholder="Your name"]"#));
        assert_eq!(fill.method_name.as_deref(), Some("fillYourName"));

        let click = classify_line("await page.getByTestId('save-btn').click();");
        assert_eq!(click.selector.as_deref(), Some(r#"[data-testid="save-btn"]"#));
        assert_eq!(click.method_name.as_deref(), Some("clickSaveBtn"));
    }

    #[test]
    fn escaped_quotes_are_unescaped() {
        let step = classify_line(r"await page.getByRole('button', { name: 'Don\'t save' }).click();");
        assert_eq!(step.name.as_deref(), Some("Don't save"));
        assert_eq!(step.method_name.as_deref(), Some("clickButtonDonTSave"));
    }

    #[test]
    fn javascript_escapes_are_decoded() {
        let step = classify_line(r"await page.locator('#notes').fill('line1\nline2\ttab');");
        assert_eq!(step.value.as_deref(), Some("line1\nline2\ttab"));

        let step = classify_line(r"await page.locator('#name').fill('Ren\u00e9 \x41 \u{1F600}');");
        assert_eq!(step.value.as_deref(), Some("René A \u{1F600}"));

        let step = classify_line(r#"await page.locator('#path').fill("C:\\tmp \"x\"");"#);
        assert_eq!(step.value.as_deref(), Some(r#"C:\tmp "x""#));
    }

    #[test]
    fn unknown_and_malformed_escapes_are_kept() {
        assert_eq!(unescape(r"\d+"), r"\d+");
        assert_eq!(unescape(r"\uZZ"), r"\uZZ");
        assert_eq!(unescape(r"\x4"), r"\x4");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn locator_select_option() {
        let line = "await page.locator('#size').selectOption('M');";
        assert_eq!(matching_rule(line), Some(RuleKind::LocatorSelect));
        let step = classify_line(line);
        assert_eq!(step.action, Action::Select);
        assert_eq!(step.value.as_deref(), Some("M"));
        assert_eq!(step.method_name.as_deref(), Some("selectSize"));
    }

    #[test]
    fn unknown_lines_become_other() {
        let step = classify_line("await page.mouse.wheel(0, 500);");
        assert_eq!(step.action, Action::Other);
        assert_eq!(step.raw, "await page.mouse.wheel(0, 500);");
        assert!(step.method_name.is_none());
        assert_eq!(matching_rule("await page.mouse.wheel(0, 500);"), None);
    }

    #[test]
    fn non_interaction_lines_are_discarded() {
        let content = r"import { test, expect } from '@playwright/test';

test('test', async ({ page }) => {
  // navigate first
  await page.goto('https://example.test/');
  await page.getByRole('link', { name: 'Docs' }).click();
  await page.keyboard.press('Escape');
});
";
        let steps = parse_recording(content);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].action, Action::Goto);
        assert_eq!(steps[1].method_name.as_deref(), Some("clickLinkDocs"));
        assert_eq!(steps[2].action, Action::Other);
    }

    #[test]
    fn parsing_is_deterministic() {
        let content = "await page.goto('https://a.test');\nawait page.locator('#x').click();\n";
        assert_eq!(parse_recording(content), parse_recording(content));
    }
}
