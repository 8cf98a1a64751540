//! Parsed representation of recorded browser interactions.

use serde::Serialize;
use std::fmt;

/// The interaction kind of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Goto,
    Click,
    Fill,
    Select,
    Press,
    Check,
    Other,
}

impl Action {
    /// Verb used as the generated method-name prefix.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Goto => "goto",
            Self::Click => "click",
            Self::Fill => "fill",
            Self::Select => "select",
            Self::Press => "press",
            Self::Check => "check",
            Self::Other => "other",
        }
    }

    /// Whether the action carries a literal argument.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        matches!(self, Self::Fill | Self::Select | Self::Press)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Index qualifier picking one element among several matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    First,
    Last,
    Nth(u32),
}

impl Modifier {
    /// Fragment appended to method names (`First`, `Last`, `Nth2`).
    #[must_use]
    pub fn method_suffix(&self) -> String {
        match self {
            Self::First => "First".to_string(),
            Self::Last => "Last".to_string(),
            Self::Nth(k) => format!("Nth{k}"),
        }
    }

    /// Selector-chain suffix understood by the locator engine.
    #[must_use]
    pub fn selector_suffix(&self) -> String {
        match self {
            Self::First => " >> nth=0".to_string(),
            Self::Last => " >> nth=-1".to_string(),
            Self::Nth(k) => format!(" >> nth={k}"),
        }
    }
}

/// One recorded interaction line, classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub action: Action,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StepRecord {
    /// A navigation step.
    #[must_use]
    pub fn goto(raw: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            action: Action::Goto,
            raw: raw.into(),
            selector: None,
            role: None,
            name: None,
            value: None,
            modifier: None,
            method_name: Some("goto".to_string()),
            url: Some(url.into()),
        }
    }

    /// A line no rule recognized.
    #[must_use]
    pub fn other(raw: impl Into<String>) -> Self {
        Self {
            action: Action::Other,
            raw: raw.into(),
            selector: None,
            role: None,
            name: None,
            value: None,
            modifier: None,
            method_name: None,
            url: None,
        }
    }

    /// An element interaction against `selector`.
    #[must_use]
    pub fn interaction(
        action: Action,
        raw: impl Into<String>,
        selector: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            action,
            raw: raw.into(),
            selector: Some(selector.into()),
            role: None,
            name: None,
            value: None,
            modifier: None,
            method_name: Some(method_name.into()),
            url: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>, name: Option<String>) -> Self {
        self.role = Some(role.into());
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub const fn with_modifier(mut self, modifier: Option<Modifier>) -> Self {
        self.modifier = modifier;
        self
    }

    /// Selector with the modifier appended as a locator-chain suffix.
    #[must_use]
    pub fn full_selector(&self) -> Option<String> {
        let selector = self.selector.as_ref()?;
        Some(match self.modifier {
            Some(modifier) => format!("{selector}{}", modifier.selector_suffix()),
            None => selector.clone(),
        })
    }

    /// Human-readable target: `button "Sign in"`, or the raw selector.
    #[must_use]
    pub fn target_label(&self) -> String {
        match (&self.role, &self.name) {
            (Some(role), Some(name)) => format!("{role} \"{name}\""),
            (Some(role), None) => role.clone(),
            _ => self.selector.clone().unwrap_or_default(),
        }
    }

    /// Short description used in test titles and step comments.
    #[must_use]
    pub fn describe(&self) -> String {
        let target = self.describe_target();
        let value = self.value.as_deref().unwrap_or_default();
        let text = match self.action {
            Action::Goto => format!("navigate to {}", self.url.as_deref().unwrap_or_default()),
            Action::Click => format!("click on {target}"),
            Action::Fill => format!("fill {target} field"),
            Action::Select => format!("select {value} in {target}"),
            Action::Press => format!("press {value} on {target}"),
            Action::Check => format!("check {target}"),
            Action::Other => "unrecognized step".to_string(),
        };
        // Descriptions land in `//` comments and titles; keep them on one line.
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn describe_target(&self) -> String {
        if let Some(name) = &self.name {
            return name.to_lowercase();
        }
        if let Some(role) = &self.role {
            return role.clone();
        }
        let selector = self.selector.as_deref().unwrap_or_default();
        selector
            .strip_prefix("text=")
            .unwrap_or(selector)
            .to_string()
    }
}
