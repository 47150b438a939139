//! Field-rule validation.
//!
//! A [`Schema`] is a map of independently checkable [`FieldRules`], so
//! validating one step is a set intersection between the schema and the
//! step's field names rather than introspection of a monolithic schema.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;

use super::types::{FieldErrors, FormData, FormValue};

/// A single constraint on a field value
#[derive(Clone, Debug)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    /// Value must equal another field's value (password confirmation)
    MatchesField(String),
    OneOf(Vec<String>),
    /// Required only when `field` currently holds `equals`
    RequiredWhen { field: String, equals: String },
    /// Date values must be at least `years` old on `as_of`
    MinimumAge { years: u32, as_of: NaiveDate },
    /// Map values may hold at most this many entries
    MaxEntries(usize),
}

#[derive(Clone, Debug)]
struct CheckedRule {
    rule: Rule,
    message: String,
}

/// The rules of one field, checked in declaration order
#[derive(Clone, Debug)]
pub struct FieldRules {
    field: String,
    rules: Vec<CheckedRule>,
}

impl FieldRules {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rule(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push(CheckedRule {
            rule,
            message: message.into(),
        });
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required, message)
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLength(min), message)
    }

    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MaxLength(max), message)
    }

    pub fn pattern(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.rule(Rule::Pattern(pattern), message)
    }

    pub fn matches_field(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(Rule::MatchesField(other.into()), message)
    }

    pub fn one_of<I, S>(self, allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        self.rule(Rule::OneOf(allowed), message)
    }

    pub fn required_when(
        self,
        field: impl Into<String>,
        equals: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.rule(
            Rule::RequiredWhen {
                field: field.into(),
                equals: equals.into(),
            },
            message,
        )
    }

    pub fn minimum_age(self, years: u32, as_of: NaiveDate, message: impl Into<String>) -> Self {
        self.rule(Rule::MinimumAge { years, as_of }, message)
    }

    pub fn max_entries(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MaxEntries(max), message)
    }

    /// First failing rule's message, if any
    pub fn check(&self, data: &FormData) -> Option<String> {
        let value = data.get(&self.field);
        let blank = value.map_or(true, FormValue::is_blank);

        for checked in &self.rules {
            let passed = match &checked.rule {
                Rule::Required => !blank,
                Rule::RequiredWhen { field, equals } => {
                    let active = data.text(field).map_or(false, |text| text == equals);
                    !active || !blank
                }
                // Remaining rules only judge values that are present
                _ if blank => true,
                rule => value.map_or(true, |value| passes(rule, value, data)),
            };
            if !passed {
                return Some(checked.message.clone());
            }
        }
        None
    }
}

fn passes(rule: &Rule, value: &FormValue, data: &FormData) -> bool {
    match rule {
        Rule::Required | Rule::RequiredWhen { .. } => true,
        Rule::MinLength(min) => text_len(value).map_or(true, |len| len >= *min),
        Rule::MaxLength(max) => text_len(value).map_or(true, |len| len <= *max),
        Rule::Pattern(regex) => value
            .as_text()
            .map_or(true, |text| regex.is_match(text.trim())),
        Rule::MatchesField(other) => data.get(other) == Some(value),
        Rule::OneOf(allowed) => value
            .as_text()
            .map_or(false, |text| allowed.iter().any(|option| option == text)),
        Rule::MinimumAge { years, as_of } => match value.as_date() {
            Some(born) => as_of.years_since(born).map_or(false, |age| age >= *years),
            None => false,
        },
        Rule::MaxEntries(max) => value.as_map().map_or(true, |map| map.len() <= *max),
    }
}

fn text_len(value: &FormValue) -> Option<usize> {
    value.as_text().map(|text| text.trim().chars().count())
}

/// Rules for every field a flow knows about
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.insert(rules.field.clone(), rules);
        self
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Reduced schema holding only the named fields
    pub fn pick<S: AsRef<str>>(&self, fields: &[S]) -> Schema {
        let fields = fields
            .iter()
            .filter_map(|name| self.fields.get(name.as_ref()))
            .map(|rules| (rules.field.clone(), rules.clone()))
            .collect();
        Schema { fields }
    }

    /// Validate every field of this schema, collecting all failures
    pub fn validate(&self, data: &FormData) -> FieldErrors {
        self.fields
            .values()
            .filter_map(|rules| {
                rules
                    .check(data)
                    .map(|message| (rules.field.clone(), message))
            })
            .collect()
    }
}

/// Validate only `fields` of `schema` against `data`.
///
/// Fields outside `fields` are never reported, even when present in `data`.
/// An empty map means success.
pub fn validate_partial<S: AsRef<str>>(schema: &Schema, data: &FormData, fields: &[S]) -> FieldErrors {
    schema.pick(fields).validate(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn schema() -> Schema {
        Schema::new()
            .field(FieldRules::new("name").required("Name is required"))
            .field(
                FieldRules::new("username")
                    .required("Username is required")
                    .min_length(3, "Too short")
                    .pattern(Regex::new("^[a-z_]+$").unwrap(), "Letters only"),
            )
            .field(FieldRules::new("password").min_length(8, "Password too short"))
            .field(
                FieldRules::new("confirmPassword").matches_field("password", "Passwords do not match"),
            )
    }

    #[test]
    fn test_only_requested_fields_are_validated() {
        let data = FormData::new().with("name", "");
        let errors = validate_partial(&schema(), &data, &["name"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["name"], "Name is required");
        assert!(!errors.contains_key("username"));
    }

    #[test]
    fn test_collects_all_invalid_fields() {
        let data = FormData::new().with("name", " ").with("username", "ab");
        let errors = validate_partial(&schema(), &data, &["name", "username"]);

        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["username"], "Too short");
    }

    #[test]
    fn test_success_is_an_empty_map() {
        let data = FormData::new().with("name", "Alice").with("username", "alice");
        assert!(validate_partial(&schema(), &data, &["name", "username"]).is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let data = FormData::new();
        assert!(validate_partial(&schema(), &data, &["notAField"]).is_empty());
    }

    #[test]
    fn test_optional_rules_skip_blank_values() {
        let data = FormData::new().with("password", "");
        assert!(validate_partial(&schema(), &data, &["password"]).is_empty());
    }

    #[test]
    fn test_cross_field_match() {
        let data = FormData::new()
            .with("password", "secret123")
            .with("confirmPassword", "secret124");
        let errors = validate_partial(&schema(), &data, &["confirmPassword"]);
        assert_eq!(errors["confirmPassword"], "Passwords do not match");

        let data = data.with("confirmPassword", "secret123");
        assert!(validate_partial(&schema(), &data, &["confirmPassword"]).is_empty());
    }

    #[test]
    fn test_required_when() {
        let schema = Schema::new().field(
            FieldRules::new("email").required_when("contactMethod", "email", "Email is required"),
        );

        let by_phone = FormData::new().with("contactMethod", "phone");
        assert!(validate_partial(&schema, &by_phone, &["email"]).is_empty());

        let by_email = FormData::new().with("contactMethod", "email");
        assert_eq!(
            validate_partial(&schema, &by_email, &["email"])["email"],
            "Email is required"
        );
    }

    #[test]
    fn test_minimum_age() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let schema = Schema::new().field(
            FieldRules::new("dateOfBirth")
                .required("Date of birth is required")
                .minimum_age(13, as_of, "Too young"),
        );

        let old_enough = FormData::new().with("dateOfBirth", NaiveDate::from_ymd_opt(2011, 6, 15).unwrap());
        assert!(validate_partial(&schema, &old_enough, &["dateOfBirth"]).is_empty());

        let one_day_short =
            FormData::new().with("dateOfBirth", NaiveDate::from_ymd_opt(2011, 6, 16).unwrap());
        assert_eq!(
            validate_partial(&schema, &one_day_short, &["dateOfBirth"])["dateOfBirth"],
            "Too young"
        );

        let future = FormData::new().with("dateOfBirth", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert!(!validate_partial(&schema, &future, &["dateOfBirth"]).is_empty());
    }

    #[test]
    fn test_one_of_and_max_entries() {
        let schema = Schema::new()
            .field(FieldRules::new("visibility").one_of(["public", "private"], "Pick one"))
            .field(FieldRules::new("links").max_entries(1, "Too many links"));

        let mut links = BTreeMap::new();
        links.insert("a".to_string(), "https://a".to_string());
        links.insert("b".to_string(), "https://b".to_string());
        let data = FormData::new().with("visibility", "secret").with("links", links);

        let errors = validate_partial(&schema, &data, &["visibility", "links"]);
        assert_eq!(errors["visibility"], "Pick one");
        assert_eq!(errors["links"], "Too many links");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let data = FormData::new().with("name", "").with("username", "A!");
        let first = validate_partial(&schema(), &data, &["name", "username"]);
        let second = validate_partial(&schema(), &data, &["name", "username"]);
        assert_eq!(first, second);
    }
}
