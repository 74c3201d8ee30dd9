//! The whitelist: which tags exist and which attributes they may carry.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::AttributeMatcher;

/// Error returned when registering something twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// An attribute group with this name is already registered.
    #[error("attribute group `{0}` is already registered")]
    DuplicateGroup(String),
    /// A rule for this tag is already registered. The global rule is reported with an empty name.
    #[error("a rule for tag `{0}` is already registered")]
    DuplicateTag(String),
}

/// What one tag is allowed to look like.
///
/// A rule with an empty name is the global rule, see [`TagRule::global`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagRule {
    /// The tag name, empty for the global rule.
    pub name: String,
    /// Attribute names allowed verbatim.
    pub attrs: HashSet<String>,
    /// Names of [`AttributeGroup`]s whose attributes are allowed as well.
    pub groups: Vec<String>,
    /// Any attribute starting with this prefix is allowed.
    pub attr_prefix: Option<String>,
    /// Whether the tag never has content, like `<img>`. Such tags are not expected to be closed.
    pub is_self_closing: bool,
}

impl TagRule {
    /// A rule for the tag `name` that allows no attributes yet.
    pub fn new(name: impl Into<String>) -> Self {
        TagRule {
            name: name.into(),
            ..TagRule::default()
        }
    }

    /// The rule whose attributes are allowed on every tag.
    ///
    /// It does not make any tag name valid by itself, and its `is_self_closing` flag has no
    /// effect.
    #[must_use]
    pub fn global() -> Self {
        TagRule::default()
    }

    /// Allow these attribute names.
    #[must_use]
    pub fn attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs.extend(attrs.into_iter().map(Into::into));
        self
    }

    /// Allow the attributes of these groups.
    #[must_use]
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Allow every attribute that starts with `prefix`. An empty prefix removes it again.
    #[must_use]
    pub fn attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.attr_prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    /// Declare the tag as self-closing.
    #[must_use]
    pub fn self_closing(mut self, yes: bool) -> Self {
        self.is_self_closing = yes;
        self
    }

    fn fold_names(&mut self) {
        self.name.make_ascii_lowercase();
        self.attrs = self.attrs.drain().map(|a| a.to_ascii_lowercase()).collect();
        for group in &mut self.groups {
            group.make_ascii_lowercase();
        }
        if let Some(prefix) = &mut self.attr_prefix {
            prefix.make_ascii_lowercase();
        }
    }
}

/// A named set of attributes that several [`TagRule`]s can share.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeGroup {
    /// The name rules refer to the group by.
    pub name: String,
    /// The attribute names in this group.
    pub attrs: HashSet<String>,
}

impl AttributeGroup {
    /// An empty group.
    pub fn new(name: impl Into<String>) -> Self {
        AttributeGroup {
            name: name.into(),
            attrs: HashSet::new(),
        }
    }

    /// Add these attribute names to the group.
    #[must_use]
    pub fn attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs.extend(attrs.into_iter().map(Into::into));
        self
    }

    fn fold_names(&mut self) {
        self.name.make_ascii_lowercase();
        self.attrs = self.attrs.drain().map(|a| a.to_ascii_lowercase()).collect();
    }
}

/// The set of registered tag rules and attribute groups.
///
/// A schema is filled once and only read afterwards. All lookups take `&self`, so a schema can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Keyed by tag name. The global rule lives under `""`.
    tags: HashMap<String, TagRule>,
    groups: HashMap<String, AttributeGroup>,
    case_sensitive: bool,
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new()
    }
}

impl Schema {
    /// An empty schema that compares names exactly.
    ///
    /// The tokenizer lowercases every tag and attribute name it reads, so a name registered with
    /// uppercase letters is only reachable through the point queries, never through markup. Use
    /// [`Schema::case_insensitive`] for mixed-case names like `viewBox`.
    #[must_use]
    pub fn new() -> Self {
        Schema {
            tags: HashMap::new(),
            groups: HashMap::new(),
            case_sensitive: true,
        }
    }

    /// An empty schema that compares tag, attribute and group names ignoring ASCII case.
    ///
    /// ```
    /// use htmlcheck::{Schema, TagRule};
    ///
    /// let mut schema = Schema::case_insensitive();
    /// schema.add_valid_tag(TagRule::new("A").attrs(["HREF"])).unwrap();
    /// assert!(schema.is_valid_tag("a"));
    /// assert!(schema.is_valid_attribute("a", "href"));
    /// ```
    #[must_use]
    pub fn case_insensitive() -> Self {
        Schema {
            case_sensitive: false,
            ..Schema::new()
        }
    }

    /// Whether names are compared exactly.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Register a named attribute group.
    pub fn add_group(&mut self, mut group: AttributeGroup) -> Result<(), SchemaError> {
        if !self.case_sensitive {
            group.fold_names();
        }
        if self.groups.contains_key(&group.name) {
            return Err(SchemaError::DuplicateGroup(group.name));
        }
        self.groups.insert(group.name.clone(), group);
        Ok(())
    }

    /// Register the rule for one tag, or the global rule if its name is empty.
    pub fn add_valid_tag(&mut self, mut rule: TagRule) -> Result<(), SchemaError> {
        if !self.case_sensitive {
            rule.fold_names();
        }
        if self.tags.contains_key(&rule.name) {
            return Err(SchemaError::DuplicateTag(rule.name));
        }
        self.tags.insert(rule.name.clone(), rule);
        Ok(())
    }

    /// Whether a rule for `tag` exists. Always false for the empty name.
    #[must_use]
    pub fn is_valid_tag(&self, tag: &str) -> bool {
        self.rule(tag).is_some()
    }

    /// Whether `attr` may appear on `tag`, allowed either by the tag's own rule or by the global
    /// rule. The tag does not need to be valid itself.
    #[must_use]
    pub fn is_valid_attribute(&self, tag: &str, attr: &str) -> bool {
        self.matcher(tag).matches(attr)
    }

    /// Whether `tag`'s own rule declares it self-closing.
    #[must_use]
    pub fn is_self_closing(&self, tag: &str) -> bool {
        self.rule(tag).map_or(false, |rule| rule.is_self_closing)
    }

    /// The rule registered for `tag`. The global rule is not returned here, see
    /// [`Schema::global_rule`].
    #[must_use]
    pub fn rule(&self, tag: &str) -> Option<&TagRule> {
        if tag.is_empty() {
            return None;
        }
        self.tags.get(self.fold(tag).as_ref())
    }

    /// The global rule, if one was registered.
    #[must_use]
    pub fn global_rule(&self) -> Option<&TagRule> {
        self.tags.get("")
    }

    /// The attribute group registered as `name`.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&AttributeGroup> {
        self.groups.get(self.fold(name).as_ref())
    }

    /// Everything needed to check the attributes of one `tag`.
    #[must_use]
    pub fn matcher(&self, tag: &str) -> AttributeMatcher<'_> {
        AttributeMatcher::new(self, self.rule(tag), self.global_rule())
    }

    /// Bring a name into the form it was registered in.
    pub(crate) fn fold<'n>(&self, name: &'n str) -> Cow<'n, str> {
        if self.case_sensitive || !name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(name.to_ascii_lowercase())
        }
    }

    pub(crate) fn names_eq(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        let mut schema = Schema::new();
        schema.add_valid_tag(TagRule::new("b")).unwrap();
        schema.add_valid_tag(TagRule::global()).unwrap();
        schema.add_group(AttributeGroup::new("g")).unwrap();

        assert_eq!(
            schema.add_valid_tag(TagRule::new("b").attrs(["id"])),
            Err(SchemaError::DuplicateTag("b".into()))
        );
        assert_eq!(
            schema.add_valid_tag(TagRule::global()),
            Err(SchemaError::DuplicateTag("".into()))
        );
        assert_eq!(
            schema.add_group(AttributeGroup::new("g")),
            Err(SchemaError::DuplicateGroup("g".into()))
        );
        // the first registration is kept
        assert!(schema.rule("b").unwrap().attrs.is_empty());
    }

    #[test]
    fn global_rule_is_not_a_tag() {
        let mut schema = Schema::new();
        schema
            .add_valid_tag(TagRule::global().attrs(["id"]).self_closing(true))
            .unwrap();
        assert!(!schema.is_valid_tag(""));
        assert!(schema.rule("").is_none());
        assert!(schema.global_rule().is_some());
        assert!(!schema.is_self_closing("b"));
        // attributes still apply to tags that do not exist
        assert!(schema.is_valid_attribute("nope", "id"));
    }

    #[test]
    fn empty_prefix_is_no_prefix() {
        let rule = TagRule::new("b").attr_prefix("data-").attr_prefix("");
        assert_eq!(rule.attr_prefix, None);
    }

    #[test]
    fn case_sensitive_by_default() {
        let mut schema = Schema::new();
        schema.add_valid_tag(TagRule::new("B").attrs(["ID"])).unwrap();
        schema.add_valid_tag(TagRule::new("b")).unwrap();
        assert!(schema.is_valid_tag("B"));
        assert!(schema.is_valid_attribute("B", "ID"));
        assert!(!schema.is_valid_attribute("B", "id"));
        assert!(!schema.is_valid_attribute("b", "ID"));
    }

    #[test]
    fn case_insensitive_folds_everything() {
        let mut schema = Schema::case_insensitive();
        schema
            .add_group(AttributeGroup::new("Events").attrs(["onClick"]))
            .unwrap();
        schema
            .add_valid_tag(
                TagRule::new("Div")
                    .groups(["EVENTS"])
                    .attr_prefix("Data-"),
            )
            .unwrap();
        assert_eq!(
            schema.add_valid_tag(TagRule::new("DIV")),
            Err(SchemaError::DuplicateTag("div".into()))
        );
        assert!(!schema.is_self_closing("div"));
        assert!(schema.is_valid_attribute("DIV", "ONCLICK"));
        assert!(schema.is_valid_attribute("div", "DATA-X"));
        assert!(schema.group("events").is_some());
        assert!(schema.names_eq("Div", "dIV"));
    }
}
