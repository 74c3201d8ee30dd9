use crate::{Schema, TagRule};

/// Decides which attributes are allowed on one tag.
///
/// Obtained from [`Schema::matcher`]. It combines the tag's own rule with the global rule, so
/// looking up the rules once is enough for all attributes of a start tag.
#[derive(Debug, Clone, Copy)]
pub struct AttributeMatcher<'s> {
    schema: &'s Schema,
    own: Option<&'s TagRule>,
    global: Option<&'s TagRule>,
}

impl<'s> AttributeMatcher<'s> {
    pub(crate) fn new(
        schema: &'s Schema,
        own: Option<&'s TagRule>,
        global: Option<&'s TagRule>,
    ) -> Self {
        AttributeMatcher {
            schema,
            own,
            global,
        }
    }

    fn rules(&self) -> impl Iterator<Item = &'s TagRule> {
        self.own.into_iter().chain(self.global)
    }

    /// Whether `attr` is allowed.
    ///
    /// An attribute is allowed if either rule lists it, if it is in one of the groups either rule
    /// refers to, or if it starts with either rule's prefix.
    #[must_use]
    pub fn matches(&self, attr: &str) -> bool {
        let attr = self.schema.fold(attr);
        let attr = attr.as_ref();

        if self.rules().any(|rule| rule.attrs.contains(attr)) {
            return true;
        }

        // groups that were never registered allow nothing
        let in_group = self
            .rules()
            .flat_map(|rule| &rule.groups)
            .filter_map(|name| self.schema.group(name))
            .any(|group| group.attrs.contains(attr));
        if in_group {
            return true;
        }

        self.rules()
            .filter_map(|rule| rule.attr_prefix.as_deref())
            .any(|prefix| !prefix.is_empty() && attr.starts_with(prefix))
    }
}
