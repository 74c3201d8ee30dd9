/// What to do with an end tag that does not close the most recently opened tag.
///
/// ```
/// use htmlcheck::{ErrorReason, NestingPolicy, TagRule, Validator};
///
/// let mut validator = Validator::new();
/// validator.add_valid_tag(TagRule::new("b")).unwrap();
/// validator.add_valid_tag(TagRule::new("i")).unwrap();
///
/// let reasons = |validator: &Validator| -> Vec<ErrorReason> {
///     validator.validate("<b><i></b>").into_iter().map(|e| e.reason).collect()
/// };
/// assert_eq!(
///     reasons(&validator),
///     [ErrorReason::WrongNesting, ErrorReason::UnclosedTag, ErrorReason::UnclosedTag]
/// );
///
/// validator.set_nesting_policy(NestingPolicy::PopToMatch);
/// assert_eq!(reasons(&validator), [ErrorReason::UnclosedTag]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestingPolicy {
    /// Report `WrongNesting` and leave the open tags as they are.
    #[default]
    Strict,
    /// If the end tag matches a tag further down, report every tag above it as `UnclosedTag` and
    /// close them all. Otherwise behave like `Strict`.
    PopToMatch,
}

/// A start tag that still waits for its end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTagFrame {
    pub name: String,
    pub offset: usize,
}

/// Result of [`TagStack::close`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Close {
    /// The end tag matched the innermost open tag.
    Popped,
    /// The end tag does not fit, nothing was closed.
    Mismatch,
    /// The end tag matched a tag further down. These are the tags that were open above it,
    /// innermost first.
    Unwound(Vec<OpenTagFrame>),
}

#[derive(Debug, Default)]
pub(crate) struct TagStack {
    frames: Vec<OpenTagFrame>,
}

impl TagStack {
    pub(crate) fn push(&mut self, name: String, offset: usize) {
        self.frames.push(OpenTagFrame { name, offset });
    }

    /// Handle an end tag called `name`, using `eq` to compare tag names.
    pub(crate) fn close(
        &mut self,
        name: &str,
        policy: NestingPolicy,
        eq: impl Fn(&str, &str) -> bool,
    ) -> Close {
        match self.frames.last() {
            Some(top) if eq(&top.name, name) => {
                self.frames.pop();
                return Close::Popped;
            }
            None => return Close::Mismatch,
            Some(_) => (),
        }

        if policy == NestingPolicy::Strict {
            return Close::Mismatch;
        }

        match self.frames.iter().rposition(|frame| eq(&frame.name, name)) {
            Some(i) => {
                let mut above = self.frames.split_off(i + 1);
                above.reverse();
                self.frames.pop();
                Close::Unwound(above)
            }
            None => Close::Mismatch,
        }
    }

    /// Everything still open, outermost first.
    pub(crate) fn into_unclosed(self) -> impl Iterator<Item = OpenTagFrame> {
        self.frames.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(names: &[&str]) -> TagStack {
        let mut stack = TagStack::default();
        for (i, name) in names.iter().enumerate() {
            stack.push((*name).to_owned(), i * 3);
        }
        stack
    }

    fn exact(a: &str, b: &str) -> bool {
        a == b
    }

    fn names(stack: TagStack) -> Vec<String> {
        stack.into_unclosed().map(|frame| frame.name).collect()
    }

    #[test]
    fn strict_never_unwinds() {
        let mut s = stack(&["b", "c"]);
        assert_eq!(s.close("b", NestingPolicy::Strict, exact), Close::Mismatch);
        assert_eq!(s.close("c", NestingPolicy::Strict, exact), Close::Popped);
        assert_eq!(s.close("b", NestingPolicy::Strict, exact), Close::Popped);
        assert_eq!(s.close("b", NestingPolicy::Strict, exact), Close::Mismatch);
    }

    #[test]
    fn pop_to_match_unwinds_innermost_first() {
        let mut s = stack(&["a", "b", "c", "d"]);
        assert_eq!(
            s.close("b", NestingPolicy::PopToMatch, exact),
            Close::Unwound(vec![
                OpenTagFrame {
                    name: "d".into(),
                    offset: 9
                },
                OpenTagFrame {
                    name: "c".into(),
                    offset: 6
                },
            ])
        );
        assert_eq!(names(s), ["a"]);
    }

    #[test]
    fn pop_to_match_without_match_changes_nothing() {
        let mut s = stack(&["a", "b"]);
        assert_eq!(s.close("x", NestingPolicy::PopToMatch, exact), Close::Mismatch);
        assert_eq!(names(s), ["a", "b"]);
    }

    #[test]
    fn comparison_is_pluggable() {
        let mut s = stack(&["B"]);
        let folded = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
        assert_eq!(s.close("b", NestingPolicy::Strict, folded), Close::Popped);
    }
}
