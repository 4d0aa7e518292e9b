//! Structural limits bounding filter-document complexity.

/// Structural limits enforced at every nesting level of a filter document.
///
/// Four independent caps bound the work a single validation call can cost,
/// so untrusted input cannot trigger oversized or deeply nested traversals:
///
/// - `max_depth` - nesting depth of `$and`/`$or`/`$not` (default 5)
/// - `max_conditions` - field conditions at one level, combinator keys
///   excluded (default 20)
/// - `max_or_branches` - branches of every `$or` array, at every level
///   (default 5)
/// - `max_array_len` - length of every array operand: `$in`, `$nin`,
///   `$contains`, `$overlap` (default 100)
///
/// # Example
///
/// ```
/// use filtergate::Limits;
///
/// let limits = Limits::new().max_depth(3).max_or_branches(2);
/// assert_eq!(limits.max_depth, 3);
/// assert_eq!(limits.max_conditions, 20); // untouched defaults remain
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Limits {
    /// Maximum nesting depth for the logical combinators.
    pub max_depth: usize,
    /// Maximum number of field conditions at one level.
    pub max_conditions: usize,
    /// Maximum number of branches in any `$or` array.
    pub max_or_branches: usize,
    /// Maximum length of any array-typed operand.
    pub max_array_len: usize,
}

impl Limits {
    /// Create limits with the default caps (5 / 20 / 5 / 100).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: 5,
            max_conditions: 20,
            max_or_branches: 5,
            max_array_len: 100,
        }
    }

    /// Set the maximum combinator nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum number of field conditions per level.
    ///
    /// Only field keys count; `$and`/`$or`/`$not` never do.
    #[must_use]
    pub const fn max_conditions(mut self, conditions: usize) -> Self {
        self.max_conditions = conditions;
        self
    }

    /// Set the maximum number of `$or` branches, applied at every level.
    #[must_use]
    pub const fn max_or_branches(mut self, branches: usize) -> Self {
        self.max_or_branches = branches;
        self
    }

    /// Set the maximum array-operand length.
    #[must_use]
    pub const fn max_array_len(mut self, len: usize) -> Self {
        self.max_array_len = len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = Limits::new();
        assert_eq!(limits.max_depth, 5);
        assert_eq!(limits.max_conditions, 20);
        assert_eq!(limits.max_or_branches, 5);
        assert_eq!(limits.max_array_len, 100);
        assert_eq!(limits, Limits::default());
    }

    #[test]
    fn test_builder_overrides_are_independent() {
        let limits = Limits::new()
            .max_depth(2)
            .max_conditions(3)
            .max_or_branches(4)
            .max_array_len(7);
        assert_eq!(limits.max_depth, 2);
        assert_eq!(limits.max_conditions, 3);
        assert_eq!(limits.max_or_branches, 4);
        assert_eq!(limits.max_array_len, 7);
    }
}
