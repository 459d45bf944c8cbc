//! Domain validation of a patched object.
//!
//! A gate inspects the rebuilt object and reports every broken constraint
//! as a [`Violation`]. An empty [`Violations`] list accepts the object.

use std::fmt;

use regex::Regex;
use serde::Serialize;

/// One broken constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending field.
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// All violations found in one object, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Record a violation of `field`.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.push(Violation::new(field, reason));
    }

    /// Whether any violation names `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Gates ─────────────────────────────────────────────────────────────────

/// Checks a candidate object against domain constraints.
pub trait ValidationGate<T: ?Sized> {
    /// Report every violation; an empty list means valid.
    fn validate(&self, candidate: &T) -> Violations;
}

impl<T: ?Sized, F> ValidationGate<T> for F
where
    F: Fn(&T) -> Violations,
{
    fn validate(&self, candidate: &T) -> Violations {
        self(candidate)
    }
}

/// A gate with no constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<T: ?Sized> ValidationGate<T> for AcceptAll {
    fn validate(&self, _candidate: &T) -> Violations {
        Violations::new()
    }
}

/// Constraints a domain type declares on itself.
pub trait Validate {
    fn validate(&self) -> Violations;
}

/// Gate that defers to the candidate's own [`Validate`] impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredConstraints;

impl<T: Validate + ?Sized> ValidationGate<T> for DeclaredConstraints {
    fn validate(&self, candidate: &T) -> Violations {
        Validate::validate(candidate)
    }
}

type Rule<T> = Box<dyn Fn(&T) -> Option<Violation> + Send + Sync>;

/// A declarative list of field rules.
///
/// Every rule runs on every candidate, so all violations are reported.
///
/// # Example
///
/// ```
/// use vacancy_patch::validation::{Constraints, ValidationGate};
///
/// struct Posting { title: String, openings: u32 }
///
/// let gate = Constraints::new()
///     .not_blank("/title", |p: &Posting| p.title.as_str())
///     .range("/openings", |p: &Posting| p.openings, 1, 50);
///
/// let violations = gate.validate(&Posting { title: " ".into(), openings: 0 });
/// assert_eq!(violations.len(), 2);
/// ```
pub struct Constraints<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for Constraints<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> fmt::Debug for Constraints<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraints").field("rules", &self.rules.len()).finish()
    }
}

impl<T: 'static> Constraints<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The string must contain a non-whitespace character.
    pub fn not_blank<F>(self, field: &str, get: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        self.check(field, "must not be blank", move |t| !get(t).trim().is_empty())
    }

    /// The string must have between `min` and `max` characters.
    pub fn length<F>(self, field: &str, get: F, min: usize, max: usize) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let reason = format!("length must be between {min} and {max}");
        self.check(field, reason, move |t| (min..=max).contains(&get(t).chars().count()))
    }

    /// The number must lie in `min..=max`.
    pub fn range<N, F>(self, field: &str, get: F, min: N, max: N) -> Self
    where
        N: PartialOrd + fmt::Display + Send + Sync + 'static,
        F: Fn(&T) -> N + Send + Sync + 'static,
    {
        let reason = format!("must be between {min} and {max}");
        self.check(field, reason, move |t| {
            let n = get(t);
            n >= min && n <= max
        })
    }

    /// The string must match `regex`.
    pub fn pattern<F>(self, field: &str, get: F, regex: Regex) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let reason = format!("must match `{}`", regex.as_str());
        self.check(field, reason, move |t| regex.is_match(get(t)))
    }

    /// A custom rule: `holds` must return true for a valid candidate.
    pub fn check<F>(mut self, field: &str, reason: impl Into<String>, holds: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let violation = Violation::new(field, reason);
        self.rules
            .push(Box::new(move |t: &T| (!holds(t)).then(|| violation.clone())));
        self
    }
}

impl<T> ValidationGate<T> for Constraints<T> {
    fn validate(&self, candidate: &T) -> Violations {
        self.rules.iter().filter_map(|rule| rule(candidate)).collect()
    }
}
