//! First-success combinator for heuristic cascades.
//!
//! The host page gives no guarantees about its structure, so every lookup in
//! the engine is an ordered list of guesses. A [`Cascade`] runs named steps in
//! order and stops at the first one that produces a value, logging which step
//! answered.

use tracing::{debug, trace};

type Step<'a, I, O> = Box<dyn Fn(&I) -> Option<O> + 'a>;

pub struct Cascade<'a, I: ?Sized, O> {
    label: &'static str,
    steps: Vec<(&'static str, Step<'a, I, O>)>,
}

impl<'a, I: ?Sized, O> Cascade<'a, I, O> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            steps: Vec::new(),
        }
    }

    /// Append a named step.
    pub fn step<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&I) -> Option<O> + 'a,
    {
        self.steps.push((name, Box::new(f)));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    /// Run steps in order; the first `Some` wins.
    pub fn run(&self, input: &I) -> Option<(&'static str, O)> {
        for (name, step) in &self.steps {
            match step(input) {
                Some(out) => {
                    debug!("{}: strategy '{}' matched", self.label, name);
                    return Some((name, out));
                }
                None => trace!("{}: strategy '{}' missed", self.label, name),
            }
        }
        debug!("{}: no strategy matched", self.label);
        None
    }

    pub fn first(&self, input: &I) -> Option<O> {
        self.run(input).map(|(_, out)| out)
    }
}

/// `Some` unless the collection is empty. Turns list-producing lookups into
/// cascade steps where "found nothing" means "try the next one".
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_success_wins() {
        let cascade: Cascade<'_, i32, &str> = Cascade::new("numbers")
            .step("negative", |n| (*n < 0).then_some("negative"))
            .step("even", |n| (n % 2 == 0).then_some("even"))
            .step("any", |_| Some("any"));

        assert_eq!(cascade.run(&-3), Some(("negative", "negative")));
        assert_eq!(cascade.run(&4), Some(("even", "even")));
        assert_eq!(cascade.first(&7), Some("any"));
    }

    #[test]
    fn test_later_steps_not_run_after_hit() {
        let calls = Cell::new(0);
        let cascade: Cascade<'_, (), u8> = Cascade::new("lazy")
            .step("hit", |_| Some(1))
            .step("counted", |_| {
                calls.set(calls.get() + 1);
                Some(2)
            });
        assert_eq!(cascade.first(&()), Some(1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_all_miss() {
        let cascade: Cascade<'_, str, usize> =
            Cascade::new("strings").step("long", |s: &str| (s.len() > 10).then(|| s.len()));
        assert_eq!(cascade.run("short"), None);
        assert_eq!(cascade.names(), vec!["long"]);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty::<u8>(vec![]), None);
        assert_eq!(non_empty(vec![1]), Some(vec![1]));
    }
}
