use crate::{
    error::Result,
    evaluate::Evaluator,
    rule::classify::{Classifier, DEFAULT_NO_PARKING_PATTERN, compile_no_parking},
};

/// Configures how regulation text is classified.
///
/// ```
/// let evaluator = curbside::Evaluator::builder()
///     .extra_no_parking_pattern(r"\bstreet cleaning\b")
///     .build()
///     .unwrap();
/// assert!(evaluator.classifier().is_no_parking("STREET CLEANING"));
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorBuilder {
    no_parking: Vec<String>,
    hours_fallback: bool,
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self {
            no_parking: vec![DEFAULT_NO_PARKING_PATTERN.to_string()],
            hours_fallback: true,
        }
    }
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the no-parking pattern. Matching is case-insensitive.
    pub fn no_parking_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.no_parking = vec![pattern.into()];
        self
    }

    /// Add an alternative to the no-parking pattern.
    pub fn extra_no_parking_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.no_parking.push(pattern.into());
        self
    }

    /// Whether a missing `hrlimit` is looked for in the `hours` text.
    pub fn hour_limit_fallback(mut self, enabled: bool) -> Self {
        self.hours_fallback = enabled;
        self
    }

    pub fn build(self) -> Result<Evaluator> {
        // Each alternative must stand on its own before they are joined.
        for p in &self.no_parking {
            compile_no_parking(p)?;
        }

        let pattern = self
            .no_parking
            .iter()
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|");

        let regex = compile_no_parking(&pattern)?;
        if self.no_parking.len() != 1 || self.no_parking[0] != DEFAULT_NO_PARKING_PATTERN {
            log::debug!("custom no-parking pattern: {pattern}");
        }

        Ok(Evaluator::with_classifier(Classifier::new(
            regex,
            self.hours_fallback,
        )))
    }
}
