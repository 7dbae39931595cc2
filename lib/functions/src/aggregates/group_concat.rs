use crate::aggregates::Accumulator;
use rdf_loom_model::{
    OwnedStringLiteral, RdfTermValueArg, StringLiteralRef, Term, TermRef, ThinError, ThinResult,
    TypedValue, TypedValueRef,
};

/// Concatenates the strings in a group with a separator.
///
/// The result keeps a language tag only if all values share it. Values that are not strings
/// make the result an error.
///
/// Relevant Resources:
/// - [SPARQL 1.1 - GROUP CONCAT](https://www.w3.org/TR/sparql11-query/#defn_aggGroupConcat)
#[derive(Debug)]
pub struct GroupConcatAccumulator {
    separator: String,
    error: bool,
    value: Option<String>,
    language_error: bool,
    language: Option<String>,
}

impl GroupConcatAccumulator {
    pub fn new(separator: String) -> Self {
        Self {
            separator,
            error: false,
            value: None,
            language_error: false,
            language: None,
        }
    }
}

impl Accumulator for GroupConcatAccumulator {
    fn update(&mut self, value: Option<TermRef<'_>>) {
        if self.error {
            return;
        }

        let string = value
            .ok_or(ThinError::default())
            .and_then(|value| StringLiteralRef::try_from_value(TypedValueRef::from(value)));
        let Ok(string) = string else {
            self.error = true;
            self.value = None;
            return;
        };

        let first = self.value.is_none();
        let value = self.value.get_or_insert_with(String::new);
        if !first {
            value.push_str(&self.separator);
        }
        value.push_str(string.0);

        if first {
            self.language = string.1.map(ToOwned::to_owned);
        } else if !self.language_error && self.language.as_deref() != string.1 {
            self.language_error = true;
            self.language = None;
        }
    }

    fn evaluate(&self) -> ThinResult<Term> {
        if self.error {
            return ThinError::expected();
        }
        let value = self.value.clone().unwrap_or_default();
        let literal = OwnedStringLiteral::new(value, self.language.clone());
        Ok(TypedValue::from(literal).into_term())
    }
}
