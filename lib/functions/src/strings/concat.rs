use crate::ScalarNAryRdfOp;
use rdf_loom_model::{OwnedStringLiteral, StringLiteralRef, ThinResult};

/// `CONCAT`: the result keeps a language tag only if all arguments share it.
#[derive(Debug, Default)]
pub struct ConcatRdfOp;

impl ConcatRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarNAryRdfOp for ConcatRdfOp {
    type Args<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, args: &[Self::Args<'data>]) -> ThinResult<Self::Result<'data>> {
        let mut result = String::default();
        let mut language = None;
        for (index, arg) in args.iter().enumerate() {
            if index == 0 {
                language = arg.1;
            } else if language != arg.1 {
                language = None;
            }
            result.push_str(arg.0);
        }
        Ok(OwnedStringLiteral(result, language.map(ToOwned::to_owned)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_simple_literals() {
        let result = ConcatRdfOp::new()
            .evaluate(&[
                StringLiteralRef("a", None),
                StringLiteralRef(" + ", None),
                StringLiteralRef("b", None),
            ])
            .unwrap();
        assert_eq!(result, OwnedStringLiteral("a + b".to_owned(), None));
    }

    #[test]
    fn concat_keeps_a_shared_language() {
        let op = ConcatRdfOp::new();
        let shared = op
            .evaluate(&[StringLiteralRef("a", Some("en")), StringLiteralRef("b", Some("en"))])
            .unwrap();
        assert_eq!(shared.1.as_deref(), Some("en"));

        let mixed = op
            .evaluate(&[StringLiteralRef("a", Some("en")), StringLiteralRef("b", None)])
            .unwrap();
        assert_eq!(mixed.1, None);
    }

    #[test]
    fn concat_without_arguments() {
        let result = ConcatRdfOp::new().evaluate(&[]).unwrap();
        assert_eq!(result, OwnedStringLiteral(String::new(), None));
    }
}
