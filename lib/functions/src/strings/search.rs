use crate::ScalarBinaryRdfOp;
use rdf_loom_model::{
    Boolean, CompatibleStringArgs, LanguageStringRef, SimpleLiteralRef, StringLiteralRef,
    ThinResult, TypedValueRef,
};

macro_rules! string_predicate {
    ($(#[$meta:meta])* $name:ident, $predicate:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl ScalarBinaryRdfOp for $name {
            type ArgLhs<'data> = StringLiteralRef<'data>;
            type ArgRhs<'data> = StringLiteralRef<'data>;
            type Result<'data> = Boolean;

            fn evaluate<'data>(
                &self,
                lhs: Self::ArgLhs<'data>,
                rhs: Self::ArgRhs<'data>,
            ) -> ThinResult<Self::Result<'data>> {
                let args = CompatibleStringArgs::try_from(lhs, rhs)?;
                let predicate: fn(&str, &str) -> bool = $predicate;
                Ok(predicate(args.lhs, args.rhs).into())
            }
        }
    };
}

string_predicate!(ContainsRdfOp, |lhs, rhs| lhs.contains(rhs));
string_predicate!(StrStartsRdfOp, |lhs, rhs| lhs.starts_with(rhs));
string_predicate!(StrEndsRdfOp, |lhs, rhs| lhs.ends_with(rhs));

/// `STRBEFORE`: an empty simple literal if the needle does not occur.
#[derive(Debug, Default)]
pub struct StrBeforeRdfOp;

impl StrBeforeRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for StrBeforeRdfOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = StringLiteralRef<'data>;
    type Result<'data> = TypedValueRef<'data>;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let args = CompatibleStringArgs::try_from(lhs, rhs)?;
        Ok(match args.lhs.find(args.rhs) {
            Some(position) => with_language(&args.lhs[..position], args.language),
            None => TypedValueRef::SimpleLiteral(SimpleLiteralRef::new("")),
        })
    }
}

/// `STRAFTER`: an empty simple literal if the needle does not occur.
#[derive(Debug, Default)]
pub struct StrAfterRdfOp;

impl StrAfterRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarBinaryRdfOp for StrAfterRdfOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = StringLiteralRef<'data>;
    type Result<'data> = TypedValueRef<'data>;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> ThinResult<Self::Result<'data>> {
        let args = CompatibleStringArgs::try_from(lhs, rhs)?;
        Ok(match args.lhs.find(args.rhs) {
            Some(position) => {
                with_language(&args.lhs[position + args.rhs.len()..], args.language)
            }
            None => TypedValueRef::SimpleLiteral(SimpleLiteralRef::new("")),
        })
    }
}

pub(crate) fn with_language<'data>(
    value: &'data str,
    language: Option<&'data str>,
) -> TypedValueRef<'data> {
    match language {
        None => TypedValueRef::SimpleLiteral(SimpleLiteralRef::new(value)),
        Some(language) => TypedValueRef::LanguageStringLiteral(LanguageStringRef { value, language }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let text = StringLiteralRef("foobar", Some("en"));
        assert_eq!(
            ContainsRdfOp::new().evaluate(text, StringLiteralRef("oba", None)),
            Ok(true.into())
        );
        assert_eq!(
            StrStartsRdfOp::new().evaluate(text, StringLiteralRef("bar", None)),
            Ok(false.into())
        );
        assert_eq!(
            StrEndsRdfOp::new().evaluate(text, StringLiteralRef("bar", Some("en"))),
            Ok(true.into())
        );
        assert!(ContainsRdfOp::new()
            .evaluate(text, StringLiteralRef("bar", Some("fr")))
            .is_err());
    }

    #[test]
    fn before_and_after_keep_the_language() {
        let text = StringLiteralRef("abc", Some("en"));
        assert_eq!(
            StrBeforeRdfOp::new().evaluate(text, StringLiteralRef("b", None)),
            Ok(TypedValueRef::LanguageStringLiteral(LanguageStringRef {
                value: "a",
                language: "en"
            }))
        );
        assert_eq!(
            StrAfterRdfOp::new().evaluate(text, StringLiteralRef("b", None)),
            Ok(TypedValueRef::LanguageStringLiteral(LanguageStringRef {
                value: "c",
                language: "en"
            }))
        );
        assert_eq!(
            StrAfterRdfOp::new().evaluate(text, StringLiteralRef("z", None)),
            Ok(TypedValueRef::SimpleLiteral(SimpleLiteralRef::new("")))
        );
    }
}
