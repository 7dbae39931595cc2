//! Applies operators to terms.
//!
//! Arguments are mapped into their value space with [TypedValueRef::from] and then extracted
//! into the argument types of the operator. If an argument has the wrong type, the operator's
//! `evaluate_error` decides the result (usually a [ThinError]). Results are converted back into
//! terms with their canonical lexical form.

use crate::{
    AbsRdfOp, BNodeRdfOp, BuiltinName, CastBooleanRdfOp, CastDateTimeRdfOp, CastDecimalRdfOp,
    CastDoubleRdfOp, CastFloatRdfOp, CastIntegerRdfOp, CastStringRdfOp, CeilRdfOp, ConcatRdfOp,
    ContainsRdfOp, DatatypeRdfOp, DayRdfOp, EncodeForUriRdfOp, FloorRdfOp, HoursRdfOp,
    IriRdfOp, IsBlankRdfOp, IsIriRdfOp, IsLiteralRdfOp, IsNumericRdfOp, LCaseRdfOp,
    LangMatchesRdfOp, LangRdfOp, Md5RdfOp, MinutesRdfOp, MonthRdfOp, NowRdfOp, RandRdfOp,
    RegexRdfOp, ReplaceRdfOp, RoundRdfOp, SameTermRdfOp, ScalarBinaryRdfOp, ScalarBinaryTermOp,
    ScalarNAryRdfOp, ScalarNullaryRdfOp, ScalarQuaternaryRdfOp, ScalarTernaryRdfOp,
    ScalarUnaryRdfOp, ScalarUnaryTermOp, SecondsRdfOp, Sha1RdfOp, Sha256RdfOp, Sha384RdfOp,
    Sha512RdfOp, StrAfterRdfOp, StrBeforeRdfOp, StrDtRdfOp, StrEndsRdfOp, StrLangRdfOp,
    StrLenRdfOp, StrRdfOp, StrStartsRdfOp, StrUuidRdfOp, SubStrRdfOp, TimezoneRdfOp, TzRdfOp,
    UCaseRdfOp, UuidRdfOp, YearRdfOp,
};
use rdf_loom_model::{
    BlankNode, Boolean, DateTime, DayTimeDuration, Decimal, Double, Float, Integer, Iri, Literal,
    NamedNode, Numeric, OwnedStringLiteral, RdfTermValueArg, SimpleLiteral, Term, TermRef,
    ThinError, ThinResult, TypedValue, TypedValueRef,
};

/// The per-evaluation state that some builtins depend on.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    base_iri: Option<Iri<String>>,
    now: DateTime,
}

impl FunctionContext {
    /// Creates a context. `NOW()` returns `now` for every call made with this context.
    pub fn new(base_iri: Option<Iri<String>>, now: DateTime) -> Self {
        Self { base_iri, now }
    }

    pub fn base_iri(&self) -> Option<&Iri<String>> {
        self.base_iri.as_ref()
    }

    pub fn now(&self) -> DateTime {
        self.now
    }
}

/// Conversion of operator results into terms.
pub trait IntoTerm {
    fn into_term(self) -> Term;
}

impl IntoTerm for Term {
    fn into_term(self) -> Term {
        self
    }
}

impl IntoTerm for TypedValue {
    fn into_term(self) -> Term {
        TypedValue::into_term(self)
    }
}

impl IntoTerm for TypedValueRef<'_> {
    fn into_term(self) -> Term {
        TypedValueRef::into_term(self)
    }
}

impl IntoTerm for Literal {
    fn into_term(self) -> Term {
        Term::Literal(self)
    }
}

impl IntoTerm for NamedNode {
    fn into_term(self) -> Term {
        Term::NamedNode(self)
    }
}

impl IntoTerm for BlankNode {
    fn into_term(self) -> Term {
        Term::BlankNode(self)
    }
}

macro_rules! into_term_via_typed_value {
    ($($t:ty),*) => {
        $(
            impl IntoTerm for $t {
                fn into_term(self) -> Term {
                    TypedValue::from(self).into_term()
                }
            }
        )*
    };
}

into_term_via_typed_value!(
    Boolean,
    Numeric,
    Integer,
    Decimal,
    Float,
    Double,
    DateTime,
    DayTimeDuration,
    SimpleLiteral,
    OwnedStringLiteral
);

pub fn dispatch_nullary<Op>(op: &Op) -> ThinResult<Term>
where
    Op: ScalarNullaryRdfOp,
    Op::Result: IntoTerm,
{
    Ok(op.evaluate()?.into_term())
}

pub fn dispatch_unary_term<Op>(op: &Op, arg: TermRef<'_>) -> ThinResult<Term>
where
    Op: ScalarUnaryTermOp,
    Op::Result: IntoTerm,
{
    Ok(op.evaluate(arg)?.into_term())
}

pub fn dispatch_binary_term<Op>(op: &Op, lhs: TermRef<'_>, rhs: TermRef<'_>) -> ThinResult<Term>
where
    Op: ScalarBinaryTermOp,
    Op::Result: IntoTerm,
{
    Ok(op.evaluate(lhs, rhs)?.into_term())
}

pub fn dispatch_unary<'data, Op>(op: &Op, arg: TermRef<'data>) -> ThinResult<Term>
where
    Op: ScalarUnaryRdfOp,
    Op::Result<'data>: IntoTerm,
{
    let result = match <Op::Arg<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg)) {
        Ok(arg) => op.evaluate(arg),
        Err(_) => op.evaluate_error(),
    }?;
    Ok(result.into_term())
}

pub fn dispatch_binary<'data, Op>(
    op: &Op,
    lhs: TermRef<'data>,
    rhs: TermRef<'data>,
) -> ThinResult<Term>
where
    Op: ScalarBinaryRdfOp,
    Op::Result<'data>: IntoTerm,
{
    let lhs = <Op::ArgLhs<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(lhs));
    let rhs = <Op::ArgRhs<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(rhs));
    let result = match (lhs, rhs) {
        (Ok(lhs), Ok(rhs)) => op.evaluate(lhs, rhs),
        _ => op.evaluate_error(),
    }?;
    Ok(result.into_term())
}

pub fn dispatch_ternary<'data, Op>(
    op: &Op,
    arg0: TermRef<'data>,
    arg1: TermRef<'data>,
    arg2: TermRef<'data>,
) -> ThinResult<Term>
where
    Op: ScalarTernaryRdfOp,
    Op::Result<'data>: IntoTerm,
{
    let arg0 = <Op::Arg0<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg0));
    let arg1 = <Op::Arg1<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg1));
    let arg2 = <Op::Arg2<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg2));
    let result = match (arg0, arg1, arg2) {
        (Ok(arg0), Ok(arg1), Ok(arg2)) => op.evaluate(arg0, arg1, arg2),
        _ => op.evaluate_error(),
    }?;
    Ok(result.into_term())
}

pub fn dispatch_quaternary<'data, Op>(
    op: &Op,
    arg0: TermRef<'data>,
    arg1: TermRef<'data>,
    arg2: TermRef<'data>,
    arg3: TermRef<'data>,
) -> ThinResult<Term>
where
    Op: ScalarQuaternaryRdfOp,
    Op::Result<'data>: IntoTerm,
{
    let arg0 = <Op::Arg0<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg0));
    let arg1 = <Op::Arg1<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg1));
    let arg2 = <Op::Arg2<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg2));
    let arg3 = <Op::Arg3<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(arg3));
    let result = match (arg0, arg1, arg2, arg3) {
        (Ok(arg0), Ok(arg1), Ok(arg2), Ok(arg3)) => op.evaluate(arg0, arg1, arg2, arg3),
        _ => op.evaluate_error(),
    }?;
    Ok(result.into_term())
}

pub fn dispatch_n_ary<'data, Op>(op: &Op, args: &[TermRef<'data>]) -> ThinResult<Term>
where
    Op: ScalarNAryRdfOp,
    Op::Result<'data>: IntoTerm,
{
    let args = args
        .iter()
        .map(|arg| <Op::Args<'data> as RdfTermValueArg<'data>>::try_from_value(TypedValueRef::from(*arg)))
        .collect::<ThinResult<Vec<_>>>();
    let result = match args {
        Ok(args) => op.evaluate(&args),
        Err(_) => op.evaluate_error(),
    }?;
    Ok(result.into_term())
}

/// Evaluates a builtin call. A call with the wrong number of arguments is an error.
pub fn evaluate_builtin(
    builtin: BuiltinName,
    args: &[TermRef<'_>],
    context: &FunctionContext,
) -> ThinResult<Term> {
    match (builtin, args) {
        (BuiltinName::Str, [arg]) => dispatch_unary_term(&StrRdfOp::new(), *arg),
        (BuiltinName::Lang, [arg]) => dispatch_unary_term(&LangRdfOp::new(), *arg),
        (BuiltinName::LangMatches, [lhs, rhs]) => {
            dispatch_binary(&LangMatchesRdfOp::new(), *lhs, *rhs)
        }
        (BuiltinName::Datatype, [arg]) => dispatch_unary_term(&DatatypeRdfOp::new(), *arg),
        (BuiltinName::Iri, [arg]) => {
            dispatch_unary(&IriRdfOp::new(context.base_iri.clone()), *arg)
        }
        (BuiltinName::BNode, []) => dispatch_nullary(&BNodeRdfOp::new()),
        (BuiltinName::BNode, [arg]) => dispatch_unary(&BNodeRdfOp::new(), *arg),
        (BuiltinName::StrDt, [lhs, rhs]) => dispatch_binary(&StrDtRdfOp::new(), *lhs, *rhs),
        (BuiltinName::StrLang, [lhs, rhs]) => dispatch_binary(&StrLangRdfOp::new(), *lhs, *rhs),
        (BuiltinName::Uuid, []) => dispatch_nullary(&UuidRdfOp::new()),
        (BuiltinName::StrUuid, []) => dispatch_nullary(&StrUuidRdfOp::new()),
        (BuiltinName::SameTerm, [lhs, rhs]) => {
            dispatch_binary_term(&SameTermRdfOp::new(), *lhs, *rhs)
        }
        (BuiltinName::IsIri, [arg]) => dispatch_unary_term(&IsIriRdfOp::new(), *arg),
        (BuiltinName::IsBlank, [arg]) => dispatch_unary_term(&IsBlankRdfOp::new(), *arg),
        (BuiltinName::IsLiteral, [arg]) => dispatch_unary_term(&IsLiteralRdfOp::new(), *arg),
        (BuiltinName::IsNumeric, [arg]) => dispatch_unary_term(&IsNumericRdfOp::new(), *arg),
        (BuiltinName::Rand, []) => dispatch_nullary(&RandRdfOp::new()),
        (BuiltinName::Abs, [arg]) => dispatch_unary(&AbsRdfOp::new(), *arg),
        (BuiltinName::Ceil, [arg]) => dispatch_unary(&CeilRdfOp::new(), *arg),
        (BuiltinName::Floor, [arg]) => dispatch_unary(&FloorRdfOp::new(), *arg),
        (BuiltinName::Round, [arg]) => dispatch_unary(&RoundRdfOp::new(), *arg),
        (BuiltinName::Concat, args) => dispatch_n_ary(&ConcatRdfOp::new(), args),
        (BuiltinName::SubStr, [source, start]) => {
            dispatch_binary(&SubStrRdfOp::new(), *source, *start)
        }
        (BuiltinName::SubStr, [source, start, length]) => {
            dispatch_ternary(&SubStrRdfOp::new(), *source, *start, *length)
        }
        (BuiltinName::StrLen, [arg]) => dispatch_unary(&StrLenRdfOp::new(), *arg),
        (BuiltinName::Replace, [text, pattern, replacement]) => dispatch_ternary(
            &ReplaceRdfOp::new(),
            *text,
            *pattern,
            *replacement,
        ),
        (BuiltinName::Replace, [text, pattern, replacement, flags]) => dispatch_quaternary(
            &ReplaceRdfOp::new(),
            *text,
            *pattern,
            *replacement,
            *flags,
        ),
        (BuiltinName::UCase, [arg]) => dispatch_unary(&UCaseRdfOp::new(), *arg),
        (BuiltinName::LCase, [arg]) => dispatch_unary(&LCaseRdfOp::new(), *arg),
        (BuiltinName::EncodeForUri, [arg]) => dispatch_unary(&EncodeForUriRdfOp::new(), *arg),
        (BuiltinName::Contains, [lhs, rhs]) => dispatch_binary(&ContainsRdfOp::new(), *lhs, *rhs),
        (BuiltinName::StrStarts, [lhs, rhs]) => {
            dispatch_binary(&StrStartsRdfOp::new(), *lhs, *rhs)
        }
        (BuiltinName::StrEnds, [lhs, rhs]) => dispatch_binary(&StrEndsRdfOp::new(), *lhs, *rhs),
        (BuiltinName::StrBefore, [lhs, rhs]) => {
            dispatch_binary(&StrBeforeRdfOp::new(), *lhs, *rhs)
        }
        (BuiltinName::StrAfter, [lhs, rhs]) => dispatch_binary(&StrAfterRdfOp::new(), *lhs, *rhs),
        (BuiltinName::Regex, [text, pattern]) => {
            dispatch_binary(&RegexRdfOp::new(), *text, *pattern)
        }
        (BuiltinName::Regex, [text, pattern, flags]) => {
            dispatch_ternary(&RegexRdfOp::new(), *text, *pattern, *flags)
        }
        (BuiltinName::Year, [arg]) => dispatch_unary(&YearRdfOp::new(), *arg),
        (BuiltinName::Month, [arg]) => dispatch_unary(&MonthRdfOp::new(), *arg),
        (BuiltinName::Day, [arg]) => dispatch_unary(&DayRdfOp::new(), *arg),
        (BuiltinName::Hours, [arg]) => dispatch_unary(&HoursRdfOp::new(), *arg),
        (BuiltinName::Minutes, [arg]) => dispatch_unary(&MinutesRdfOp::new(), *arg),
        (BuiltinName::Seconds, [arg]) => dispatch_unary(&SecondsRdfOp::new(), *arg),
        (BuiltinName::Timezone, [arg]) => dispatch_unary(&TimezoneRdfOp::new(), *arg),
        (BuiltinName::Tz, [arg]) => dispatch_unary(&TzRdfOp::new(), *arg),
        (BuiltinName::Now, []) => dispatch_nullary(&NowRdfOp::new(context.now)),
        (BuiltinName::Md5, [arg]) => dispatch_unary(&Md5RdfOp::new(), *arg),
        (BuiltinName::Sha1, [arg]) => dispatch_unary(&Sha1RdfOp::new(), *arg),
        (BuiltinName::Sha256, [arg]) => dispatch_unary(&Sha256RdfOp::new(), *arg),
        (BuiltinName::Sha384, [arg]) => dispatch_unary(&Sha384RdfOp::new(), *arg),
        (BuiltinName::Sha512, [arg]) => dispatch_unary(&Sha512RdfOp::new(), *arg),
        (BuiltinName::CastString, [arg]) => dispatch_unary(&CastStringRdfOp::new(), *arg),
        (BuiltinName::CastBoolean, [arg]) => dispatch_unary(&CastBooleanRdfOp::new(), *arg),
        (BuiltinName::CastInteger, [arg]) => dispatch_unary(&CastIntegerRdfOp::new(), *arg),
        (BuiltinName::CastDecimal, [arg]) => dispatch_unary(&CastDecimalRdfOp::new(), *arg),
        (BuiltinName::CastFloat, [arg]) => dispatch_unary(&CastFloatRdfOp::new(), *arg),
        (BuiltinName::CastDouble, [arg]) => dispatch_unary(&CastDoubleRdfOp::new(), *arg),
        (BuiltinName::CastDateTime, [arg]) => dispatch_unary(&CastDateTimeRdfOp::new(), *arg),
        _ => ThinError::expected(),
    }
}
