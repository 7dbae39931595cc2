use crate::ScalarUnaryRdfOp;
use rdf_loom_model::{SimpleLiteral, StringLiteralRef, ThinResult};

/// `ENCODE_FOR_URI`: percent-encodes every byte outside the unreserved set of RFC 3986.
#[derive(Debug, Default)]
pub struct EncodeForUriRdfOp;

impl EncodeForUriRdfOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarUnaryRdfOp for EncodeForUriRdfOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = SimpleLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
        let mut result = Vec::with_capacity(value.0.len());
        for c in value.0.bytes() {
            match c {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    result.push(c);
                }
                _ => {
                    result.push(b'%');
                    let high = c / 16;
                    let low = c % 16;
                    result.push(hex_digit(high));
                    result.push(hex_digit(low));
                }
            }
        }
        Ok(SimpleLiteral::new(String::from_utf8(result)?))
    }
}

fn hex_digit(value: u8) -> u8 {
    if value < 10 {
        b'0' + value
    } else {
        b'A' + (value - 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        let result = EncodeForUriRdfOp::new()
            .evaluate(StringLiteralRef("Los Angeles/\u{e9}", None))
            .unwrap();
        assert_eq!(result.value, "Los%20Angeles%2F%C3%A9");
    }
}
