use crate::ScalarUnaryRdfOp;
use md5::{Digest, Md5};
use rdf_loom_model::{SimpleLiteral, SimpleLiteralRef, ThinResult};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

macro_rules! hash_function {
    ($name:ident, $hasher:ty) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl ScalarUnaryRdfOp for $name {
            type Arg<'data> = SimpleLiteralRef<'data>;
            type Result<'data> = SimpleLiteral;

            fn evaluate<'data>(&self, value: Self::Arg<'data>) -> ThinResult<Self::Result<'data>> {
                let digest = <$hasher>::digest(value.value.as_bytes());
                Ok(SimpleLiteral::new(hex::encode(digest)))
            }
        }
    };
}

hash_function!(Md5RdfOp, Md5);
hash_function!(Sha1RdfOp, Sha1);
hash_function!(Sha256RdfOp, Sha256);
hash_function!(Sha384RdfOp, Sha384);
hash_function!(Sha512RdfOp, Sha512);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digests() {
        let abc = SimpleLiteralRef::new("abc");
        assert_eq!(
            Md5RdfOp::new().evaluate(abc).unwrap().value,
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            Sha1RdfOp::new().evaluate(abc).unwrap().value,
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            Sha256RdfOp::new().evaluate(abc).unwrap().value,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
