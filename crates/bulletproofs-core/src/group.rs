//! Ristretto group elements

use crate::{BulletproofsError, BulletproofsResult};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, IsIdentity, VartimeMultiscalarMul},
};

/// A point in the Ristretto255 prime-order group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupElement(pub RistrettoPoint);

impl GroupElement {
    pub fn identity() -> Self {
        GroupElement(RistrettoPoint::identity())
    }

    /// Decompress a wire point. `label` names the proof field in the error.
    pub fn decode(compressed: &CompressedRistretto, label: &str) -> BulletproofsResult<Self> {
        match compressed.decompress() {
            Some(point) => Ok(GroupElement(point)),
            None => Err(BulletproofsError::MalformedProof(format!("invalid point encoding for {}", label))),
        }
    }

    /// Decompress a list of wire points, naming the failing entry as `label[i]`
    pub fn decode_all(compressed: &[CompressedRistretto], label: &str) -> BulletproofsResult<Vec<Self>> {
        compressed
            .iter()
            .enumerate()
            .map(|(i, c)| Self::decode(c, &format!("{}[{}]", label, i)))
            .collect()
    }

    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    /// Variable-time multiscalar multiplication
    pub fn multiscalar_mul(
        scalars: impl IntoIterator<Item = Scalar>,
        points: impl IntoIterator<Item = RistrettoPoint>,
    ) -> Self {
        GroupElement(RistrettoPoint::vartime_multiscalar_mul(scalars, points))
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $rhs:ty, |$a:ident, $b:ident| $body:expr) => {
        impl std::ops::$trait<$rhs> for GroupElement {
            type Output = GroupElement;

            fn $method(self, rhs: $rhs) -> GroupElement {
                let ($a, $b) = (self.0, rhs);
                GroupElement($body)
            }
        }
    };
}

forward_binop!(Add, add, GroupElement, |p, q| p + q.0);
forward_binop!(Sub, sub, GroupElement, |p, q| p - q.0);
forward_binop!(Mul, mul, Scalar, |p, k| p * k);

impl std::ops::Neg for GroupElement {
    type Output = GroupElement;

    fn neg(self) -> GroupElement {
        GroupElement(-self.0)
    }
}

impl From<RistrettoPoint> for GroupElement {
    fn from(point: RistrettoPoint) -> Self {
        GroupElement(point)
    }
}

impl From<GroupElement> for RistrettoPoint {
    fn from(element: GroupElement) -> Self {
        element.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

    #[test]
    fn test_decode_round_trip() {
        let g = GroupElement::from(RISTRETTO_BASEPOINT_POINT);
        let decoded = GroupElement::decode(&g.compress(), "G").unwrap();
        assert_eq!(decoded, g);
    }

    #[test]
    fn test_decode_rejects_invalid_encoding() {
        let bad = CompressedRistretto([0xff; 32]);
        match GroupElement::decode(&bad, "A") {
            Err(BulletproofsError::MalformedProof(msg)) => assert!(msg.contains("A")),
            other => panic!("expected malformed proof, got {:?}", other),
        }
    }

    #[test]
    fn test_group_arithmetic() {
        let g = GroupElement::from(RISTRETTO_BASEPOINT_POINT);
        let two = Scalar::from(2u64);

        assert_eq!(g + g, g * two);
        assert!((g - g).is_identity());
        assert!((g + -g).is_identity());
        assert_eq!(
            GroupElement::multiscalar_mul([Scalar::from(3u64), Scalar::ONE], [g.0, g.0]),
            g * Scalar::from(4u64)
        );
    }

    #[test]
    fn test_decode_all_names_index() {
        let g = GroupElement::from(RISTRETTO_BASEPOINT_POINT).compress();
        let bad = CompressedRistretto([0xff; 32]);

        assert_eq!(GroupElement::decode_all(&[g, g], "L").unwrap().len(), 2);
        match GroupElement::decode_all(&[g, bad], "R") {
            Err(BulletproofsError::MalformedProof(msg)) => assert!(msg.contains("R[1]")),
            other => panic!("expected malformed proof, got {:?}", other),
        }
    }
}
