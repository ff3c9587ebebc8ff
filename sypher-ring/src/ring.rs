use crate::{RingError, MAX_RING_SIZE};

use generic_array::GenericArray;
use k256::elliptic_curve::group::GroupEncoding;
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint};

use std::collections::BTreeSet;

pub const COMPRESSED_POINT_LEN: usize = 33;

/// Ordered set of ring members. The order fixes the positions of the
/// challenge chain and must not change between signing and verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    keys: Vec<AffinePoint>,
}

impl Ring {
    pub fn new(keys: Vec<AffinePoint>) -> Result<Self, RingError> {
        if keys.len() < 2 {
            return Err(RingError::RingTooSmall(keys.len()));
        }
        if keys.len() > MAX_RING_SIZE {
            return Err(RingError::RingTooLarge(keys.len()));
        }
        let mut seen = BTreeSet::new();
        for (i, key) in keys.iter().enumerate() {
            if *key == AffinePoint::IDENTITY {
                return Err(RingError::MalformedInput(format!(
                    "ring member {} is the identity point",
                    i
                )));
            }
            if !seen.insert(key.to_bytes().to_vec()) {
                return Err(RingError::DuplicateKey(i));
            }
        }
        Ok(Self { keys })
    }

    /// Parses SEC1 encoded (compressed or uncompressed) public keys.
    pub fn from_sec1<T: AsRef<[u8]>>(encoded_keys: &[T]) -> Result<Self, RingError> {
        if encoded_keys.len() > MAX_RING_SIZE {
            return Err(RingError::RingTooLarge(encoded_keys.len()));
        }
        let keys = encoded_keys
            .iter()
            .map(|pk| parse_pubkey(pk.as_ref()))
            .collect::<Result<Vec<AffinePoint>, RingError>>()?;
        Self::new(keys)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[AffinePoint] {
        &self.keys
    }

    pub fn get(&self, index: usize) -> Option<&AffinePoint> {
        self.keys.get(index)
    }

    pub fn position(&self, key: &AffinePoint) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

pub fn parse_pubkey(bytes: &[u8]) -> Result<AffinePoint, RingError> {
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|e| RingError::MalformedInput(format!("invalid SEC1 encoding: {}", e)))?;
    let point: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
    match point {
        Some(pt) if pt != AffinePoint::IDENTITY => Ok(pt),
        _ => Err(RingError::MalformedInput("failed to parse pubkey".to_owned())),
    }
}

/// Strict 33-byte compressed decoding used by the signature wire format.
pub(crate) fn parse_compressed(bytes: &[u8]) -> Result<AffinePoint, RingError> {
    if bytes.len() != COMPRESSED_POINT_LEN {
        return Err(RingError::MalformedInput(format!(
            "expected {} point bytes, got {}",
            COMPRESSED_POINT_LEN,
            bytes.len()
        )));
    }
    let point: Option<AffinePoint> =
        AffinePoint::from_bytes(GenericArray::from_slice(bytes)).into();
    match point {
        Some(pt) if pt != AffinePoint::IDENTITY => Ok(pt),
        _ => Err(RingError::MalformedInput("failed to parse compressed point".to_owned())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keypair::Keypair;
    use k256::elliptic_curve::sec1::ToEncodedPoint;
    use rand_core::OsRng;

    fn random_keys(size: usize) -> Vec<AffinePoint> {
        (0..size)
            .map(|_| Keypair::random(&mut OsRng).public())
            .collect()
    }

    #[test]
    fn ring_construction() {
        assert_eq!(Ring::new(Vec::new()), Err(RingError::RingTooSmall(0)));
        assert_eq!(Ring::new(random_keys(1)), Err(RingError::RingTooSmall(1)));

        let ring = Ring::new(random_keys(5)).unwrap();
        assert_eq!(ring.len(), 5);
        assert!(!ring.is_empty());

        let mut keys = random_keys(4);
        keys[3] = keys[1];
        assert_eq!(Ring::new(keys), Err(RingError::DuplicateKey(3)));

        let mut keys = random_keys(3);
        keys[0] = AffinePoint::IDENTITY;
        assert!(matches!(Ring::new(keys), Err(RingError::MalformedInput(_))));
    }

    #[test]
    fn ring_order_is_kept() {
        let keys = random_keys(6);
        let ring = Ring::new(keys.clone()).unwrap();
        assert_eq!(ring.keys(), keys.as_slice());
        assert_eq!(ring.position(&keys[4]), Some(4));
        assert_eq!(ring.get(6), None);
    }

    #[test]
    fn test_parse_pubkey() {
        let pubkey_str = "0454e32170dd5a0b7b641aa77daa1f3f31b8df17e51aaba6cfcb310848d26351180b6ac0399d21460443d10072700b64b454d70bfba5e93601536c740bbd099682";
        let pubkey = parse_pubkey(&hex::decode(pubkey_str).unwrap()).unwrap();
        let x_coordinate = &pubkey.to_bytes()[1..33];
        assert_eq!(hex::encode(x_coordinate), pubkey_str[2..66]);

        for _ in 0..10 {
            let keypair = Keypair::random(&mut OsRng);
            let uncompressed = keypair.public().to_encoded_point(false);
            let compressed = keypair.public().to_bytes();
            assert_eq!(
                parse_pubkey(uncompressed.as_bytes()).unwrap(),
                keypair.public()
            );
            assert_eq!(parse_pubkey(&compressed).unwrap(), keypair.public());
            assert_eq!(parse_compressed(&compressed).unwrap(), keypair.public());
        }

        assert!(parse_pubkey(&[0x04; 12]).is_err());
        assert!(parse_compressed(&[0u8; COMPRESSED_POINT_LEN]).is_err());
        assert!(parse_compressed(&[2u8; 32]).is_err());
    }

    #[test]
    fn ring_from_encoded_keys() {
        let keys = random_keys(3);
        let encoded = keys.iter().map(|k| k.to_bytes()).collect::<Vec<_>>();
        let ring = Ring::from_sec1(&encoded).unwrap();
        assert_eq!(ring.keys(), keys.as_slice());

        let mut broken = encoded.iter().map(|k| k.to_vec()).collect::<Vec<_>>();
        broken[2][5] ^= 0xff;
        broken[2][0] = 0x07;
        assert!(matches!(Ring::from_sec1(&broken), Err(RingError::MalformedInput(_))));
    }
}
