use k256::elliptic_curve::group::GroupEncoding;
use k256::elliptic_curve::ops::Reduce;
use k256::{AffinePoint, CompressedPoint, Scalar, U256};
use sha3::{Digest, Keccak256};

const HASH_TO_POINT_ID: &[u8] = b"sypher-ring/hash-to-point";

/// Keccak-256 transcript that finalizes into a scalar reduced modulo the
/// group order.
#[derive(Clone)]
pub struct ChallengeHasher {
    hasher: Keccak256,
}

impl ChallengeHasher {
    pub fn new(hash_id: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(hash_id);

        Self { hasher }
    }

    /// Length-prefixed so that adjacent byte strings cannot be shifted into
    /// each other.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn insert_point(&mut self, pt: &AffinePoint) {
        self.hasher.update(pt.to_bytes());
    }

    pub fn insert_points(&mut self, points: &[AffinePoint]) {
        for p in points {
            self.hasher.update(p.to_bytes());
        }
    }

    pub fn finalize(self) -> Scalar {
        let finalized = self.hasher.finalize();
        Scalar::from_uint_reduced(U256::from_be_slice(&finalized))
    }
}

/// Deterministically maps a point to another point with unknown discrete
/// logarithm, by try-and-increment on compressed x-coordinates.
pub fn hash_to_point(point: &AffinePoint) -> AffinePoint {
    let point_bytes = point.to_bytes();
    let mut counter = 0u32;
    loop {
        let mut hasher = Keccak256::new();
        hasher.update(HASH_TO_POINT_ID);
        hasher.update(point_bytes);
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();

        let mut candidate = CompressedPoint::default();
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(&digest);
        let decoded: Option<AffinePoint> = AffinePoint::from_bytes(&candidate).into();
        if let Some(mapped) = decoded {
            return mapped;
        }
        counter = counter.wrapping_add(1);
    }
}
