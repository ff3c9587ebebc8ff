use crate::hasher::{hash_to_point, ChallengeHasher};
use crate::ring::{parse_compressed, Ring, COMPRESSED_POINT_LEN};
use crate::{RingError, MAX_RING_SIZE};

use borsh::{BorshDeserialize, BorshSerialize};
use generic_array::GenericArray;
use k256::elliptic_curve::group::GroupEncoding;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use std::io::{Error as IoError, ErrorKind, Write};

const HASH_ID: &[u8] = b"sypher-ring/blsag";
const SCALAR_LEN: usize = 32;

/// `private * Hp(public)`, identical for every signature made with the same
/// private key regardless of message, ring or position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyImage(AffinePoint);

impl KeyImage {
    pub fn new(private: &Scalar, public: &AffinePoint) -> Self {
        Self((hash_to_point(public) * *private).to_affine())
    }

    pub fn point(&self) -> &AffinePoint {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; COMPRESSED_POINT_LEN] {
        let mut bytes = [0u8; COMPRESSED_POINT_LEN];
        bytes.copy_from_slice(&self.0.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RingError> {
        parse_compressed(bytes).map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSignature {
    ring: Ring,
    challenges: Vec<Scalar>,
    responses: Vec<Scalar>,
    key_image: KeyImage,
}

impl RingSignature {
    pub fn sign<R: RngCore + CryptoRng>(
        rng: &mut R,
        message: &[u8],
        ring: &Ring,
        signer_index: usize,
        private: &Scalar,
    ) -> Result<Self, RingError> {
        let ring_len = ring.len();
        let signer_pubkey = ring.get(signer_index).ok_or(RingError::IndexOutOfRange {
            index: signer_index,
            len: ring_len,
        })?;
        if *private == Scalar::ZERO
            || (ProjectivePoint::GENERATOR * *private).to_affine() != *signer_pubkey
        {
            return Err(RingError::InvalidSignerKey);
        }

        // mutable for zeroize at the end
        let mut secret = *private;
        let key_image = KeyImage::new(&secret, signer_pubkey);
        let transcript = transcript(message, ring, &key_image);

        // every response except the signer's stays random
        let mut responses = (0..ring_len)
            .map(|_| Scalar::random(&mut *rng))
            .collect::<Vec<Scalar>>();
        let mut challenges = vec![Scalar::ZERO; ring_len];

        let mut alpha = Scalar::random(&mut *rng);
        let hashed_signer_pubkey = hash_to_point(signer_pubkey);
        let first = (signer_index + 1) % ring_len;
        challenges[first] = challenge(
            &transcript,
            ProjectivePoint::GENERATOR * alpha,
            hashed_signer_pubkey * alpha,
        );

        let mut current = first;
        while current != signer_index {
            let next = (current + 1) % ring_len;
            challenges[next] = next_challenge(
                &transcript,
                &ring.keys()[current],
                &key_image,
                &challenges[current],
                &responses[current],
            );
            current = next;
        }

        // close the ring at the signer position
        responses[signer_index] = alpha - challenges[signer_index] * secret;
        alpha.zeroize();
        secret.zeroize();

        Ok(Self {
            ring: ring.clone(),
            challenges,
            responses,
            key_image,
        })
    }

    /// Recomputes every link of the challenge chain. Never panics on
    /// malformed signatures, they are simply rejected.
    pub fn verify(&self, message: &[u8]) -> bool {
        let ring_len = self.ring.len();
        if ring_len < 2
            || self.challenges.len() != ring_len
            || self.responses.len() != ring_len
            || *self.key_image.point() == AffinePoint::IDENTITY
        {
            log::debug!("ring signature rejected: malformed components");
            return false;
        }

        let transcript = transcript(message, &self.ring, &self.key_image);
        for (i, pubkey) in self.ring.keys().iter().enumerate() {
            let expected = next_challenge(
                &transcript,
                pubkey,
                &self.key_image,
                &self.challenges[i],
                &self.responses[i],
            );
            if expected != self.challenges[(i + 1) % ring_len] {
                log::debug!("ring signature rejected: challenge chain broken at {}", i);
                return false;
            }
        }
        true
    }

    /// Whether both signatures were produced with the same private key.
    pub fn is_linked(&self, other: &Self) -> bool {
        self.key_image == other.key_image
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn challenges(&self) -> &[Scalar] {
        &self.challenges
    }

    pub fn responses(&self) -> &[Scalar] {
        &self.responses
    }

    pub fn key_image(&self) -> &KeyImage {
        &self.key_image
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let ring_len = self.ring.len();
        let mut out = Vec::with_capacity(
            12 + (ring_len + 1) * COMPRESSED_POINT_LEN + 2 * ring_len * SCALAR_LEN,
        );
        out.extend_from_slice(&(ring_len as u32).to_le_bytes());
        for pk in self.ring.keys() {
            out.extend_from_slice(&pk.to_bytes());
        }
        for scalars in [&self.challenges, &self.responses] {
            out.extend_from_slice(&(scalars.len() as u32).to_le_bytes());
            for scalar in scalars.iter() {
                out.extend_from_slice(&scalar.to_bytes());
            }
        }
        out.extend_from_slice(&self.key_image.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RingError> {
        Self::try_from_slice(bytes).map_err(|e| RingError::MalformedInput(e.to_string()))
    }
}

/// Whether two signatures were made with the same private key, regardless
/// of the message or ring they sign.
pub fn link(first: &RingSignature, second: &RingSignature) -> bool {
    first.is_linked(second)
}

fn transcript(message: &[u8], ring: &Ring, key_image: &KeyImage) -> ChallengeHasher {
    let mut hasher = ChallengeHasher::new(HASH_ID);
    hasher.insert_bytes(message);
    hasher.insert_points(ring.keys());
    hasher.insert_point(key_image.point());
    hasher
}

fn challenge(
    transcript: &ChallengeHasher,
    l_point: ProjectivePoint,
    r_point: ProjectivePoint,
) -> Scalar {
    let mut hasher = transcript.clone();
    hasher.insert_point(&l_point.to_affine());
    hasher.insert_point(&r_point.to_affine());
    hasher.finalize()
}

// c_{i+1} = H(r_i * G + c_i * P_i, r_i * Hp(P_i) + c_i * I)
fn next_challenge(
    transcript: &ChallengeHasher,
    pubkey: &AffinePoint,
    key_image: &KeyImage,
    challenge_i: &Scalar,
    response_i: &Scalar,
) -> Scalar {
    let l_point = ProjectivePoint::GENERATOR * *response_i + *pubkey * *challenge_i;
    let r_point = hash_to_point(pubkey) * *response_i + *key_image.point() * *challenge_i;
    challenge(transcript, l_point, r_point)
}

fn invalid_data(msg: String) -> IoError {
    IoError::new(ErrorKind::InvalidData, msg)
}

fn invalid_component(err: RingError) -> IoError {
    invalid_data(err.to_string())
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> std::io::Result<&'a [u8]> {
    if buf.len() < len {
        return Err(IoError::new(
            ErrorKind::UnexpectedEof,
            "unexpected end of signature bytes",
        ));
    }
    let (head, rest) = buf.split_at(len);
    *buf = rest;
    Ok(head)
}

fn read_len(buf: &mut &[u8]) -> std::io::Result<usize> {
    let len = u32::deserialize(buf)? as usize;
    if len > MAX_RING_SIZE {
        return Err(invalid_data(format!("length {} exceeds the ring limit", len)));
    }
    Ok(len)
}

fn read_scalars(buf: &mut &[u8]) -> std::io::Result<Vec<Scalar>> {
    let len = read_len(buf)?;
    let mut scalars = Vec::with_capacity(len.min(buf.len() / SCALAR_LEN));
    for _ in 0..len {
        let bytes = take(buf, SCALAR_LEN)?;
        let scalar: Option<Scalar> = Scalar::from_repr(*GenericArray::from_slice(bytes)).into();
        match scalar {
            Some(scalar) => scalars.push(scalar),
            None => return Err(invalid_data("non-canonical scalar".to_owned())),
        }
    }
    Ok(scalars)
}

impl BorshSerialize for RingSignature {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl BorshDeserialize for RingSignature {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        let ring_len = read_len(buf)?;
        let mut keys = Vec::with_capacity(ring_len.min(buf.len() / COMPRESSED_POINT_LEN));
        for _ in 0..ring_len {
            let bytes = take(buf, COMPRESSED_POINT_LEN)?;
            keys.push(parse_compressed(bytes).map_err(invalid_component)?);
        }
        let ring = Ring::new(keys).map_err(invalid_component)?;
        let challenges = read_scalars(buf)?;
        let responses = read_scalars(buf)?;
        let image = take(buf, COMPRESSED_POINT_LEN)?;
        let key_image = KeyImage::from_bytes(image).map_err(invalid_component)?;
        Ok(Self {
            ring,
            challenges,
            responses,
            key_image,
        })
    }
}
