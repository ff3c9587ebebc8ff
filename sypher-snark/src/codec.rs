use crate::SnarkError;
use bls::{G1Affine, G2Affine, Scalar};

use std::io::{Error as IoError, ErrorKind};

pub const G1_LEN: usize = 48;
pub const G2_LEN: usize = 96;
pub const SCALAR_LEN: usize = 32;

pub(crate) fn invalid_data(msg: &str) -> IoError {
    IoError::new(ErrorKind::InvalidData, msg.to_owned())
}

pub(crate) fn malformed(err: IoError) -> SnarkError {
    SnarkError::MalformedInput(err.to_string())
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> std::io::Result<&'a [u8]> {
    if buf.len() < len {
        return Err(IoError::new(ErrorKind::UnexpectedEof, "unexpected end of input"));
    }
    let (head, rest) = buf.split_at(len);
    *buf = rest;
    Ok(head)
}

pub(crate) fn read_g1(buf: &mut &[u8]) -> std::io::Result<G1Affine> {
    let mut bytes = [0u8; G1_LEN];
    bytes.copy_from_slice(take(buf, G1_LEN)?);
    Option::from(G1Affine::from_compressed(&bytes))
        .ok_or_else(|| invalid_data("invalid compressed G1 point"))
}

pub(crate) fn read_g2(buf: &mut &[u8]) -> std::io::Result<G2Affine> {
    let mut bytes = [0u8; G2_LEN];
    bytes.copy_from_slice(take(buf, G2_LEN)?);
    Option::from(G2Affine::from_compressed(&bytes))
        .ok_or_else(|| invalid_data("invalid compressed G2 point"))
}

pub(crate) fn read_scalar(buf: &mut &[u8]) -> std::io::Result<Scalar> {
    let mut bytes = [0u8; SCALAR_LEN];
    bytes.copy_from_slice(take(buf, SCALAR_LEN)?);
    Option::from(Scalar::from_bytes(&bytes))
        .ok_or_else(|| invalid_data("non-canonical scalar"))
}

/// Decodes concatenated 32-byte little-endian scalars. Every scalar has to
/// be canonical, i.e. smaller than the field modulus.
pub fn public_inputs_from_bytes(bytes: &[u8]) -> Result<Vec<Scalar>, SnarkError> {
    if bytes.len() % SCALAR_LEN != 0 {
        return Err(SnarkError::MalformedInput(format!(
            "public input bytes are not a multiple of {}",
            SCALAR_LEN
        )));
    }
    let mut buf = bytes;
    let mut inputs = Vec::with_capacity(bytes.len() / SCALAR_LEN);
    while !buf.is_empty() {
        inputs.push(read_scalar(&mut buf).map_err(malformed)?);
    }
    Ok(inputs)
}

pub fn public_inputs_to_bytes(inputs: &[Scalar]) -> Vec<u8> {
    inputs.iter().flat_map(|input| input.to_bytes()).collect()
}
