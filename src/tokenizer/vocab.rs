// src/tokenizer/vocab.rs

use burn::tensor::{backend::Backend, Tensor};

/// Channel 0 is PAD; printable ASCII maps to 1..=95.
pub const PAD: usize = 0;
pub const VOCAB_SIZE: usize = 96;

#[inline]
pub fn to_idx(c: char) -> usize {
    ((c as i32 - 32).clamp(0, 94) as usize) + 1
}

/// Encode to a fixed length, truncating or padding with PAD=0.
pub fn encode_fixed(text: &str, len: usize) -> Vec<usize> {
    let mut out: Vec<usize> = text.chars().take(len).map(to_idx).collect();
    while out.len() < len {
        out.push(PAD);
    }
    out
}

/// rows of token ids [B][T] -> one-hot [B,T,V]
pub fn one_hot_batch<B: Backend>(
    rows: &[Vec<usize>],
    vocab: usize,
    dev: &B::Device,
) -> Tensor<B, 3> {
    let t = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut data = vec![0.0f32; rows.len() * t * vocab];
    for (bi, row) in rows.iter().enumerate() {
        for (ti, &ix) in row.iter().enumerate() {
            if ix < vocab {
                data[bi * t * vocab + ti * vocab + ix] = 1.0;
            }
        }
    }
    Tensor::<B, 1>::from_floats(data.as_slice(), dev).reshape([rows.len(), t, vocab])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_maps_into_band() {
        assert_eq!(to_idx(' '), 1);
        assert_eq!(to_idx('~'), 95);
        assert!(to_idx('é') <= 95);
    }

    #[test]
    fn encode_pads_and_truncates() {
        assert_eq!(encode_fixed("hi", 4), vec![to_idx('h'), to_idx('i'), 0, 0]);
        assert_eq!(encode_fixed("hello", 3).len(), 3);
    }
}
