//! NNUE network weights and forward evaluation.
//!
//! Weights ship as a JSON object with four tensors of doubles and are
//! quantized to integers on load. The feature layer is stored
//! input-major, so the contiguous `HIDDEN_SIZE` slice for a feature
//! index serves both the full refresh and the incremental add/sub.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::accumulator::Accumulator;
use super::{QA, QAB, QB, SCALE};
use crate::board::error::NetworkError;
use crate::board::types::{Color, Piece, Square};

/// Input feature size: 64 squares x 6 piece types x 2 colors
pub const INPUT_SIZE: usize = 768;

/// Hidden layer size (must match the trained network)
pub const HIDDEN_SIZE: usize = 256;

/// Output layer size
pub const OUTPUT_SIZE: usize = 1;

/// NNUE network weights, quantized. Loaded once and shared read-only.
pub struct NnueNetwork {
    /// Feature transformer weights `[INPUT_SIZE][HIDDEN_SIZE]`
    pub feature_weights: Box<[[i16; HIDDEN_SIZE]; INPUT_SIZE]>,
    /// Feature transformer biases, applied during the flatten
    pub feature_bias: [i16; HIDDEN_SIZE],
    /// Output weights: own perspective first, then the other
    pub output_weights: [i16; 2 * HIDDEN_SIZE],
    /// Output bias, in QAB units
    pub output_bias: i32,
}

/// On-disk weight layout: exactly four tensors of doubles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWeights {
    #[serde(rename = "ft.weight")]
    ft_weight: Vec<Vec<f64>>,
    #[serde(rename = "ft.bias")]
    ft_bias: Vec<f64>,
    #[serde(rename = "out.weight")]
    out_weight: Vec<Vec<f64>>,
    #[serde(rename = "out.bias")]
    out_bias: Vec<f64>,
}

impl NnueNetwork {
    /// Load and quantize a network from a JSON weight file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let file = File::open(path)?;
        let raw: RawWeights = serde_json::from_reader(BufReader::new(file))?;
        Self::quantize(raw)
    }

    /// Load and quantize a network from an in-memory JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        let raw: RawWeights = serde_json::from_str(json)?;
        Self::quantize(raw)
    }

    fn quantize(raw: RawWeights) -> Result<Self, NetworkError> {
        check_shape("ft.weight", &raw.ft_weight, INPUT_SIZE, HIDDEN_SIZE)?;
        check_len("ft.bias", &raw.ft_bias, HIDDEN_SIZE)?;
        check_shape("out.weight", &raw.out_weight, OUTPUT_SIZE, 2 * HIDDEN_SIZE)?;
        check_len("out.bias", &raw.out_bias, OUTPUT_SIZE)?;

        let mut feature_weights = Box::new([[0i16; HIDDEN_SIZE]; INPUT_SIZE]);
        for (i, row) in raw.ft_weight.iter().enumerate() {
            for (j, &w) in row.iter().enumerate() {
                feature_weights[i][j] = (w * f64::from(QA)) as i16;
            }
        }

        let mut feature_bias = [0i16; HIDDEN_SIZE];
        for (j, &b) in raw.ft_bias.iter().enumerate() {
            feature_bias[j] = (b * f64::from(QA)) as i16;
        }

        let mut output_weights = [0i16; 2 * HIDDEN_SIZE];
        for (j, &w) in raw.out_weight[0].iter().enumerate() {
            output_weights[j] = (w * f64::from(QB)) as i16;
        }

        let output_bias = (raw.out_bias[0] * f64::from(QAB)) as i32;

        #[cfg(feature = "logging")]
        log::debug!(
            "loaded NNUE network {INPUT_SIZE}x{HIDDEN_SIZE}x{OUTPUT_SIZE}, \
             quantized QA={QA} QB={QB}"
        );

        Ok(NnueNetwork {
            feature_weights,
            feature_bias,
            output_weights,
            output_bias,
        })
    }

    /// Evaluate an accumulator pair for the given side to move.
    /// Returns the score in centipawns from that side's perspective.
    #[must_use]
    pub fn evaluate(&self, acc: &Accumulator, side_to_move: Color) -> i32 {
        let (own, other) = match side_to_move {
            Color::White => (&acc.white, &acc.black),
            Color::Black => (&acc.black, &acc.white),
        };

        let mut output: i32 = 0;
        for (i, &a) in own.iter().enumerate() {
            let activated = (i32::from(a) + i32::from(self.feature_bias[i])).clamp(0, QA);
            output += activated * i32::from(self.output_weights[i]);
        }
        for (i, &a) in other.iter().enumerate() {
            let activated = (i32::from(a) + i32::from(self.feature_bias[i])).clamp(0, QA);
            output += activated * i32::from(self.output_weights[HIDDEN_SIZE + i]);
        }

        (output + self.output_bias) * SCALE / QAB
    }
}

fn check_shape(
    field: &'static str,
    tensor: &[Vec<f64>],
    rows: usize,
    cols: usize,
) -> Result<(), NetworkError> {
    if tensor.len() != rows {
        return Err(NetworkError::Shape {
            field,
            expected: (rows, cols),
            found: (tensor.len(), tensor.first().map_or(0, Vec::len)),
        });
    }
    for row in tensor {
        if row.len() != cols {
            return Err(NetworkError::Shape {
                field,
                expected: (rows, cols),
                found: (tensor.len(), row.len()),
            });
        }
    }
    Ok(())
}

fn check_len(field: &'static str, vector: &[f64], len: usize) -> Result<(), NetworkError> {
    if vector.len() != len {
        return Err(NetworkError::Shape {
            field,
            expected: (len, 1),
            found: (vector.len(), 1),
        });
    }
    Ok(())
}

/// Feature index of a placement as seen from one perspective.
///
/// The white view reads the board directly; the black view flips the
/// square across the ranks and swaps the colors.
#[inline]
#[must_use]
pub fn feature_index(piece: Piece, color: Color, square: Square, perspective: Color) -> usize {
    match perspective {
        Color::White => color.index() * 384 + piece.index() * 64 + square.as_index(),
        Color::Black => {
            color.opponent().index() * 384 + piece.index() * 64 + (square.as_index() ^ 56)
        }
    }
}

/// Both perspectives' feature indices for a placement.
#[inline]
pub(crate) fn feature_pair(piece: Piece, color: Color, square: Square) -> (usize, usize) {
    (
        feature_index(piece, color, square, Color::White),
        feature_index(piece, color, square, Color::Black),
    )
}
