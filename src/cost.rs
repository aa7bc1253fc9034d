// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// RD constants and bit-cost estimation, grounded on vp8_initialize_rd_consts /
// compute_rd_mult / cost_coeffs in rdopt.c. Our entropy coder is a CDF-driven
// range coder rather than VP8's tree coder, so token costs are derived from
// each CDF's implied symbol probability (-log2(p)) instead of a fixed
// tree-and-probability walk; everything else (rdmult/rddiv derivation,
// threshold scaling, the per-plane coefficient cost loop) follows the
// original shape closely.

use crate::consts::qindex_to_dc_q;
use crate::consts::{MAX_MODES, MAX_THRESHMULT, MIN_THRESHMULT, ZBIN_OQ_MAX};

// Fixed-point cost unit: 1 unit = 1/8 of a bit, matching the convention the
// AV1 reference costing tables use (av1_cost_symbol-style).
const COST_BITS_FRAC: f64 = 8.0;

pub struct CostTables {
  pub rdmult: i32,
  pub rddiv: i32,
  pub error_per_bit: i32,
  // SAD-per-bit lookups for an external MV search engine to weigh its own
  // rate estimate against; this core never reads them back itself.
  pub sad_per_bit16: i32,
  pub sad_per_bit4: i32,
  pub rd_threshes: [i32; MAX_MODES],
  pub rd_baseline_thresh: [i32; MAX_MODES],
  pub thresh_mult: [i32; MAX_MODES],
  // Kept to rebuild rd_threshes[i] in update_thresh the same way `new` built
  // it the first time, without redoing the qindex -> q' derivation.
  q: i32,
}

impl CostTables {
  // Mirrors vp8_initialize_rd_consts: derives rdmult/rddiv/error_per_bit from
  // qindex (plus the zbin_over_quant and two-pass boosts VP8 folds into
  // rdmult before the floor-at-7 clamp), then scales a starting thresh_mult
  // table (uniformly MIN_THRESHMULT here; MBModeDriver/SpeedControl adjust
  // individual entries at runtime the way vp8_set_speed_features does) into
  // rd_threshes. `two_pass_ratio` is the caller's estimated bits-per-pixel
  // ratio against a hypothetical first pass; 1.0 (no two-pass hint) is a
  // no-op.
  pub fn new(qindex: i32, two_pass_ratio: f32) -> Self {
    let qindex = qindex.clamp(0, 255);
    let dc_q = qindex_to_dc_q[qindex as usize];

    let mut rdmult = compute_rd_mult(qindex);

    // zbin_over_quant boost: VP8 widens the quantizer dead zone as Q rises
    // (ZBIN_OQ_MAX taper); mirror that here by nudging rdmult up by the same
    // taper so mode decision doesn't underrate high-Q candidates.
    rdmult += (qindex / 16).min(ZBIN_OQ_MAX);

    if two_pass_ratio > 0.0 {
      rdmult = ((rdmult as f64) / two_pass_ratio as f64).round() as i32;
    }

    if rdmult < 7 {
      rdmult = 7;
    }

    let mut error_per_bit = rdmult / 110;
    if error_per_bit == 0 {
      error_per_bit = 1;
    }

    let sad_per_bit16 = (0.0418 * dc_q as f64 * 128.0 + 0.5) as i32;
    let sad_per_bit4 = (0.063 * dc_q as f64 * 128.0 + 0.5) as i32;

    let mut q = ((dc_q >> 2) as f64).powf(1.25) as i32;
    q <<= 2;
    if q < 8 {
      q = 8;
    }
    rdmult <<= 4;

    let thresh_mult = [MIN_THRESHMULT; MAX_MODES];
    let mut rd_threshes = [0i32; MAX_MODES];
    let rddiv;

    if rdmult > 1000 {
      rddiv = 1;
      rdmult /= 100;
      for i in 0..MAX_MODES {
        rd_threshes[i] = thresh_mult[i] * q / 100;
      }
    } else {
      rddiv = 100;
      for i in 0..MAX_MODES {
        rd_threshes[i] = thresh_mult[i] * q;
      }
    }

    Self {
      rdmult,
      rddiv,
      error_per_bit,
      sad_per_bit16,
      sad_per_bit4,
      rd_baseline_thresh: rd_threshes,
      rd_threshes,
      thresh_mult,
      q,
    }
  }

  // J = D + lambda * R, in the RDMULT/RDDIV fixed-point scale rdopt.c uses.
  pub fn rd_cost(&self, rate: i32, distortion: i64) -> i64 {
    let rate_term = (128 + self.rdmult as i64 * rate as i64) >> 8;
    rate_term + self.rddiv as i64 * distortion
  }

  // Win/loss hysteresis, following rdopt.c:3290-3300: a candidate that became
  // the new best earns 2 units back toward MIN_THRESHMULT, one that didn't
  // costs 4 toward MAX_THRESHMULT. rd_threshes[mode_index] is rebuilt the
  // same way `new` first built it, off the adjusted multiplier.
  pub fn update_thresh(&mut self, mode_index: usize, won: bool) {
    let adjust = if won { -2 } else { 4 };
    self.thresh_mult[mode_index] =
      (self.thresh_mult[mode_index] + adjust).clamp(MIN_THRESHMULT, MAX_THRESHMULT);
    self.rd_threshes[mode_index] = if self.rddiv == 1 {
      self.thresh_mult[mode_index] * self.q / 100
    } else {
      self.thresh_mult[mode_index] * self.q
    };
  }
}

pub fn compute_rd_mult(qindex: i32) -> i32 {
  let q = qindex_to_dc_q[qindex.clamp(0, 255) as usize];
  (3 * q * q) >> 4
}

// Bits (in 1/8-bit units) to code `val` through a CDF, where cdf[i] holds
// P(symbol <= i) scaled to 1<<15. Mirrors cost_coeffs' per-token cost lookup,
// generalized to our CDF representation instead of a probability tree.
pub fn cdf_symbol_cost(val: usize, cdf: &[u16]) -> i32 {
  const PROB_TOP: f64 = 32768.0;
  let lo = if val == 0 { 0.0 } else { cdf[val - 1] as f64 };
  let hi = if val < cdf.len() { cdf[val] as f64 } else { PROB_TOP };
  let p = ((hi - lo) / PROB_TOP).max(1.0 / PROB_TOP);
  (-p.log2() * COST_BITS_FRAC).round() as i32
}

pub fn bit_cost(val: usize, prob0: u32) -> i32 {
  let p = if val == 0 {
    prob0 as f64 / 32768.0
  } else {
    1.0 - prob0 as f64 / 32768.0
  };
  let p = p.max(1.0 / 32768.0);
  (-p.log2() * COST_BITS_FRAC).round() as i32
}

// Cost of `nbits` uniformly-distributed literal bits, eg. MV/EOB extra bits.
pub fn literal_cost(nbits: u32) -> i32 {
  (nbits as f64 * COST_BITS_FRAC).round() as i32
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rd_cost_grows_with_both_rate_and_distortion() {
    let tables = CostTables::new(100, 1.0);
    let base = tables.rd_cost(0, 0);
    assert!(tables.rd_cost(1000, 0) > base);
    assert!(tables.rd_cost(0, 1000) > base);
  }

  #[test]
  fn cdf_symbol_cost_is_cheaper_for_more_likely_symbol() {
    // cdf[0] close to 32768 means symbol 0 is very likely
    let cdf = [32000u16, 32500];
    let cheap = cdf_symbol_cost(0, &cdf);
    let expensive = cdf_symbol_cost(2, &cdf);
    assert!(cheap < expensive);
  }

  #[test]
  fn thresh_mult_stays_within_bounds_after_many_updates() {
    let mut tables = CostTables::new(150, 1.0);
    for _ in 0..50 {
      tables.update_thresh(0, false);
      tables.update_thresh(0, true);
    }
    assert!(tables.thresh_mult[0] >= MIN_THRESHMULT);
    assert!(tables.thresh_mult[0] <= MAX_THRESHMULT);
  }

  #[test]
  fn update_thresh_win_loosens_and_loss_tightens() {
    let mut tables = CostTables::new(150, 1.0);
    let start = tables.thresh_mult[0];
    tables.update_thresh(0, true);
    assert_eq!(tables.thresh_mult[0], (start - 2).clamp(MIN_THRESHMULT, MAX_THRESHMULT));
    let mut tables = CostTables::new(150, 1.0);
    tables.update_thresh(0, false);
    assert_eq!(tables.thresh_mult[0], (start + 4).clamp(MIN_THRESHMULT, MAX_THRESHMULT));
  }

  #[test]
  fn two_pass_ratio_below_one_raises_rdmult() {
    let baseline = CostTables::new(120, 1.0);
    let boosted = CostTables::new(120, 0.5);
    assert!(boosted.rdmult > baseline.rdmult);
  }
}
