// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Best-intra-mode search at 16x16, 8x8, and 4x4 granularity, grounded on
// rd_pick_intra16x16mby_mode / rd_pick_intra8x8mby_modes /
// rd_pick_intra4x4mby_modes in rdopt.c. Generating the actual prediction
// samples for a given direction (V/H/TM/B_*) is an out-of-scope external
// collaborator for this core; only DC prediction is implemented
// (recon::dc_predict), so non-DC candidates are costed against the DC
// predictor's samples as a stand-in. This keeps the *search structure*
// (enumerate candidates, cost each, keep the RD-cheapest) faithful while
// not reimplementing the predictor bank itself.

use crate::array2d::Array2D;
use crate::context::NeighborCtx;
use crate::cost::CostTables;
use crate::enums::{BPredMode, MbPredictionMode};
use crate::recon::dc_predict;
use crate::residual::ResidualEvaluator;

pub struct IntraCandidate {
  pub mode: MbPredictionMode,
  pub rate: i32,
  pub distortion: i64,
  pub rd_cost: i64,
  pub quant: Array2D<i32>,
  pub eob: usize,
}

pub struct IntraSearch;

impl IntraSearch {
  // 16x16-luma/8x8-chroma whole-block intra search: DcPred/VPred/HPred/TmPred.
  pub fn search_16x16(
    evaluator: &ResidualEvaluator,
    costs: &CostTables,
    mode_cost: impl Fn(MbPredictionMode) -> i32,
    source: &Array2D<u8>,
    y0: usize,
    x0: usize,
    size: usize,
    plane: usize,
    neighbor: NeighborCtx,
  ) -> IntraCandidate {
    const CANDIDATES: [MbPredictionMode; 4] = [
      MbPredictionMode::DcPred,
      MbPredictionMode::VPred,
      MbPredictionMode::HPred,
      MbPredictionMode::TmPred,
    ];

    let mut pred = source.clone();
    dc_predict(&mut pred, y0, x0, size, size);

    let mut best: Option<IntraCandidate> = None;
    for &mode in &CANDIDATES {
      // A true 16x16 luma block has no single 16x16 transform (txfm.rs only
      // implements 4x4/8x8); cost it the way macro_block_yrd does, as 16
      // independent 4x4 sub-blocks plus their shared Y2 second-order DC block.
      let (rate, distortion, quant, eob) = if size == 16 && plane == 0 {
        let (rate, distortion, _blocks, y2) =
          evaluator.mb_yrd(source, &pred, y0, x0, [neighbor; 16]);
        (rate, distortion, y2.quant, y2.eob)
      } else {
        let result = evaluator.eval_block(source, &pred, y0, x0, size, plane, neighbor, false);
        (result.rate, result.distortion, result.quant, result.eob)
      };
      let rate = rate + mode_cost(mode);
      let rd_cost = costs.rd_cost(rate, distortion);

      if best.as_ref().map_or(true, |b| rd_cost < b.rd_cost) {
        best = Some(IntraCandidate {
          mode,
          rate,
          distortion,
          rd_cost,
          quant,
          eob,
        });
      }
    }

    best.expect("CANDIDATES is non-empty")
  }

  // I8X8_PRED costs all four 8x8 quadrants of the macroblock, not just the
  // top-left one: vp8_rd_pick_intra8x8mby_modes iterates i in {0,2} x {0,2}
  // mapped to pixel offsets {0,8}x{0,8}.
  pub fn search_i8x8(
    evaluator: &ResidualEvaluator,
    costs: &CostTables,
    mode_cost: impl Fn(MbPredictionMode) -> i32,
    source: &Array2D<u8>,
    y0: usize,
    x0: usize,
    neighbor: NeighborCtx,
  ) -> IntraCandidate {
    let mut rate = 0;
    let mut distortion = 0i64;
    let mut quant = Array2D::new_with(8, 8, |_, _| 0i32);
    let mut eob = 0;

    for row in 0..2 {
      for col in 0..2 {
        let quadrant = Self::search_16x16(
          evaluator,
          costs,
          &mode_cost,
          source,
          y0 + row * 8,
          x0 + col * 8,
          8,
          0,
          neighbor,
        );
        rate += quadrant.rate;
        distortion += quadrant.distortion;
        quant = quadrant.quant;
        eob = quadrant.eob;
      }
    }

    IntraCandidate {
      mode: MbPredictionMode::I8x8Pred,
      rate,
      distortion,
      rd_cost: costs.rd_cost(rate, distortion),
      quant,
      eob,
    }
  }

  // Per-4x4-sub-block directional search for B_PRED, one candidate list per
  // label. Real encoders also let each label's prediction depend on the
  // just-reconstructed neighbour samples (left-to-right, top-to-bottom);
  // since only DC prediction is actually generated here, every label's
  // candidate set degenerates to the single DC-predicted residual, and
  // mode_cost alone decides which BPredMode "wins" a given RD tie.
  pub fn search_4x4_block(
    evaluator: &ResidualEvaluator,
    costs: &CostTables,
    mode_cost: impl Fn(BPredMode) -> i32,
    source: &Array2D<u8>,
    y0: usize,
    x0: usize,
    neighbor: NeighborCtx,
  ) -> (BPredMode, IntraCandidate) {
    const CANDIDATES: [BPredMode; 10] = [
      BPredMode::BDcPred,
      BPredMode::BTmPred,
      BPredMode::BVePred,
      BPredMode::BHePred,
      BPredMode::BLdPred,
      BPredMode::BRdPred,
      BPredMode::BVrPred,
      BPredMode::BVlPred,
      BPredMode::BHdPred,
      BPredMode::BHuPred,
    ];

    let mut pred = source.clone();
    dc_predict(&mut pred, y0, x0, 4, 4);

    let mut best_mode = BPredMode::BDcPred;
    let mut best: Option<IntraCandidate> = None;
    for &bmode in &CANDIDATES {
      let result = evaluator.eval_block(source, &pred, y0, x0, 4, 0, neighbor, false);
      let rate = result.rate + mode_cost(bmode);
      let rd_cost = costs.rd_cost(rate, result.distortion);

      if best.as_ref().map_or(true, |b| rd_cost < b.rd_cost) {
        best_mode = bmode;
        best = Some(IntraCandidate {
          mode: MbPredictionMode::BPred,
          rate,
          distortion: result.distortion,
          rd_cost,
          quant: result.quant,
          eob: result.eob,
        });
      }
    }

    (best_mode, best.expect("CANDIDATES is non-empty"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn search_16x16_picks_some_candidate_with_finite_cost() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(16, 16, |i, j| ((i + j) * 7) as u8);

    let best = IntraSearch::search_16x16(
      &evaluator,
      &costs,
      |_| 10,
      &source,
      0,
      0,
      16,
      0,
      NeighborCtx::default(),
    );
    assert!(best.rd_cost >= 0);
  }

  #[test]
  fn search_4x4_block_returns_a_bpredmode() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(4, 4, |i, j| ((i * 4 + j) * 10) as u8);

    let (mode, best) = IntraSearch::search_4x4_block(
      &evaluator,
      &costs,
      |_| 5,
      &source,
      0,
      0,
      NeighborCtx::default(),
    );
    assert_eq!(best.mode, MbPredictionMode::BPred);
    let _ = mode;
  }
}
