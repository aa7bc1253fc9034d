// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Key-frame / intra-refresh macroblock mode choice, grounded on
// rd_pick_intra16x16mby_mode / rd_pick_intra8x8mby_modes /
// rd_pick_intra4x4mby_modes in rdopt.c: run all three luma shapes plus the
// UV intra search, then keep whichever shape's error is smallest, folding
// the (fixed, once-per-MB) UV rate into the winner.

use crate::array2d::Array2D;
use crate::context::NeighborCtx;
use crate::cost::CostTables;
use crate::enums::MbPredictionMode;
use crate::intra_search::{IntraCandidate, IntraSearch};
use crate::residual::ResidualEvaluator;

pub struct AutoIntraResult {
  pub mode: MbPredictionMode,
  pub rate: i32,
  pub distortion: i64,
  pub rd_cost: i64,
}

pub struct AutoIntraPicker;

impl AutoIntraPicker {
  #[allow(clippy::too_many_arguments)]
  pub fn pick(
    evaluator: &ResidualEvaluator,
    costs: &CostTables,
    mode_cost: impl Fn(MbPredictionMode) -> i32,
    source: &Array2D<u8>,
    uv_source: &Array2D<u8>,
    y0: usize,
    x0: usize,
    uv_y0: usize,
    uv_x0: usize,
    neighbor: NeighborCtx,
  ) -> AutoIntraResult {
    let whole16 = IntraSearch::search_16x16(
      evaluator, costs, &mode_cost, source, y0, x0, 16, 0, neighbor,
    );

    let mut b4_rate = 0;
    let mut b4_dist = 0i64;
    for row in 0..4 {
      for col in 0..4 {
        let (_, cand) = IntraSearch::search_4x4_block(
          evaluator,
          costs,
          |_| 0,
          source,
          y0 + row * 4,
          x0 + col * 4,
          neighbor,
        );
        b4_rate += cand.rate;
        b4_dist += cand.distortion;
      }
    }
    let b4 = IntraCandidate {
      mode: MbPredictionMode::BPred,
      rate: b4_rate,
      distortion: b4_dist,
      rd_cost: costs.rd_cost(b4_rate, b4_dist),
      quant: Array2D::new_with(1, 1, |_, _| 0),
      eob: 0,
    };

    let i8x8 = IntraSearch::search_i8x8(evaluator, costs, &mode_cost, source, y0, x0, neighbor);

    let uv = IntraSearch::search_16x16(
      evaluator, costs, |_| 0, uv_source, uv_y0, uv_x0, 8, 1, neighbor,
    );

    let candidates = [whole16, i8x8, b4];
    let best = candidates
      .into_iter()
      .min_by_key(|c| c.rd_cost)
      .expect("candidates is non-empty");

    let rate = best.rate + uv.rate;
    let distortion = best.distortion + uv.distortion;

    AutoIntraResult {
      mode: best.mode,
      rate,
      distortion,
      rd_cost: costs.rd_cost(rate, distortion),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_one_of_the_three_luma_shapes() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(16, 16, |i, j| ((i * 3 + j * 5) % 255) as u8);
    let uv_source = Array2D::new_with(8, 8, |i, j| ((i + j) * 9) as u8);

    let result = AutoIntraPicker::pick(
      &evaluator,
      &costs,
      |_| 8,
      &source,
      &uv_source,
      0,
      0,
      0,
      0,
      NeighborCtx::default(),
    );

    assert!(matches!(
      result.mode,
      MbPredictionMode::DcPred
        | MbPredictionMode::VPred
        | MbPredictionMode::HPred
        | MbPredictionMode::TmPred
        | MbPredictionMode::I8x8Pred
        | MbPredictionMode::BPred
    ));
    assert!(result.rd_cost >= 0);
  }
}
