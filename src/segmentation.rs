// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// SPLITMV sub-partition search, grounded on vp8_rd_pick_best_mbsegmentation /
// rd_check_segment / labels2mode in rdopt.c. Generating motion-compensated
// prediction samples for a trial MV, and searching a new one, are
// out-of-scope external collaborators (the MV search engine and MC predictor
// both are); the caller supplies a `predict` closure standing in for the MC
// engine and a `search_mv` closure standing in for NEW4X4's motion search,
// the same way rd_check_segment calls out to the variance/SAD kernels and
// mcomp.c it's handed. rd_check_segment's early-out (abort a shape, or the
// whole search, once its running RD can no longer beat the caller's current
// best) is threaded through via `best_rd`; `mvthresh` is the window NEW4X4
// trials must land within around `best_ref_mv` to be considered at all.

use crate::array2d::Array2D;
use crate::cdf::mbsplit_cdf;
use crate::context::NeighborCtx;
use crate::cost::{cdf_symbol_cost, CostTables};
use crate::enums::{MbSplit, SplitMode};
use crate::mv::{mv_cost, Mv};
use crate::residual::ResidualEvaluator;

pub struct LabelResult {
  pub split_mode: SplitMode,
  pub mv: Mv,
  pub rate: i32,
  pub distortion: i64,
  pub rd_cost: i64,
}

pub struct SegmentationResult {
  pub split: MbSplit,
  pub labels: Vec<LabelResult>,
  pub rd_cost: i64,
}

pub struct SegmentationSearch;

impl SegmentationSearch {
  // Tries each MbSplit shape (16x8, 8x16, 8x8, 4x4) and, within each, picks
  // the cheapest SplitMode per label; returns the RD-best shape overall, or
  // None if every shape aborted against `best_rd` (the caller's running
  // best from the other 32 mode_order candidates) before finishing. `predict`
  // maps (label top-left y, label top-left x, label h, label w, trial mv) to
  // the motion-compensated prediction for that trial; `search_mv` maps the
  // same geometry to a freshly searched NEW4X4 candidate MV.
  #[allow(clippy::too_many_arguments)]
  pub fn rd_pick_best_mbsegmentation(
    evaluator: &ResidualEvaluator,
    costs: &CostTables,
    source: &Array2D<u8>,
    mb_y0: usize,
    mb_x0: usize,
    best_ref_mv: Mv,
    neighbor_above: &[NeighborCtx],
    predict: impl Fn(usize, usize, usize, usize, Mv) -> Array2D<u8>,
    search_mv: impl Fn(usize, usize, usize, usize) -> Mv,
    best_rd: i64,
    mvthresh: i32,
  ) -> Option<SegmentationResult> {
    const SHAPES: [MbSplit; 4] = [
      MbSplit::Block16x8,
      MbSplit::Block8x16,
      MbSplit::Block8x8,
      MbSplit::Block4x4,
    ];

    let mut best: Option<SegmentationResult> = None;

    'shape: for &split in &SHAPES {
      let (rows, cols, h, w) = shape_geometry(split);
      let mut labels = Vec::with_capacity(split.num_labels());
      let mut shape_rate = cdf_symbol_cost(split as usize, &mbsplit_cdf);
      let mut shape_dist = 0i64;

      if costs.rd_cost(shape_rate, 0) >= best_rd {
        continue;
      }

      let mut mv_grid: Vec<Option<Mv>> = vec![None; rows * cols];

      for label in 0..split.num_labels() {
        let row = label / cols;
        let col = label % cols;
        let y0 = mb_y0 + row * h;
        let x0 = mb_x0 + col * w;
        let neighbor = neighbor_above.get(label).copied().unwrap_or_default();
        let left_label_mv = if col > 0 { mv_grid[row * cols + col - 1] } else { None };
        let above_label_mv = if row > 0 { mv_grid[(row - 1) * cols + col] } else { None };

        let result = pick_label_mode(
          evaluator,
          costs,
          source,
          y0,
          x0,
          h,
          w,
          best_ref_mv,
          left_label_mv,
          above_label_mv,
          mvthresh,
          neighbor,
          &predict,
          &search_mv,
        );
        shape_rate += result.rate;
        shape_dist += result.distortion;
        mv_grid[row * cols + col] = Some(result.mv);
        labels.push(result);

        if costs.rd_cost(shape_rate, shape_dist) >= best_rd {
          continue 'shape;
        }
      }

      let rd_cost = costs.rd_cost(shape_rate, shape_dist);
      if best.as_ref().map_or(true, |b| rd_cost < b.rd_cost) {
        best = Some(SegmentationResult { split, labels, rd_cost });
      }
    }

    best
  }
}

fn shape_geometry(split: MbSplit) -> (usize, usize, usize, usize) {
  // (label rows, label cols, label height, label width)
  match split {
    MbSplit::Block16x8 => (2, 1, 8, 16),
    MbSplit::Block8x16 => (1, 2, 16, 8),
    MbSplit::Block8x8 => (2, 2, 8, 8),
    MbSplit::Block4x4 => (4, 4, 4, 4),
  }
}

#[allow(clippy::too_many_arguments)]
fn pick_label_mode(
  evaluator: &ResidualEvaluator,
  costs: &CostTables,
  source: &Array2D<u8>,
  y0: usize,
  x0: usize,
  h: usize,
  w: usize,
  best_ref_mv: Mv,
  left_label_mv: Option<Mv>,
  above_label_mv: Option<Mv>,
  mvthresh: i32,
  neighbor: NeighborCtx,
  predict: &impl Fn(usize, usize, usize, usize, Mv) -> Array2D<u8>,
  search_mv: &impl Fn(usize, usize, usize, usize) -> Mv,
) -> LabelResult {
  let mut candidates = vec![(SplitMode::Zero4x4, Mv::ZERO)];
  if let Some(mv) = left_label_mv {
    candidates.push((SplitMode::Left4x4, mv));
  }
  if let Some(mv) = above_label_mv {
    candidates.push((SplitMode::Above4x4, mv));
  }

  // mvthresh window trap: a freshly searched MV that strays too far from
  // best_ref_mv is dropped from consideration entirely, mirroring
  // rd_check_segment's x->mvthreshold gate on NEW4X4 trials.
  let searched = search_mv(y0, x0, h, w);
  if (searched.row - best_ref_mv.row).abs() <= mvthresh && (searched.col - best_ref_mv.col).abs() <= mvthresh {
    candidates.push((SplitMode::New4x4, searched));
  }

  let mut best: Option<LabelResult> = None;
  for &(mode, mv) in &candidates {
    let tx = if h >= 8 && w >= 8 { 8 } else { 4 };
    let pred = predict(y0, x0, h, w, mv);
    let result = evaluator.eval_block(source, &pred, y0, x0, tx, 0, neighbor, false);

    let mv_rate = match mode {
      SplitMode::New4x4 => mv_cost(mv, best_ref_mv),
      _ => 0,
    };
    let rate = result.rate + mv_rate;
    let rd_cost = costs.rd_cost(rate, result.distortion);

    if best.as_ref().map_or(true, |b| rd_cost < b.rd_cost) {
      best = Some(LabelResult {
        split_mode: mode,
        mv,
        rate,
        distortion: result.distortion,
        rd_cost,
      });
    }
  }

  let mut best = best.expect("candidates is non-empty (Zero4x4 always present)");

  // LEFT/ABOVE canonicalization law: if ABOVE4X4's MV happens to equal
  // LEFT4X4's, the label must be signalled as LEFT4X4.
  if best.split_mode == SplitMode::Above4x4 && left_label_mv == Some(best.mv) {
    best.split_mode = SplitMode::Left4x4;
  }

  best
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_a_shape_and_covers_all_labels() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(16, 16, |i, j| ((i + j) * 5) as u8);
    let neighbor = vec![NeighborCtx::default(); 16];

    let result = SegmentationSearch::rd_pick_best_mbsegmentation(
      &evaluator,
      &costs,
      &source,
      0,
      0,
      Mv::ZERO,
      &neighbor,
      |_, _, h, w, _| Array2D::new_with(h, w, |_, _| 0u8),
      |_, _, _, _| Mv::ZERO,
      i64::MAX,
      64,
    )
    .expect("best_rd of i64::MAX never triggers the early-out abort");

    assert_eq!(result.labels.len(), result.split.num_labels());
  }

  #[test]
  fn aborts_every_shape_when_best_rd_is_unbeatable() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(16, 16, |i, j| ((i + j) * 5) as u8);
    let neighbor = vec![NeighborCtx::default(); 16];

    let result = SegmentationSearch::rd_pick_best_mbsegmentation(
      &evaluator,
      &costs,
      &source,
      0,
      0,
      Mv::ZERO,
      &neighbor,
      |_, _, h, w, _| Array2D::new_with(h, w, |_, _| 0u8),
      |_, _, _, _| Mv::ZERO,
      0,
      64,
    );

    assert!(result.is_none());
  }

  #[test]
  fn new4x4_outside_mvthresh_window_is_rejected() {
    let evaluator = ResidualEvaluator::new(100);
    let costs = CostTables::new(100, 1.0);
    let source = Array2D::new_with(16, 16, |i, j| ((i + j) * 5) as u8);
    let neighbor = vec![NeighborCtx::default(); 16];

    // search_mv always returns something wildly far from best_ref_mv; with a
    // tight mvthresh, no label should ever pick New4x4.
    let result = SegmentationSearch::rd_pick_best_mbsegmentation(
      &evaluator,
      &costs,
      &source,
      0,
      0,
      Mv::ZERO,
      &neighbor,
      |_, _, h, w, _| Array2D::new_with(h, w, |_, _| 0u8),
      |_, _, _, _| Mv { row: 1000, col: 1000 },
      i64::MAX,
      1,
    )
    .expect("best_rd of i64::MAX never triggers the early-out abort");

    assert!(result.labels.iter().all(|l| l.split_mode != SplitMode::New4x4));
  }
}
