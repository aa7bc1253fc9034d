// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Top-level per-macroblock mode decision, grounded on vp8_rd_pick_inter_mode
// / vp8_rd_pick_intra_mode in rdopt.c: walk the vp8_mode_order candidate
// table, skip any candidate whose per-mode adaptive threshold the running
// best already beats, cost the rest, update the per-mode threshold with
// win/loss hysteresis, and keep whichever candidate wins. Motion-compensated
// prediction sample generation and the MV search engine are out-of-scope
// external collaborators; the caller supplies `predict_inter`/`predict_inter_uv`
// (trial-MV -> prediction-samples ops) and `search_mv` (a best-ref-mv ->
// found-MV op), exactly the way rdopt.c calls out to reconinter.c and mcomp.c.

use log::trace;

use crate::array2d::Array2D;
use crate::auto_intra::AutoIntraPicker;
use crate::config::EncoderConfig;
use crate::consts::{vp8_mode_order, vp8_ref_frame_order, vp8_second_ref_frame_order, MAX_MODES};
use crate::context::ContextBuffers;
use crate::cost::CostTables;
use crate::enums::{MbPredictionMode, RefFrame};
use crate::intra_search::IntraSearch;
use crate::mv::{mv_cost, Mv, MVPredictor, NeighborMv, PrevFrameMv};
use crate::refframe::RefFrameCoster;
use crate::residual::{NeighborCtx, ResidualEvaluator};
use crate::segmentation::SegmentationSearch;
use crate::speed::SpeedControl;

// Margin (in 1/8-pel units) a searched or predicted MV is allowed to reach
// past the frame edge before mode_decision treats it as out of window,
// mirroring VP8's LEFT_TOP_MARGIN/RIGHT_BOTTOM_MARGIN (16 pixels, << 3).
const MV_BORDER_MARGIN: i32 = 16 << 3;

// Window NEW4X4/NEWMV trials must land within around best_ref_mv to be
// considered at all, standing in for VP8's tunable x->mvthreshold.
const MVTHRESH: i32 = 8 << 3;

// Per-segment forced-feature overrides (SEG_LVL_REF_FRAME / SEG_LVL_MODE):
// a macroblock in a segment with either set must only consider candidates
// matching the forced value, the rest are silently skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentFeatures {
  pub forced_ref_frame: Option<RefFrame>,
  pub forced_mode: Option<MbPredictionMode>,
}

pub struct ModeDecision {
  pub mode: MbPredictionMode,
  pub ref_frame: RefFrame,
  pub second_ref_frame: Option<RefFrame>,
  pub mv: Mv,
  pub second_mv: Option<Mv>,
  pub skip: bool,
  pub rate: i32,
  pub distortion: i64,
  pub rd_cost: i64,
}

pub struct MBModeDriver {
  pub costs: CostTables,
  pub context: ContextBuffers,
  pub speed: SpeedControl,
  evaluator: ResidualEvaluator,
}

impl MBModeDriver {
  pub fn new(config: &EncoderConfig, mb_cols: usize) -> Self {
    Self {
      costs: CostTables::new(config.qindex, config.two_pass_ratio),
      context: ContextBuffers::new(mb_cols),
      speed: SpeedControl::new(),
      evaluator: ResidualEvaluator::new(config.qindex as u8),
    }
  }

  // `predict_inter(ref_frame, second_ref_frame, mv, second_mv, y0, x0, h, w)`
  // produces the (possibly compound-averaged) luma motion-compensated
  // prediction block; `predict_inter_uv` is the same for chroma, at chroma
  // geometry; `search_mv(ref_frame, y0, x0)` returns the best MV an external
  // search found for that reference (NEWMV's candidate). `frame_width`/
  // `frame_height` are luma pixel dimensions, used to build the per-MB MV
  // search window (vp8_clamp_mv2's mb_to_*_edge); `segment_features` carries
  // this macroblock's SEG_LVL_REF_FRAME/SEG_LVL_MODE overrides, if any.
  #[allow(clippy::too_many_arguments)]
  pub fn decide_macroblock(
    &mut self,
    config: &EncoderConfig,
    source: &Array2D<u8>,
    uv_source: &Array2D<u8>,
    mb_y0: usize,
    mb_x0: usize,
    uv_y0: usize,
    uv_x0: usize,
    mb_col: usize,
    frame_width: usize,
    frame_height: usize,
    segment_features: SegmentFeatures,
    above_neighbor: Option<NeighborMv>,
    left_neighbor: Option<NeighborMv>,
    above_left_neighbor: Option<NeighborMv>,
    predict_inter: impl Fn(RefFrame, Option<RefFrame>, Mv, Option<Mv>, usize, usize, usize, usize) -> Array2D<u8>,
    predict_inter_uv: impl Fn(RefFrame, Option<RefFrame>, Mv, Option<Mv>, usize, usize, usize, usize) -> Array2D<u8>,
    search_mv: impl Fn(RefFrame, usize, usize) -> Mv,
  ) -> ModeDecision {
    // The driver only ever models one flat above/left flag pair per MB,
    // not ContextBuffers' full 25-cell-per-MB resolution (that finer grain
    // is for the bitstream writer's own entropy contexts); derive it from
    // whatever the previous macroblock in this row/column committed.
    let (above_ctx, left_ctx) = self.context.snapshot(mb_col);
    let neighbor = NeighborCtx {
      above_nonzero: above_ctx.above.iter().any(|&b| b),
      left_nonzero: left_ctx.iter().any(|&b| b),
    };

    if config.intra_only {
      let result = AutoIntraPicker::pick(
        &self.evaluator,
        &self.costs,
        mode_bit_cost,
        source,
        uv_source,
        mb_y0,
        mb_x0,
        uv_y0,
        uv_x0,
        neighbor,
      );
      trace!(
        "mb({},{}) mode={:?} ref=Intra rd={}",
        mb_y0 / 16,
        mb_x0 / 16,
        result.mode,
        result.rd_cost
      );
      self.commit_context(mb_col, result.rate > 0);
      return ModeDecision {
        mode: result.mode,
        ref_frame: RefFrame::Intra,
        second_ref_frame: None,
        mv: Mv::ZERO,
        second_mv: None,
        skip: result.distortion == 0,
        rate: result.rate,
        distortion: result.distortion,
        rd_cost: result.rd_cost,
      };
    }

    let edges = MvEdges::new(mb_y0, mb_x0, frame_width, frame_height);

    let mut best: Option<ModeDecision> = None;

    for i in 0..MAX_MODES {
      let mode = vp8_mode_order[i];
      let ref_frame = vp8_ref_frame_order[i];
      let second_ref_frame = vp8_second_ref_frame_order[i];

      if !ref_available(ref_frame, config) || second_ref_frame.is_some_and(|r| !ref_available(r, config)) {
        continue;
      }

      if let Some(forced) = segment_features.forced_ref_frame {
        if ref_frame != forced {
          continue;
        }
      }
      if let Some(forced) = segment_features.forced_mode {
        if mode != forced {
          continue;
        }
      }

      // THE CORE: skip costing a candidate whose own adaptive threshold the
      // running best can't even be beaten by, following rdopt.c's
      // `if (best_rd <= rd_threshes[mode_index]) continue;` gate.
      if let Some(best_so_far) = &best {
        if best_so_far.rd_cost <= self.costs.rd_threshes[i] as i64 {
          continue;
        }
      }

      let best_rd = best.as_ref().map_or(i64::MAX, |b| b.rd_cost);

      let candidate = self.cost_candidate(
        mode,
        ref_frame,
        second_ref_frame,
        config,
        source,
        uv_source,
        mb_y0,
        mb_x0,
        uv_y0,
        uv_x0,
        neighbor,
        above_neighbor,
        left_neighbor,
        above_left_neighbor,
        &edges,
        best_rd,
        &predict_inter,
        &predict_inter_uv,
        &search_mv,
      );

      if let Some(candidate) = candidate {
        let won = best.as_ref().map_or(true, |b| candidate.rd_cost < b.rd_cost);
        self.costs.update_thresh(i, won);
        if won {
          best = Some(candidate);
        }
      }
    }

    let best = best.expect("vp8_mode_order always offers an Intra/ZeroMv fallback");
    trace!(
      "mb({},{}) mode={:?} ref={:?} rd={}",
      mb_y0 / 16,
      mb_x0 / 16,
      best.mode,
      best.ref_frame,
      best.rd_cost
    );
    self.commit_context(mb_col, best.mode != MbPredictionMode::ZeroMv && best.distortion > 0);
    best
  }

  // Commits a single "did this MB code any nonzero coefficients" flag across
  // its whole above/left footprint. A faithful per-sub-block commit needs
  // each candidate's actual per-block eob, which only ResidualEvaluator's
  // individual eval_block calls carry; at the driver's per-MB granularity
  // this coarser flag is what feeds the next MB's all_zero_ctx derivation.
  fn commit_context(&mut self, mb_col: usize, nonzero: bool) {
    let (mut above, _) = self.context.snapshot(mb_col);
    for cell in above.above.iter_mut() {
      *cell = nonzero;
    }
    let left = [nonzero; 25];
    self.context.commit(mb_col, above, left);
  }

  #[allow(clippy::too_many_arguments)]
  fn cost_candidate(
    &self,
    mode: MbPredictionMode,
    ref_frame: RefFrame,
    second_ref_frame: Option<RefFrame>,
    config: &EncoderConfig,
    source: &Array2D<u8>,
    uv_source: &Array2D<u8>,
    mb_y0: usize,
    mb_x0: usize,
    uv_y0: usize,
    uv_x0: usize,
    neighbor: NeighborCtx,
    above_neighbor: Option<NeighborMv>,
    left_neighbor: Option<NeighborMv>,
    above_left_neighbor: Option<NeighborMv>,
    edges: &MvEdges,
    best_rd: i64,
    predict_inter: &impl Fn(RefFrame, Option<RefFrame>, Mv, Option<Mv>, usize, usize, usize, usize) -> Array2D<u8>,
    predict_inter_uv: &impl Fn(RefFrame, Option<RefFrame>, Mv, Option<Mv>, usize, usize, usize, usize) -> Array2D<u8>,
    search_mv: &impl Fn(RefFrame, usize, usize) -> Mv,
  ) -> Option<ModeDecision> {
    if mode.is_intra() {
      return self.cost_intra_candidate(mode, source, uv_source, mb_y0, mb_x0, uv_y0, uv_x0, neighbor);
    }

    let ref_cost = RefFrameCoster::cost(ref_frame, config.golden_frame_available, config.altref_frame_available)
      + second_ref_frame.map_or(0, |_| RefFrameCoster::compound_cost());
    if ref_cost > 1_000_000 {
      return None;
    }

    // No previous-frame candidates or compensated-reference MV field exist in
    // this single-frame encoder shell; `search_mv`/`sad` below stand in for
    // the out-of-scope external MV search engine instead.
    let no_prev_frame: &[PrevFrameMv] = &[];
    let (best_ref_mv, _hint) = MVPredictor::predict(
      ref_frame,
      above_neighbor,
      left_neighbor,
      above_left_neighbor,
      no_prev_frame,
      |_| 0,
      edges.left,
      edges.right,
      edges.top,
      edges.bottom,
    );

    let second_best_ref_mv = second_ref_frame.map(|second| {
      MVPredictor::predict(
        second,
        above_neighbor,
        left_neighbor,
        above_left_neighbor,
        no_prev_frame,
        |_| 0,
        edges.left,
        edges.right,
        edges.top,
        edges.bottom,
      )
      .0
    });

    if mode == MbPredictionMode::SplitMv {
      let neighbor_above = vec![neighbor; 16];
      let seg = SegmentationSearch::rd_pick_best_mbsegmentation(
        &self.evaluator,
        &self.costs,
        source,
        mb_y0,
        mb_x0,
        best_ref_mv,
        &neighbor_above,
        |y0, x0, h, w, mv| predict_inter(ref_frame, second_ref_frame, mv, second_best_ref_mv, y0, x0, h, w),
        |y0, x0, _h, _w| search_mv(ref_frame, y0, x0),
        best_rd,
        MVTHRESH,
      )?;

      let y_distortion: i64 = seg.labels.iter().map(|l| l.distortion).sum();
      let y_rate: i32 = seg.labels.iter().map(|l| l.rate).sum();

      let uv_mv = seg.labels.first().map(|l| l.mv).unwrap_or(Mv::ZERO);
      let pred_uv = predict_inter_uv(ref_frame, second_ref_frame, uv_mv, second_best_ref_mv, uv_y0, uv_x0, 8, 8);
      let (uv_rate, uv_distortion) = self.evaluator.inter4_uv_rd(uv_source, &pred_uv, uv_y0, uv_x0, neighbor);

      let rate = y_rate + uv_rate + ref_cost;
      let distortion = y_distortion + uv_distortion;
      return Some(ModeDecision {
        mode,
        ref_frame,
        second_ref_frame,
        mv: uv_mv,
        second_mv: second_best_ref_mv,
        skip: distortion == 0,
        rate,
        distortion,
        rd_cost: self.costs.rd_cost(rate, distortion),
      });
    }

    // Zero-MV skip law: NEARESTMV/NEARMV collapsing onto (0,0) is strictly
    // dominated by ZEROMV, which already covers that MV more cheaply.
    if matches!(mode, MbPredictionMode::NearestMv | MbPredictionMode::NearMv) && best_ref_mv == Mv::ZERO {
      return None;
    }

    let mv = match mode {
      MbPredictionMode::ZeroMv => Mv::ZERO,
      MbPredictionMode::NearestMv | MbPredictionMode::NearMv => best_ref_mv,
      MbPredictionMode::NewMv => search_mv(ref_frame, mb_y0, mb_x0),
      _ => best_ref_mv,
    };

    // MV-window trap: a NEWMV search result landing outside the
    // margin-expanded frame window is rejected outright rather than clamped.
    if mode == MbPredictionMode::NewMv
      && (mv.row < edges.top || mv.row > edges.bottom || mv.col < edges.left || mv.col > edges.right)
    {
      return None;
    }

    let pred = predict_inter(ref_frame, second_ref_frame, mv, second_best_ref_mv, mb_y0, mb_x0, 16, 16);
    let (y_rate, y_distortion, _blocks, _y2) = self.evaluator.mb_yrd(source, &pred, mb_y0, mb_x0, [neighbor; 16]);

    let pred_uv = predict_inter_uv(ref_frame, second_ref_frame, mv, second_best_ref_mv, uv_y0, uv_x0, 8, 8);
    let uv_result = self.evaluator.inter16_uv_rd(uv_source, &pred_uv, uv_y0, uv_x0, neighbor);

    let mv_rate = if mode == MbPredictionMode::NewMv {
      mv_cost(mv, best_ref_mv)
    } else {
      0
    };
    let rate = y_rate + uv_result.rate + mv_rate + ref_cost + mode_bit_cost(mode);
    let distortion = y_distortion + uv_result.distortion;

    Some(ModeDecision {
      mode,
      ref_frame,
      second_ref_frame,
      mv,
      second_mv: second_best_ref_mv,
      skip: distortion == 0,
      rate,
      distortion,
      rd_cost: self.costs.rd_cost(rate, distortion),
    })
  }

  #[allow(clippy::too_many_arguments)]
  fn cost_intra_candidate(
    &self,
    mode: MbPredictionMode,
    source: &Array2D<u8>,
    uv_source: &Array2D<u8>,
    mb_y0: usize,
    mb_x0: usize,
    uv_y0: usize,
    uv_x0: usize,
    neighbor: NeighborCtx,
  ) -> Option<ModeDecision> {
    let uv = IntraSearch::search_16x16(
      &self.evaluator,
      &self.costs,
      |_| 0,
      uv_source,
      uv_y0,
      uv_x0,
      8,
      1,
      neighbor,
    );

    let (rate, distortion) = match mode {
      MbPredictionMode::BPred => {
        let mut rate = 0;
        let mut distortion = 0i64;
        for row in 0..4 {
          for col in 0..4 {
            let (_, cand) = IntraSearch::search_4x4_block(
              &self.evaluator,
              &self.costs,
              |_| 0,
              source,
              mb_y0 + row * 4,
              mb_x0 + col * 4,
              neighbor,
            );
            rate += cand.rate;
            distortion += cand.distortion;
          }
        }
        (rate, distortion)
      }
      MbPredictionMode::I8x8Pred => {
        let cand = IntraSearch::search_i8x8(&self.evaluator, &self.costs, mode_bit_cost, source, mb_y0, mb_x0, neighbor);
        (cand.rate, cand.distortion)
      }
      _ => {
        let cand = IntraSearch::search_16x16(
          &self.evaluator, &self.costs, mode_bit_cost, source, mb_y0, mb_x0, 16, 0, neighbor,
        );
        (cand.rate, cand.distortion)
      }
    };

    let total_rate = rate + uv.rate;
    let total_distortion = distortion + uv.distortion;

    Some(ModeDecision {
      mode,
      ref_frame: RefFrame::Intra,
      second_ref_frame: None,
      mv: Mv::ZERO,
      second_mv: None,
      skip: total_distortion == 0,
      rate: total_rate,
      distortion: total_distortion,
      rd_cost: self.costs.rd_cost(total_rate, total_distortion),
    })
  }
}

// Per-MB search window in 1/8-pel units, following vp8_clamp_mv2's
// mb_to_*_edge derivation with the LEFT_TOP_MARGIN/RIGHT_BOTTOM_MARGIN
// pattern: predictors and NEWMV trials may reach MV_BORDER_MARGIN past
// either frame edge before being rejected/clamped.
struct MvEdges {
  left: i32,
  right: i32,
  top: i32,
  bottom: i32,
}

impl MvEdges {
  fn new(mb_y0: usize, mb_x0: usize, frame_width: usize, frame_height: usize) -> Self {
    Self {
      left: -((mb_x0 as i32) * 8) - MV_BORDER_MARGIN,
      right: ((frame_width as i32 - mb_x0 as i32 - 16) * 8) + MV_BORDER_MARGIN,
      top: -((mb_y0 as i32) * 8) - MV_BORDER_MARGIN,
      bottom: ((frame_height as i32 - mb_y0 as i32 - 16) * 8) + MV_BORDER_MARGIN,
    }
  }
}

fn ref_available(ref_frame: RefFrame, config: &EncoderConfig) -> bool {
  match ref_frame {
    RefFrame::Intra | RefFrame::Last => true,
    RefFrame::Golden => config.golden_frame_available,
    RefFrame::AltRef => config.altref_frame_available,
  }
}

// Flat per-mode signalling cost; a faithful vp8_cost_mv_ref/inter_mode_cdf
// walk needs the near-MV reference count MVPredictor doesn't track
// standalone, so every inter mode pays the shared inter_mode_cdf entry cost
// and every intra mode pays y_mode_cdf's.
fn mode_bit_cost(mode: MbPredictionMode) -> i32 {
  use crate::cdf::{inter_mode_cdf, y_mode_cdf};
  use crate::cost::cdf_symbol_cost;
  if mode.is_intra() {
    cdf_symbol_cost(0, &y_mode_cdf)
  } else {
    cdf_symbol_cost(0, &inter_mode_cdf)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn intra_only_config_always_returns_an_intra_decision() {
    let config = EncoderConfig {
      intra_only: true,
      ..EncoderConfig::default()
    };
    let mut driver = MBModeDriver::new(&config, 4);
    let source = Array2D::new_with(16, 16, |i, j| ((i + j) * 3) as u8);
    let uv_source = Array2D::new_with(8, 8, |i, j| ((i + j) * 3) as u8);

    let decision = driver.decide_macroblock(
      &config,
      &source,
      &uv_source,
      0,
      0,
      0,
      0,
      0,
      176,
      144,
      SegmentFeatures::default(),
      None,
      None,
      None,
      |_, _, _, _, _, _, h, w| Array2D::new_with(h, w, |_, _| 0u8),
      |_, _, _, _, _, _, h, w| Array2D::new_with(h, w, |_, _| 0u8),
      |_, _, _| Mv::ZERO,
    );

    assert_eq!(decision.ref_frame, RefFrame::Intra);
  }

  #[test]
  fn inter_search_prefers_zero_mv_on_a_static_scene() {
    let config = EncoderConfig {
      intra_only: false,
      ..EncoderConfig::default()
    };
    let mut driver = MBModeDriver::new(&config, 4);
    let source = Array2D::new_with(16, 16, |_, _| 100u8);
    let uv_source = Array2D::new_with(8, 8, |_, _| 100u8);

    let decision = driver.decide_macroblock(
      &config,
      &source,
      &uv_source,
      0,
      0,
      0,
      0,
      0,
      176,
      144,
      SegmentFeatures::default(),
      None,
      None,
      None,
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |_, _| 100u8)
      },
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |_, _| 100u8)
      },
      |_, _, _| Mv::ZERO,
    );

    assert_eq!(decision.distortion, 0);
    assert!(decision.skip);
  }

  #[test]
  fn segment_locked_ref_frame_is_never_violated() {
    let config = EncoderConfig {
      intra_only: false,
      golden_frame_available: true,
      altref_frame_available: true,
      ..EncoderConfig::default()
    };
    let mut driver = MBModeDriver::new(&config, 4);
    let source = Array2D::new_with(16, 16, |i, j| ((i * 7 + j * 3) % 255) as u8);
    let uv_source = Array2D::new_with(8, 8, |i, j| ((i + j) * 11) as u8);

    let segment_features = SegmentFeatures {
      forced_ref_frame: Some(RefFrame::AltRef),
      forced_mode: None,
    };

    let decision = driver.decide_macroblock(
      &config,
      &source,
      &uv_source,
      0,
      0,
      0,
      0,
      0,
      176,
      144,
      segment_features,
      None,
      None,
      None,
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |i, j| ((i + j) * 2) as u8)
      },
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |i, j| ((i + j) * 2) as u8)
      },
      |_, _, _| Mv { row: 4, col: 4 },
    );

    assert_eq!(decision.ref_frame, RefFrame::AltRef);
  }

  #[test]
  fn zero_mv_neighbors_never_pick_nearest_or_near_mv() {
    let config = EncoderConfig {
      intra_only: false,
      ..EncoderConfig::default()
    };
    let mut driver = MBModeDriver::new(&config, 4);
    let source = Array2D::new_with(16, 16, |_, _| 100u8);
    let uv_source = Array2D::new_with(8, 8, |_, _| 100u8);
    let zero_neighbor = Some(NeighborMv {
      ref_frame: RefFrame::Last,
      mv: Mv::ZERO,
    });

    let decision = driver.decide_macroblock(
      &config,
      &source,
      &uv_source,
      0,
      0,
      0,
      0,
      0,
      176,
      144,
      SegmentFeatures::default(),
      zero_neighbor,
      zero_neighbor,
      zero_neighbor,
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |_, _| 100u8)
      },
      |_, _, mv, _, _, _, h, w| {
        let _ = mv;
        Array2D::new_with(h, w, |_, _| 100u8)
      },
      |_, _, _| Mv::ZERO,
    );

    assert_ne!(decision.mode, MbPredictionMode::NearestMv);
    assert_ne!(decision.mode, MbPredictionMode::NearMv);
  }
}
