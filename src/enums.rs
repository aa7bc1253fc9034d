// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

pub enum Partition {
  NONE = 0,
  HORZ = 1,
  VERT = 2,
  SPLIT = 3,
  HORZ_A = 4,
  HORZ_B = 5,
  VERT_A = 6,
  VERT_B = 7,
  HORZ_4 = 8,
  VERT_4 = 9
}

// Macroblock-level prediction mode, as chosen by MBModeDriver.
// The four intra-16x16 directions plus the two intra sub-block classes
// share the enum with the inter classes because the candidate table in
// consts.rs dispatches on exactly this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbPredictionMode {
  DcPred,
  VPred,
  HPred,
  TmPred,
  BPred,
  I8x8Pred,
  NearestMv,
  NearMv,
  ZeroMv,
  NewMv,
  SplitMv,
}

impl MbPredictionMode {
  pub fn is_intra(&self) -> bool {
    matches!(self, MbPredictionMode::DcPred | MbPredictionMode::VPred
      | MbPredictionMode::HPred | MbPredictionMode::TmPred
      | MbPredictionMode::BPred | MbPredictionMode::I8x8Pred)
  }

  pub fn is_inter(&self) -> bool {
    !self.is_intra()
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefFrame {
  Intra,
  Last,
  Golden,
  AltRef,
}

// Per-4x4-sub-block mode used inside a SPLITMV macroblock.
// LEFT4X4/ABOVE4X4 mean "copy the neighbor's MV" (no MV bits coded);
// labels2mode canonicalizes ABOVE to LEFT whenever the two would be equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMode {
  Left4x4,
  Above4x4,
  Zero4x4,
  New4x4,
}

// Directional 4x4 intra sub-modes used by B_PRED, mirroring the VP8 "B_*"
// prediction set. IntraSearch's per-label candidate sets are drawn from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BPredMode {
  BDcPred,
  BTmPred,
  BVePred,
  BHePred,
  BLdPred,
  BRdPred,
  BVrPred,
  BVlPred,
  BHdPred,
  BHuPred,
}

// Shapes SegmentationSearch tries, in the order rd_pick_best_mbsegmentation
// walks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbSplit {
  Block16x8,
  Block8x16,
  Block8x8,
  Block4x4,
}

impl MbSplit {
  // Number of independently-chosen labels (sub-blocks) for this shape.
  pub fn num_labels(&self) -> usize {
    match self {
      MbSplit::Block16x8 | MbSplit::Block8x16 => 2,
      MbSplit::Block8x8 => 4,
      MbSplit::Block4x4 => 16,
    }
  }

  // Index into segmentation_to_sseshift / rd_threshes for this shape.
  pub fn sseshift_index(&self) -> usize {
    match self {
      MbSplit::Block16x8 | MbSplit::Block8x16 => 0,
      MbSplit::Block8x8 => 2,
      MbSplit::Block4x4 => 3,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxSize {
  Tx4x4,
  Tx8x8,
}
