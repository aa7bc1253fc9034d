// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Above/left entropy context scratch buffers, grounded on
// ENTROPY_CONTEXT_PLANES and vp8_rdcost_mby's save/restore-around-trial
// pattern in rdopt.c: every candidate mode is costed against a *copy* of the
// real context so a rejected trial never leaks state into the next
// candidate, and only the winning mode's trial context is committed back.

// NeighborCtx (the above/left flag pair a single ResidualEvaluator call
// reads) lives in residual.rs next to the code that consumes it; re-exported
// here since ContextBuffers is where those flags are actually tracked across
// macroblocks.
pub use crate::residual::NeighborCtx;

// One "all zero?" bit per 4x4 luma/chroma sub-block plus the Y2 block,
// matching vp8_block2above/vp8_block2left's indexing (16 Y + 4 U + 4 V + 1 Y2).
const BLOCKS_PER_MB: usize = 16 + 4 + 4 + 1;

#[derive(Clone, Copy, Debug, Default)]
pub struct McolumnContext {
  pub above: [bool; BLOCKS_PER_MB],
}

#[derive(Clone, Debug)]
pub struct ContextBuffers {
  // Indexed by macroblock column; persists across a whole row.
  above: Vec<McolumnContext>,
  // Reset at the start of every macroblock row.
  left: [bool; BLOCKS_PER_MB],
}

impl ContextBuffers {
  pub fn new(mb_cols: usize) -> Self {
    Self {
      above: vec![McolumnContext::default(); mb_cols],
      left: [false; BLOCKS_PER_MB],
    }
  }

  pub fn reset_row(&mut self) {
    self.left = [false; BLOCKS_PER_MB];
  }

  pub fn reset_frame(&mut self) {
    for col in &mut self.above {
      *col = McolumnContext::default();
    }
    self.reset_row();
  }

  // Snapshot to cost a trial mode against, without mutating real state.
  pub fn snapshot(&self, mb_col: usize) -> (McolumnContext, [bool; BLOCKS_PER_MB]) {
    (self.above[mb_col], self.left)
  }

  // Commit the winning mode's post-coding context back into the real state.
  pub fn commit(&mut self, mb_col: usize, above: McolumnContext, left: [bool; BLOCKS_PER_MB]) {
    self.above[mb_col] = above;
    self.left = left;
  }
}

// Combines an above/left pair of "has nonzero coeff" flags into the 3-way
// (0, 1, 2) context VP8_COMBINEENTROPYCONTEXTS / our CDF context index use:
// neither set -> 0, exactly one set -> 1, both set -> 2.
pub fn combine_entropy_contexts(above: bool, left: bool) -> usize {
  above as usize + left as usize
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fresh_buffers_are_all_zero_context() {
    let ctx = ContextBuffers::new(4);
    let (above, left) = ctx.snapshot(2);
    assert!(above.above.iter().all(|&b| !b));
    assert!(left.iter().all(|&b| !b));
  }

  #[test]
  fn commit_is_isolated_per_column() {
    let mut ctx = ContextBuffers::new(2);
    let mut above = McolumnContext::default();
    above.above[0] = true;
    ctx.commit(0, above, [true; BLOCKS_PER_MB]);

    let (above1, _) = ctx.snapshot(1);
    assert!(!above1.above[0]);
  }

  #[test]
  fn combine_matches_truth_table() {
    assert_eq!(combine_entropy_contexts(false, false), 0);
    assert_eq!(combine_entropy_contexts(true, false), 1);
    assert_eq!(combine_entropy_contexts(false, true), 1);
    assert_eq!(combine_entropy_contexts(true, true), 2);
  }
}
