// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Per-reference-frame signalling cost, grounded on
// vp8_estimate_ref_frame_costs in rdopt.c: a chain of binary decisions
// (intra-vs-inter, then last-vs-not, then golden-vs-altref) each costed
// through is_inter_cdf/comp_ref_cdf/single_ref_p1_cdf/single_ref_p2_cdf.

use crate::cdf::{comp_ref_cdf, is_inter_cdf, single_ref_p1_cdf, single_ref_p2_cdf};
use crate::cost::bit_cost;
use crate::enums::RefFrame;

pub struct RefFrameCoster;

impl RefFrameCoster {
  // Bits to signal `refframe`, given which references this frame has
  // available (a key frame, or one with no golden/altref yet, costs
  // Last/Golden/AltRef as unreachable by returning a very high cost).
  pub fn cost(refframe: RefFrame, golden_available: bool, altref_available: bool) -> i32 {
    match refframe {
      RefFrame::Intra => bit_cost(0, is_inter_cdf[0] as u32),
      RefFrame::Last => {
        bit_cost(1, is_inter_cdf[0] as u32) + bit_cost(0, single_ref_p1_cdf[0] as u32)
      }
      RefFrame::Golden => {
        if !golden_available {
          return i32::MAX / 2;
        }
        bit_cost(1, is_inter_cdf[0] as u32)
          + bit_cost(1, single_ref_p1_cdf[0] as u32)
          + bit_cost(0, single_ref_p2_cdf[0] as u32)
      }
      RefFrame::AltRef => {
        if !altref_available {
          return i32::MAX / 2;
        }
        bit_cost(1, is_inter_cdf[0] as u32)
          + bit_cost(1, single_ref_p1_cdf[0] as u32)
          + bit_cost(1, single_ref_p2_cdf[0] as u32)
      }
    }
  }

  // Extra signalling cost for a compound (two-reference) prediction, beyond
  // the cost of its first reference frame.
  pub fn compound_cost() -> i32 {
    bit_cost(1, comp_ref_cdf[0] as u32)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unavailable_references_are_effectively_disallowed() {
    assert!(RefFrameCoster::cost(RefFrame::Golden, false, true) > 1_000_000);
    assert!(RefFrameCoster::cost(RefFrame::AltRef, true, false) > 1_000_000);
  }

  #[test]
  fn intra_is_cheaper_than_distant_inter_refs_when_available() {
    let intra = RefFrameCoster::cost(RefFrame::Intra, true, true);
    let altref = RefFrameCoster::cost(RefFrame::AltRef, true, true);
    assert!(intra < altref);
  }
}
