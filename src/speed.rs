// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Adaptive per-frame speed knob, grounded on vp8_auto_select_speed in
// rdopt.c: compares the wall-clock time spent in mode decision against a
// budget derived from the frame rate and a cpu_used dial, then nudges Speed
// up/down with the auto_speed_thresh hysteresis table.

use crate::consts::auto_speed_thresh;
use log::debug;

pub struct SpeedControl {
  pub speed: u32,
  avg_pick_mode_time_us: u64,
  avg_encode_time_us: u64,
}

impl SpeedControl {
  pub fn new() -> Self {
    Self {
      speed: 4,
      avg_pick_mode_time_us: 0,
      avg_encode_time_us: 0,
    }
  }

  // `cpu_used` is the standard -16..16 dial (higher = faster); this core
  // only ever runs in the real-time range, so Speed is kept within [4, 16].
  pub fn update(
    &mut self,
    frame_rate: f64,
    cpu_used: i32,
    pick_mode_time_us: u64,
    encode_time_us: u64,
  ) {
    self.avg_pick_mode_time_us = pick_mode_time_us;
    self.avg_encode_time_us = encode_time_us;

    let budget_us = ((1_000_000.0 / frame_rate) * (16 - cpu_used) as f64 / 16.0) as u64;

    if self.avg_pick_mode_time_us < budget_us
      && (self.avg_encode_time_us.saturating_sub(self.avg_pick_mode_time_us)) < budget_us
    {
      if self.avg_pick_mode_time_us == 0 {
        self.speed = 4;
      } else {
        if budget_us * 100 < self.avg_encode_time_us * 95 {
          self.speed = (self.speed + 2).min(16);
          self.avg_pick_mode_time_us = 0;
          self.avg_encode_time_us = 0;
        }

        let thresh = auto_speed_thresh[self.speed as usize] as u64;
        if budget_us * 100 > self.avg_encode_time_us * thresh {
          self.speed = (self.speed.saturating_sub(1)).max(4);
          self.avg_pick_mode_time_us = 0;
          self.avg_encode_time_us = 0;
        }
      }
    } else {
      self.speed = (self.speed + 4).min(16);
      self.avg_pick_mode_time_us = 0;
      self.avg_encode_time_us = 0;
    }

    debug!("speed control: speed={} budget_us={}", self.speed, budget_us);
  }
}

impl Default for SpeedControl {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_at_speed_4() {
    assert_eq!(SpeedControl::new().speed, 4);
  }

  #[test]
  fn slow_encodes_push_speed_up_towards_16() {
    let mut sc = SpeedControl::new();
    for _ in 0..10 {
      sc.update(30.0, 0, 100_000, 200_000);
    }
    assert!(sc.speed > 4);
    assert!(sc.speed <= 16);
  }

  #[test]
  fn speed_never_drops_below_4() {
    let mut sc = SpeedControl::new();
    for _ in 0..10 {
      sc.update(30.0, 0, 1, 1);
    }
    assert!(sc.speed >= 4);
  }
}
