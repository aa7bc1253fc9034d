// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Frame-level knobs for the RDO core: qindex, speed, which reference frames
// are available, and whether to force intra-only mode decision. These live
// outside the core (cost.rs/mode_decision.rs just read an EncoderConfig)
// so the core stays free of CLI/file concerns.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EncoderError, Result};

#[derive(clap::Parser, Debug)]
#[command(name = "tinyavif", about = "Tiny AV1-family still-image/intra encoder")]
pub struct Cli {
  /// Input Y4M file
  pub input: PathBuf,

  /// Output AVIF/OBU file
  pub output: PathBuf,

  /// Base quantizer index, 0..=255 (0 = lossless-ish, 255 = max compression)
  #[arg(long, default_value_t = 100)]
  pub qindex: i32,

  /// Encoder speed, 0 (best quality) .. 16 (fastest)
  #[arg(long, default_value_t = 4)]
  pub speed: u32,

  /// Force every macroblock to intra prediction, ie. a key-frame-only encode
  #[arg(long, default_value_t = true)]
  pub intra_only: bool,

  /// Optional TOML sidecar overriding any of the above
  #[arg(long)]
  pub config: Option<PathBuf>,
}

// Mirrors Cli, but every field optional, for partial TOML overrides.
#[derive(Deserialize, Default, Debug)]
struct TomlOverride {
  qindex: Option<i32>,
  speed: Option<u32>,
  intra_only: Option<bool>,
  golden_frame_available: Option<bool>,
  altref_frame_available: Option<bool>,
  two_pass_ratio: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct EncoderConfig {
  pub qindex: i32,
  pub speed: u32,
  pub intra_only: bool,
  pub golden_frame_available: bool,
  pub altref_frame_available: bool,
  // Estimated bits-per-pixel ratio vs. a hypothetical first pass; 1.0 means
  // "no two-pass hint available", and RefFrameCoster/SpeedControl treat it
  // as a no-op in that case.
  pub two_pass_ratio: f32,
}

impl Default for EncoderConfig {
  fn default() -> Self {
    Self {
      qindex: 100,
      speed: 4,
      intra_only: true,
      golden_frame_available: false,
      altref_frame_available: false,
      two_pass_ratio: 1.0,
    }
  }
}

impl EncoderConfig {
  pub fn from_cli(cli: &Cli) -> Result<Self> {
    let mut cfg = Self {
      qindex: cli.qindex,
      speed: cli.speed,
      intra_only: cli.intra_only,
      ..Self::default()
    };

    if let Some(path) = &cli.config {
      cfg.apply_toml_override(path)?;
    }

    if !(0..=255).contains(&cfg.qindex) {
      return Err(EncoderError::InvalidQindex(cfg.qindex));
    }

    Ok(cfg)
  }

  fn apply_toml_override(&mut self, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|source| EncoderError::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;
    let over: TomlOverride = toml::from_str(&text).map_err(|source| EncoderError::ConfigParse {
      path: path.to_path_buf(),
      source,
    })?;

    if let Some(v) = over.qindex {
      self.qindex = v;
    }
    if let Some(v) = over.speed {
      self.speed = v;
    }
    if let Some(v) = over.intra_only {
      self.intra_only = v;
    }
    if let Some(v) = over.golden_frame_available {
      self.golden_frame_available = v;
    }
    if let Some(v) = over.altref_frame_available {
      self.altref_frame_available = v;
    }
    if let Some(v) = over.two_pass_ratio {
      self.two_pass_ratio = v;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_config_is_intra_only_and_midrange_q() {
    let cfg = EncoderConfig::default();
    assert!(cfg.intra_only);
    assert_eq!(cfg.qindex, 100);
    assert_eq!(cfg.two_pass_ratio, 1.0);
  }

  #[test]
  fn toml_override_only_touches_present_fields() {
    let mut cfg = EncoderConfig {
      qindex: 50,
      speed: 2,
      ..EncoderConfig::default()
    };
    let over = TomlOverride {
      speed: Some(9),
      ..Default::default()
    };
    if let Some(v) = over.speed {
      cfg.speed = v;
    }
    assert_eq!(cfg.qindex, 50);
    assert_eq!(cfg.speed, 9);
  }
}
