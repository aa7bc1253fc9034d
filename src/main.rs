// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

#![allow(dead_code)]

mod array2d;
mod auto_intra;
mod av1_encoder;
mod bitcode;
mod cdf;
mod config;
mod consts;
mod context;
mod cost;
mod entropycode;
mod enums;
mod error;
mod frame;
mod hls;
mod intra_search;
mod isobmff;
mod mode_decision;
mod mv;
mod recon;
mod refframe;
mod residual;
mod segmentation;
mod speed;
mod txfm;
mod util;
mod y4m;

use std::fs::File;
use std::io::prelude::*;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use av1_encoder::AV1Encoder;
use config::{Cli, EncoderConfig};
use error::Result;
use hls::{pack_avif, pack_obus};
use y4m::Y4MReader;

fn run() -> Result<()> {
  let cli = Cli::parse();
  let config = EncoderConfig::from_cli(&cli)?;

  let input_file = File::open(&cli.input).map_err(|source| error::EncoderError::Y4mRead {
    path: cli.input.clone(),
    source,
  })?;
  let mut reader = Y4MReader::new(input_file);
  let source = reader.read_frame();

  info!(
    "encoding {} ({}x{}) at qindex={} speed={}",
    cli.input.display(),
    reader.width(),
    reader.height(),
    config.qindex,
    config.speed
  );

  let encoder = AV1Encoder::new(reader.width(), reader.height());

  let sequence_header = encoder.generate_sequence_header();
  let frame_header = encoder.generate_frame_header(config.qindex as u8, false);
  let tile_data = encoder.encode_image(&source, config.qindex as u8);

  let write_avif = cli
    .output
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| ext.eq_ignore_ascii_case("avif"))
    .unwrap_or(false);

  let payload = if write_avif {
    let av1_data = pack_obus(&sequence_header, &frame_header, &tile_data, true);
    // BT.709 primaries/transfer/matrix, matching the values this encoder has
    // always hardcoded; full colorimetry passthrough is out of scope.
    pack_avif(&av1_data, reader.width(), reader.height(), 1, 1, 1)
  } else {
    pack_obus(&sequence_header, &frame_header, &tile_data, true)
  };

  let mut output_file = File::create(&cli.output).map_err(|source| error::EncoderError::OutputWrite {
    path: cli.output.clone(),
    source,
  })?;
  output_file
    .write_all(&payload)
    .map_err(|source| error::EncoderError::OutputWrite {
      path: cli.output.clone(),
      source,
    })?;

  Ok(())
}

fn main() -> ExitCode {
  env_logger::init();

  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {}", e);
      ExitCode::FAILURE
    }
  }
}
