// Copyright (c) 2024-2025, The tinyavif contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Error type for the ambient shell (config/file IO/muxing). The RDO core
// itself has no fallible operations and never returns this type.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EncoderError {
  #[error("failed to read input Y4M file {path}: {source}")]
  Y4mRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed Y4M header: {0}")]
  Y4mHeader(String),

  #[error("failed to read config file {path}: {source}")]
  ConfigRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  ConfigParse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid quantizer index {0}: must be 0..=255")]
  InvalidQindex(i32),

  #[error("failed to write output file {path}: {source}")]
  OutputWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T> = std::result::Result<T, EncoderError>;
