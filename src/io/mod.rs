// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: media decoding, playback, export and clipboard.

pub mod clipboard;
pub mod export;
pub mod media;
pub mod player;
