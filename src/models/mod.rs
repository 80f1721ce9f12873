// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Domain data: labels, the label store and the playback/labeling session.

pub mod label;
pub mod session;
pub mod store;
